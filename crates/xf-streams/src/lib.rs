//! xf-streams: stream records attached to component ports.
//!
//! Provides:
//! - `StreamRecord` with explicitly optional fields and one defensive accessor
//! - `Ports`, an insertion-ordered name → record map
//! - Aggregate exergy summation shared by every component model
//!
//! # Example
//!
//! ```
//! use xf_streams::{ExergyPart, Ports, StreamRecord, sum_exergy};
//!
//! let mut inlets = Ports::new();
//! inlets.insert("feed", StreamRecord::material(10.0).with_specific(ExergyPart::Physical, 5.0e5));
//! inlets.insert("motor", StreamRecord::power(1.0e4));
//!
//! assert_eq!(sum_exergy(&inlets, ExergyPart::Physical), 5.0e6 + 1.0e4);
//! ```

pub mod ports;
pub mod stream;
pub mod summation;

// Re-exports
pub use ports::Ports;
pub use stream::{CostColumns, ExergyPart, Field, StreamKind, StreamRecord};
pub use summation::{material_exergy, stored_or_computed_exergy, sum_exergy, sum_material_exergy};
