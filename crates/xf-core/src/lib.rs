//! xf-core: stable foundation for exergoflow.
//!
//! Contains:
//! - units (uom SI types + constructors, ambient reference state)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{XfError, XfResult};
pub use numeric::*;
pub use units::*;
