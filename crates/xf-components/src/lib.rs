//! xf-components: exergy and exergoeconomic balances of process components.
//!
//! Provides models for:
//! - Simple heat exchangers (dissipative balance + regime-based cost model)
//! - Multi-stream heat exchangers (balance mode + pair-configured mode)
//! - Adiabatic phase separators
//! - Splitters
//!
//! Every model reads already-resolved stream records, reports diagnostics to a
//! caller-supplied sink, and stores its result on the [`Component`].
//!
//! # Example
//!
//! ```
//! use xf_components::{BalanceOptions, Component, ComponentKind, TracingSink};
//! use xf_core::Ambient;
//! use xf_streams::{ExergyPart, StreamRecord};
//!
//! let stream = |m: f64, e: f64| StreamRecord::material(m).with_specific(ExergyPart::Physical, e);
//! let mut flash = Component::new("F1", ComponentKind::AdiabaticSeparator)
//!     .with_inlet("feed", stream(10.0, 500_000.0))
//!     .with_outlet("gas", stream(7.0, 400_000.0))
//!     .with_outlet("water", stream(3.0, 600_000.0));
//!
//! let ambient = Ambient::from_si(298.15, 101_325.0).unwrap();
//! let balance = flash
//!     .calc_exergy_balance(&ambient, BalanceOptions::default(), &mut TracingSink)
//!     .unwrap();
//! assert_eq!(balance.e_d(), 400_000.0);
//! ```

pub mod balance;
pub(crate) mod common;
pub mod component;
pub mod cost_system;
pub mod diagnostics;
pub mod error;
pub(crate) mod flash;
pub mod mheatx;
pub mod regime;
pub(crate) mod sep;
pub(crate) mod simple_hx;

// Re-exports
pub use balance::{BalanceOptions, ExergyBalance, efficiency};
pub use component::{Component, ComponentKind};
pub use cost_system::{CostSystem, EquationKind, EquationLabel, PendingRow};
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, PortSide, Severity, TracingSink};
pub use error::{ComponentError, ComponentResult};
pub use mheatx::{DualModeDetail, PairPart, StreamPair, StreamPairConfiguration};
pub use regime::{CostIndicators, ProductStatus, Regime};
