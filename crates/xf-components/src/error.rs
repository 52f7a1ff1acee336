//! Error types for component balances.

use thiserror::Error;
use xf_core::error::XfError;

use crate::component::ComponentKind;

/// Failures a balance call reports to its caller.
///
/// Only structural problems end up here. Missing data, implausible results and
/// consistency findings are diagnostics, not errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error(
        "{kind} '{component}' has {inlets} inlet(s) and {outlets} outlet(s) but requires {expected}"
    )]
    InvalidTopology {
        component: String,
        kind: ComponentKind,
        inlets: usize,
        outlets: usize,
        expected: &'static str,
    },

    #[error("{kind} '{component}' does not support {what}")]
    NotSupported {
        component: String,
        kind: ComponentKind,
        what: &'static str,
    },

    #[error("Exergy balance of '{component}' must be computed before {what}")]
    BalanceMissing {
        component: String,
        what: &'static str,
    },

    #[error("Cost system: {what}")]
    CostSystem { what: String },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ComponentError> for XfError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::InvalidTopology { .. } => XfError::Topology {
                what: e.to_string(),
            },
            ComponentError::NotSupported { what, .. } => XfError::InvalidArg { what },
            ComponentError::BalanceMissing { what, .. } => XfError::InvalidArg { what },
            ComponentError::CostSystem { .. } => XfError::Invariant {
                what: "cost system layout",
            },
        }
    }
}
