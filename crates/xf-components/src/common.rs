//! Common utilities for balance calculations.

use xf_core::{Real, noise_band};
use xf_streams::Ports;

use crate::component::ComponentKind;
use crate::diagnostics::{DiagnosticKind, Reporter};
use crate::error::{ComponentError, ComponentResult};

/// Allowed port counts for one topology.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PortRule {
    pub min_inlets: usize,
    pub max_inlets: Option<usize>,
    pub min_outlets: usize,
    pub max_outlets: Option<usize>,
    pub expected: &'static str,
}

impl PortRule {
    fn accepts(&self, inlets: usize, outlets: usize) -> bool {
        inlets >= self.min_inlets
            && outlets >= self.min_outlets
            && self.max_inlets.is_none_or(|max| inlets <= max)
            && self.max_outlets.is_none_or(|max| outlets <= max)
    }
}

pub(crate) fn topology_error(
    component: &str,
    kind: ComponentKind,
    inl: &Ports,
    outl: &Ports,
    rule: PortRule,
) -> ComponentError {
    ComponentError::InvalidTopology {
        component: component.to_string(),
        kind,
        inlets: inl.len(),
        outlets: outl.len(),
        expected: rule.expected,
    }
}

/// Fail with `InvalidTopology` (and an error diagnostic) unless the port counts fit `rule`.
pub(crate) fn check_ports(
    component: &str,
    kind: ComponentKind,
    inl: &Ports,
    outl: &Ports,
    rule: PortRule,
    rep: &mut Reporter<'_>,
) -> ComponentResult<()> {
    if rule.accepts(inl.len(), outl.len()) {
        return Ok(());
    }
    let err = topology_error(component, kind, inl, outl, rule);
    rep.emit(DiagnosticKind::InvalidTopology {
        message: err.to_string(),
    });
    Err(err)
}

/// Outcome of screening a destruction value against rounding noise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Screened {
    /// Non-negative, used as is.
    Plausible(Real),
    /// Negative inside the noise band; replaced by zero.
    Clamped { raw: Real },
    /// Negative beyond the noise band; kept unclamped.
    Negative(Real),
}

impl Screened {
    pub(crate) fn value(self) -> Real {
        match self {
            Screened::Plausible(v) | Screened::Negative(v) => v,
            Screened::Clamped { .. } => 0.0,
        }
    }
}

/// Classify `e_d` against the band `1e-6 * max(reference, 1)`.
pub(crate) fn screen_destruction(e_d: Real, reference: Real) -> Screened {
    let band = noise_band(reference);
    if e_d < -band {
        Screened::Negative(e_d)
    } else if e_d < 0.0 {
        Screened::Clamped { raw: e_d }
    } else {
        Screened::Plausible(e_d)
    }
}

/// Report the outcome of [`screen_destruction`] and return the value to use.
pub(crate) fn report_screened(
    screened: Screened,
    e_in: Real,
    e_out: Real,
    rep: &mut Reporter<'_>,
) -> Real {
    match screened {
        Screened::Clamped { raw } => rep.emit(DiagnosticKind::ClampedDestruction { e_d: raw }),
        Screened::Negative(e_d) => {
            rep.emit(DiagnosticKind::NegativeDestruction { e_in, e_out, e_d })
        }
        Screened::Plausible(_) => {}
    }
    screened.value()
}
