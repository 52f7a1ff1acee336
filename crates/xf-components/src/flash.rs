//! Adiabatic, workless phase separator (flash drum).
//!
//! ## Model
//!
//! ```text
//! E_in  = sum(m * e_PH) over inlet material streams
//! E_out = sum(m * e_PH) over ALL outlet material streams, waste included
//! E_D   = E_in - E_out
//! E_F   = E_in,  E_P = E_out,  epsilon = E_P / E_F
//! ```
//!
//! Every outlet carries exergy across the boundary whatever its downstream
//! use, so reject streams count towards `E_out`. A negative `E_D` within
//! `1e-6 * max(E_in, 1)` is noise: `E_D` becomes zero and `E_P` is set to
//! `E_F` so that `E_D = E_F - E_P` still holds.

use xf_core::Real;
use xf_streams::{ExergyPart, Field, Ports};

use crate::balance::ExergyBalance;
use crate::common::{
    PortRule, Screened, check_ports, report_screened, screen_destruction, topology_error,
};
use crate::component::ComponentKind;
use crate::diagnostics::{DiagnosticKind, PortSide, Reporter};
use crate::error::ComponentResult;

const SEPARATOR_RULE: PortRule = PortRule {
    min_inlets: 1,
    max_inlets: Some(1),
    min_outlets: 2,
    max_outlets: None,
    expected: "exactly one inlet, at least two outlets and no heat or work",
};

fn material_total(ports: &Ports, side: PortSide, rep: &mut Reporter<'_>) -> Real {
    ports
        .iter()
        .filter(|(_, stream)| stream.kind.is_material())
        .map(|(name, stream)| {
            let m = rep.require(name, side, stream, Field::MassFlow);
            m * rep.require(name, side, stream, Field::Specific(ExergyPart::Physical))
        })
        .sum()
}

pub(crate) fn adiabatic_separator_balance(
    component: &str,
    inl: &Ports,
    outl: &Ports,
    rep: &mut Reporter<'_>,
) -> ComponentResult<ExergyBalance> {
    let kind = ComponentKind::AdiabaticSeparator;
    check_ports(component, kind, inl, outl, SEPARATOR_RULE, rep)?;

    let carries_energy = inl.values().chain(outl.values()).any(|s| !s.kind.is_material());
    if carries_energy {
        let err = topology_error(component, kind, inl, outl, SEPARATOR_RULE);
        rep.emit(DiagnosticKind::InvalidTopology {
            message: err.to_string(),
        });
        return Err(err);
    }

    let e_in = material_total(inl, PortSide::Inlet, rep);
    let e_out = material_total(outl, PortSide::Outlet, rep);

    let screened = screen_destruction(e_in - e_out, e_in);
    report_screened(screened, e_in, e_out, rep);
    let e_p = match screened {
        Screened::Clamped { .. } => e_in,
        Screened::Plausible(_) | Screened::Negative(_) => e_out,
    };

    Ok(ExergyBalance::from_fuel_product(e_in, e_p))
}
