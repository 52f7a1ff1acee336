//! Simple heat exchanger treated as a dissipative two-stream unit.
//!
//! ## Model
//!
//! Only the first material inlet and outlet are used; a second, unused port
//! pair (or an auxiliary heat or power connector) is tolerated and ignored.
//!
//! ```text
//! E_in  = m_in  * e_PH,in
//! E_out = m_out * e_PH,out
//! E_D   = E_in - E_out
//! E_F   = E_D,  E_P = 0,  epsilon undefined
//! ```
//!
//! A negative `E_D` within `1e-6 * max(|E_in|, 1)` is rounding noise and set
//! to zero. Beyond that it is kept and reported.

use xf_core::Real;
use xf_streams::{ExergyPart, Field, Ports, StreamRecord};

use crate::balance::ExergyBalance;
use crate::common::{PortRule, check_ports, report_screened, screen_destruction, topology_error};
use crate::component::ComponentKind;
use crate::diagnostics::{DiagnosticKind, PortSide, Reporter};
use crate::error::ComponentResult;

pub(crate) const TWO_STREAM_RULE: PortRule = PortRule {
    min_inlets: 1,
    max_inlets: Some(2),
    min_outlets: 1,
    max_outlets: Some(2),
    expected: "one material inlet and outlet (at most two ports of each)",
};

/// Active inlet and outlet of a two-stream unit, after port validation.
pub(crate) struct StreamPairRef<'a> {
    pub inlet_name: &'a str,
    pub inlet: &'a StreamRecord,
    pub outlet_name: &'a str,
    pub outlet: &'a StreamRecord,
}

pub(crate) fn active_pair<'a>(
    component: &str,
    inl: &'a Ports,
    outl: &'a Ports,
    rep: &mut Reporter<'_>,
) -> ComponentResult<StreamPairRef<'a>> {
    let kind = ComponentKind::SimpleHeatExchanger;
    check_ports(component, kind, inl, outl, TWO_STREAM_RULE, rep)?;
    let (Some((inlet_name, inlet)), Some((outlet_name, outlet))) =
        (inl.first_material(), outl.first_material())
    else {
        let err = topology_error(component, kind, inl, outl, TWO_STREAM_RULE);
        rep.emit(DiagnosticKind::InvalidTopology {
            message: err.to_string(),
        });
        return Err(err);
    };
    Ok(StreamPairRef {
        inlet_name,
        inlet,
        outlet_name,
        outlet,
    })
}

fn stream_exergy(
    name: &str,
    side: PortSide,
    stream: &StreamRecord,
    rep: &mut Reporter<'_>,
) -> Real {
    let m = rep.require(name, side, stream, Field::MassFlow);
    let e_ph = rep.require(name, side, stream, Field::Specific(ExergyPart::Physical));
    m * e_ph
}

pub(crate) fn dissipative_balance(
    component: &str,
    inl: &Ports,
    outl: &Ports,
    rep: &mut Reporter<'_>,
) -> ComponentResult<ExergyBalance> {
    let pair = active_pair(component, inl, outl, rep)?;

    let e_in = stream_exergy(pair.inlet_name, PortSide::Inlet, pair.inlet, rep);
    let e_out = stream_exergy(pair.outlet_name, PortSide::Outlet, pair.outlet, rep);

    let screened = screen_destruction(e_in - e_out, e_in.abs());
    let e_d = report_screened(screened, e_in, e_out, rep);

    Ok(ExergyBalance::dissipative(e_d))
}
