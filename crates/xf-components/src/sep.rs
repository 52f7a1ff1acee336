//! Stream splitter / separator with one inlet and several outlets.
//!
//! `E_F` and `E_P` are the aggregate exergy of inlets and outlets. The part is
//! thermal when physical exergy is split, total physical otherwise.

use xf_streams::{ExergyPart, Ports, sum_exergy};

use crate::balance::{BalanceOptions, ExergyBalance};
use crate::common::{PortRule, check_ports};
use crate::component::ComponentKind;
use crate::diagnostics::Reporter;
use crate::error::ComponentResult;

const SPLITTER_RULE: PortRule = PortRule {
    min_inlets: 1,
    max_inlets: None,
    min_outlets: 2,
    max_outlets: None,
    expected: "at least one inlet and two outlets",
};

pub(crate) fn splitter_balance(
    component: &str,
    inl: &Ports,
    outl: &Ports,
    options: BalanceOptions,
    rep: &mut Reporter<'_>,
) -> ComponentResult<ExergyBalance> {
    check_ports(
        component,
        ComponentKind::Splitter,
        inl,
        outl,
        SPLITTER_RULE,
        rep,
    )?;

    let part = if options.split_physical_exergy {
        ExergyPart::Thermal
    } else {
        ExergyPart::Physical
    };

    Ok(ExergyBalance::from_fuel_product(
        sum_exergy(inl, part),
        sum_exergy(outl, part),
    ))
}
