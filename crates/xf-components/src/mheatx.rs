//! Multi-stream heat exchanger with two balance modes.
//!
//! ## Model
//!
//! Balance mode always runs on total physical exergy and needs no labels:
//!
//! ```text
//! E_D_balance = sum(m * e_PH over inlets with m > 0) - sum(m * e_PH over outlets with m > 0)
//! ```
//!
//! Pair-configured mode runs when a [`StreamPairConfiguration`] is attached:
//!
//! ```text
//! E_F_spez = sum over fuel pairs    (E_in  - E_out)
//! E_P_spez = sum over product pairs (E_out - E_in)
//! E_D_spez = E_F_spez - E_P_spez
//! ```
//!
//! Fuel pairs default to the hot pairs. Stream exergy in this mode is the
//! stored absolute value of the selected part when present, else `m * e`.
//! The configured mode then becomes the component result, and both
//! consistency checks run. They only report; neither aborts.

use std::collections::HashSet;

use xf_core::{Real, relative_divergence};
use xf_streams::{ExergyPart, Field, Ports, material_exergy, stored_or_computed_exergy};

use crate::balance::ExergyBalance;
use crate::common::{PortRule, check_ports};
use crate::component::ComponentKind;
use crate::diagnostics::{DiagnosticKind, PortSide, Reporter};
use crate::error::ComponentResult;

/// Relative tolerance on stored absolute exergy vs. `m * e`.
pub const DIMENSIONAL_TOLERANCE: Real = 0.005;

/// Relative tolerance between balance-mode and pair-mode destruction.
pub const MODE_DIVERGENCE_TOLERANCE: Real = 0.01;

const MULTI_STREAM_RULE: PortRule = PortRule {
    min_inlets: 2,
    max_inlets: None,
    min_outlets: 2,
    max_outlets: None,
    expected: "at least two inlets and two outlets",
};

/// Exergy part a pair configuration balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairPart {
    #[default]
    Physical,
    Thermal,
    Mechanical,
}

impl PairPart {
    pub fn exergy_part(self) -> ExergyPart {
        match self {
            PairPart::Physical => ExergyPart::Physical,
            PairPart::Thermal => ExergyPart::Thermal,
            PairPart::Mechanical => ExergyPart::Mechanical,
        }
    }
}

/// One stream passing through the exchanger: inlet port name → outlet port name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamPair {
    pub inlet: String,
    pub outlet: String,
}

impl StreamPair {
    pub fn new(inlet: impl Into<String>, outlet: impl Into<String>) -> Self {
        Self {
            inlet: inlet.into(),
            outlet: outlet.into(),
        }
    }
}

/// User labelling of the streams of one multi-stream heat exchanger.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StreamPairConfiguration {
    pub part: PairPart,
    /// Streams giving off exergy.
    pub hot_pairs: Vec<StreamPair>,
    /// Streams taking up exergy.
    pub cold_pairs: Vec<StreamPair>,
    /// Streams whose exergy increase is the product.
    pub product_pairs: Vec<StreamPair>,
    /// Streams whose exergy decrease is the fuel; `None` means the hot pairs.
    pub fuel_pairs: Option<Vec<StreamPair>>,
}

impl StreamPairConfiguration {
    /// Pairs counted as fuel.
    pub fn fuel_pairs(&self) -> &[StreamPair] {
        self.fuel_pairs.as_deref().unwrap_or(&self.hot_pairs)
    }

    fn all_pairs(&self) -> impl Iterator<Item = &StreamPair> {
        self.hot_pairs
            .iter()
            .chain(&self.cold_pairs)
            .chain(&self.product_pairs)
            .chain(self.fuel_pairs())
    }
}

/// Both modes of a multi-stream balance, kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualModeDetail {
    balance: ExergyBalance,
    paired: Option<ExergyBalance>,
}

impl DualModeDetail {
    /// Configuration-independent balance-mode result.
    pub fn balance_mode(&self) -> &ExergyBalance {
        &self.balance
    }

    /// `E_D_balance`.
    pub fn e_d_balance(&self) -> Real {
        self.balance.e_d()
    }

    /// Pair-configured result, when a configuration was attached.
    pub fn paired_mode(&self) -> Option<&ExergyBalance> {
        self.paired.as_ref()
    }

    /// `|E_D_balance - E_D_spez| / max(1, |E_D_balance|, |E_D_spez|)`.
    pub fn relative_divergence(&self) -> Option<Real> {
        self.paired
            .map(|p| relative_divergence(self.balance.e_d(), p.e_d(), 1.0))
    }

    /// The result exposed as the component's `E_F`/`E_P`/`E_D`/`epsilon`.
    pub fn effective(&self) -> &ExergyBalance {
        self.paired.as_ref().unwrap_or(&self.balance)
    }
}

fn side_total(ports: &Ports, side: PortSide, rep: &mut Reporter<'_>) -> Real {
    ports
        .iter()
        .filter(|(_, stream)| stream.has_positive_flow())
        .map(|(name, stream)| {
            let m = stream.get_or_zero(Field::MassFlow);
            m * rep.require(name, side, stream, Field::Specific(ExergyPart::Physical))
        })
        .sum()
}

fn balance_mode(inl: &Ports, outl: &Ports, rep: &mut Reporter<'_>) -> ExergyBalance {
    let e_in = side_total(inl, PortSide::Inlet, rep);
    let e_out = side_total(outl, PortSide::Outlet, rep);
    ExergyBalance::from_fuel_product(e_in, e_out)
}

fn pair_stream_exergy(
    ports: &Ports,
    name: &str,
    side: PortSide,
    part: ExergyPart,
    rep: &mut Reporter<'_>,
) -> Real {
    let Some(stream) = ports.get(name) else {
        rep.emit(DiagnosticKind::MissingStream {
            stream: name.to_string(),
            side,
        });
        return 0.0;
    };
    match stored_or_computed_exergy(stream, part) {
        Some(e) => e,
        None => {
            rep.emit(DiagnosticKind::MissingField {
                stream: name.to_string(),
                side,
                field: Field::Specific(part),
            });
            0.0
        }
    }
}

/// Exergy change `E_in - E_out` of every pair, summed.
fn pair_drop(
    pairs: &[StreamPair],
    inl: &Ports,
    outl: &Ports,
    part: ExergyPart,
    rep: &mut Reporter<'_>,
) -> Real {
    pairs
        .iter()
        .map(|pair| {
            let e_in = pair_stream_exergy(inl, &pair.inlet, PortSide::Inlet, part, rep);
            let e_out = pair_stream_exergy(outl, &pair.outlet, PortSide::Outlet, part, rep);
            e_in - e_out
        })
        .sum()
}

fn paired_mode(
    config: &StreamPairConfiguration,
    inl: &Ports,
    outl: &Ports,
    rep: &mut Reporter<'_>,
) -> ExergyBalance {
    let part = config.part.exergy_part();
    let e_f = pair_drop(config.fuel_pairs(), inl, outl, part, rep);
    let e_p = -pair_drop(&config.product_pairs, inl, outl, part, rep);
    ExergyBalance::from_fuel_product(e_f, e_p)
}

fn check_dimensions(
    ports: &Ports,
    side: PortSide,
    part: ExergyPart,
    rep: &mut Reporter<'_>,
) {
    for (name, stream) in ports.iter().filter(|(_, s)| s.has_positive_flow()) {
        let (Some(stored), Some(expected)) =
            (stream.get(Field::Absolute(part)), material_exergy(stream, part))
        else {
            continue;
        };
        let deviation = (stored - expected).abs() / expected.abs().max(1.0);
        if deviation > DIMENSIONAL_TOLERANCE {
            rep.emit(DiagnosticKind::DimensionalMismatch {
                stream: name.to_string(),
                side,
                part,
                stored,
                expected,
                deviation,
            });
        }
    }
}

/// Ports that appear in no configured pair, as "inlet x"/"outlet y".
fn uncovered_streams(config: &StreamPairConfiguration, inl: &Ports, outl: &Ports) -> Vec<String> {
    let inlets: HashSet<&str> = config.all_pairs().map(|p| p.inlet.as_str()).collect();
    let outlets: HashSet<&str> = config.all_pairs().map(|p| p.outlet.as_str()).collect();

    let missing_in = inl
        .iter()
        .filter(|(name, s)| s.has_positive_flow() && !inlets.contains(name))
        .map(|(name, _)| format!("inlet {name}"));
    let missing_out = outl
        .iter()
        .filter(|(name, s)| s.has_positive_flow() && !outlets.contains(name))
        .map(|(name, _)| format!("outlet {name}"));
    missing_in.chain(missing_out).collect()
}

pub(crate) fn dual_mode_balance(
    component: &str,
    inl: &Ports,
    outl: &Ports,
    config: Option<&StreamPairConfiguration>,
    rep: &mut Reporter<'_>,
) -> ComponentResult<DualModeDetail> {
    check_ports(
        component,
        ComponentKind::MultiStreamHeatExchanger,
        inl,
        outl,
        MULTI_STREAM_RULE,
        rep,
    )?;

    let balance = balance_mode(inl, outl, rep);

    let Some(config) = config else {
        return Ok(DualModeDetail {
            balance,
            paired: None,
        });
    };

    let paired = paired_mode(config, inl, outl, rep);

    let part = config.part.exergy_part();
    check_dimensions(inl, PortSide::Inlet, part, rep);
    check_dimensions(outl, PortSide::Outlet, part, rep);

    let detail = DualModeDetail {
        balance,
        paired: Some(paired),
    };
    if let Some(relative) = detail.relative_divergence()
        && relative > MODE_DIVERGENCE_TOLERANCE
    {
        rep.emit(DiagnosticKind::ModeDivergence {
            balance: balance.e_d(),
            paired: paired.e_d(),
            relative,
            uncovered: uncovered_streams(config, inl, outl),
        });
    }

    Ok(detail)
}
