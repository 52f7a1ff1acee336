//! Regime-based exergoeconomics of a two-stream heat exchanger.
//!
//! ## Model
//!
//! The heat flow `Q = m_out * h_out - m_in * h_in` and the position of each
//! stream temperature relative to ambient `T0` select a regime. Each regime
//! assigns product cost `C_P` and fuel cost `C_F` from the thermal (`C_T`),
//! mechanical (`C_M`) or physical (`C_PH`) cost rates of the streams:
//!
//! ```text
//! Q<0  T_in>=T0 T_out>=T0   C_P = C_T,out - C_T,in          C_F = C_PH,in - C_PH,out
//! Q<0  T_in>=T0 T_out<T0    C_P = C_T,out                   C_F = C_T,in + C_T,out + (C_M,in - C_M,out)
//! Q<0  T_in<=T0 T_out<T0    C_P = C_T,out - C_T,in          C_F = C_P + (C_M,in - C_M,out)
//! Q<0  T_in<T0  T_out>=T0   undefined                       undefined
//! Q>0  T_in>=T0 T_out>=T0   C_P = C_PH,out - C_PH,in        C_F = C_T,out - C_T,in
//! Q>0  T_in<T0  T_out>=T0   C_P = C_T,out + C_T,in          C_F = C_T,in + (C_M,in - C_M,out)
//! Q>0  T_in<T0  T_out<=T0   C_P = C_T,in - C_T,out + (C_M,out - C_M,in)
//!                                                           C_F = C_T,in - C_T,out
//! Q>0  T_in>=T0 T_out<T0    undefined                       undefined
//! Q=0                       undefined (no product)          C_F = C_PH,in - C_PH,out
//! ```
//!
//! Indicators follow as `c_F = C_F/E_F`, `c_P = C_P/E_P`, `C_D = c_F*E_D`,
//! `r = (c_P - c_F)/c_F` and `f = Z/(Z + C_D)`. A zero or undefined
//! denominator yields an undefined indicator.

use std::fmt;

use xf_core::{Ambient, Real, defined_ratio};
use xf_streams::{ExergyPart, Field, Ports, StreamRecord, stored_or_computed_exergy};

use crate::balance::ExergyBalance;
use crate::cost_system::{CostSystem, EquationKind, PendingRow};
use crate::diagnostics::{DiagnosticKind, PortSide, Reporter};
use crate::error::{ComponentError, ComponentResult};
use crate::simple_hx::{StreamPairRef, active_pair};

/// Heat-transfer direction and temperature position of a stream pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    /// Heat released, both streams at or above ambient.
    ReleasedAboveAmbient,
    /// Heat released, inlet at or above ambient, outlet below.
    ReleasedCrossingAmbient,
    /// Heat released, both streams below ambient.
    ReleasedBelowAmbient,
    /// Heat released while the stream warms from below to above ambient.
    ReleasedRisingAcrossAmbient,
    /// Heat added, both streams at or above ambient.
    AddedAboveAmbient,
    /// Heat added, inlet below ambient, outlet at or above.
    AddedCrossingAmbient,
    /// Heat added, both streams below ambient.
    AddedBelowAmbient,
    /// Heat added while the stream cools from above to below ambient.
    AddedFallingAcrossAmbient,
    /// No heat transfer: fully dissipative.
    Dissipative,
    /// Heat flow or a stream temperature cannot be determined from the data.
    Undetermined,
}

impl Regime {
    /// Select the regime for heat flow `q` and the stream temperatures.
    pub fn classify(q: Real, t_in: Option<Real>, t_out: Option<Real>, t0: Real) -> Regime {
        if q == 0.0 {
            return Regime::Dissipative;
        }
        let (Some(t_in), Some(t_out)) = (t_in, t_out) else {
            return Regime::Undetermined;
        };

        if q < 0.0 {
            if t_in >= t0 && t_out >= t0 {
                Regime::ReleasedAboveAmbient
            } else if t_in >= t0 && t_out < t0 {
                Regime::ReleasedCrossingAmbient
            } else if t_in <= t0 && t_out < t0 {
                Regime::ReleasedBelowAmbient
            } else {
                Regime::ReleasedRisingAcrossAmbient
            }
        } else if t_in >= t0 && t_out >= t0 {
            Regime::AddedAboveAmbient
        } else if t_in < t0 && t_out >= t0 {
            Regime::AddedCrossingAmbient
        } else if t_in < t0 && t_out <= t0 {
            Regime::AddedBelowAmbient
        } else {
            Regime::AddedFallingAcrossAmbient
        }
    }

    /// True when a cost rule exists for this regime.
    pub fn has_cost_rule(self) -> bool {
        !matches!(
            self,
            Regime::ReleasedRisingAcrossAmbient
                | Regime::AddedFallingAcrossAmbient
                | Regime::Undetermined
        )
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Regime::ReleasedAboveAmbient => "heat release above ambient",
            Regime::ReleasedCrossingAmbient => "heat release crossing ambient temperature",
            Regime::ReleasedBelowAmbient => "heat release below ambient",
            Regime::ReleasedRisingAcrossAmbient => "heat release while rising across ambient",
            Regime::AddedAboveAmbient => "heat absorption above ambient",
            Regime::AddedCrossingAmbient => "heat absorption crossing ambient temperature",
            Regime::AddedBelowAmbient => "heat absorption below ambient",
            Regime::AddedFallingAcrossAmbient => "heat absorption while falling across ambient",
            Regime::Dissipative => "fully dissipative (Q = 0)",
            Regime::Undetermined => "undetermined regime (missing stream data)",
        };
        f.write_str(text)
    }
}

/// How to read an undefined or defined product cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductStatus {
    /// `C_P` is defined.
    Priced,
    /// The unit has no product (`Q = 0`); `C_P` is undefined by definition.
    NoProduct,
    /// No cost rule covers the regime; `C_P` is undefined.
    Unresolved,
}

/// Cost rates and exergoeconomic indicators of one component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostIndicators {
    pub regime: Regime,
    /// `C_F`, fuel cost rate.
    pub cost_fuel: Option<Real>,
    /// `C_P`, product cost rate.
    pub cost_product: Option<Real>,
    /// `c_F`, specific fuel cost.
    pub specific_cost_fuel: Option<Real>,
    /// `c_P`, specific product cost.
    pub specific_cost_product: Option<Real>,
    /// `C_D`, cost rate of exergy destruction.
    pub cost_destruction: Option<Real>,
    /// `r`, relative cost difference.
    pub relative_cost_difference: Option<Real>,
    /// `f`, exergoeconomic factor.
    pub exergoeconomic_factor: Option<Real>,
}

impl CostIndicators {
    /// Derive indicators from the attributed cost rates and the exergy balance.
    pub fn derive(
        regime: Regime,
        cost_fuel: Option<Real>,
        cost_product: Option<Real>,
        balance: &ExergyBalance,
        z_costs: Real,
    ) -> Self {
        let c_f = defined_ratio(cost_fuel, Some(balance.e_f()));
        let c_p = defined_ratio(cost_product, Some(balance.e_p()));
        let cost_d = c_f.map(|c| c * balance.e_d());
        let r = match (c_p, c_f) {
            (Some(c_p), Some(c_f)) => defined_ratio(Some(c_p - c_f), Some(c_f)),
            _ => None,
        };
        let f = cost_d.and_then(|cost_d| defined_ratio(Some(z_costs), Some(z_costs + cost_d)));

        Self {
            regime,
            cost_fuel,
            cost_product,
            specific_cost_fuel: c_f,
            specific_cost_product: c_p,
            cost_destruction: cost_d,
            relative_cost_difference: r,
            exergoeconomic_factor: f,
        }
    }

    pub fn product_status(&self) -> ProductStatus {
        match (self.regime, self.cost_product) {
            (_, Some(_)) => ProductStatus::Priced,
            (Regime::Dissipative, None) => ProductStatus::NoProduct,
            (_, None) => ProductStatus::Unresolved,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum End {
    In,
    Out,
}

/// `(C_P, C_F)` for a regime; `cost` reads one cost rate of one end.
fn attribute_costs(
    regime: Regime,
    mut cost: impl FnMut(End, ExergyPart) -> Real,
) -> (Option<Real>, Option<Real>) {
    use ExergyPart::{Mechanical as M, Physical as PH, Thermal as T};
    use End::{In, Out};

    match regime {
        Regime::ReleasedAboveAmbient => {
            let c_p = cost(Out, T) - cost(In, T);
            let c_f = cost(In, PH) - cost(Out, PH);
            (Some(c_p), Some(c_f))
        }
        Regime::ReleasedCrossingAmbient => {
            let t_out = cost(Out, T);
            let c_f = cost(In, T) + t_out + (cost(In, M) - cost(Out, M));
            (Some(t_out), Some(c_f))
        }
        Regime::ReleasedBelowAmbient => {
            let c_p = cost(Out, T) - cost(In, T);
            let c_f = c_p + (cost(In, M) - cost(Out, M));
            (Some(c_p), Some(c_f))
        }
        Regime::AddedAboveAmbient => {
            let c_p = cost(Out, PH) - cost(In, PH);
            let c_f = cost(Out, T) - cost(In, T);
            (Some(c_p), Some(c_f))
        }
        Regime::AddedCrossingAmbient => {
            let t_in = cost(In, T);
            let c_p = cost(Out, T) + t_in;
            let c_f = t_in + (cost(In, M) - cost(Out, M));
            (Some(c_p), Some(c_f))
        }
        Regime::AddedBelowAmbient => {
            let dt = cost(In, T) - cost(Out, T);
            let c_p = dt + (cost(Out, M) - cost(In, M));
            (Some(c_p), Some(dt))
        }
        Regime::Dissipative => (None, Some(cost(In, PH) - cost(Out, PH))),
        Regime::ReleasedRisingAcrossAmbient
        | Regime::AddedFallingAcrossAmbient
        | Regime::Undetermined => (None, None),
    }
}

/// `Q = m_out * h_out - m_in * h_in`; `None` when any of the four is missing.
fn heat_flow(pair: &StreamPairRef<'_>, rep: &mut Reporter<'_>) -> Option<Real> {
    let m_in = rep.lookup(pair.inlet_name, PortSide::Inlet, pair.inlet, Field::MassFlow);
    let h_in = rep.lookup(pair.inlet_name, PortSide::Inlet, pair.inlet, Field::Enthalpy);
    let m_out = rep.lookup(pair.outlet_name, PortSide::Outlet, pair.outlet, Field::MassFlow);
    let h_out = rep.lookup(pair.outlet_name, PortSide::Outlet, pair.outlet, Field::Enthalpy);
    Some(m_out? * h_out? - m_in? * h_in?)
}

fn classify_pair(pair: &StreamPairRef<'_>, t0: Real, rep: &mut Reporter<'_>) -> Regime {
    // A missing flow or enthalpy must not read as Q = 0 (no product).
    let Some(q) = heat_flow(pair, rep) else {
        return Regime::Undetermined;
    };
    if q == 0.0 {
        return Regime::Dissipative;
    }
    let t_in = rep.lookup(pair.inlet_name, PortSide::Inlet, pair.inlet, Field::Temperature);
    let t_out = rep.lookup(pair.outlet_name, PortSide::Outlet, pair.outlet, Field::Temperature);
    Regime::classify(q, t_in, t_out, t0)
}

pub(crate) fn regime_cost_balance(
    component: &str,
    inl: &Ports,
    outl: &Ports,
    balance: &ExergyBalance,
    z_costs: Real,
    ambient: &Ambient,
    rep: &mut Reporter<'_>,
) -> ComponentResult<CostIndicators> {
    let pair = active_pair(component, inl, outl, rep)?;
    let regime = classify_pair(&pair, ambient.t0_k(), rep);

    let (cost_product, cost_fuel) = attribute_costs(regime, |end, part| match end {
        End::In => rep.require(pair.inlet_name, PortSide::Inlet, pair.inlet, Field::Cost(part)),
        End::Out => rep.require(
            pair.outlet_name,
            PortSide::Outlet,
            pair.outlet,
            Field::Cost(part),
        ),
    });

    rep.emit(DiagnosticKind::CostSummary {
        regime,
        cost_fuel,
        cost_product,
    });

    Ok(CostIndicators::derive(
        regime,
        cost_fuel,
        cost_product,
        balance,
        z_costs,
    ))
}

/// `1 / E_part` when the stream carries that part, else `1`.
fn cost_coefficient(stream: &StreamRecord, part: ExergyPart) -> Real {
    match stream.get(Field::Specific(part)) {
        Some(e) if e != 0.0 => {
            defined_ratio(Some(1.0), stored_or_computed_exergy(stream, part)).unwrap_or(1.0)
        }
        _ => 1.0,
    }
}

fn cost_column(
    name: &str,
    stream: &StreamRecord,
    part: ExergyPart,
) -> ComponentResult<usize> {
    stream
        .cost_columns()
        .and_then(|cols| cols.column(part))
        .ok_or_else(|| ComponentError::CostSystem {
            what: format!("stream '{name}' has no cost column for C_{}", part.suffix()),
        })
}

fn equality_row(
    component: &str,
    pair: &StreamPairRef<'_>,
    part: ExergyPart,
    kind: EquationKind,
    property: &'static str,
) -> ComponentResult<PendingRow> {
    let col_in = cost_column(pair.inlet_name, pair.inlet, part)?;
    let col_out = cost_column(pair.outlet_name, pair.outlet, part)?;
    Ok(PendingRow {
        coefficients: vec![
            (col_in, cost_coefficient(pair.inlet, part)),
            (col_out, -cost_coefficient(pair.outlet, part)),
        ],
        rhs: 0.0,
        kind,
        objects: vec![
            component.to_string(),
            pair.inlet_name.to_string(),
            pair.outlet_name.to_string(),
        ],
        property,
    })
}

/// Append the auxiliary cost equations of a two-stream heat exchanger.
///
/// Always `c_M,in = c_M,out`; `c_CH,in = c_CH,out` when chemical exergy is
/// enabled; the thermal F-rule `c_T,in = c_T,out` only when heat is released
/// above ambient. Regimes without a rule are reported, not skipped silently.
/// Either every equation is appended or `system` is left untouched.
pub(crate) fn regime_aux_equations(
    component: &str,
    inl: &Ports,
    outl: &Ports,
    ambient: &Ambient,
    chemical_exergy_enabled: bool,
    system: &mut CostSystem,
    rep: &mut Reporter<'_>,
) -> ComponentResult<()> {
    use EquationKind::{AuxEquality, AuxFRule};

    let pair = active_pair(component, inl, outl, rep)?;

    let mut planned = vec![(ExergyPart::Mechanical, AuxEquality, "c_M")];
    if chemical_exergy_enabled {
        planned.push((ExergyPart::Chemical, AuxEquality, "c_CH"));
    }

    let regime = classify_pair(&pair, ambient.t0_k(), rep);
    match regime {
        Regime::ReleasedAboveAmbient => planned.push((ExergyPart::Thermal, AuxFRule, "c_T")),
        // The cost balance itself fixes c_T,out.
        Regime::AddedAboveAmbient | Regime::AddedBelowAmbient | Regime::Dissipative => {}
        Regime::ReleasedCrossingAmbient
        | Regime::ReleasedBelowAmbient
        | Regime::ReleasedRisingAcrossAmbient
        | Regime::AddedCrossingAmbient
        | Regime::AddedFallingAcrossAmbient
        | Regime::Undetermined => rep.emit(DiagnosticKind::UnimplementedRegime { regime }),
    }

    let rows = planned
        .into_iter()
        .map(|(part, kind, property)| equality_row(component, &pair, part, kind, property))
        .collect::<ComponentResult<Vec<_>>>()?;
    system.push_rows(rows)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: Real = 298.0;

    #[test]
    fn classify_table() {
        use Regime::*;
        let cases = [
            (-1.0, 350.0, 320.0, ReleasedAboveAmbient),
            (-1.0, 350.0, 280.0, ReleasedCrossingAmbient),
            (-1.0, 298.0, 280.0, ReleasedCrossingAmbient),
            (-1.0, 290.0, 280.0, ReleasedBelowAmbient),
            (-1.0, 280.0, 310.0, ReleasedRisingAcrossAmbient),
            (1.0, 300.0, 350.0, AddedAboveAmbient),
            (1.0, 280.0, 350.0, AddedCrossingAmbient),
            (1.0, 280.0, 298.0, AddedCrossingAmbient),
            (1.0, 270.0, 280.0, AddedBelowAmbient),
            (1.0, 310.0, 280.0, AddedFallingAcrossAmbient),
            (0.0, 310.0, 280.0, Dissipative),
        ];
        for (q, t_in, t_out, expected) in cases {
            assert_eq!(
                Regime::classify(q, Some(t_in), Some(t_out), T0),
                expected,
                "q={q} t_in={t_in} t_out={t_out}"
            );
        }
        assert_eq!(Regime::classify(-1.0, None, Some(300.0), T0), Undetermined);
        assert_eq!(Regime::classify(0.0, None, None, T0), Dissipative);
    }

    fn costs(end: End, part: ExergyPart) -> Real {
        // C_PH = 100/50, C_T = 60/20, C_M = 40/30 for in/out.
        match (end, part) {
            (End::In, ExergyPart::Physical) => 100.0,
            (End::Out, ExergyPart::Physical) => 50.0,
            (End::In, ExergyPart::Thermal) => 60.0,
            (End::Out, ExergyPart::Thermal) => 20.0,
            (End::In, ExergyPart::Mechanical) => 40.0,
            (End::Out, ExergyPart::Mechanical) => 30.0,
            _ => 0.0,
        }
    }

    #[test]
    fn attribution_rules() {
        use Regime::*;
        let expect = [
            (ReleasedAboveAmbient, Some(20.0 - 60.0), Some(100.0 - 50.0)),
            (ReleasedCrossingAmbient, Some(20.0), Some(60.0 + 20.0 + 10.0)),
            (ReleasedBelowAmbient, Some(-40.0), Some(-40.0 + 10.0)),
            (AddedAboveAmbient, Some(-50.0), Some(-40.0)),
            (AddedCrossingAmbient, Some(80.0), Some(60.0 + 10.0)),
            (AddedBelowAmbient, Some(40.0 - 10.0), Some(40.0)),
            (Dissipative, None, Some(50.0)),
            (ReleasedRisingAcrossAmbient, None, None),
            (AddedFallingAcrossAmbient, None, None),
        ];
        for (regime, c_p, c_f) in expect {
            assert_eq!(attribute_costs(regime, costs), (c_p, c_f), "{regime}");
        }
    }

    #[test]
    fn indicators_guard_zero_denominators() {
        let balance = ExergyBalance::dissipative(500.0);
        let ind = CostIndicators::derive(Regime::Dissipative, Some(10.0), None, &balance, 2.0);

        assert_eq!(ind.specific_cost_fuel, Some(10.0 / 500.0));
        assert_eq!(ind.specific_cost_product, None);
        assert!((ind.cost_destruction.unwrap() - 10.0).abs() < 1e-12);
        assert_eq!(ind.relative_cost_difference, None);
        assert!((ind.exergoeconomic_factor.unwrap() - 2.0 / 12.0).abs() < 1e-12);
        assert_eq!(ind.product_status(), ProductStatus::NoProduct);

        let zero = ExergyBalance::dissipative(0.0);
        let ind = CostIndicators::derive(Regime::Dissipative, Some(10.0), None, &zero, 0.0);
        assert_eq!(ind.specific_cost_fuel, None);
        assert_eq!(ind.cost_destruction, None);
        assert_eq!(ind.exergoeconomic_factor, None);
    }

    #[test]
    fn indicators_with_product() {
        let balance = ExergyBalance::from_fuel_product(1000.0, 800.0);
        let ind =
            CostIndicators::derive(Regime::AddedAboveAmbient, Some(10.0), Some(12.0), &balance, 1.0);
        let c_f = 0.01;
        let c_p = 0.015;
        assert!((ind.specific_cost_fuel.unwrap() - c_f).abs() < 1e-15);
        assert!((ind.specific_cost_product.unwrap() - c_p).abs() < 1e-15);
        assert!((ind.cost_destruction.unwrap() - 2.0).abs() < 1e-12);
        assert!((ind.relative_cost_difference.unwrap() - 0.5).abs() < 1e-12);
        assert!((ind.exergoeconomic_factor.unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(ind.product_status(), ProductStatus::Priced);
    }

    #[test]
    fn coefficient_falls_back_to_one() {
        let s = StreamRecord::material(2.0)
            .with_specific(ExergyPart::Mechanical, 50.0)
            .with_specific(ExergyPart::Thermal, 0.0);
        assert_eq!(cost_coefficient(&s, ExergyPart::Mechanical), 1.0 / 100.0);
        assert_eq!(cost_coefficient(&s, ExergyPart::Thermal), 1.0);
        assert_eq!(cost_coefficient(&s, ExergyPart::Chemical), 1.0);

        let stored = s.with_absolute(ExergyPart::Mechanical, 200.0);
        assert_eq!(cost_coefficient(&stored, ExergyPart::Mechanical), 1.0 / 200.0);
    }

    #[test]
    fn missing_enthalpy_is_undetermined() {
        use crate::diagnostics::Diagnostic;

        let inlet = StreamRecord::material(1.0).with_temperature(350.0);
        let outlet = StreamRecord::material(1.0)
            .with_temperature(320.0)
            .with_enthalpy(1.0);
        let pair = StreamPairRef {
            inlet_name: "a",
            inlet: &inlet,
            outlet_name: "b",
            outlet: &outlet,
        };

        let mut events: Vec<Diagnostic> = Vec::new();
        let regime = {
            let mut rep = Reporter::new("SHX", &mut events);
            classify_pair(&pair, T0, &mut rep)
        };

        assert_eq!(regime, Regime::Undetermined);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0].kind,
            DiagnosticKind::MissingField {
                side: PortSide::Inlet,
                field: Field::Enthalpy,
                ..
            }
        ));
    }
}
