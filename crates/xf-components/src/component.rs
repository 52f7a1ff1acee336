//! Component model and the single balance interface.

use std::fmt;

use xf_core::{Ambient, Real};
use xf_streams::{Ports, StreamRecord};

use crate::balance::{BalanceOptions, ExergyBalance};
use crate::cost_system::CostSystem;
use crate::diagnostics::{DiagnosticKind, DiagnosticSink, Reporter};
use crate::error::{ComponentError, ComponentResult};
use crate::flash::adiabatic_separator_balance;
use crate::mheatx::{DualModeDetail, StreamPairConfiguration, dual_mode_balance};
use crate::regime::{CostIndicators, regime_aux_equations, regime_cost_balance};
use crate::sep::splitter_balance;
use crate::simple_hx::dissipative_balance;

/// Topology of a component; selects the balance model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// One inlet, one outlet, dissipative; also carries the regime cost model.
    SimpleHeatExchanger,
    /// N inlets, M outlets, balance mode plus optional pair-configured mode.
    MultiStreamHeatExchanger,
    /// One inlet, several outlets, no heat or work.
    AdiabaticSeparator,
    /// One inlet, several outlets, aggregate exergy in and out.
    Splitter,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentKind::SimpleHeatExchanger => "SimpleHeatExchanger",
            ComponentKind::MultiStreamHeatExchanger => "MultiStreamHeatExchanger",
            ComponentKind::AdiabaticSeparator => "AdiabaticSeparator",
            ComponentKind::Splitter => "Splitter",
        };
        f.write_str(name)
    }
}

/// A fuel/product computation unit with its ports and latest results.
///
/// Stream records are only read. A balance call replaces the results of the
/// previous call, or clears them when it fails.
#[derive(Debug, Clone)]
pub struct Component {
    name: String,
    kind: ComponentKind,
    pub inl: Ports,
    pub outl: Ports,
    /// Investment cost rate `Z`.
    z_costs: Real,
    pair_config: Option<StreamPairConfiguration>,
    balance: Option<ExergyBalance>,
    dual_mode: Option<DualModeDetail>,
    costs: Option<CostIndicators>,
}

impl Component {
    pub fn new(name: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            name: name.into(),
            kind,
            inl: Ports::new(),
            outl: Ports::new(),
            z_costs: 0.0,
            pair_config: None,
            balance: None,
            dual_mode: None,
            costs: None,
        }
    }

    pub fn with_inlet(mut self, name: impl Into<String>, stream: StreamRecord) -> Self {
        self.inl.insert(name, stream);
        self
    }

    pub fn with_outlet(mut self, name: impl Into<String>, stream: StreamRecord) -> Self {
        self.outl.insert(name, stream);
        self
    }

    pub fn with_z_costs(mut self, z_costs: Real) -> Self {
        self.z_costs = z_costs;
        self
    }

    pub fn with_pair_config(mut self, config: StreamPairConfiguration) -> Self {
        self.pair_config = Some(config);
        self
    }

    pub fn set_pair_config(&mut self, config: Option<StreamPairConfiguration>) {
        self.pair_config = config;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn z_costs(&self) -> Real {
        self.z_costs
    }

    pub fn pair_config(&self) -> Option<&StreamPairConfiguration> {
        self.pair_config.as_ref()
    }

    /// Latest exergy balance.
    pub fn balance(&self) -> Option<&ExergyBalance> {
        self.balance.as_ref()
    }

    /// Both modes of the latest multi-stream balance.
    pub fn dual_mode(&self) -> Option<&DualModeDetail> {
        self.dual_mode.as_ref()
    }

    /// Latest cost indicators.
    pub fn costs(&self) -> Option<&CostIndicators> {
        self.costs.as_ref()
    }

    /// Compute and store the exergy balance.
    pub fn calc_exergy_balance(
        &mut self,
        ambient: &Ambient,
        options: BalanceOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> ComponentResult<ExergyBalance> {
        self.balance = None;
        self.dual_mode = None;
        self.costs = None;

        let mut rep = Reporter::new(&self.name, sink);
        rep.emit(DiagnosticKind::Inputs {
            inlets: self.inl.names().map(str::to_string).collect(),
            outlets: self.outl.names().map(str::to_string).collect(),
            t0_k: ambient.t0_k(),
        });

        let balance = match self.kind {
            ComponentKind::SimpleHeatExchanger => {
                dissipative_balance(&self.name, &self.inl, &self.outl, &mut rep)?
            }
            ComponentKind::MultiStreamHeatExchanger => {
                let detail = dual_mode_balance(
                    &self.name,
                    &self.inl,
                    &self.outl,
                    self.pair_config.as_ref(),
                    &mut rep,
                )?;
                self.dual_mode = Some(detail);
                *detail.effective()
            }
            ComponentKind::AdiabaticSeparator => {
                adiabatic_separator_balance(&self.name, &self.inl, &self.outl, &mut rep)?
            }
            ComponentKind::Splitter => {
                splitter_balance(&self.name, &self.inl, &self.outl, options, &mut rep)?
            }
        };

        rep.emit(DiagnosticKind::Summary {
            e_f: balance.e_f(),
            e_p: balance.e_p(),
            e_d: balance.e_d(),
            epsilon: balance.epsilon(),
        });

        self.balance = Some(balance);
        Ok(balance)
    }

    /// Attribute cost rates and derive exergoeconomic indicators.
    ///
    /// Runs on a simple heat exchanger after its exergy balance, once cost
    /// rates have been written onto its stream records.
    pub fn exergoeconomic_balance(
        &mut self,
        ambient: &Ambient,
        sink: &mut dyn DiagnosticSink,
    ) -> ComponentResult<CostIndicators> {
        self.require_regime_model("exergoeconomic balance")?;
        let balance = self.balance.ok_or_else(|| ComponentError::BalanceMissing {
            component: self.name.clone(),
            what: "exergoeconomic balance",
        })?;

        let mut rep = Reporter::new(&self.name, sink);
        let costs = regime_cost_balance(
            &self.name,
            &self.inl,
            &self.outl,
            &balance,
            self.z_costs,
            ambient,
            &mut rep,
        )?;
        self.costs = Some(costs);
        Ok(costs)
    }

    /// Append this component's auxiliary cost equations to `system`.
    pub fn aux_equations(
        &self,
        system: &mut CostSystem,
        ambient: &Ambient,
        options: BalanceOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> ComponentResult<()> {
        self.require_regime_model("auxiliary cost equations")?;
        let mut rep = Reporter::new(&self.name, sink);
        regime_aux_equations(
            &self.name,
            &self.inl,
            &self.outl,
            ambient,
            options.chemical_exergy_enabled,
            system,
            &mut rep,
        )
    }

    fn require_regime_model(&self, what: &'static str) -> ComponentResult<()> {
        match self.kind {
            ComponentKind::SimpleHeatExchanger => Ok(()),
            kind => Err(ComponentError::NotSupported {
                component: self.name.clone(),
                kind,
                what,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Diagnostic, Severity};
    use xf_streams::ExergyPart;

    fn ambient() -> Ambient {
        Ambient::from_si(298.15, 101_325.0).unwrap()
    }

    fn mat(m: Real, e_ph: Real) -> StreamRecord {
        StreamRecord::material(m).with_specific(ExergyPart::Physical, e_ph)
    }

    #[test]
    fn failed_call_clears_previous_results() {
        let mut comp = Component::new("S", ComponentKind::Splitter)
            .with_inlet("in", mat(1.0, 10.0))
            .with_outlet("a", mat(0.5, 10.0))
            .with_outlet("b", mat(0.5, 10.0));
        let mut events: Vec<Diagnostic> = Vec::new();
        comp.calc_exergy_balance(&ambient(), BalanceOptions::default(), &mut events)
            .unwrap();
        assert!(comp.balance().is_some());

        comp.outl = Ports::new();
        assert!(
            comp.calc_exergy_balance(&ambient(), BalanceOptions::default(), &mut events)
                .is_err()
        );
        assert!(comp.balance().is_none());
        assert!(events.iter().any(|d| d.severity() == Severity::Error));
    }

    #[test]
    fn summary_and_inputs_are_emitted() {
        let mut comp = Component::new("S", ComponentKind::Splitter)
            .with_inlet("in", mat(1.0, 10.0))
            .with_outlet("a", mat(0.5, 10.0))
            .with_outlet("b", mat(0.5, 8.0));
        let mut events: Vec<Diagnostic> = Vec::new();
        comp.calc_exergy_balance(&ambient(), BalanceOptions::default(), &mut events)
            .unwrap();

        assert!(matches!(
            &events[0].kind,
            DiagnosticKind::Inputs { inlets, outlets, .. } if inlets == &["in"] && outlets.len() == 2
        ));
        assert!(matches!(
            events.last().map(|d| &d.kind),
            Some(DiagnosticKind::Summary { e_d, .. }) if (*e_d - 1.0).abs() < 1e-12
        ));
    }

    #[test]
    fn cost_model_only_on_simple_heat_exchanger() {
        let mut comp = Component::new("F", ComponentKind::AdiabaticSeparator);
        let mut events: Vec<Diagnostic> = Vec::new();
        let err = comp.exergoeconomic_balance(&ambient(), &mut events).unwrap_err();
        assert!(matches!(err, ComponentError::NotSupported { .. }));

        let mut shx = Component::new("SHX", ComponentKind::SimpleHeatExchanger)
            .with_inlet("0", mat(1.0, 10.0))
            .with_outlet("0", mat(1.0, 5.0));
        let err = shx.exergoeconomic_balance(&ambient(), &mut events).unwrap_err();
        assert!(matches!(err, ComponentError::BalanceMissing { .. }));
    }
}
