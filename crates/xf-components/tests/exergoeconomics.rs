//! Regime-based cost balance and auxiliary equations of a simple heat exchanger.

use xf_components::{
    BalanceOptions, Component, ComponentError, ComponentKind, CostSystem, Diagnostic,
    DiagnosticKind, EquationKind, ProductStatus, Regime,
};
use xf_core::Ambient;
use xf_streams::{CostColumns, ExergyPart, StreamRecord};

fn ambient() -> Ambient {
    Ambient::from_si(298.0, 101_325.0).unwrap()
}

struct End {
    h: f64,
    t: f64,
    e: [f64; 3],
    c: [f64; 3],
    cols: CostColumns,
}

fn stream(end: End) -> StreamRecord {
    let parts = [ExergyPart::Physical, ExergyPart::Thermal, ExergyPart::Mechanical];
    let mut s = StreamRecord::material(2.0)
        .with_enthalpy(end.h)
        .with_temperature(end.t)
        .with_cost_columns(end.cols);
    for (i, part) in parts.into_iter().enumerate() {
        s = s.with_specific(part, end.e[i]).with_cost(part, end.c[i]);
    }
    s
}

fn exchanger(h_out: f64, t_in: f64, t_out: f64) -> Component {
    let inlet = stream(End {
        h: 400_000.0,
        t: t_in,
        e: [30_000.0, 20_000.0, 10_000.0],
        c: [9.0, 6.0, 3.0],
        cols: CostColumns {
            thermal: 0,
            mechanical: 1,
            chemical: Some(2),
        },
    });
    Component::new("SHX", ComponentKind::SimpleHeatExchanger)
        .with_inlet("a", inlet)
        .with_outlet("b", outlet(h_out, t_out, Some(5)))
        .with_z_costs(0.5)
}

fn outlet(h_out: f64, t_out: f64, chemical: Option<usize>) -> StreamRecord {
    stream(End {
        h: h_out,
        t: t_out,
        e: [25_000.0, 16_000.0, 9_000.0],
        c: [7.0, 4.5, 2.5],
        cols: CostColumns {
            thermal: 3,
            mechanical: 4,
            chemical,
        },
    })
}

fn aux_run(shx: &Component, rows: usize, chemical: bool) -> (CostSystem, Vec<Diagnostic>) {
    let mut system = CostSystem::new(rows, 6);
    let mut events = Vec::new();
    let opts = BalanceOptions {
        chemical_exergy_enabled: chemical,
        ..BalanceOptions::default()
    };
    shx.aux_equations(&mut system, &ambient(), opts, &mut events)
        .unwrap();
    (system, events)
}

fn unimplemented(events: &[Diagnostic]) -> Vec<Regime> {
    events
        .iter()
        .filter_map(|d| match d.kind {
            DiagnosticKind::UnimplementedRegime { regime } => Some(regime),
            _ => None,
        })
        .collect()
}

fn balanced(mut comp: Component, events: &mut Vec<Diagnostic>) -> Component {
    comp.calc_exergy_balance(&ambient(), BalanceOptions::default(), events)
        .unwrap();
    comp
}

#[test]
fn heat_release_above_ambient() {
    let mut events = Vec::new();
    let mut shx = balanced(exchanger(300_000.0, 350.0, 320.0), &mut events);
    let costs = shx.exergoeconomic_balance(&ambient(), &mut events).unwrap();

    assert_eq!(costs.regime, Regime::ReleasedAboveAmbient);
    assert_eq!(costs.cost_product, Some(4.5 - 6.0));
    assert_eq!(costs.cost_fuel, Some(9.0 - 7.0));

    // E_D = 2 * 30000 - 2 * 25000 = E_F; no product exergy.
    let c_f = costs.specific_cost_fuel.unwrap();
    assert!((c_f - 2.0 / 10_000.0).abs() < 1e-15);
    assert_eq!(costs.specific_cost_product, None);
    assert!((costs.cost_destruction.unwrap() - 2.0).abs() < 1e-12);
    assert!((costs.exergoeconomic_factor.unwrap() - 0.5 / 2.5).abs() < 1e-12);
    assert_eq!(shx.costs(), Some(&costs));
}

#[test]
fn zero_heat_flow_has_no_product() {
    let mut events = Vec::new();
    let mut shx = balanced(exchanger(400_000.0, 350.0, 320.0), &mut events);
    let costs = shx.exergoeconomic_balance(&ambient(), &mut events).unwrap();

    assert_eq!(costs.regime, Regime::Dissipative);
    assert_eq!(costs.cost_product, None);
    assert_eq!(costs.cost_fuel, Some(9.0 - 7.0));
    assert_eq!(costs.product_status(), ProductStatus::NoProduct);
}

#[test]
fn undefined_regime_yields_undefined_costs() {
    let mut events = Vec::new();
    // Heat released while the stream goes from below to above ambient.
    let mut shx = balanced(exchanger(300_000.0, 280.0, 310.0), &mut events);
    let costs = shx.exergoeconomic_balance(&ambient(), &mut events).unwrap();

    assert_eq!(costs.regime, Regime::ReleasedRisingAcrossAmbient);
    assert_eq!(costs.cost_product, None);
    assert_eq!(costs.cost_fuel, None);
    assert_eq!(costs.specific_cost_fuel, None);
    assert_eq!(costs.exergoeconomic_factor, None);
    assert_eq!(costs.product_status(), ProductStatus::Unresolved);
}

#[test]
fn aux_equations_with_f_rule() {
    let shx = exchanger(300_000.0, 350.0, 320.0);
    let mut system = CostSystem::new(4, 6).starting_at(1);
    let mut events = Vec::new();
    let opts = BalanceOptions {
        chemical_exergy_enabled: true,
        ..BalanceOptions::default()
    };
    shx.aux_equations(&mut system, &ambient(), opts, &mut events)
        .unwrap();

    assert_eq!(system.counter(), 4);
    let props: Vec<_> = system.labels().iter().map(|l| l.property).collect();
    assert_eq!(props, ["c_M", "c_CH", "c_T"]);
    assert_eq!(system.labels()[2].kind, EquationKind::AuxFRule);
    assert_eq!(system.labels()[0].objects, ["SHX", "a", "b"]);

    let a = system.matrix();
    assert!((a[(1, 1)] - 1.0 / 20_000.0).abs() < 1e-18);
    assert!((a[(1, 4)] + 1.0 / 18_000.0).abs() < 1e-18);
    // Chemical exergy is absent: unit coefficients.
    assert_eq!(a[(2, 2)], 1.0);
    assert_eq!(a[(2, 5)], -1.0);
    assert!((a[(3, 0)] - 1.0 / 40_000.0).abs() < 1e-18);
    assert!((a[(3, 3)] + 1.0 / 32_000.0).abs() < 1e-18);
    assert!(system.rhs().iter().all(|&b| b == 0.0));
    assert!(events.is_empty());
}

#[test]
fn aux_equations_report_unimplemented_crossing() {
    // Heat released, outlet drops below ambient.
    let shx = exchanger(300_000.0, 350.0, 280.0);
    let mut system = CostSystem::new(2, 6);
    let mut events = Vec::new();
    shx.aux_equations(&mut system, &ambient(), BalanceOptions::default(), &mut events)
        .unwrap();

    assert_eq!(system.counter(), 1);
    assert!(events.iter().any(|d| matches!(
        d.kind,
        DiagnosticKind::UnimplementedRegime {
            regime: Regime::ReleasedCrossingAmbient
        }
    )));
}

#[test]
fn aux_equations_need_room() {
    let shx = exchanger(300_000.0, 350.0, 320.0);
    let mut system = CostSystem::new(1, 6);
    let mut events = Vec::new();
    let err = shx
        .aux_equations(&mut system, &ambient(), BalanceOptions::default(), &mut events)
        .unwrap_err();
    assert!(matches!(err, ComponentError::CostSystem { .. }));
}

// Inlet h = 400 kJ/kg, so h_out below that releases heat and above adds it.
#[test]
fn crossing_regimes_are_reported() {
    let cases = [
        (300_000.0, 290.0, 280.0, Regime::ReleasedBelowAmbient),
        (300_000.0, 280.0, 310.0, Regime::ReleasedRisingAcrossAmbient),
        (300_000.0, 350.0, 280.0, Regime::ReleasedCrossingAmbient),
        (500_000.0, 280.0, 350.0, Regime::AddedCrossingAmbient),
        (500_000.0, 310.0, 280.0, Regime::AddedFallingAcrossAmbient),
    ];
    for (h_out, t_in, t_out, regime) in cases {
        let (system, events) = aux_run(&exchanger(h_out, t_in, t_out), 3, false);
        assert_eq!(unimplemented(&events), [regime], "{regime}");
        assert_eq!(system.counter(), 1, "{regime}");
        assert_eq!(system.labels()[0].property, "c_M");
    }
}

#[test]
fn same_side_heat_addition_needs_no_thermal_rule() {
    let cases = [
        (500_000.0, 300.0, 350.0),
        (500_000.0, 270.0, 280.0),
        (400_000.0, 350.0, 320.0),
    ];
    for (h_out, t_in, t_out) in cases {
        let (system, events) = aux_run(&exchanger(h_out, t_in, t_out), 3, false);
        assert!(events.is_empty(), "{t_in} -> {t_out}: {events:?}");
        let props: Vec<_> = system.labels().iter().map(|l| l.property).collect();
        assert_eq!(props, ["c_M"]);
        assert_eq!(system.counter(), 1);
    }
}

#[test]
fn missing_cost_column_leaves_system_untouched() {
    // F-rule regime with chemical accounting, outlet lacks a C_CH column.
    let mut shx = exchanger(300_000.0, 350.0, 320.0);
    shx.outl.insert("b", outlet(300_000.0, 320.0, None));

    let mut system = CostSystem::new(4, 6);
    let mut events = Vec::new();
    let opts = BalanceOptions {
        chemical_exergy_enabled: true,
        ..BalanceOptions::default()
    };
    let err = shx
        .aux_equations(&mut system, &ambient(), opts, &mut events)
        .unwrap_err();

    assert!(matches!(err, ComponentError::CostSystem { .. }));
    assert_eq!(system.counter(), 0);
    assert!(system.labels().is_empty());
    assert!(system.matrix().iter().all(|&a| a == 0.0));
}

#[test]
fn stream_without_cost_columns_is_rejected() {
    let mut shx = exchanger(300_000.0, 350.0, 320.0);
    let bare = StreamRecord::material(2.0)
        .with_enthalpy(400_000.0)
        .with_temperature(350.0)
        .with_specific(ExergyPart::Mechanical, 10_000.0);
    shx.inl.insert("a", bare);

    let mut system = CostSystem::new(3, 6);
    let mut events = Vec::new();
    let err = shx
        .aux_equations(&mut system, &ambient(), BalanceOptions::default(), &mut events)
        .unwrap_err();
    assert!(matches!(err, ComponentError::CostSystem { .. }));
    assert_eq!(system.counter(), 0);
}

#[test]
fn missing_enthalpy_is_unresolved_not_product_free() {
    let mut shx = exchanger(300_000.0, 350.0, 320.0);
    let mut events = Vec::new();
    shx.calc_exergy_balance(&ambient(), BalanceOptions::default(), &mut events)
        .unwrap();

    let no_h = StreamRecord::material(2.0)
        .with_temperature(320.0)
        .with_specific(ExergyPart::Physical, 25_000.0);
    shx.outl.insert("b", no_h);
    let costs = shx.exergoeconomic_balance(&ambient(), &mut events).unwrap();

    assert_eq!(costs.regime, Regime::Undetermined);
    assert_eq!(costs.cost_fuel, None);
    assert_eq!(costs.product_status(), ProductStatus::Unresolved);
}
