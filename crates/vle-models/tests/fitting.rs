use proptest::prelude::*;
use vle_core::constants::rt;
use vle_models::{
    CorrelationModel, ExcessData, ExperimentalExcess, FitOptions, Margules, ModelCurves,
    ModelError, ModelKind, Nrtl, RedlichKister, Uniquac, VanLaar, VleDataset, Wilson, Wohls,
};
use vle_props::UniquacSpecies;

const T: f64 = 330.0;

fn grid() -> Vec<f64> {
    (1..20).map(|i| i as f64 / 20.0).collect()
}

fn synthetic(model: &dyn CorrelationModel, params: &[f64]) -> ExcessData {
    let x = grid();
    let ge = x
        .iter()
        .map(|&x| model.excess_gibbs_energy(x, T, params))
        .collect();
    ExcessData::isothermal(T, x, ge).unwrap()
}

fn all_models() -> Vec<(Box<dyn CorrelationModel>, Vec<f64>)> {
    vec![
        (Box::new(Margules), vec![1200.0]),
        (Box::new(RedlichKister), vec![1100.0, 250.0]),
        (Box::new(VanLaar), vec![1800.0, 1200.0]),
        (Box::new(Wohls::new(5.8e-5, 1.8e-5).unwrap()), vec![6000.0]),
        (Box::new(Wilson::new(5.8e-5, 1.8e-5).unwrap()), vec![1500.0, 3000.0]),
        (Box::new(Nrtl::default()), vec![800.0, 1200.0]),
        (
            Box::new(
                Uniquac::new(
                    UniquacSpecies { r: 2.1055, q: 1.972 },
                    UniquacSpecies { r: 0.92, q: 1.4 },
                )
                .unwrap(),
            ),
            vec![300.0, 600.0],
        ),
    ]
}

#[test]
fn activity_coefficients_approach_unity_for_pure_components() {
    for (model, params) in all_models() {
        let (g1, _) = model.activity_coefficients(0.999, T, &params);
        let (_, g2) = model.activity_coefficients(0.001, T, &params);
        assert!((g1 - 1.0).abs() < 1e-2, "{} gamma1 = {}", model.kind(), g1);
        assert!((g2 - 1.0).abs() < 1e-2, "{} gamma2 = {}", model.kind(), g2);
    }
}

#[test]
fn excess_gibbs_vanishes_at_pure_compositions() {
    for (model, params) in all_models().into_iter().take(4) {
        assert_eq!(model.excess_gibbs_energy(0.0, T, &params), 0.0, "{}", model.kind());
        assert_eq!(model.excess_gibbs_energy(1.0, T, &params), 0.0, "{}", model.kind());
    }
}

#[test]
fn margules_recovers_parameter() {
    for a in [1000.0, 1500.0] {
        let data = synthetic(&Margules, &[a]);
        let fit = Margules.fit(&data, &FitOptions::default()).unwrap();
        let fitted = fit.parameters.get("A").unwrap();
        assert!((fitted - a).abs() < 0.01 * a, "A = {fitted}");
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
    }
}

#[test]
fn two_parameter_models_recover_parameters() {
    for (model, params) in all_models() {
        // UNIQUAC is regressed on activity coefficients, see tests/uniquac.rs.
        if params.len() != 2 || model.kind() == ModelKind::Uniquac {
            continue;
        }
        let data = synthetic(model.as_ref(), &params);
        let fit = model.fit(&data, &FitOptions::default()).unwrap();
        for (fitted, truth) in fit.parameters.values.iter().zip(&params) {
            assert!(
                (fitted - truth).abs() < 0.01 * truth.abs(),
                "{}: {fitted} vs {truth}",
                model.kind()
            );
        }
        assert!(fit.r_squared > 0.999_999);
    }
}

#[test]
fn fit_is_deterministic() {
    for (model, params) in all_models() {
        let data = synthetic(model.as_ref(), &params);
        let a = model.fit(&data, &FitOptions::default()).unwrap();
        let b = model.fit(&data, &FitOptions::default()).unwrap();
        assert_eq!(a.parameters, b.parameters, "{}", model.kind());
        assert_eq!(a.evaluations, b.evaluations);
    }
}

#[test]
fn pure_points_must_be_stripped_before_fitting() {
    let data = ExcessData::isothermal(T, vec![0.0, 0.5, 0.8], vec![0.0, 250.0, 160.0]).unwrap();
    let err = Margules.fit(&data, &FitOptions::default()).unwrap_err();
    assert!(matches!(err, ModelError::DegenerateComposition { index: 0, .. }));
}

#[test]
fn stripping_removes_exactly_the_endpoints() {
    let cases: [(&[f64], usize); 4] = [
        (&[0.2, 0.5, 0.8], 0),
        (&[0.0, 0.5, 0.8], 1),
        (&[0.2, 0.5, 1.0], 1),
        (&[0.0, 0.5, 1.0], 2),
    ];
    for (x, expected) in cases {
        let n = x.len();
        let data = VleDataset::isothermal(T, x.to_vec(), x.to_vec(), vec![50.0; n]).unwrap();
        let (stripped, removed) = data.strip_pure_points();
        assert_eq!(removed, expected);
        assert_eq!(stripped.len(), n - expected);
    }
}

#[test]
fn margules_from_raw_isothermal_data() {
    // Forward-generate (x, y, P) from Margules with A = 1500 J/mol.
    let (a, p1s, p2s) = (1500.0, 60.0, 25.0);
    let mut x = vec![0.0];
    x.extend(grid());
    x.push(1.0);
    let (mut y, mut p) = (Vec::new(), Vec::new());
    for &xi in &x {
        let (g1, g2) = Margules.activity_coefficients(xi, T, &[a]);
        let pp1 = xi * g1 * p1s;
        let total = pp1 + (1.0 - xi) * g2 * p2s;
        y.push(pp1 / total);
        p.push(total);
    }

    let data = VleDataset::isothermal(T, x, y, p).unwrap();
    let (data, removed) = data.strip_pure_points();
    assert_eq!(removed, 2);

    let n = data.len();
    let ex = ExperimentalExcess::from_dataset(&data, &vec![p1s; n], &vec![p2s; n]).unwrap();
    let fit = Margules.fit(&ex.excess_data(), &FitOptions::default()).unwrap();
    assert!((fit.parameters.values[0] - a).abs() < 1e-3 * a);

    let curves = ModelCurves::isothermal(&Margules, &fit.parameters.values, T, [p1s, p2s], 50);
    assert_eq!(curves.x1.len(), 50);
    assert!((curves.pressure_kpa[0] - p2s).abs() < 1e-9);
    assert!((curves.pressure_kpa[49] - p1s).abs() < 1e-9);
}

#[test]
fn iteration_budget_surfaces_as_non_convergence() {
    let data = synthetic(&Wilson::new(5.8e-5, 1.8e-5).unwrap(), &[1500.0, 3000.0]);
    let mut options = FitOptions::default();
    options.solver.max_evaluations = 3;
    let err = Wilson::new(5.8e-5, 1.8e-5)
        .unwrap()
        .fit(&data, &options)
        .unwrap_err();
    assert!(matches!(err, ModelError::NonConvergence { .. }));
}

proptest! {
    #[test]
    fn activity_coefficients_consistent_with_gibbs_energy(
        x in 0.01f64..0.99,
        a in -2000.0f64..4000.0,
        b in 100.0f64..4000.0,
    ) {
        // Positive B keeps van Laar away from its pole.
        let models: Vec<(Box<dyn CorrelationModel>, Vec<f64>)> = vec![
            (Box::new(Margules), vec![a]),
            (Box::new(RedlichKister), vec![a, b]),
            (Box::new(Nrtl::default()), vec![a, b]),
            (Box::new(Wilson::new(4.0e-5, 2.0e-5).unwrap()), vec![a, b]),
        ];
        for (model, params) in models {
            let (l1, l2) = model.ln_activity_coefficients(x, T, &params);
            let ge = model.excess_gibbs_energy(x, T, &params);
            let sum = rt(T) * (x * l1 + (1.0 - x) * l2);
            prop_assert!((sum - ge).abs() < 1e-6 * (1.0 + ge.abs()), "{}", model.kind());
        }
    }
}
