use std::path::PathBuf;

use vle_app::{
    AnalysisConfig, AnalysisReport, AnalysisSession, AppError, DatasetFile, LoadedDataset,
    load_dataset,
};
use vle_models::{AlphaEstimate, Condition, FailureKind, ModelKind};

fn demos_dir() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop();
    dir.pop();
    dir.push("demos");
    dir
}

fn ethanol_water() -> LoadedDataset {
    load_dataset(&demos_dir().join("ethanol_water_323K.yaml")).unwrap()
}

fn hexane_benzene() -> LoadedDataset {
    load_dataset(&demos_dir().join("hexane_benzene_101kPa.yaml")).unwrap()
}

fn session(config: AnalysisConfig) -> AnalysisSession {
    AnalysisSession::new(config).unwrap()
}

fn isothermal(report: AnalysisReport) -> vle_app::IsothermalReport {
    match report {
        AnalysisReport::Isothermal(r) => r,
        AnalysisReport::Isobaric(_) => panic!("expected an isothermal report"),
    }
}

fn isobaric(report: AnalysisReport) -> vle_app::IsobaricReport {
    match report {
        AnalysisReport::Isobaric(r) => r,
        AnalysisReport::Isothermal(_) => panic!("expected an isobaric report"),
    }
}

#[test]
fn isothermal_demo_fits_every_model() {
    let dataset = ethanol_water();
    let mut session = session(AnalysisConfig::default());
    let report = isothermal(session.analyze(&dataset).unwrap());

    assert_eq!(report.pair.pair.first, "Ethanol");
    assert!(!report.pair.swapped);
    assert_eq!(report.removed_points, 2);
    assert_eq!(report.experimental.x1.len(), 11);
    assert_eq!(report.raoult.x1.len(), 50);
    assert_eq!(report.models.len(), ModelKind::ALL.len());

    for outcome in &report.models {
        match &outcome.outcome {
            Ok(model) => {
                assert!(model.fit.r_squared.is_finite(), "{}", outcome.model);
                let curves = model.curves.as_ref().unwrap();
                assert_eq!(curves.x1.len(), 50);
                assert!(model.txy.is_none());
            }
            Err(failure) => assert!(!failure.message.is_empty()),
        }
    }

    let van_laar = report
        .models
        .iter()
        .find(|o| o.model == ModelKind::VanLaar)
        .and_then(|o| o.report())
        .unwrap();
    let a = van_laar.fit.parameters.values[0];
    let b = van_laar.fit.parameters.values[1];
    assert!((a - 4300.0).abs() / 4300.0 < 0.05, "A = {a}");
    assert!((b - 2300.0).abs() / 2300.0 < 0.05, "B = {b}");
    assert!(van_laar.fit.r_squared > 0.99);
}

#[test]
fn failing_fits_do_not_abort_the_analysis() {
    let config = AnalysisConfig {
        max_evaluations: 3,
        ..AnalysisConfig::default()
    };
    let mut session = session(config);
    let report = isothermal(session.analyze(&ethanol_water()).unwrap());

    assert_eq!(report.models.len(), ModelKind::ALL.len());
    for outcome in &report.models {
        let failure = outcome.outcome.as_ref().unwrap_err();
        assert_eq!(failure.kind, FailureKind::FitNonConvergence, "{}", outcome.model);
    }
    assert!(session.cache().is_empty());
}

#[test]
fn reversed_component_order_gives_the_same_fit() {
    let dataset = ethanol_water();
    let Condition::Isothermal { .. } = dataset.data.condition() else {
        panic!("demo should be isothermal");
    };
    let reversed = DatasetFile {
        name: Some("reversed".to_string()),
        components: ["Water".to_string(), "Ethanol".to_string()],
        condition: dataset.data.condition(),
        x1: dataset.data.x1().iter().map(|x| 1.0 - x).collect(),
        y1: dataset.data.y1().iter().map(|y| 1.0 - y).collect(),
        pressure_kpa: dataset.data.measured().to_vec(),
        temperature_k: Vec::new(),
    }
    .into_loaded()
    .unwrap();

    let mut session = session(AnalysisConfig::default());
    let forward = isothermal(
        session
            .analyze_with_models(&dataset, &[ModelKind::Margules])
            .unwrap(),
    );
    let backward = isothermal(
        session
            .analyze_with_models(&reversed, &[ModelKind::Margules])
            .unwrap(),
    );

    assert!(backward.pair.swapped);
    assert_eq!(backward.pair.pair.first, "Ethanol");
    assert_eq!(backward.removed_points, 2);

    let a_forward = forward.models[0].report().unwrap().fit.parameters.values[0];
    let a_backward = backward.models[0].report().unwrap().fit.parameters.values[0];
    assert!(
        (a_forward - a_backward).abs() <= 1e-6 * a_forward.abs(),
        "{a_forward} vs {a_backward}"
    );
    assert!((a_forward - 3048.6).abs() < 30.0, "A = {a_forward}");
}

#[test]
fn repeated_analysis_hits_the_cache() {
    let dataset = ethanol_water();
    let models = [ModelKind::Margules, ModelKind::VanLaar];
    let mut session = session(AnalysisConfig::default());

    let first = isothermal(session.analyze_with_models(&dataset, &models).unwrap());
    assert_eq!(session.cache().len(), 2);
    assert_eq!(session.cache().misses(), 2);
    assert_eq!(session.cache().hits(), 0);

    let second = isothermal(session.analyze_with_models(&dataset, &models).unwrap());
    assert_eq!(session.cache().hits(), 2);
    assert_eq!(first.models, second.models);
}

#[test]
fn disabled_cache_stays_empty() {
    let config = AnalysisConfig {
        use_cache: false,
        ..AnalysisConfig::default()
    };
    let mut session = session(config);
    session
        .analyze_with_models(&ethanol_water(), &[ModelKind::Margules])
        .unwrap();
    assert!(session.cache().is_empty());
    assert_eq!(session.cache().misses(), 0);
}

#[test]
fn isobaric_demo_predicts_bubble_curve() {
    let mut session = session(AnalysisConfig::default());
    let report = isobaric(session.analyze(&hexane_benzene()).unwrap());

    assert_eq!(report.pair.pair.first, "Hexane");
    assert_eq!(report.removed_points, 2);
    assert!((report.pressure_kpa - 101.325).abs() < 1e-12);

    let uniquac = report.uniquac.report().unwrap();
    let a = uniquac.fit.parameters.values[0];
    let b = uniquac.fit.parameters.values[1];
    assert!((a - 300.0).abs() < 100.0, "a12 = {a}");
    assert!((b + 200.0).abs() < 100.0, "a21 = {b}");
    assert!(uniquac.fit.r_squared > 0.999);
    assert!(uniquac.curves.is_none());

    let txy = uniquac.txy.as_ref().unwrap();
    assert_eq!(txy.x1.len(), 20);
    assert_eq!(txy.num_failed, 0);
    for t in txy.temperatures_k() {
        assert!((340.0..355.0).contains(&t), "T = {t}");
    }

    match report.alpha.as_ref().unwrap() {
        AlphaEstimate::Accepted { alpha, r_squared } => {
            assert!(*alpha > 1.0);
            assert!(*r_squared > 0.8);
        }
        other => panic!("alpha should be accepted, got {other:?}"),
    }
}

#[test]
fn out_of_range_temperature_is_reported() {
    let dataset = vle_app::parse_dataset(
        "
components: [Ethanol, Water]
condition:
  kind: isothermal
  temperature_k: 600.0
x1: [0.2, 0.5, 0.8]
y1: [0.4, 0.6, 0.85]
pressure_kpa: [100.0, 120.0, 140.0]
",
    )
    .unwrap();

    let mut session = session(AnalysisConfig::default());
    let err = session.analyze(&dataset).unwrap_err();
    match err {
        AppError::Model(e) => assert_eq!(e.kind(), FailureKind::OutOfRangeInput),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn report_serializes_to_json() {
    let mut session = session(AnalysisConfig::default());
    let report = session
        .analyze_with_models(&ethanol_water(), &[ModelKind::Margules])
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["condition"], "isothermal");
    assert_eq!(json["models"][0]["model"], "margules");
    assert_eq!(report.name(), "Ethanol / Water at 323.15 K");
}
