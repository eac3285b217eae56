use std::io::Write;

use aerostat_planner::config::{RegionConfig, ScenarioConfig, SearchConfig};
use aerostat_planner::fields::{
    CsvSounding, DataUnavailableError, SoundingSource, SyntheticSounding,
};
use aerostat_planner::pipeline::{PlanError, plan_flight};

fn scenario(target_height_m: f64) -> ScenarioConfig {
    ScenarioConfig {
        name: "test-flight".to_string(),
        target_height_m,
        launch_time: "2024-06-01 10:00:00".to_string(),
        region: RegionConfig {
            west_deg: 30.0,
            east_deg: 40.0,
            south_deg: 45.0,
            north_deg: 55.0,
        },
        sounding_csv: None,
        search: SearchConfig::default(),
    }
}

struct FailingSource;

impl SoundingSource for FailingSource {
    fn fetch(&self) -> Result<aerostat_planner::profile::AtmosphericFields, DataUnavailableError> {
        Err(DataUnavailableError("remote model is offline".to_string()))
    }
}

#[test]
fn plans_a_calm_flight_to_5000_m() {
    let source = SyntheticSounding::calm();
    let plan = plan_flight(&scenario(5_000.0), &source).expect("plan");

    assert_eq!(plan.scenario, "test-flight");
    assert!((plan.peak_height_m - 5_000.0).abs() <= 100.0);
    assert!(plan.config.envelope_volume_m3 >= 10.0);
    assert!(plan.config.cargo_mass_kg <= 2.0 + 1e-12);
    assert!(!plan.trajectory.is_empty());
    // the exported trajectory is the converged config re-simulated
    assert!((plan.trajectory.peak_height_m() - plan.peak_height_m).abs() < 1e-9);
}

#[test]
fn acquisition_failure_surfaces_as_a_data_error() {
    match plan_flight(&scenario(5_000.0), &FailingSource) {
        Err(PlanError::Data(err)) => {
            assert!(err.to_string().contains("remote model is offline"));
        }
        other => panic!("expected PlanError::Data, got {other:?}"),
    }
}

#[test]
fn invalid_target_is_rejected_before_any_work() {
    assert!(matches!(
        plan_flight(&scenario(0.0), &FailingSource),
        Err(PlanError::InvalidTarget(_))
    ));
    assert!(matches!(
        plan_flight(&scenario(25_000.0), &FailingSource),
        Err(PlanError::InvalidTarget(_))
    ));
}

#[test]
fn malformed_launch_time_is_rejected() {
    let mut bad = scenario(5_000.0);
    bad.launch_time = "June 1st, sometime".to_string();
    assert!(matches!(
        plan_flight(&bad, &SyntheticSounding::calm()),
        Err(PlanError::LaunchTime { .. })
    ));
}

#[test]
fn csv_sounding_feeds_the_pipeline() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("sounding.csv");
    let mut file = std::fs::File::create(&path).expect("csv create");
    writeln!(
        file,
        "height_m,temperature_k,humidity_pct,pressure_pa,u_wind_m_s,v_wind_m_s"
    )
    .unwrap();
    for (h, t, rh, p) in [
        (0.0, 288.0, 70.0, 101_325.0),
        (5_000.0, 255.0, 40.0, 54_000.0),
        (10_000.0, 223.0, 10.0, 26_400.0),
        (20_000.0, 216.0, 0.0, 5_500.0),
    ] {
        writeln!(file, "{h},{t},{rh},{p},0.0,0.0").unwrap();
    }
    drop(file);

    let source = CsvSounding::new(&path);
    let plan = plan_flight(&scenario(5_000.0), &source).expect("plan");
    assert!((plan.peak_height_m - 5_000.0).abs() <= 100.0);
}

#[test]
fn missing_csv_sounding_is_a_data_error() {
    let source = CsvSounding::new("does/not/exist.csv");
    assert!(matches!(
        plan_flight(&scenario(5_000.0), &source),
        Err(PlanError::Data(_))
    ));
}

#[test]
fn corrupt_csv_sounding_fails_profile_validation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("sounding.csv");
    let mut file = std::fs::File::create(&path).expect("csv create");
    writeln!(
        file,
        "height_m,temperature_k,humidity_pct,pressure_pa,u_wind_m_s,v_wind_m_s"
    )
    .unwrap();
    writeln!(file, "0.0,288.0,70.0,101325.0,0.0,0.0").unwrap();
    writeln!(file, "5000.0,not-a-number,40.0,54000.0,0.0,0.0").unwrap();
    drop(file);

    assert!(matches!(
        plan_flight(&scenario(5_000.0), &CsvSounding::new(&path)),
        Err(PlanError::Profile(_))
    ));
}
