use aerostat_planner::ascent::{BalloonConfig, simulate};
use aerostat_planner::fields::{SoundingSource, SyntheticSounding};
use aerostat_planner::optimizer::{OptimizeError, SearchLimits, optimize, optimize_with};
use aerostat_planner::profile::{AtmosphericProfile, process};

fn calm_profile() -> AtmosphericProfile {
    let fields = SyntheticSounding::calm().fetch().expect("synthetic fields");
    process(&fields).expect("profile")
}

#[test]
fn converges_to_5000_m_from_the_standard_seed() {
    let profile = calm_profile();
    let solution = optimize(5_000.0, &profile).expect("solution");

    assert!(
        (solution.peak_height_m - 5_000.0).abs() <= 100.0,
        "peak = {}",
        solution.peak_height_m
    );
    // only volume increases and cargo decreases are ever applied to the seed
    assert!(solution.config.envelope_volume_m3 >= 10.0);
    assert!(solution.config.cargo_mass_kg <= 2.0 + 1e-12);
    assert!(solution.iterations <= 1_000);
}

#[test]
fn returned_config_reproduces_the_target_when_resimulated() {
    let profile = calm_profile();
    let target = 10_000.0;
    let solution = optimize(target, &profile).expect("solution");

    let trajectory = simulate(&solution.config, &profile).expect("trajectory");
    let peak = trajectory.peak_height_m();
    assert!((peak - target).abs() <= 100.0, "peak = {peak}");
    assert!((peak - solution.peak_height_m).abs() < 1e-9);
}

#[test]
fn iteration_cap_yields_did_not_converge() {
    let profile = calm_profile();
    let limits = SearchLimits {
        max_iterations: 40,
        ..SearchLimits::default()
    };
    // 40 volume bumps from the seed cannot even lift the cargo
    match optimize_with(19_000.0, &profile, &limits) {
        Err(OptimizeError::DidNotConverge { iterations, .. }) => assert_eq!(iterations, 40),
        other => panic!("expected DidNotConverge, got {other:?}"),
    }
}

#[test]
fn did_not_converge_reports_a_peak_an_actual_run_produced() {
    let profile = calm_profile();
    let limits = SearchLimits {
        seed: BalloonConfig {
            cargo_mass_kg: 0.5,
            envelope_volume_m3: 500.0,
        },
        max_iterations: 2,
        ..SearchLimits::default()
    };
    // every simulated peak overshoots the low target, none comes near 0 m
    match optimize_with(1_000.0, &profile, &limits) {
        Err(OptimizeError::DidNotConverge { best_peak_m, .. }) => {
            assert!(best_peak_m > 19_000.0, "best peak = {best_peak_m}");
        }
        other => panic!("expected DidNotConverge, got {other:?}"),
    }
}

#[test]
fn shedding_all_cargo_yields_cargo_exhausted() {
    let profile = calm_profile();
    let limits = SearchLimits {
        seed: BalloonConfig {
            cargo_mass_kg: 0.2,
            envelope_volume_m3: 200.0,
        },
        ..SearchLimits::default()
    };
    // the seed overshoots a low target, so the search can only shed cargo
    assert!(matches!(
        optimize_with(1_000.0, &profile, &limits),
        Err(OptimizeError::CargoExhausted { .. })
    ));
}
