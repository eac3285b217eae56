//! End-to-end planning: sounding → profile → search → final trajectory.

use chrono::NaiveDateTime;
use thiserror::Error;

use aerostat_ascent::{AscentError, BalloonConfig, Trajectory, simulate};
use aerostat_config::ScenarioConfig;
use aerostat_optimizer::{OptimizeError, SearchLimits, optimize_with};
use aerostat_profile::{AtmosphericProfile, ProfileError, process};

use crate::fields::{DataUnavailableError, SoundingSource};

const LAUNCH_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything a planned flight produces, handed to exporters and renderers.
#[derive(Debug)]
pub struct FlightPlan {
    pub scenario: String,
    pub launch_time: NaiveDateTime,
    pub target_height_m: f64,
    pub config: BalloonConfig,
    pub peak_height_m: f64,
    pub search_iterations: usize,
    pub profile: AtmosphericProfile,
    pub trajectory: Trajectory,
}

/// Top-level planning error; each stage keeps its own variant so callers can
/// tell "no data" from "diverged" from "did not converge".
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Data(#[from] DataUnavailableError),
    #[error("profile processing failed: {0}")]
    Profile(#[from] ProfileError),
    #[error("parameter search failed: {0}")]
    Optimize(#[from] OptimizeError),
    #[error("final ascent simulation failed: {0}")]
    Ascent(#[from] AscentError),
    #[error("launch time '{value}' is not '{LAUNCH_TIME_FORMAT}': {source}")]
    LaunchTime {
        value: String,
        source: chrono::ParseError,
    },
    #[error("target height {0} m is outside (0, 20000]")]
    InvalidTarget(f64),
}

/// Run the full pipeline for one scenario against one sounding source.
///
/// Fails fast at the first broken stage; nothing is retried and no partial
/// plan is returned. The converged configuration is re-simulated once so the
/// exported trajectory matches exactly what the search promised.
pub fn plan_flight(
    scenario: &ScenarioConfig,
    source: &dyn SoundingSource,
) -> Result<FlightPlan, PlanError> {
    if !(scenario.target_height_m > 0.0
        && scenario.target_height_m <= aerostat_core::constants::CEILING_M)
    {
        return Err(PlanError::InvalidTarget(scenario.target_height_m));
    }
    let launch_time = NaiveDateTime::parse_from_str(&scenario.launch_time, LAUNCH_TIME_FORMAT)
        .map_err(|source| PlanError::LaunchTime {
            value: scenario.launch_time.clone(),
            source,
        })?;

    let raw = source.fetch()?;
    let profile = process(&raw)?;

    let limits = SearchLimits {
        seed: BalloonConfig {
            cargo_mass_kg: scenario.search.seed_cargo_mass_kg,
            envelope_volume_m3: scenario.search.seed_envelope_volume_m3,
        },
        tolerance_m: scenario.search.tolerance_m,
        max_iterations: scenario.search.max_iterations,
    };
    let solution = optimize_with(scenario.target_height_m, &profile, &limits)?;
    let trajectory = simulate(&solution.config, &profile)?;

    Ok(FlightPlan {
        scenario: scenario.name.clone(),
        launch_time,
        target_height_m: scenario.target_height_m,
        config: solution.config,
        peak_height_m: solution.peak_height_m,
        search_iterations: solution.iterations,
        profile,
        trajectory,
    })
}
