//! Forward-Euler ascent integrator for a lighter-than-air envelope.

use serde::Serialize;
use thiserror::Error;

use aerostat_core::constants::{CEILING_M, DT_S, G, RHO_AIR, RHO_GAS};
use aerostat_profile::AtmosphericProfile;

/// Hard cap on integration steps, i.e. the simulation window.
///
/// 1.2 million steps at 0.1 s is roughly 33 hours of flight. A balloon that
/// has not reached the ceiling by then simply tops out where it is; the
/// truncated trajectory is returned as-is so the optimizer can read the peak.
pub const MAX_STEPS: usize = 1_200_000;

/// Cargo mass and envelope volume for a single ascent.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BalloonConfig {
    pub cargo_mass_kg: f64,
    pub envelope_volume_m3: f64,
}

impl BalloonConfig {
    /// Net buoyant force of the filled envelope (N).
    pub fn lift_force_n(&self) -> f64 {
        self.envelope_volume_m3 * (RHO_AIR - RHO_GAS) * G
    }

    /// Weight of the suspended cargo (N).
    pub fn cargo_weight_n(&self) -> f64 {
        self.cargo_mass_kg * G
    }
}

/// One integration sample: downwind distance and height above launch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    pub horizontal_m: f64,
    pub height_m: f64,
}

/// Time-ordered ascent samples at a fixed step, launch point included.
///
/// Owned by the `simulate` call that produced it and never mutated after.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub points: Vec<TrajectoryPoint>,
    pub dt_s: f64,
}

impl Trajectory {
    /// Greatest height reached over the flight (m).
    pub fn peak_height_m(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.height_m)
            .fold(0.0, f64::max)
    }

    /// Elapsed flight time covered by the samples (s).
    pub fn duration_s(&self) -> f64 {
        self.dt_s * self.points.len().saturating_sub(1) as f64
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Failures of a single ascent simulation.
#[derive(Debug, Error)]
pub enum AscentError {
    #[error("cargo mass and envelope volume must be positive and finite")]
    InvalidConfig,
    #[error(
        "configuration cannot ascend: lift {lift_n:.3} N does not exceed cargo weight {weight_n:.3} N"
    )]
    NonAscendingConfig { lift_n: f64, weight_n: f64 },
    #[error("simulation produced a non-finite state after {steps} steps")]
    SimulationDiverged { steps: usize },
}

/// Integrate the ascent of `config` through `profile`.
///
/// Forward Euler at [`DT_S`]: the climb rate follows from lift, cargo weight,
/// and displaced-air inertia, recomputed every step; the drift rate is the
/// launch-level wind resolved along its own direction, held constant for the
/// whole flight.
///
/// A configuration whose lift cannot beat the cargo weight fails fast with
/// [`AscentError::NonAscendingConfig`] instead of hanging below the ceiling.
pub fn simulate(
    config: &BalloonConfig,
    profile: &AtmosphericProfile,
) -> Result<Trajectory, AscentError> {
    if !(config.cargo_mass_kg.is_finite() && config.envelope_volume_m3.is_finite())
        || config.cargo_mass_kg <= 0.0
        || config.envelope_volume_m3 <= 0.0
    {
        return Err(AscentError::InvalidConfig);
    }

    let lift_n = config.lift_force_n();
    let weight_n = config.cargo_weight_n();
    if lift_n <= weight_n {
        return Err(AscentError::NonAscendingConfig { lift_n, weight_n });
    }

    let (wind_speed, wind_direction) = profile.launch_wind();

    let mut height_m = 0.0;
    let mut horizontal_m = 0.0;
    let mut points = Vec::with_capacity(4_096);
    points.push(TrajectoryPoint {
        horizontal_m,
        height_m,
    });

    let mut steps = 0;
    while height_m < CEILING_M && steps < MAX_STEPS {
        let vertical_speed = (config.lift_force_n() - config.cargo_mass_kg * G)
            / (config.cargo_mass_kg + config.envelope_volume_m3 * RHO_AIR);
        let horizontal_speed = wind_speed * wind_direction.cos();

        height_m += vertical_speed * DT_S;
        horizontal_m += horizontal_speed * DT_S;
        steps += 1;

        if !(height_m.is_finite() && horizontal_m.is_finite()) {
            return Err(AscentError::SimulationDiverged { steps });
        }

        points.push(TrajectoryPoint {
            horizontal_m,
            height_m,
        });
    }

    Ok(Trajectory {
        points,
        dt_s: DT_S,
    })
}
