//! Greedy coordinate search over cargo mass and envelope volume.

use thiserror::Error;

use aerostat_ascent::{AscentError, BalloonConfig, simulate};
use aerostat_profile::AtmosphericProfile;

/// Default convergence band around the target height (m).
pub const DEFAULT_TOLERANCE_M: f64 = 100.0;
/// Default iteration cap for the search loop.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;
/// Envelope volume adjustment applied when the balloon tops out low (m³).
const VOLUME_STEP_M3: f64 = 1.0;
/// Cargo mass adjustment applied when the balloon tops out high (kg).
const CARGO_STEP_KG: f64 = 0.1;

/// Knobs of the search loop. [`Default`] starts from the standard seed.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    pub seed: BalloonConfig,
    pub tolerance_m: f64,
    pub max_iterations: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            seed: BalloonConfig {
                cargo_mass_kg: 2.0,
                envelope_volume_m3: 10.0,
            },
            tolerance_m: DEFAULT_TOLERANCE_M,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// A converged configuration together with the peak it achieved.
#[derive(Debug, Clone)]
pub struct AscentSolution {
    pub config: BalloonConfig,
    pub peak_height_m: f64,
    pub iterations: usize,
}

/// Failures of the parameter search.
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("search did not converge within {iterations} iterations (best peak {best_peak_m:.1} m)")]
    DidNotConverge { iterations: usize, best_peak_m: f64 },
    #[error("cargo mass exhausted after {iterations} iterations without convergence")]
    CargoExhausted { iterations: usize },
    #[error("ascent simulation failed: {0}")]
    Ascent(#[from] AscentError),
}

/// Search with the standard seed and defaults. See [`optimize_with`].
pub fn optimize(
    target_height_m: f64,
    profile: &AtmosphericProfile,
) -> Result<AscentSolution, OptimizeError> {
    optimize_with(target_height_m, profile, &SearchLimits::default())
}

/// Greedy coordinate search for a configuration whose simulated peak lands
/// within `limits.tolerance_m` of `target_height_m`.
///
/// Each iteration simulates the current configuration and adjusts exactly one
/// parameter, strict priority: a peak below the target grows the envelope by
/// 1 m³, anything else sheds 0.1 kg of cargo. A configuration that cannot
/// ascend at all counts as a zero-height peak, so the seed (which starts well
/// short on lift) walks up through envelope growth rather than failing
/// outright. Divergence of the underlying simulation still propagates.
///
/// The loop is capped: exceeding `limits.max_iterations` fails with
/// [`OptimizeError::DidNotConverge`], and driving the cargo mass to zero
/// fails with [`OptimizeError::CargoExhausted`]. Neither condition retries.
pub fn optimize_with(
    target_height_m: f64,
    profile: &AtmosphericProfile,
    limits: &SearchLimits,
) -> Result<AscentSolution, OptimizeError> {
    let mut config = limits.seed;
    let mut best_peak_m: Option<f64> = None;

    for iteration in 1..=limits.max_iterations {
        let peak_height_m = match simulate(&config, profile) {
            Ok(trajectory) => trajectory.peak_height_m(),
            Err(AscentError::NonAscendingConfig { .. }) => 0.0,
            Err(err) => return Err(err.into()),
        };
        let closer = best_peak_m.is_none_or(|best| {
            (peak_height_m - target_height_m).abs() < (best - target_height_m).abs()
        });
        if closer {
            best_peak_m = Some(peak_height_m);
        }

        if (peak_height_m - target_height_m).abs() <= limits.tolerance_m {
            return Ok(AscentSolution {
                config,
                peak_height_m,
                iterations: iteration,
            });
        }

        if peak_height_m < target_height_m {
            config.envelope_volume_m3 += VOLUME_STEP_M3;
        } else {
            config.cargo_mass_kg -= CARGO_STEP_KG;
            if config.cargo_mass_kg <= 0.0 {
                return Err(OptimizeError::CargoExhausted {
                    iterations: iteration,
                });
            }
        }
    }

    Err(OptimizeError::DidNotConverge {
        iterations: limits.max_iterations,
        best_peak_m: best_peak_m.unwrap_or(0.0),
    })
}
