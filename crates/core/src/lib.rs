//! Core constants, units, and grid primitives for the Aerostat Ascent Planner workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Gravitational acceleration used throughout the ascent model (m/s²).
    pub const G: f64 = 9.8;
    /// Ambient air density at launch conditions (kg/m³).
    pub const RHO_AIR: f64 = 1.225;
    /// Effective density of the lifting gas inside the envelope (kg/m³).
    ///
    /// The small difference against [`RHO_AIR`] models the net buoyancy of
    /// the gas fill rather than the density of pure helium or hydrogen.
    pub const RHO_GAS: f64 = 1.2;
    /// Ceiling of the modelled atmosphere and of every ascent (m).
    pub const CEILING_M: f64 = 20_000.0;
    /// Number of samples in a resampled atmospheric profile.
    pub const PROFILE_SAMPLES: usize = 1_000;
    /// Integration time step of the ascent simulator (s).
    pub const DT_S: f64 = 0.1;
    /// Seconds per minute, for plot axes.
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::SECONDS_PER_MINUTE;

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert kilometres to metres.
    #[inline]
    pub fn km_to_m(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert seconds to minutes.
    #[inline]
    pub fn seconds_to_minutes(v: f64) -> f64 {
        v / SECONDS_PER_MINUTE
    }
}

/// Uniform-grid helpers shared by the profile processor and its consumers.
pub mod grid {
    /// Evenly spaced samples over `[start, stop]`, endpoints included.
    ///
    /// Degenerate requests (`n < 2`) collapse to a single `start` sample.
    pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
        if n < 2 {
            return vec![start];
        }
        let step = (stop - start) / (n - 1) as f64;
        (0..n).map(|i| start + step * i as f64).collect()
    }

    /// Linear interpolation between two knots.
    #[inline]
    pub fn lerp(x0: f64, y0: f64, x1: f64, y1: f64, x: f64) -> f64 {
        if (x1 - x0).abs() < f64::EPSILON {
            return y0;
        }
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }
}
