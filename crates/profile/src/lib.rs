//! Atmospheric sounding validation and resampling onto the fixed ascent grid.

use thiserror::Error;

use aerostat_core::constants::{CEILING_M, PROFILE_SAMPLES};
use aerostat_core::grid::{lerp, linspace};

/// Raw gridded fields from a sounding, all indexed by one height coordinate.
///
/// This is the shape handed over by whichever data source feeds the planner;
/// nothing here has been validated or resampled yet.
#[derive(Debug, Clone)]
pub struct AtmosphericFields {
    pub height_m: Vec<f64>,
    pub temperature_k: Vec<f64>,
    pub humidity_pct: Vec<f64>,
    pub pressure_pa: Vec<f64>,
    pub u_wind_m_s: Vec<f64>,
    pub v_wind_m_s: Vec<f64>,
}

/// Continuous-height representation of the atmosphere consumed by the simulator.
///
/// Temperature, humidity, and pressure are resampled onto a fixed
/// [`PROFILE_SAMPLES`]-point grid spanning `[0, CEILING_M]`. Wind speed and
/// direction stay at the native sounding resolution, aligned with the native
/// height coordinate. Read-only once produced.
#[derive(Debug, Clone)]
pub struct AtmosphericProfile {
    pub heights_m: Vec<f64>,
    pub temperature_k: Vec<f64>,
    pub humidity_pct: Vec<f64>,
    pub pressure_pa: Vec<f64>,
    pub wind_speed_m_s: Vec<f64>,
    pub wind_direction_rad: Vec<f64>,
}

impl AtmosphericProfile {
    /// Wind speed (m/s) and direction (radians) at the launch level.
    ///
    /// The ascent model advects the balloon with a single wind sample for the
    /// whole flight, so the lowest native level is the one that matters.
    /// Empty wind arrays (possible only on a hand-built profile; `process`
    /// always populates them) read as calm air.
    pub fn launch_wind(&self) -> (f64, f64) {
        (
            self.wind_speed_m_s.first().copied().unwrap_or(0.0),
            self.wind_direction_rad.first().copied().unwrap_or(0.0),
        )
    }
}

/// Errors raised while turning raw fields into a usable profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("field '{field}' is unusable: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
    #[error("height coordinate unusable for interpolation: {0}")]
    Interpolation(&'static str),
}

/// Validate raw sounding fields and resample them onto the ascent grid.
///
/// Pure transform: either every output array is fully populated or the whole
/// call fails. No partially-valid profile ever escapes.
pub fn process(fields: &AtmosphericFields) -> Result<AtmosphericProfile, ProfileError> {
    validate(fields)?;

    let heights_m = linspace(0.0, CEILING_M, PROFILE_SAMPLES);
    let temperature_k = resample(&fields.height_m, &fields.temperature_k, &heights_m);
    let humidity_pct = resample(&fields.height_m, &fields.humidity_pct, &heights_m);
    let pressure_pa = resample(&fields.height_m, &fields.pressure_pa, &heights_m);

    let wind_speed_m_s: Vec<f64> = fields
        .u_wind_m_s
        .iter()
        .zip(&fields.v_wind_m_s)
        .map(|(u, v)| u.hypot(*v))
        .collect();
    let wind_direction_rad: Vec<f64> = fields
        .u_wind_m_s
        .iter()
        .zip(&fields.v_wind_m_s)
        .map(|(u, v)| v.atan2(*u))
        .collect();

    Ok(AtmosphericProfile {
        heights_m,
        temperature_k,
        humidity_pct,
        pressure_pa,
        wind_speed_m_s,
        wind_direction_rad,
    })
}

fn validate(fields: &AtmosphericFields) -> Result<(), ProfileError> {
    let levels = fields.height_m.len();
    let aligned = [
        ("temperature", fields.temperature_k.len()),
        ("humidity", fields.humidity_pct.len()),
        ("pressure", fields.pressure_pa.len()),
        ("u_wind", fields.u_wind_m_s.len()),
        ("v_wind", fields.v_wind_m_s.len()),
    ];
    for (field, len) in aligned {
        if len != levels {
            return Err(ProfileError::InvalidField {
                field,
                reason: "length does not match the height coordinate",
            });
        }
    }

    if fields.height_m.iter().any(|h| !h.is_finite()) {
        return Err(ProfileError::Interpolation(
            "height coordinate contains non-finite values",
        ));
    }
    if distinct_levels(&fields.height_m) < 2 {
        return Err(ProfileError::Interpolation(
            "fewer than 2 distinct height levels",
        ));
    }
    if fields
        .height_m
        .windows(2)
        .any(|pair| pair[1] <= pair[0])
    {
        return Err(ProfileError::Interpolation(
            "height coordinate is not strictly increasing",
        ));
    }

    let finite = [
        ("temperature", &fields.temperature_k),
        ("humidity", &fields.humidity_pct),
        ("pressure", &fields.pressure_pa),
        ("u_wind", &fields.u_wind_m_s),
        ("v_wind", &fields.v_wind_m_s),
    ];
    for (field, values) in finite {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ProfileError::InvalidField {
                field,
                reason: "contains non-finite values",
            });
        }
    }

    if fields.pressure_pa.iter().any(|p| *p < 0.0) {
        return Err(ProfileError::InvalidField {
            field: "pressure",
            reason: "contains negative values",
        });
    }
    if fields.humidity_pct.iter().any(|h| *h < 0.0) {
        return Err(ProfileError::InvalidField {
            field: "humidity",
            reason: "contains negative values",
        });
    }

    Ok(())
}

fn distinct_levels(heights: &[f64]) -> usize {
    let mut count = 0;
    let mut last = f64::NAN;
    for &h in heights {
        if h != last {
            count += 1;
            last = h;
        }
    }
    count
}

/// Piecewise-linear resampling of `values` from `knots` onto `queries`.
///
/// Queries outside the native range clamp to the boundary values instead of
/// extrapolating; the simulator never reads heights the sounding cannot speak
/// for.
fn resample(knots: &[f64], values: &[f64], queries: &[f64]) -> Vec<f64> {
    queries
        .iter()
        .map(|&q| {
            if q <= knots[0] {
                return values[0];
            }
            if q >= knots[knots.len() - 1] {
                return values[values.len() - 1];
            }
            let upper = knots.partition_point(|&k| k < q);
            let lower = upper - 1;
            lerp(knots[lower], values[lower], knots[upper], values[upper], q)
        })
        .collect()
}
