//! Sounding sources: where raw atmospheric fields come from.
//!
//! The planner itself never talks to a weather model. It asks a
//! [`SoundingSource`] for raw fields and treats any acquisition problem as an
//! opaque [`DataUnavailableError`]; distinguishing a network timeout from a
//! malformed archive is the source's business, not the pipeline's.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use thiserror::Error;

use aerostat_core::grid::linspace;
use aerostat_profile::AtmosphericFields;

/// Raised when a source cannot produce fields.
#[derive(Debug, Error)]
#[error("atmospheric sounding unavailable: {0}")]
pub struct DataUnavailableError(pub String);

/// Anything that can deliver raw sounding fields for a launch.
pub trait SoundingSource {
    fn fetch(&self) -> Result<AtmosphericFields, DataUnavailableError>;
}

/// Sounding read from a CSV archive.
///
/// Expected columns (any order, case-insensitive header match):
/// `height_m, temperature_k, humidity_pct, pressure_pa, u_wind_m_s, v_wind_m_s`.
/// Unparseable numbers become NaN and are left for profile validation to
/// reject, so a corrupt archive fails loudly instead of quietly thinning out.
#[derive(Debug, Clone)]
pub struct CsvSounding {
    path: PathBuf,
}

impl CsvSounding {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl SoundingSource for CsvSounding {
    fn fetch(&self) -> Result<AtmosphericFields, DataUnavailableError> {
        read_sounding_csv(&self.path)
            .map_err(|err| DataUnavailableError(format!("{}: {err}", self.path.display())))
    }
}

fn read_sounding_csv(path: &Path) -> Result<AtmosphericFields, csv::Error> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    };
    let col_height = column("height_m");
    let col_temperature = column("temperature_k");
    let col_humidity = column("humidity_pct");
    let col_pressure = column("pressure_pa");
    let col_u_wind = column("u_wind_m_s");
    let col_v_wind = column("v_wind_m_s");

    let mut fields = AtmosphericFields {
        height_m: Vec::new(),
        temperature_k: Vec::new(),
        humidity_pct: Vec::new(),
        pressure_pa: Vec::new(),
        u_wind_m_s: Vec::new(),
        v_wind_m_s: Vec::new(),
    };

    for rec in rdr.records() {
        let r = rec?;
        let value = |idx: Option<usize>| -> f64 {
            idx.and_then(|i| r.get(i))
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(f64::NAN)
        };
        fields.height_m.push(value(col_height));
        fields.temperature_k.push(value(col_temperature));
        fields.humidity_pct.push(value(col_humidity));
        fields.pressure_pa.push(value(col_pressure));
        fields.u_wind_m_s.push(value(col_u_wind));
        fields.v_wind_m_s.push(value(col_v_wind));
    }

    Ok(fields)
}

/// Synthetic standard-atmosphere sounding for offline planning.
///
/// Troposphere with a constant lapse rate, isothermal above 11 km,
/// exponentially decaying pressure, humidity tapering to zero by 12 km, and
/// a uniform wind across all levels. Crude, but well-formed by construction.
#[derive(Debug, Clone)]
pub struct SyntheticSounding {
    pub surface_temperature_k: f64,
    pub surface_pressure_pa: f64,
    pub surface_humidity_pct: f64,
    pub wind_speed_m_s: f64,
    pub wind_direction_rad: f64,
    pub levels: usize,
}

const TROPOPAUSE_M: f64 = 11_000.0;
const LAPSE_K_PER_M: f64 = 0.0065;
const PRESSURE_SCALE_HEIGHT_M: f64 = 8_500.0;
const HUMIDITY_TOP_M: f64 = 12_000.0;

impl SyntheticSounding {
    /// Windless variant, convenient for tests and dry runs.
    pub fn calm() -> Self {
        Self {
            wind_speed_m_s: 0.0,
            ..Self::default()
        }
    }
}

impl Default for SyntheticSounding {
    fn default() -> Self {
        Self {
            surface_temperature_k: 288.15,
            surface_pressure_pa: 101_325.0,
            surface_humidity_pct: 70.0,
            wind_speed_m_s: 4.0,
            wind_direction_rad: 0.0,
            levels: 41,
        }
    }
}

impl SoundingSource for SyntheticSounding {
    fn fetch(&self) -> Result<AtmosphericFields, DataUnavailableError> {
        if self.levels < 2 {
            return Err(DataUnavailableError(
                "synthetic sounding needs at least 2 levels".to_string(),
            ));
        }

        let height_m = linspace(0.0, aerostat_core::constants::CEILING_M, self.levels);
        let temperature_k: Vec<f64> = height_m
            .iter()
            .map(|&h| {
                let clamped = h.min(TROPOPAUSE_M);
                self.surface_temperature_k - LAPSE_K_PER_M * clamped
            })
            .collect();
        let pressure_pa: Vec<f64> = height_m
            .iter()
            .map(|&h| self.surface_pressure_pa * (-h / PRESSURE_SCALE_HEIGHT_M).exp())
            .collect();
        let humidity_pct: Vec<f64> = height_m
            .iter()
            .map(|&h| (self.surface_humidity_pct * (1.0 - h / HUMIDITY_TOP_M)).max(0.0))
            .collect();
        let u_wind_m_s =
            vec![self.wind_speed_m_s * self.wind_direction_rad.cos(); self.levels];
        let v_wind_m_s =
            vec![self.wind_speed_m_s * self.wind_direction_rad.sin(); self.levels];

        Ok(AtmosphericFields {
            height_m,
            temperature_k,
            humidity_pct,
            pressure_pa,
            u_wind_m_s,
            v_wind_m_s,
        })
    }
}
