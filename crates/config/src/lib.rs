//! Scenario models and loaders for the Aerostat Ascent Planner.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Geographic bounding box of the sounding request, degrees.
///
/// Carried through to the data-acquisition collaborator and into flight
/// summaries; the core pipeline itself never projects coordinates.
#[derive(Debug, Deserialize, Clone)]
pub struct RegionConfig {
    pub west_deg: f64,
    pub east_deg: f64,
    pub south_deg: f64,
    pub north_deg: f64,
}

/// Overrides for the parameter search. Every field defaults to the
/// standard seed values when omitted from a manifest.
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_seed_cargo_mass_kg")]
    pub seed_cargo_mass_kg: f64,
    #[serde(default = "default_seed_envelope_volume_m3")]
    pub seed_envelope_volume_m3: f64,
    #[serde(default = "default_tolerance_m")]
    pub tolerance_m: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_seed_cargo_mass_kg() -> f64 {
    2.0
}

fn default_seed_envelope_volume_m3() -> f64 {
    10.0
}

fn default_tolerance_m() -> f64 {
    100.0
}

fn default_max_iterations() -> usize {
    10_000
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            seed_cargo_mass_kg: default_seed_cargo_mass_kg(),
            seed_envelope_volume_m3: default_seed_envelope_volume_m3(),
            tolerance_m: default_tolerance_m(),
            max_iterations: default_max_iterations(),
        }
    }
}

/// One planning scenario parsed from a manifest.
#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioConfig {
    pub name: String,
    pub target_height_m: f64,
    /// Launch timestamp, `YYYY-MM-DD HH:MM:SS`, interpreted as UTC.
    pub launch_time: String,
    pub region: RegionConfig,
    /// Optional path to a sounding CSV; omitted means synthetic atmosphere.
    #[serde(default)]
    pub sounding_csv: Option<PathBuf>,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Errors that can occur while loading scenario files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load scenarios from a YAML file, a TOML file, or a directory of TOML files.
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioConfig>, ConfigError> {
    load_records(path)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
