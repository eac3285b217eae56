//! Ascent planning for lighter-than-air balloons.
//!
//! The member crates hold the numerical core (profile resampling, ascent
//! integration, parameter search); this facade ties them together with the
//! sounding-source seam, the planning pipeline, and trajectory rendering.
//! Keeping the glue in a library crate lets the CLI and any future
//! front-end share it.

pub mod fields;
pub mod pipeline;
pub mod plot;

pub use aerostat_ascent as ascent;
pub use aerostat_config as config;
pub use aerostat_core::{constants, grid, units};
pub use aerostat_export as export;
pub use aerostat_optimizer as optimizer;
pub use aerostat_profile as profile;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
