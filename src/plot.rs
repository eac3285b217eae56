//! Trajectory rendering: downwind track and ascent profile on one bitmap.

use std::path::Path;

use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use plotters::prelude::*;
use thiserror::Error;

use aerostat_ascent::Trajectory;
use aerostat_core::units::{m_to_km, seconds_to_minutes};

/// One renderable sample; decoupled from [`Trajectory`] so exported CSV files
/// can be re-rendered without re-running a simulation.
#[derive(Debug, Clone, Copy)]
pub struct TrackSample {
    pub time_s: f64,
    pub horizontal_m: f64,
    pub height_m: f64,
}

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV missing '{0}' column")]
    MissingColumn(&'static str),
    #[error("output path contains invalid UTF-8")]
    InvalidPath,
    #[error("rendering failed: {0}")]
    Render(String),
}

fn render_err<E: std::error::Error>(err: E) -> PlotError {
    PlotError::Render(err.to_string())
}

/// Thin a trajectory down to every `stride`-th point, always keeping the
/// launch point and the final point.
pub fn track_samples(trajectory: &Trajectory, stride: usize) -> Vec<TrackSample> {
    let stride = stride.max(1);
    let last = trajectory.points.len().saturating_sub(1);
    trajectory
        .points
        .iter()
        .enumerate()
        .filter(|(i, _)| i % stride == 0 || *i == last)
        .map(|(i, p)| TrackSample {
            time_s: i as f64 * trajectory.dt_s,
            horizontal_m: p.horizontal_m,
            height_m: p.height_m,
        })
        .collect()
}

/// Read samples back from an exported trajectory CSV.
pub fn read_track_csv(path: &Path) -> Result<Vec<TrackSample>, PlotError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or(PlotError::MissingColumn(name))
    };
    let col_time = column("time_s")?;
    let col_horizontal = column("horizontal_m")?;
    let col_height = column("height_m")?;

    let mut samples = Vec::new();
    for rec in rdr.records() {
        let r = rec?;
        let value = |idx: usize| -> f64 {
            r.get(idx)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(f64::NAN)
        };
        let sample = TrackSample {
            time_s: value(col_time),
            horizontal_m: value(col_horizontal),
            height_m: value(col_height),
        };
        if sample.time_s.is_finite() && sample.height_m.is_finite() {
            samples.push(sample);
        }
    }
    Ok(samples)
}

/// Render the downwind track (top) and height-vs-time curve (bottom).
///
/// Wall-clock labels are stamped on the track every `annotation_step_s`
/// seconds of flight, offset from `launch_time`. Empty and single-point
/// inputs render an empty chart frame rather than failing.
pub fn render_ascent(
    samples: &[TrackSample],
    launch_time: NaiveDateTime,
    annotation_step_s: f64,
    output: &Path,
    width: u32,
    height: u32,
) -> Result<(), PlotError> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let output_str = output.to_str().ok_or(PlotError::InvalidPath)?;
    let root = BitMapBackend::new(output_str, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 22.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 15.0, FontStyle::Normal);

    let (track_area, profile_area) = root.split_vertically((height as f64 * 0.55) as u32);

    let (x_min_km, x_max_km) = padded_range(samples.iter().map(|s| m_to_km(s.horizontal_m)));
    let (_, y_max_km) = padded_range(samples.iter().map(|s| m_to_km(s.height_m)));
    let (_, t_max_min) = padded_range(samples.iter().map(|s| seconds_to_minutes(s.time_s)));

    {
        let mut chart = ChartBuilder::on(&track_area)
            .margin(15)
            .caption("Downwind track", caption_font.clone())
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min_km..x_max_km, 0.0..y_max_km)
            .map_err(render_err)?;
        chart
            .configure_mesh()
            .x_desc("Downwind distance (km)")
            .y_desc("Height (km)")
            .label_style(label_font.clone())
            .x_labels(6)
            .y_labels(5)
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(LineSeries::new(
                samples
                    .iter()
                    .map(|s| (m_to_km(s.horizontal_m), m_to_km(s.height_m))),
                &BLUE,
            ))
            .map_err(render_err)?;

        let mut next_annotation_s = 0.0;
        for sample in samples {
            if sample.time_s + 1e-9 < next_annotation_s {
                continue;
            }
            let stamp = launch_time + chrono::Duration::seconds(sample.time_s as i64);
            chart
                .draw_series(std::iter::once(Text::new(
                    stamp.format("%H:%M").to_string(),
                    (m_to_km(sample.horizontal_m), m_to_km(sample.height_m)),
                    label_font.clone().color(&BLACK),
                )))
                .map_err(render_err)?;
            next_annotation_s += annotation_step_s.max(1.0);
        }
    }

    {
        let mut chart = ChartBuilder::on(&profile_area)
            .margin(15)
            .caption("Ascent profile", caption_font)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0..t_max_min, 0.0..y_max_km)
            .map_err(render_err)?;
        chart
            .configure_mesh()
            .x_desc("Time since launch (min)")
            .y_desc("Height (km)")
            .label_style(label_font)
            .x_labels(6)
            .y_labels(5)
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(LineSeries::new(
                samples
                    .iter()
                    .map(|s| (seconds_to_minutes(s.time_s), m_to_km(s.height_m))),
                &RED,
            ))
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

/// Finite min/max with padding so degenerate inputs still build a chart.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < 1e-9 {
        return (min - 0.5, max + 0.5);
    }
    (min, max)
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}
