use std::path::PathBuf;

use clap::Parser;

use aerostat_planner::config::{ScenarioConfig, load_scenarios};
use aerostat_planner::export::summary::{FlightSummary, Sample, write_summary};
use aerostat_planner::export::trajectory::{Record, write_header, writer_for_path};
use aerostat_planner::fields::{CsvSounding, SoundingSource, SyntheticSounding};
use aerostat_planner::pipeline::plan_flight;
use aerostat_planner::plot::{render_ascent, track_samples};

#[derive(Parser)]
#[command(author, version, about = "Plan a balloon ascent and export its trajectory")]
struct Cli {
    /// Scenario manifest: YAML file, TOML file, or directory of TOML files
    #[arg(long)]
    scenario: PathBuf,

    /// Scenario name to plan (defaults to the first in the manifest)
    #[arg(long)]
    name: Option<String>,

    /// Output directory for CSV, JSON, and PNG artifacts
    #[arg(long, default_value = "artifacts")]
    out_dir: PathBuf,

    /// Keep every Nth trajectory sample in the exports
    #[arg(long, default_value_t = 100)]
    stride: usize,

    /// Wall-clock annotation interval on the track plot, seconds
    #[arg(long, default_value_t = 3600.0)]
    annotate_every: f64,

    /// Skip the PNG render
    #[arg(long, default_value_t = false)]
    no_plot: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let scenarios = load_scenarios(&cli.scenario)?;
    let scenario = select_scenario(&scenarios, cli.name.as_deref())?;

    let source: Box<dyn SoundingSource> = match &scenario.sounding_csv {
        Some(path) => Box::new(CsvSounding::new(path.clone())),
        None => Box::new(SyntheticSounding::default()),
    };

    let plan = plan_flight(scenario, source.as_ref())?;
    let samples = track_samples(&plan.trajectory, cli.stride);

    std::fs::create_dir_all(&cli.out_dir)?;
    let csv_path = cli.out_dir.join(format!("{}_trajectory.csv", plan.scenario));
    let json_path = cli.out_dir.join(format!("{}_summary.json", plan.scenario));
    let png_path = cli.out_dir.join(format!("{}_ascent.png", plan.scenario));

    let mut writer = writer_for_path(&csv_path)?;
    write_header(writer.as_mut())?;
    for (index, sample) in samples.iter().enumerate() {
        let stamp = plan.launch_time + chrono::Duration::seconds(sample.time_s as i64);
        Record {
            sample_index: index,
            time_s: sample.time_s,
            timestamp_utc: &stamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            horizontal_m: sample.horizontal_m,
            height_m: sample.height_m,
        }
        .write_to(writer.as_mut())?;
    }
    drop(writer);

    let launch_time_utc = plan.launch_time.format("%Y-%m-%d %H:%M:%S").to_string();
    write_summary(
        &json_path,
        &FlightSummary {
            scenario: &plan.scenario,
            launch_time_utc: &launch_time_utc,
            region_west_deg: scenario.region.west_deg,
            region_east_deg: scenario.region.east_deg,
            region_south_deg: scenario.region.south_deg,
            region_north_deg: scenario.region.north_deg,
            target_height_m: plan.target_height_m,
            cargo_mass_kg: plan.config.cargo_mass_kg,
            envelope_volume_m3: plan.config.envelope_volume_m3,
            lift_force_n: plan.config.lift_force_n(),
            peak_height_m: plan.peak_height_m,
            flight_time_s: plan.trajectory.duration_s(),
            search_iterations: plan.search_iterations,
            samples: samples
                .iter()
                .map(|s| Sample {
                    time_s: s.time_s,
                    horizontal_m: s.horizontal_m,
                    height_m: s.height_m,
                })
                .collect(),
        },
    )?;

    if !cli.no_plot {
        render_ascent(
            &samples,
            plan.launch_time,
            cli.annotate_every,
            &png_path,
            1000,
            800,
        )?;
    }

    println!("scenario:        {}", plan.scenario);
    println!("target height:   {:.0} m", plan.target_height_m);
    println!("cargo mass:      {:.2} kg", plan.config.cargo_mass_kg);
    println!("envelope volume: {:.1} m^3", plan.config.envelope_volume_m3);
    println!("lift force:      {:.2} N", plan.config.lift_force_n());
    println!("peak height:     {:.1} m", plan.peak_height_m);
    println!("flight time:     {:.0} s", plan.trajectory.duration_s());
    println!("iterations:      {}", plan.search_iterations);

    Ok(())
}

fn select_scenario<'a>(
    scenarios: &'a [ScenarioConfig],
    requested: Option<&str>,
) -> anyhow::Result<&'a ScenarioConfig> {
    if scenarios.is_empty() {
        anyhow::bail!("scenario manifest is empty");
    }
    match requested {
        Some(name) => scenarios
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("scenario '{name}' not found in manifest")),
        None => Ok(&scenarios[0]),
    }
}
