use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::Parser;

use aerostat_planner::plot::{read_track_csv, render_ascent};

#[derive(Parser)]
#[command(author, version, about = "Render an exported trajectory CSV to PNG")]
struct Cli {
    /// Trajectory CSV produced by the `plan` binary
    #[arg(long)]
    input: PathBuf,

    #[arg(long, default_value = "artifacts/ascent.png")]
    output: PathBuf,

    /// Launch timestamp for wall-clock labels, `YYYY-MM-DD HH:MM:SS`
    #[arg(long, default_value = "2024-06-01 10:00:00")]
    launch: String,

    /// Wall-clock annotation interval, seconds
    #[arg(long, default_value_t = 3600.0)]
    annotate_every: f64,

    #[arg(long, default_value_t = 1000)]
    width: u32,

    #[arg(long, default_value_t = 800)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let launch_time = NaiveDateTime::parse_from_str(&cli.launch, "%Y-%m-%d %H:%M:%S")?;
    let samples = read_track_csv(&cli.input)?;
    render_ascent(
        &samples,
        launch_time,
        cli.annotate_every,
        &cli.output,
        cli.width,
        cli.height,
    )?;
    println!("rendered {} samples to {}", samples.len(), cli.output.display());
    Ok(())
}
