//! Export helpers for CSV and JSON artifacts.

pub mod trajectory {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    const HEADER: &str = "sample_index,time_s,timestamp_utc,horizontal_m,height_m";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write the standard trajectory CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row emitted by the trajectory exporter.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub sample_index: usize,
        pub time_s: f64,
        pub timestamp_utc: &'a str,
        pub horizontal_m: f64,
        pub height_m: f64,
    }

    impl<'a> Record<'a> {
        /// Serialize the record to CSV, matching the standard header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{},{:.1},{},{:.3},{:.3}",
                self.sample_index, self.time_s, self.timestamp_utc, self.horizontal_m, self.height_m,
            )
        }
    }
}

pub mod summary {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    /// Decimated trajectory sample carried inside the JSON summary.
    #[derive(Debug, Clone, Serialize)]
    pub struct Sample {
        pub time_s: f64,
        pub horizontal_m: f64,
        pub height_m: f64,
    }

    /// Envelope of one planned flight, written as a JSON sidecar next to the CSV.
    #[derive(Debug, Serialize)]
    pub struct FlightSummary<'a> {
        pub scenario: &'a str,
        pub launch_time_utc: &'a str,
        pub region_west_deg: f64,
        pub region_east_deg: f64,
        pub region_south_deg: f64,
        pub region_north_deg: f64,
        pub target_height_m: f64,
        pub cargo_mass_kg: f64,
        pub envelope_volume_m3: f64,
        pub lift_force_n: f64,
        pub peak_height_m: f64,
        pub flight_time_s: f64,
        pub search_iterations: usize,
        pub samples: Vec<Sample>,
    }

    /// Write the flight summary sidecar, creating parent directories as needed.
    pub fn write_summary(path: &Path, summary: &FlightSummary<'_>) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(path)?, summary)?;
        Ok(())
    }
}
