use std::io::Write;

use chrono::NaiveDate;

use aerostat_planner::ascent::{Trajectory, TrajectoryPoint};
use aerostat_planner::plot::{TrackSample, read_track_csv, render_ascent, track_samples};

fn launch() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

#[test]
fn decimation_keeps_launch_and_final_points() {
    let trajectory = Trajectory {
        points: (0..1001)
            .map(|i| TrajectoryPoint {
                horizontal_m: i as f64 * 0.4,
                height_m: i as f64 * 0.02,
            })
            .collect(),
        dt_s: 0.1,
    };
    let samples = track_samples(&trajectory, 100);

    assert_eq!(samples.len(), 11);
    assert!((samples[0].time_s).abs() < 1e-12);
    assert!((samples[0].height_m).abs() < 1e-12);
    let last = samples.last().unwrap();
    assert!((last.time_s - 100.0).abs() < 1e-9);
    assert!((last.height_m - 20.0).abs() < 1e-9);
}

#[test]
fn zero_stride_is_clamped_instead_of_dividing_by_zero() {
    let trajectory = Trajectory {
        points: vec![
            TrajectoryPoint {
                horizontal_m: 0.0,
                height_m: 0.0,
            },
            TrajectoryPoint {
                horizontal_m: 1.0,
                height_m: 0.5,
            },
        ],
        dt_s: 0.1,
    };
    assert_eq!(track_samples(&trajectory, 0).len(), 2);
}

#[test]
fn exported_csv_round_trips_through_the_reader() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("track.csv");
    let mut file = std::fs::File::create(&path).expect("create");
    writeln!(file, "sample_index,time_s,timestamp_utc,horizontal_m,height_m").unwrap();
    writeln!(file, "0,0.0,2024-06-01 10:00:00,0.000,0.000").unwrap();
    writeln!(file, "100,10.0,2024-06-01 10:00:10,40.500,1.918").unwrap();
    drop(file);

    let samples = read_track_csv(&path).expect("samples");
    assert_eq!(samples.len(), 2);
    assert!((samples[1].time_s - 10.0).abs() < 1e-9);
    assert!((samples[1].horizontal_m - 40.5).abs() < 1e-9);
    assert!((samples[1].height_m - 1.918).abs() < 1e-9);
}

#[test]
fn renders_a_nonempty_png() {
    let samples: Vec<TrackSample> = (0..200)
        .map(|i| TrackSample {
            time_s: i as f64 * 60.0,
            horizontal_m: i as f64 * 240.0,
            height_m: i as f64 * 25.0,
        })
        .collect();

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ascent.png");
    render_ascent(&samples, launch(), 3_600.0, &path, 640, 480).expect("render");

    let bytes = std::fs::read(&path).expect("png bytes");
    assert!(bytes.len() > 1_000, "suspiciously small PNG: {}", bytes.len());
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn single_sample_still_renders_a_frame() {
    let samples = vec![TrackSample {
        time_s: 0.0,
        horizontal_m: 0.0,
        height_m: 0.0,
    }];
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested/frame.png");
    render_ascent(&samples, launch(), 3_600.0, &path, 320, 240).expect("render");
    assert!(path.is_file());
}
