use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn ecgprep() -> Command {
    Command::cargo_bin("ecgprep").unwrap()
}

/// Write a 3 s synthetic recording at 360 Hz: baseline drift plus a 1.5 Hz
/// component, scaled well inside the Q31 range.
fn write_recording(samples: usize) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "lead_ii").unwrap();
    for i in 0..samples {
        let t = i as f64 / 360.0;
        let v = 0.5 * (2.0 * std::f64::consts::PI * 0.3 * t).sin()
            + 0.25 * (2.0 * std::f64::consts::PI * 1.5 * t).sin();
        writeln!(file, "{}", v).unwrap();
    }
    file.flush().unwrap();
    file
}

// =============================================================================
// GENERAL
// =============================================================================

#[test]
fn test_no_args_shows_help() {
    ecgprep()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    ecgprep()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ecgprep"));
}

#[test]
fn test_help_flag() {
    ecgprep()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("conditioning"));
}

// =============================================================================
// RUN SUBCOMMAND
// =============================================================================

#[test]
fn test_run_default_pipeline() {
    let file = write_recording(1080);
    ecgprep()
        .arg("run")
        .arg("--file")
        .arg(file.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"round_trip\""))
        .stdout(predicate::str::contains("\"within_tolerance\": true"));
}

#[test]
fn test_run_missing_file() {
    ecgprep()
        .arg("run")
        .arg("--file")
        .arg("/nonexistent/recording.csv")
        .arg("--quiet")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_run_rejects_cutoff_beyond_nyquist() {
    let file = write_recording(1080);
    ecgprep()
        .arg("run")
        .arg("--file")
        .arg(file.path())
        .arg("--hp-cutoff")
        .arg("200")
        .arg("--quiet")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid filter specification"));
}

#[test]
fn test_run_rejects_window_beyond_recording() {
    // One second of data cannot carry the default 0-2 s window.
    let file = write_recording(360);
    ecgprep()
        .arg("run")
        .arg("--file")
        .arg(file.path())
        .arg("--quiet")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid extraction window"));
}

#[test]
fn test_run_full_signal_without_quantization() {
    let file = write_recording(1080);
    ecgprep()
        .arg("run")
        .arg("--file")
        .arg(file.path())
        .arg("--full-signal")
        .arg("--no-quantize")
        .arg("--no-notch")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"fixed_point\": null"))
        .stdout(predicate::str::contains("\"round_trip\": null"));
}

#[test]
fn test_run_exports_q31_segment() {
    let file = write_recording(1080);
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("segment.csv");

    ecgprep()
        .arg("run")
        .arg("--file")
        .arg(file.path())
        .arg("--export")
        .arg(&export)
        .arg("--time-column")
        .arg("--quiet")
        .arg("--output")
        .arg(dir.path().join("result.json"))
        .assert()
        .success();

    let contents = std::fs::read_to_string(&export).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("time_s,q31"));
    // Header plus one row per sample of the 2 s window.
    assert_eq!(contents.lines().count(), 721);
    // No temp file left behind.
    assert!(!dir.path().join("segment.csv.tmp").exists());
}

#[test]
fn test_run_tolerance_failure_blocks_export() {
    let file = write_recording(1080);
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("segment.csv");

    ecgprep()
        .arg("run")
        .arg("--file")
        .arg(file.path())
        .arg("--export")
        .arg(&export)
        .arg("--tolerance")
        .arg("0")
        .arg("--quiet")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Round-trip validation failed"));

    assert!(!export.exists());
}

// =============================================================================
// SPECTRUM SUBCOMMAND
// =============================================================================

#[test]
fn test_spectrum_subcommand() {
    let file = write_recording(720);
    ecgprep()
        .arg("spectrum")
        .arg("--file")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"frequencies_hz\""))
        .stdout(predicate::str::contains("\"magnitudes\""));
}

// =============================================================================
// VALIDATE SUBCOMMAND
// =============================================================================

#[test]
fn test_validate_good_recording() {
    let file = write_recording(720);
    ecgprep()
        .arg("validate")
        .arg("--file")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("720 samples"));
}

#[test]
fn test_validate_json_output() {
    let file = write_recording(720);
    ecgprep()
        .arg("validate")
        .arg("--file")
        .arg(file.path())
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": true"))
        .stdout(predicate::str::contains("\"samples\": 720"));
}

#[test]
fn test_validate_missing_column() {
    let file = write_recording(720);
    ecgprep()
        .arg("validate")
        .arg("--file")
        .arg(file.path())
        .arg("--channel")
        .arg("5")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no column 5"));
}
