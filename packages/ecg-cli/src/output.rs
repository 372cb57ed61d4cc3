use std::io::Write;
use std::path::Path;

use ecg_rs::PipelineResult;

/// Write a string to stdout or a file.
pub fn write_output(contents: &str, output_path: Option<&str>) -> Result<(), String> {
    match output_path {
        Some(path) => std::fs::write(Path::new(path), contents)
            .map_err(|e| format!("Failed to write output file '{}': {}", path, e)),
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(contents.as_bytes())
                .and_then(|_| handle.write_all(b"\n"))
                .map_err(|e| format!("Failed to write to stdout: {}", e))
        }
    }
}

/// Serialize a value to JSON (pretty or compact).
pub fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<String, String> {
    if compact {
        serde_json::to_string(value).map_err(|e| format!("JSON serialization failed: {}", e))
    } else {
        serde_json::to_string_pretty(value)
            .map_err(|e| format!("JSON serialization failed: {}", e))
    }
}

/// Atomically write `contents` to `path`: a sibling temp file is written
/// first and renamed into place, so a failed run never leaves a partial
/// export behind.
pub fn write_atomic(path: &str, contents: &str) -> Result<(), String> {
    let tmp = format!("{}.tmp", path);
    std::fs::write(&tmp, contents)
        .map_err(|e| format!("Failed to write temp file '{}': {}", tmp, e))?;
    std::fs::rename(&tmp, path)
        .map_err(|e| format!("Failed to move '{}' into place: {}", tmp, e))
}

/// Render the prepared segment as delimited text: Q31 integers when
/// quantization ran, floating-point amplitudes otherwise.
pub fn render_segment(result: &PipelineResult, time_column: bool, header: bool) -> String {
    let fs = result.segment.sampling_rate_hz();
    let mut out = String::new();

    match result.fixed_point {
        Some(ref fp) => {
            if header {
                out.push_str(if time_column { "time_s,q31\n" } else { "q31\n" });
            }
            for (i, v) in fp.samples().iter().enumerate() {
                if time_column {
                    out.push_str(&format!("{:.6},{}\n", i as f64 / fs, v));
                } else {
                    out.push_str(&format!("{}\n", v));
                }
            }
        }
        None => {
            if header {
                out.push_str(if time_column {
                    "time_s,amplitude\n"
                } else {
                    "amplitude\n"
                });
            }
            for (i, v) in result.segment.samples().iter().enumerate() {
                if time_column {
                    out.push_str(&format!("{:.6},{}\n", i as f64 / fs, v));
                } else {
                    out.push_str(&format!("{}\n", v));
                }
            }
        }
    }

    out
}
