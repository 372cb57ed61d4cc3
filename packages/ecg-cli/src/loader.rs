use ecg_rs::Signal;

/// Load one channel from a delimited text recording.
///
/// Rows are samples; values may be separated by commas, semicolons, or
/// whitespace. Empty lines and `#` comments are skipped, and a non-numeric
/// first row is treated as a header.
pub fn load_channel(path: &str, channel: usize, sampling_rate_hz: f64) -> Result<Signal, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path, e))?;
    parse_channel(&content, channel, sampling_rate_hz)
        .map_err(|e| format!("{}: {}", path, e))
}

fn parse_channel(content: &str, channel: usize, sampling_rate_hz: f64) -> Result<Signal, String> {
    let mut samples = Vec::new();
    let mut first_row = true;

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();
        let field = fields.get(channel).ok_or_else(|| {
            format!(
                "line {}: no column {} ({} columns present)",
                lineno + 1,
                channel,
                fields.len()
            )
        })?;

        match field.parse::<f64>() {
            Ok(value) => samples.push(value),
            Err(_) if first_row => {
                // Header row.
            }
            Err(_) => {
                return Err(format!(
                    "line {}: '{}' is not a number",
                    lineno + 1,
                    field
                ));
            }
        }
        first_row = false;
    }

    Signal::new(samples, sampling_rate_hz).map_err(|e| e.to_string())
}
