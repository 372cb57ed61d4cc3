use serde::Serialize;

use crate::cli::ValidateArgs;
use crate::exit_codes;
use crate::loader;
use crate::output;

#[derive(Serialize)]
struct ValidateOutput {
    file: String,
    channel: usize,
    valid: bool,
    samples: Option<usize>,
    sampling_rate_hz: f64,
    duration_secs: Option<f64>,
    error: Option<String>,
}

pub fn execute(args: ValidateArgs) -> i32 {
    let loaded = loader::load_channel(&args.file, args.channel, args.sr);

    let result = match &loaded {
        Ok(signal) => ValidateOutput {
            file: args.file.clone(),
            channel: args.channel,
            valid: true,
            samples: Some(signal.len()),
            sampling_rate_hz: args.sr,
            duration_secs: Some(signal.duration_secs()),
            error: None,
        },
        Err(msg) => ValidateOutput {
            file: args.file.clone(),
            channel: args.channel,
            valid: false,
            samples: None,
            sampling_rate_hz: args.sr,
            duration_secs: None,
            error: Some(msg.clone()),
        },
    };

    if args.json {
        match output::to_json(&result, false) {
            Ok(json) => {
                if let Err(e) = output::write_output(&json, None) {
                    eprintln!("Error: {}", e);
                    return exit_codes::EXECUTION_ERROR;
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return exit_codes::EXECUTION_ERROR;
            }
        }
    } else if let Some(ref err) = result.error {
        eprintln!("Error: {}", err);
    } else {
        println!(
            "File '{}' channel {} is valid ({} samples, {:.3} s at {} Hz)",
            args.file,
            args.channel,
            result.samples.unwrap_or(0),
            result.duration_secs.unwrap_or(0.0),
            args.sr
        );
    }

    if result.valid {
        exit_codes::SUCCESS
    } else {
        exit_codes::INPUT_ERROR
    }
}
