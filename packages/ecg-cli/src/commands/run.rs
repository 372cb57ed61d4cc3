use ecg_rs::{fixed_point, Pipeline, PipelineConfig, TimeWindow};

use crate::cli::RunArgs;
use crate::exit_codes;
use crate::loader;
use crate::output;

pub fn execute(args: RunArgs) -> i32 {
    let signal = match loader::load_channel(&args.file, args.channel, args.sr) {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    let window = if args.full_signal {
        None
    } else {
        match TimeWindow::new(args.start, args.end) {
            Ok(w) => Some(w),
            Err(e) => {
                eprintln!("Error: {}", e);
                return exit_codes::INPUT_ERROR;
            }
        }
    };

    let config = PipelineConfig {
        highpass_cutoff_hz: args.hp_cutoff,
        highpass_order: args.hp_order,
        enable_notch: !args.no_notch,
        notch_center_hz: args.notch_freq,
        notch_q: args.notch_q,
        window,
        enable_quantization: !args.no_quantize,
        round_trip_tolerance: args
            .tolerance
            .unwrap_or(fixed_point::DEFAULT_ROUND_TRIP_TOLERANCE),
    };

    if !args.quiet {
        eprintln!(
            "Conditioning {} ({} samples at {} Hz)...",
            args.file,
            signal.len(),
            args.sr
        );
        eprintln!(
            "  Highpass: {} Hz, order {}",
            config.highpass_cutoff_hz, config.highpass_order
        );
        if config.enable_notch {
            eprintln!(
                "  Notch: {} Hz, Q {}",
                config.notch_center_hz, config.notch_q
            );
        }
    }

    let result = match Pipeline::new(config).run(&signal) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Pipeline failed: {}", e);
            return exit_codes::PIPELINE_ERROR;
        }
    };

    // A failed round trip means the segment is not fit for fixed-point
    // consumption; abort before any export is written.
    if let Some(ref report) = result.round_trip {
        if !report.within_tolerance {
            eprintln!(
                "Round-trip validation failed: max error {:e} exceeds tolerance {:e}",
                report.max_abs_error, report.tolerance
            );
            return exit_codes::TOLERANCE_EXCEEDED;
        }
    }

    if let Some(ref path) = args.export {
        let rendered = output::render_segment(&result, args.time_column, !args.no_header);
        if let Err(e) = output::write_atomic(path, &rendered) {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
        if !args.quiet {
            eprintln!("Segment exported to {}", path);
        }
    }

    match output::to_json(&result, args.compact) {
        Ok(json) => {
            if let Err(e) = output::write_output(&json, args.output.as_deref()) {
                eprintln!("Error: {}", e);
                return exit_codes::EXECUTION_ERROR;
            }
            if !args.quiet {
                if let Some(ref path) = args.output {
                    eprintln!("Results written to {}", path);
                }
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            exit_codes::EXECUTION_ERROR
        }
    }
}
