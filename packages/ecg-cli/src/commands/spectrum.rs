use ecg_rs::spectral;

use crate::cli::SpectrumArgs;
use crate::exit_codes;
use crate::loader;
use crate::output;

pub fn execute(args: SpectrumArgs) -> i32 {
    let signal = match loader::load_channel(&args.file, args.channel, args.sr) {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    let spectrum = spectral::analyze(&signal);

    match output::to_json(&spectrum, args.compact) {
        Ok(json) => {
            if let Err(e) = output::write_output(&json, args.output.as_deref()) {
                eprintln!("Error: {}", e);
                return exit_codes::EXECUTION_ERROR;
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            eprintln!("Error serializing spectrum: {}", e);
            exit_codes::EXECUTION_ERROR
        }
    }
}
