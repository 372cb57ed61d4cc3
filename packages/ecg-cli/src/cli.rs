use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ecgprep",
    version,
    about = "ECG conditioning and fixed-point preparation tool",
    long_about = "Condition a single-channel ECG recording (baseline-wander highpass,\n\
                  powerline notch) and prepare a segment as Q31 fixed-point samples\n\
                  with round-trip validation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the conditioning pipeline on a recording
    Run(RunArgs),
    /// Compute the one-sided magnitude spectrum of a recording
    Spectrum(SpectrumArgs),
    /// Check that a recording loads and satisfies the signal invariants
    Validate(ValidateArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Input recording (delimited text, one row per sample)
    #[arg(long)]
    pub file: String,

    /// 0-based channel (column) index
    #[arg(long, default_value_t = 0)]
    pub channel: usize,

    /// Sampling rate in Hz
    #[arg(long, default_value_t = 360.0)]
    pub sr: f64,

    /// Highpass cutoff in Hz (baseline-wander removal)
    #[arg(long, default_value_t = 1.0)]
    pub hp_cutoff: f64,

    /// Highpass filter order
    #[arg(long, default_value_t = 6)]
    pub hp_order: usize,

    /// Notch center frequency in Hz
    #[arg(long, default_value_t = 40.0)]
    pub notch_freq: f64,

    /// Notch quality factor
    #[arg(long, default_value_t = 30.0)]
    pub notch_q: f64,

    /// Skip the notch stage
    #[arg(long, default_value_t = false)]
    pub no_notch: bool,

    /// Extraction window start in seconds
    #[arg(long, default_value_t = 0.0)]
    pub start: f64,

    /// Extraction window end in seconds
    #[arg(long, default_value_t = 2.0)]
    pub end: f64,

    /// Keep the full conditioned signal instead of extracting a window
    #[arg(long, default_value_t = false)]
    pub full_signal: bool,

    /// Skip Q31 quantization and round-trip validation
    #[arg(long, default_value_t = false)]
    pub no_quantize: bool,

    /// Round-trip tolerance (absolute, per sample; default two Q31 steps)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Output file for the JSON result (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Export the prepared segment as delimited text
    #[arg(long)]
    pub export: Option<String>,

    /// Prepend a time column (seconds) to the export
    #[arg(long, default_value_t = false)]
    pub time_column: bool,

    /// Omit the header row from the export
    #[arg(long, default_value_t = false)]
    pub no_header: bool,

    /// Compact JSON output (no indentation)
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct SpectrumArgs {
    /// Input recording (delimited text, one row per sample)
    #[arg(long)]
    pub file: String,

    /// 0-based channel (column) index
    #[arg(long, default_value_t = 0)]
    pub channel: usize,

    /// Sampling rate in Hz
    #[arg(long, default_value_t = 360.0)]
    pub sr: f64,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Compact JSON output (no indentation)
    #[arg(long, default_value_t = false)]
    pub compact: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Input recording (delimited text, one row per sample)
    #[arg(long)]
    pub file: String,

    /// 0-based channel (column) index
    #[arg(long, default_value_t = 0)]
    pub channel: usize,

    /// Sampling rate in Hz
    #[arg(long, default_value_t = 360.0)]
    pub sr: f64,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
