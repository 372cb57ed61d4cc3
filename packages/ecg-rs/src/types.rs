use serde::{Deserialize, Serialize};

use crate::error::{EcgError, Result};
use crate::fixed_point;

/// A uniformly sampled single-channel waveform.
///
/// Invariants: at least one sample, sampling rate strictly positive. Both are
/// enforced at construction; instances are immutable afterwards, and every
/// pipeline stage yields a new `Signal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    samples: Vec<f64>,
    sampling_rate_hz: f64,
}

impl Signal {
    pub fn new(samples: Vec<f64>, sampling_rate_hz: f64) -> Result<Self> {
        if samples.is_empty() {
            return Err(EcgError::InvalidSignal(
                "sample sequence is empty".to_string(),
            ));
        }
        if !sampling_rate_hz.is_finite() || sampling_rate_hz <= 0.0 {
            return Err(EcgError::InvalidSignal(format!(
                "sampling rate must be a positive number, got {}",
                sampling_rate_hz
            )));
        }
        Ok(Self {
            samples,
            sampling_rate_hz,
        })
    }

    /// Internal constructor for stages whose outputs already satisfy the
    /// invariants (filter outputs, validated slices, fixed-point decode).
    pub(crate) fn from_parts(samples: Vec<f64>, sampling_rate_hz: f64) -> Self {
        debug_assert!(!samples.is_empty());
        debug_assert!(sampling_rate_hz > 0.0);
        Self {
            samples,
            sampling_rate_hz,
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sampling_rate_hz(&self) -> f64 {
        self.sampling_rate_hz
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sampling_rate_hz
    }

    pub fn nyquist_hz(&self) -> f64 {
        self.sampling_rate_hz / 2.0
    }
}

/// Closed time interval in seconds, `0 <= start < end`.
///
/// Bounds against the actual signal duration are checked at extraction time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    start_secs: f64,
    end_secs: f64,
}

impl TimeWindow {
    pub fn new(start_secs: f64, end_secs: f64) -> Result<Self> {
        if !start_secs.is_finite() || !end_secs.is_finite() || start_secs < 0.0 {
            return Err(EcgError::InvalidWindow(format!(
                "window bounds must be finite and non-negative, got [{}, {}]",
                start_secs, end_secs
            )));
        }
        if start_secs >= end_secs {
            return Err(EcgError::InvalidWindow(format!(
                "window start {} s must be before end {} s",
                start_secs, end_secs
            )));
        }
        Ok(Self {
            start_secs,
            end_secs,
        })
    }

    pub fn start_secs(&self) -> f64 {
        self.start_secs
    }

    pub fn end_secs(&self) -> f64 {
        self.end_secs
    }

    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

/// One-sided magnitude spectrum of a real-valued signal.
///
/// Derived, read-only diagnostic data; nothing downstream consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spectrum {
    /// Bin frequencies in Hz, strictly increasing from 0 to Nyquist.
    pub frequencies_hz: Vec<f64>,
    /// Magnitude (complex modulus) per bin.
    pub magnitudes: Vec<f64>,
}

impl Spectrum {
    /// Magnitude of the bin closest to `freq_hz`.
    pub fn magnitude_near(&self, freq_hz: f64) -> Option<f64> {
        let idx = self
            .frequencies_hz
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (*a - freq_hz)
                    .abs()
                    .total_cmp(&(*b - freq_hz).abs())
            })
            .map(|(i, _)| i)?;
        self.magnitudes.get(idx).copied()
    }
}

/// Q31 fixed-point rendition of a [`Signal`].
///
/// Each sample is a signed 32-bit integer with 31 fractional bits; the scale
/// factor is 2^31 and the representable range is [-1, 1). Produced only by
/// [`crate::fixed_point::encode`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedPointSignal {
    samples: Vec<i32>,
    sampling_rate_hz: f64,
}

impl FixedPointSignal {
    pub(crate) fn from_parts(samples: Vec<i32>, sampling_rate_hz: f64) -> Self {
        Self {
            samples,
            sampling_rate_hz,
        }
    }

    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    pub fn sampling_rate_hz(&self) -> f64 {
        self.sampling_rate_hz
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Result of comparing an original segment against its fixed-point
/// round-tripped counterpart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundTripReport {
    /// Per-sample absolute error.
    pub errors: Vec<f64>,
    /// Largest absolute error.
    pub max_abs_error: f64,
    /// Tolerance the comparison was made against.
    pub tolerance: f64,
    /// Whether `max_abs_error <= tolerance`.
    pub within_tolerance: bool,
}

/// Conditioning pipeline options.
///
/// The defaults mirror the reference recording setup: 1 Hz / order-6 highpass
/// for baseline wander, a Q-30 notch at 40 Hz, a 0-2 s extraction window and
/// Q31 quantization with a two-step round-trip tolerance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub highpass_cutoff_hz: f64,
    pub highpass_order: usize,
    pub enable_notch: bool,
    pub notch_center_hz: f64,
    pub notch_q: f64,
    /// Extraction window; `None` keeps the full conditioned signal.
    pub window: Option<TimeWindow>,
    pub enable_quantization: bool,
    pub round_trip_tolerance: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            highpass_cutoff_hz: 1.0,
            highpass_order: 6,
            enable_notch: true,
            notch_center_hz: 40.0,
            notch_q: 30.0,
            window: Some(TimeWindow {
                start_secs: 0.0,
                end_secs: 2.0,
            }),
            enable_quantization: true,
            round_trip_tolerance: fixed_point::DEFAULT_ROUND_TRIP_TOLERANCE,
        }
    }
}

/// Everything a single pipeline run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub id: String,
    pub config: PipelineConfig,
    /// Signal after highpass (and optional notch) conditioning.
    pub conditioned: Signal,
    /// Spectrum of the raw input, kept for before/after comparison.
    pub raw_spectrum: Spectrum,
    pub conditioned_spectrum: Spectrum,
    /// Windowed slice of the conditioned signal (or the whole of it).
    pub segment: Signal,
    pub fixed_point: Option<FixedPointSignal>,
    pub reconstructed: Option<Signal>,
    pub round_trip: Option<RoundTripReport>,
    pub created_at: String,
}
