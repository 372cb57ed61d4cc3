//! Q31 fixed-point codec and round-trip validation.
//!
//! Encoding assumes samples in [-1, 1). Out-of-range values saturate to the
//! representable extrema rather than wrapping, so a contract violation shows
//! up as a bounded, diagnosable clip instead of a sign flip.

use crate::error::{EcgError, Result};
use crate::types::{FixedPointSignal, RoundTripReport, Signal};

/// Fractional bits in the Q31 format.
pub const Q31_FRACTIONAL_BITS: u32 = 31;

/// Q31 scale factor, 2^31.
pub const Q31_SCALE: f64 = 2147483648.0;

/// One quantization step, 2^-31.
pub const Q31_STEP: f64 = 1.0 / Q31_SCALE;

/// Two quantization steps; rounding guarantees the round trip stays inside
/// this bound for any in-range sample.
pub const DEFAULT_ROUND_TRIP_TOLERANCE: f64 = 2.0 * Q31_STEP;

/// Convert every sample to Q31: `round(x * 2^31)` clipped to
/// `[-2^31, 2^31 - 1]`. Order-preserving, no side effects.
pub fn encode(signal: &Signal) -> FixedPointSignal {
    let samples = signal.samples().iter().map(|&x| quantize(x)).collect();
    FixedPointSignal::from_parts(samples, signal.sampling_rate_hz())
}

/// Rescale Q31 samples back to floating point, `v / 2^31`.
///
/// Exact mathematical inverse of the unsaturated portion of [`encode`].
pub fn decode(fp: &FixedPointSignal) -> Signal {
    let samples = fp.samples().iter().map(|&v| v as f64 * Q31_STEP).collect();
    Signal::from_parts(samples, fp.sampling_rate_hz())
}

fn quantize(x: f64) -> i32 {
    let scaled = (x * Q31_SCALE).round();
    if scaled >= i32::MAX as f64 {
        i32::MAX
    } else if scaled <= i32::MIN as f64 {
        i32::MIN
    } else {
        scaled as i32
    }
}

/// Compare `original` against its round-tripped `reconstructed` counterpart.
///
/// Fails with [`EcgError::LengthMismatch`] when the sample counts differ;
/// that is an upstream contract violation, never a partial report.
pub fn validate(
    original: &Signal,
    reconstructed: &Signal,
    tolerance: f64,
) -> Result<RoundTripReport> {
    if original.len() != reconstructed.len() {
        return Err(EcgError::LengthMismatch {
            original: original.len(),
            reconstructed: reconstructed.len(),
        });
    }

    let errors: Vec<f64> = original
        .samples()
        .iter()
        .zip(reconstructed.samples())
        .map(|(a, b)| (a - b).abs())
        .collect();
    let max_abs_error = errors.iter().copied().fold(0.0, f64::max);

    Ok(RoundTripReport {
        errors,
        max_abs_error,
        tolerance,
        within_tolerance: max_abs_error <= tolerance,
    })
}
