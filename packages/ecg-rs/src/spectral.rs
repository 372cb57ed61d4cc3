//! One-sided magnitude spectra.
//!
//! Diagnostic side channel only: spectra are used to verify conditioning
//! (before/after comparison) and are never fed back into the pipeline.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::types::{Signal, Spectrum};

/// Compute the one-sided magnitude spectrum of `signal`.
///
/// The input is real-valued, so the spectrum is conjugate-symmetric and only
/// bins `0..=n/2` are kept; bin `k` sits at `k * fs / n` Hz and carries the
/// complex modulus of the DFT coefficient.
pub fn analyze(signal: &Signal) -> Spectrum {
    let n = signal.len();
    let mut buf: Vec<Complex<f64>> = signal
        .samples()
        .iter()
        .map(|&x| Complex::new(x, 0.0))
        .collect();

    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(n).process(&mut buf);

    let bins = n / 2 + 1;
    let fs = signal.sampling_rate_hz();
    let frequencies_hz = (0..bins).map(|k| k as f64 * fs / n as f64).collect();
    let magnitudes = buf[..bins].iter().map(|c| c.norm()).collect();

    Spectrum {
        frequencies_hz,
        magnitudes,
    }
}
