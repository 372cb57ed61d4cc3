//! Zero-phase filtering.
//!
//! A causal IIR pass shifts every component by its group delay; running the
//! filter forward, reversing, running it again and reversing once more
//! cancels that shift exactly, at the cost of needing the whole finite
//! sequence in memory.
//!
//! Edge handling: the input is extended on both sides with an odd
//! (point-reflected) copy of `3 * max(len(a), len(b))` samples, and each pass
//! starts from the filter's step-response steady state scaled by the first
//! extended sample. The extension is stripped afterwards, so the output has
//! exactly the input length.

use nalgebra::{DMatrix, DVector};

use crate::error::{EcgError, Result};
use crate::filter::FilterCoefficients;
use crate::types::Signal;

/// Single causal pass in direct form II transposed.
///
/// `zi` is the initial state (length `a.len() - 1`); zeros when `None`.
pub fn lfilter(coeffs: &FilterCoefficients, input: &[f64], zi: Option<&[f64]>) -> Vec<f64> {
    let b = coeffs.b();
    let a = coeffs.a();
    let order = a.len() - 1;

    let mut z = match zi {
        Some(zi) => zi.to_vec(),
        None => vec![0.0; order],
    };
    debug_assert_eq!(z.len(), order);

    let mut output = Vec::with_capacity(input.len());
    for &x in input {
        let y = b[0] * x + z.first().copied().unwrap_or(0.0);
        for i in 0..order.saturating_sub(1) {
            z[i] = b[i + 1] * x + z[i + 1] - a[i + 1] * y;
        }
        if order > 0 {
            z[order - 1] = b[order] * x - a[order] * y;
        }
        output.push(y);
    }
    output
}

/// Apply `coeffs` forward and backward over `signal` with zero net phase.
///
/// Deterministic; output length equals input length. Fails with
/// [`EcgError::SignalTooShort`] when the signal cannot carry the edge
/// extension.
pub fn filtfilt(coeffs: &FilterCoefficients, signal: &Signal) -> Result<Signal> {
    let x = signal.samples();
    let pad = pad_len(coeffs);
    if x.len() <= pad {
        return Err(EcgError::SignalTooShort {
            required: pad + 1,
            actual: x.len(),
        });
    }

    let zi = steady_state(coeffs)?;
    let ext = odd_extension(x, pad);

    let forward = pass(coeffs, &ext, &zi);
    let mut reversed = forward;
    reversed.reverse();
    let mut backward = pass(coeffs, &reversed, &zi);
    backward.reverse();

    let samples = backward[pad..pad + x.len()].to_vec();
    Ok(Signal::from_parts(samples, signal.sampling_rate_hz()))
}

/// Extension length on each side; the input must be strictly longer.
pub fn pad_len(coeffs: &FilterCoefficients) -> usize {
    3 * coeffs.b().len().max(coeffs.a().len())
}

fn pass(coeffs: &FilterCoefficients, data: &[f64], zi: &[f64]) -> Vec<f64> {
    let scaled: Vec<f64> = zi.iter().map(|z| z * data[0]).collect();
    lfilter(coeffs, data, Some(&scaled))
}

/// Odd extension: `pad` samples point-reflected about each end sample.
fn odd_extension(x: &[f64], pad: usize) -> Vec<f64> {
    let n = x.len();
    let mut out = Vec::with_capacity(n + 2 * pad);
    for i in (1..=pad).rev() {
        out.push(2.0 * x[0] - x[i]);
    }
    out.extend_from_slice(x);
    for i in 1..=pad {
        out.push(2.0 * x[n - 1] - x[n - 1 - i]);
    }
    out
}

/// State that makes a unit-step input produce its steady-state output from
/// the first sample, i.e. the solution of `(I - companion(a)^T) zi = B` with
/// `B[i] = b[i+1] - b[0] * a[i+1]`.
fn steady_state(coeffs: &FilterCoefficients) -> Result<Vec<f64>> {
    let b = coeffs.b();
    let a = coeffs.a();
    let n = a.len() - 1;
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut m = DMatrix::<f64>::identity(n, n);
    for j in 0..n {
        m[(j, 0)] += a[j + 1];
    }
    for i in 0..n - 1 {
        m[(i, i + 1)] -= 1.0;
    }

    let rhs = DVector::from_fn(n, |i, _| b[i + 1] - b[0] * a[i + 1]);
    let zi = m.lu().solve(&rhs).ok_or_else(|| {
        EcgError::InvalidFilterSpecification(
            "filter has no step-response steady state".to_string(),
        )
    })?;
    Ok(zi.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{design, FilterSpec};

    fn highpass(order: usize) -> FilterCoefficients {
        design(
            &FilterSpec::Highpass {
                cutoff_hz: 1.0,
                order,
            },
            360.0,
        )
        .unwrap()
    }

    fn notch() -> FilterCoefficients {
        design(
            &FilterSpec::Notch {
                center_hz: 40.0,
                q: 30.0,
            },
            360.0,
        )
        .unwrap()
    }

    #[test]
    fn test_steady_state_holds_constant_input() {
        // The notch has unit DC gain, so a constant input filtered from the
        // steady state must come out constant immediately.
        let coeffs = notch();
        let zi = steady_state(&coeffs).unwrap();
        let scaled: Vec<f64> = zi.iter().map(|z| z * 0.75).collect();
        let out = lfilter(&coeffs, &[0.75; 50], Some(&scaled));
        for (i, y) in out.iter().enumerate() {
            assert!((y - 0.75).abs() < 1e-12, "sample {}: {}", i, y);
        }
    }

    #[test]
    fn test_lfilter_identity() {
        // b = a = [1] behaves as a wire.
        let coeffs = design(
            &FilterSpec::Notch {
                center_hz: 40.0,
                q: 1e9,
            },
            360.0,
        )
        .unwrap();
        let input = [1.0, -2.0, 3.0];
        let out = lfilter(&coeffs, &input, None);
        // Q -> inf collapses the notch to unity up to rounding.
        for (x, y) in input.iter().zip(&out) {
            assert!((x - y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_filtfilt_preserves_length() {
        for n in [22, 100, 720, 1001] {
            let signal = Signal::new(
                (0..n).map(|i| (i as f64 * 0.1).sin()).collect(),
                360.0,
            )
            .unwrap();
            let out = filtfilt(&highpass(6), &signal).unwrap();
            assert_eq!(out.len(), n);
            assert!((out.sampling_rate_hz() - 360.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_filtfilt_rejects_short_signal() {
        // Order 6 needs strictly more than 3 * 7 = 21 samples.
        let coeffs = highpass(6);
        assert_eq!(pad_len(&coeffs), 21);
        let short = Signal::new(vec![0.5; 21], 360.0).unwrap();
        match filtfilt(&coeffs, &short) {
            Err(EcgError::SignalTooShort { required, actual }) => {
                assert_eq!(required, 22);
                assert_eq!(actual, 21);
            }
            other => panic!("expected SignalTooShort, got {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn test_highpass_filtfilt_removes_dc() {
        let signal = Signal::new(vec![1.0; 500], 360.0).unwrap();
        let out = filtfilt(&highpass(6), &signal).unwrap();
        let max = out.samples().iter().fold(0.0f64, |m, &v| m.max(v.abs()));
        assert!(max < 1e-6, "residual DC {}", max);
    }

    #[test]
    fn test_notch_filtfilt_kills_center_tone() {
        let fs = 360.0;
        let n = 720;
        let tone: Vec<f64> = (0..n)
            .map(|i| (2.0 * std::f64::consts::PI * 40.0 * i as f64 / fs).sin())
            .collect();
        let signal = Signal::new(tone, fs).unwrap();
        let out = filtfilt(&notch(), &signal).unwrap();

        // At least 20 dB down over the central half, away from edge effects.
        let mid = &out.samples()[n / 4..3 * n / 4];
        let max = mid.iter().fold(0.0f64, |m, &v| m.max(v.abs()));
        assert!(max < 0.1, "residual tone amplitude {}", max);
    }

    #[test]
    fn test_filtfilt_has_zero_phase() {
        // A mid-band tone must come back with no time shift: the output is
        // a scaled copy of the input, not a delayed one.
        let fs = 360.0;
        let n = 1440;
        let tone: Vec<f64> = (0..n)
            .map(|i| (2.0 * std::f64::consts::PI * 1.5 * i as f64 / fs).sin())
            .collect();
        let signal = Signal::new(tone.clone(), fs).unwrap();
        let out = filtfilt(&highpass(6), &signal).unwrap();

        let mid = n / 4..3 * n / 4;
        let num: f64 = mid
            .clone()
            .map(|i| out.samples()[i] * tone[i])
            .sum();
        let den: f64 = mid.clone().map(|i| tone[i] * tone[i]).sum();
        let gain = num / den;
        assert!(gain > 0.98, "gain {}", gain);

        let residual = mid
            .map(|i| (out.samples()[i] - gain * tone[i]).abs())
            .fold(0.0f64, f64::max);
        assert!(residual < 0.05, "time-shift residual {}", residual);
    }

    #[test]
    fn test_filtfilt_is_reproducible() {
        let signal = Signal::new(
            (0..300).map(|i| (i as f64 * 0.07).sin()).collect(),
            360.0,
        )
        .unwrap();
        let coeffs = highpass(6);
        let first = filtfilt(&coeffs, &signal).unwrap();
        let second = filtfilt(&coeffs, &signal).unwrap();
        assert_eq!(first.samples(), second.samples());
    }
}
