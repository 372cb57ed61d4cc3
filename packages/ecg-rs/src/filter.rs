//! Digital filter design.
//!
//! The highpass branch designs an N-th order Butterworth filter by placing
//! the analog prototype poles, mapping each first- or second-order section
//! through the bilinear transform with frequency pre-warping, and convolving
//! the section polynomials into a single normalized `(b, a)` transfer
//! function. The notch branch is the cookbook band-reject biquad, which puts
//! an exact zero on the unit circle at the center frequency.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{EcgError, Result};

/// Largest accepted highpass order. Higher orders give steeper rolloff at
/// the cost of longer transients and a worse-conditioned polynomial form.
pub const MAX_HIGHPASS_ORDER: usize = 12;

/// What to design: filter family plus its frequency parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum FilterSpec {
    /// Butterworth highpass for baseline-wander removal.
    Highpass { cutoff_hz: f64, order: usize },
    /// Narrow band-reject for a single interference frequency; `q` controls
    /// the reject bandwidth (higher Q = narrower notch).
    Notch { center_hz: f64, q: f64 },
}

/// Normalized transfer-function coefficients.
///
/// `b` is the feed-forward sequence, `a` the feedback sequence with
/// `a[0] == 1`; both have the same length. Immutable once designed and
/// reusable across any number of filtering passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterCoefficients {
    b: Vec<f64>,
    a: Vec<f64>,
}

impl FilterCoefficients {
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    pub fn a(&self) -> &[f64] {
        &self.a
    }

    pub fn order(&self) -> usize {
        self.a.len() - 1
    }
}

/// Design the digital filter described by `spec` for `sampling_rate_hz`.
///
/// Pure function of its inputs; fails with
/// [`EcgError::InvalidFilterSpecification`] when the cutoff/center frequency
/// does not sit strictly inside (0, Nyquist) or the remaining parameters are
/// out of range.
pub fn design(spec: &FilterSpec, sampling_rate_hz: f64) -> Result<FilterCoefficients> {
    if !sampling_rate_hz.is_finite() || sampling_rate_hz <= 0.0 {
        return Err(EcgError::InvalidFilterSpecification(format!(
            "sampling rate must be positive, got {}",
            sampling_rate_hz
        )));
    }
    let nyquist = sampling_rate_hz / 2.0;

    match *spec {
        FilterSpec::Highpass { cutoff_hz, order } => {
            let wn = cutoff_hz / nyquist;
            if !wn.is_finite() || wn <= 0.0 || wn >= 1.0 {
                return Err(EcgError::InvalidFilterSpecification(format!(
                    "normalized cutoff {} is outside (0, 1); cutoff {} Hz, Nyquist {} Hz",
                    wn, cutoff_hz, nyquist
                )));
            }
            if order == 0 || order > MAX_HIGHPASS_ORDER {
                return Err(EcgError::InvalidFilterSpecification(format!(
                    "highpass order must be 1-{}, got {}",
                    MAX_HIGHPASS_ORDER, order
                )));
            }
            Ok(butterworth_highpass(wn, order))
        }
        FilterSpec::Notch { center_hz, q } => {
            let wn = center_hz / nyquist;
            if !wn.is_finite() || wn <= 0.0 || wn >= 1.0 {
                return Err(EcgError::InvalidFilterSpecification(format!(
                    "normalized center {} is outside (0, 1); center {} Hz, Nyquist {} Hz",
                    wn, center_hz, nyquist
                )));
            }
            if !q.is_finite() || q <= 0.0 {
                return Err(EcgError::InvalidFilterSpecification(format!(
                    "quality factor must be positive, got {}",
                    q
                )));
            }
            Ok(notch(wn, q))
        }
    }
}

/// Butterworth highpass, `wn` normalized to (0, 1) where 1 is Nyquist.
///
/// Conjugate pole pairs sit at angles `(2k + 1) * pi / (2 * order)` from the
/// imaginary axis; odd orders add one real pole. Each section is transformed
/// with `s -> wc/s` then the bilinear mapping, and the section polynomials
/// are multiplied out.
fn butterworth_highpass(wn: f64, order: usize) -> FilterCoefficients {
    // Pre-warp the cutoff for the bilinear transform.
    let wc = (PI * wn / 2.0).tan();

    let mut b = vec![1.0];
    let mut a = vec![1.0];

    if order % 2 == 1 {
        // Real pole: H(s) = s / (s + wc).
        let k = 1.0 / (1.0 + wc);
        b = convolve(&b, &[k, -k]);
        a = convolve(&a, &[1.0, (wc - 1.0) / (wc + 1.0)]);
    }

    for k in 0..order / 2 {
        // Conjugate pair: H(s) = s^2 / (s^2 + 2*zeta*wc*s + wc^2).
        let theta = PI * (2 * k + 1) as f64 / (2 * order) as f64;
        let zeta = theta.sin();
        let wc2 = wc * wc;
        let denom = 1.0 + 2.0 * zeta * wc + wc2;

        let sb = [1.0 / denom, -2.0 / denom, 1.0 / denom];
        let sa = [
            1.0,
            2.0 * (wc2 - 1.0) / denom,
            (1.0 - 2.0 * zeta * wc + wc2) / denom,
        ];
        b = convolve(&b, &sb);
        a = convolve(&a, &sa);
    }

    FilterCoefficients { b, a }
}

/// Band-reject biquad, `wn` normalized to (0, 1) where 1 is Nyquist.
fn notch(wn: f64, q: f64) -> FilterCoefficients {
    let w0 = PI * wn;
    let alpha = w0.sin() / (2.0 * q);
    let cos_w0 = w0.cos();
    let a0 = 1.0 + alpha;

    FilterCoefficients {
        b: vec![1.0 / a0, -2.0 * cos_w0 / a0, 1.0 / a0],
        a: vec![1.0, -2.0 * cos_w0 / a0, (1.0 - alpha) / a0],
    }
}

fn convolve(p: &[f64], q: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; p.len() + q.len() - 1];
    for (i, &pi) in p.iter().enumerate() {
        for (j, &qj) in q.iter().enumerate() {
            out[i + j] += pi * qj;
        }
    }
    out
}
