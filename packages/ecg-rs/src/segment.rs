//! Time-window extraction.

use crate::error::{EcgError, Result};
use crate::types::{Signal, TimeWindow};

/// Slice `signal` to the time interval described by `window`.
///
/// Boundary times map to sample indices by rounding (`round(t * fs)`), and
/// the index range is half-open `[start, end)`, so a [0, 2] s window at
/// 360 Hz yields exactly 720 samples. The sampling rate is preserved.
pub fn extract(signal: &Signal, window: &TimeWindow) -> Result<Signal> {
    let fs = signal.sampling_rate_hz();
    let start = (window.start_secs() * fs).round() as usize;
    let end = (window.end_secs() * fs).round() as usize;

    if start >= end {
        return Err(EcgError::InvalidWindow(format!(
            "window [{} s, {} s] maps to an empty sample range",
            window.start_secs(),
            window.end_secs()
        )));
    }
    if end > signal.len() {
        return Err(EcgError::InvalidWindow(format!(
            "window end {} s (sample {}) is beyond the signal ({} samples, {:.3} s)",
            window.end_secs(),
            end,
            signal.len(),
            signal.duration_secs()
        )));
    }

    let samples = signal.samples()[start..end].to_vec();
    Ok(Signal::from_parts(samples, fs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize, fs: f64) -> Signal {
        Signal::new((0..n).map(|i| i as f64).collect(), fs).unwrap()
    }

    #[test]
    fn test_two_second_window_at_360_hz() {
        let signal = ramp(1080, 360.0);
        let window = TimeWindow::new(0.0, 2.0).unwrap();
        let segment = extract(&signal, &window).unwrap();
        assert_eq!(segment.len(), 720);
        assert!((segment.samples()[0] - 0.0).abs() < 1e-12);
        assert!((segment.samples()[719] - 719.0).abs() < 1e-12);
        assert!((segment.sampling_rate_hz() - 360.0).abs() < 1e-12);
    }

    #[test]
    fn test_window_flush_with_signal_end() {
        let signal = ramp(720, 360.0);
        let window = TimeWindow::new(0.0, 2.0).unwrap();
        assert_eq!(extract(&signal, &window).unwrap().len(), 720);
    }

    #[test]
    fn test_interior_window() {
        let signal = ramp(1080, 360.0);
        let window = TimeWindow::new(0.5, 1.5).unwrap();
        let segment = extract(&signal, &window).unwrap();
        assert_eq!(segment.len(), 360);
        assert!((segment.samples()[0] - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_window_beyond_signal_fails() {
        let signal = ramp(360, 360.0);
        let window = TimeWindow::new(0.0, 2.0).unwrap();
        assert!(matches!(
            extract(&signal, &window),
            Err(EcgError::InvalidWindow(_))
        ));
    }

    #[test]
    fn test_sub_sample_window_is_empty() {
        let signal = ramp(720, 360.0);
        // Both bounds round to sample 0.
        let window = TimeWindow::new(0.0, 0.001).unwrap();
        assert!(matches!(
            extract(&signal, &window),
            Err(EcgError::InvalidWindow(_))
        ));
    }
}
