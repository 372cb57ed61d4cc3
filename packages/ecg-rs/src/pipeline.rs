//! The conditioning pipeline.
//!
//! One parameterized orchestrator: highpass conditioning, optional notch,
//! before/after spectra, optional window extraction, optional Q31
//! quantization with round-trip validation. Every stage is a pure
//! transformation over in-memory entities; any failure aborts the run before
//! results are assembled.

use uuid::Uuid;

use crate::error::Result;
use crate::filter::{self, FilterSpec};
use crate::fixed_point;
use crate::segment;
use crate::spectral;
use crate::types::{PipelineConfig, PipelineResult, Signal};
use crate::zero_phase;

/// Configured, reusable conditioning pipeline.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every configured stage over `raw` and assemble the result.
    pub fn run(&self, raw: &Signal) -> Result<PipelineResult> {
        let id = Uuid::new_v4().to_string();
        let cfg = &self.config;
        let fs = raw.sampling_rate_hz();

        log::info!(
            "Conditioning {} samples at {} Hz (run {})",
            raw.len(),
            fs,
            id
        );

        let highpass = filter::design(
            &FilterSpec::Highpass {
                cutoff_hz: cfg.highpass_cutoff_hz,
                order: cfg.highpass_order,
            },
            fs,
        )?;
        let mut conditioned = zero_phase::filtfilt(&highpass, raw)?;
        log::debug!(
            "Highpass applied: cutoff {} Hz, order {}",
            cfg.highpass_cutoff_hz,
            cfg.highpass_order
        );

        if cfg.enable_notch {
            let notch = filter::design(
                &FilterSpec::Notch {
                    center_hz: cfg.notch_center_hz,
                    q: cfg.notch_q,
                },
                fs,
            )?;
            conditioned = zero_phase::filtfilt(&notch, &conditioned)?;
            log::debug!(
                "Notch applied: center {} Hz, Q {}",
                cfg.notch_center_hz,
                cfg.notch_q
            );
        }

        // Diagnostic side channel; nothing below consumes the spectra.
        let raw_spectrum = spectral::analyze(raw);
        let conditioned_spectrum = spectral::analyze(&conditioned);

        let segment = match cfg.window {
            Some(ref window) => segment::extract(&conditioned, window)?,
            None => conditioned.clone(),
        };
        log::debug!("Prepared segment of {} samples", segment.len());

        let (fixed_point, reconstructed, round_trip) = if cfg.enable_quantization {
            let encoded = fixed_point::encode(&segment);
            let decoded = fixed_point::decode(&encoded);
            let report = fixed_point::validate(&segment, &decoded, cfg.round_trip_tolerance)?;
            log::info!(
                "Round trip max error {:.3e} (tolerance {:.3e}, pass: {})",
                report.max_abs_error,
                report.tolerance,
                report.within_tolerance
            );
            (Some(encoded), Some(decoded), Some(report))
        } else {
            (None, None, None)
        };

        Ok(PipelineResult {
            id,
            config: cfg.clone(),
            conditioned,
            raw_spectrum,
            conditioned_spectrum,
            segment,
            fixed_point,
            reconstructed,
            round_trip,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}
