//! # Config — Baseline and Effective Search Configuration
//!
//! `BaselineConfig` is the record a caller builds (no file/env parsing here —
//! that boundary belongs to the caller). `adaptive_config` derives the
//! per-invocation `EffectiveConfig` from it and `bits(N)`. Both are plain,
//! explicit, dependency-injected records — no global or singleton config.

use crate::error::ConfigError;
use std::time::Duration;

/// Baseline parameters a caller supplies once; scale-adaptive derivation
/// reads these to produce an effective configuration per invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineConfig {
    pub configured_precision: u32,
    pub samples0: u64,
    pub m_span0: u64,
    pub j: u32,
    pub threshold0: f64,
    pub k_lo0: f64,
    pub k_hi0: f64,
    pub timeout0: Duration,
    pub attenuation: f64,
    pub enable_scale_adaptive: bool,
    pub enable_shell_exclusion: bool,
    pub enable_diagnostics: bool,
    pub baseline_bits: u32,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        BaselineConfig {
            configured_precision: 0,
            samples0: 3_000,
            m_span0: 180,
            j: 6,
            threshold0: 0.92,
            k_lo0: 0.25,
            k_hi0: 0.45,
            timeout0: Duration::from_secs(600),
            attenuation: 0.05,
            enable_scale_adaptive: true,
            enable_shell_exclusion: false,
            enable_diagnostics: false,
            baseline_bits: 30,
        }
    }
}

impl BaselineConfig {
    /// Validates the search preconditions: `kLo < kHi`, `samples > 0`,
    /// `mSpan >= 0` (always true for `u64`), `J >= 1`, `threshold in (0,
    /// 1]`, `timeout > 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.k_lo0 < self.k_hi0) {
            return Err(ConfigError::KRangeInverted {
                k_lo: self.k_lo0,
                k_hi: self.k_hi0,
            });
        }
        if self.samples0 == 0 {
            return Err(ConfigError::ZeroSamples(self.samples0));
        }
        if self.j < 1 {
            return Err(ConfigError::InvalidKernelOrder(self.j));
        }
        if !(self.threshold0 > 0.0 && self.threshold0 <= 1.0) {
            return Err(ConfigError::ThresholdOutOfRange(self.threshold0));
        }
        if self.timeout0.is_zero() {
            return Err(ConfigError::NonPositiveTimeout(self.timeout0));
        }
        Ok(())
    }
}

/// Baseline configuration after scale-adaptive derivation. All scalars are
/// positive.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    pub samples: u64,
    pub m_span: u64,
    pub j: u32,
    pub threshold: f64,
    pub k_lo: f64,
    pub k_hi: f64,
    pub timeout: Duration,
    pub enable_shell_exclusion: bool,
    pub enable_diagnostics: bool,
}

/// Small epsilon guarding the open `(0, 1)` interval when `kLo`/`kHi`
/// converge toward the boundary at large bit ratios.
const K_RANGE_EPSILON: f64 = 1e-6;

/// `adaptiveConfig(cfg0, bits)`: derives the effective configuration for a
/// target of the given bit length. Pure function of `cfg0` and `bits`.
///
/// If `cfg0.enable_scale_adaptive` is false, `cfg0` passes through unchanged
/// (mapped field-for-field into `EffectiveConfig`).
pub fn adaptive_config(cfg0: &BaselineConfig, bits: u32) -> EffectiveConfig {
    if !cfg0.enable_scale_adaptive {
        return EffectiveConfig {
            samples: cfg0.samples0,
            m_span: cfg0.m_span0,
            j: cfg0.j,
            threshold: cfg0.threshold0,
            k_lo: cfg0.k_lo0,
            k_hi: cfg0.k_hi0,
            timeout: cfg0.timeout0,
            enable_shell_exclusion: cfg0.enable_shell_exclusion,
            enable_diagnostics: cfg0.enable_diagnostics,
        };
    }

    let r = (bits as f64) / (cfg0.baseline_bits as f64);

    let samples = (cfg0.samples0 as f64 * r.powf(1.5)).round().max(1.0) as u64;
    let m_span = (cfg0.m_span0 as f64 * r).round() as u64;

    let threshold = (cfg0.threshold0 - r.log2() * cfg0.attenuation).clamp(0.5, 1.0);

    let center = (cfg0.k_lo0 + cfg0.k_hi0) / 2.0;
    let half_width = ((cfg0.k_hi0 - cfg0.k_lo0) / 2.0) / r.sqrt();
    let k_lo = (center - half_width).max(K_RANGE_EPSILON);
    let k_hi = (center + half_width).min(1.0 - K_RANGE_EPSILON);

    let timeout_secs = cfg0.timeout0.as_secs_f64() * r * r;
    let timeout = Duration::from_secs_f64(timeout_secs.max(0.0));

    EffectiveConfig {
        samples,
        m_span,
        j: cfg0.j,
        threshold,
        k_lo,
        k_hi,
        timeout,
        enable_shell_exclusion: cfg0.enable_shell_exclusion,
        enable_diagnostics: cfg0.enable_diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> BaselineConfig {
        BaselineConfig::default()
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(baseline().validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_k_range() {
        let mut cfg = baseline();
        cfg.k_lo0 = 0.5;
        cfg.k_hi0 = 0.5;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::KRangeInverted {
                k_lo: 0.5,
                k_hi: 0.5
            })
        );
    }

    #[test]
    fn validate_rejects_zero_samples() {
        let mut cfg = baseline();
        cfg.samples0 = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroSamples(0)));
    }

    #[test]
    fn validate_rejects_bad_threshold() {
        let mut cfg = baseline();
        cfg.threshold0 = 0.0;
        assert!(cfg.validate().is_err());
        cfg.threshold0 = 1.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn disabled_scale_adaptive_passes_through_unchanged() {
        let mut cfg = baseline();
        cfg.enable_scale_adaptive = false;
        let eff = adaptive_config(&cfg, 200);
        assert_eq!(eff.samples, cfg.samples0);
        assert_eq!(eff.m_span, cfg.m_span0);
        assert_eq!(eff.threshold, cfg.threshold0);
        assert_eq!(eff.k_lo, cfg.k_lo0);
        assert_eq!(eff.k_hi, cfg.k_hi0);
        assert_eq!(eff.timeout, cfg.timeout0);
    }

    /// As r = bits/baselineBits increases, samples and mSpan strictly
    /// increase, threshold is non-increasing and stays in [0.5, 1], k-range
    /// half-width strictly decreases, and timeout strictly increases.
    #[test]
    fn scale_adaptive_derivation_is_monotonic_in_bit_ratio() {
        let cfg = baseline();
        let bit_points = [30u32, 60, 90, 127, 200, 400, 800];
        let mut prev: Option<EffectiveConfig> = None;
        for &bits in &bit_points {
            let eff = adaptive_config(&cfg, bits);
            assert!(eff.threshold >= 0.5 && eff.threshold <= 1.0);
            if let Some(p) = &prev {
                assert!(eff.samples > p.samples, "samples must strictly increase");
                assert!(eff.m_span > p.m_span, "mSpan must strictly increase");
                assert!(eff.threshold <= p.threshold, "threshold must be non-increasing");
                let prev_half_width = (p.k_hi - p.k_lo) / 2.0;
                let half_width = (eff.k_hi - eff.k_lo) / 2.0;
                assert!(half_width < prev_half_width, "k-range half-width must strictly shrink");
                assert!(eff.timeout > p.timeout, "timeout must strictly increase");
            }
            prev = Some(eff);
        }
    }

    #[test]
    fn j_is_never_scaled() {
        let cfg = baseline();
        for bits in [30u32, 127, 2048] {
            assert_eq!(adaptive_config(&cfg, bits).j, cfg.j);
        }
    }
}
