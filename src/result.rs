//! # Result / Diagnostics — Structured Search Outcome
//!
//! `SearchOutcome` is the tagged sum the engine returns: either a certified
//! factor pair or a failure reason, always carrying the effective
//! configuration and elapsed time. `Diagnostics`, when enabled, is a
//! bounded-size summary — never a per-sample record.

use crate::config::EffectiveConfig;
use crate::error::ConfigError;
use rug::Integer;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Number of fixed-width bins in the amplitude histogram, covering `[0, 1]`.
pub const HISTOGRAM_BINS: usize = 64;

/// Why a search ended without a certified factor.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    /// A precondition on `N` or the baseline config was violated.
    InvalidConfig(ConfigError),
    /// The wall-clock deadline was reached before a hit or exhaustion.
    Timeout,
    /// The sample schedule completed with no certified candidate.
    SamplesExhausted,
    /// A cancellation token was observed set.
    Cancelled,
}

/// The tagged outcome of one `factor()` invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Success {
        p: Integer,
        q: Integer,
        elapsed: Duration,
        config: EffectiveConfig,
        diagnostics: Option<Diagnostics>,
    },
    Failure {
        reason: FailureReason,
        elapsed: Duration,
        config: EffectiveConfig,
        diagnostics: Option<Diagnostics>,
    },
}

impl SearchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SearchOutcome::Success { .. })
    }

    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            SearchOutcome::Success { diagnostics, .. } => diagnostics.as_ref(),
            SearchOutcome::Failure { diagnostics, .. } => diagnostics.as_ref(),
        }
    }
}

/// Bounded-size telemetry collected during a search, when enabled.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    pub samples_processed: u64,
    pub candidates_tested: u64,
    pub kernel_evaluations: u64,
    /// Fixed-width histogram over `[0, 1]`, `histogram[i]` counts amplitudes
    /// in `[i/64, (i+1)/64)` (the last bin is closed on both ends).
    pub histogram: [u64; HISTOGRAM_BINS],
    pub zero_count: u64,
    pub overflow_count: u64,
    pub not_divisible_count: u64,
}

/// Atomic accumulator for diagnostics collected from (possibly parallel)
/// m-sweep workers: `AtomicU64`s updated with `Ordering::Relaxed`, read back
/// once on the outer thread.
#[derive(Default)]
pub struct DiagnosticsAccumulator {
    samples_processed: AtomicU64,
    candidates_tested: AtomicU64,
    kernel_evaluations: AtomicU64,
    histogram: [AtomicU64; HISTOGRAM_BINS],
    zero_count: AtomicU64,
    overflow_count: AtomicU64,
    not_divisible_count: AtomicU64,
}

impl DiagnosticsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_sample_processed(&self) {
        self.samples_processed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_candidate_tested(&self) {
        self.candidates_tested.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_kernel_evaluation(&self, amplitude: f64) {
        self.kernel_evaluations.fetch_add(1, Ordering::Relaxed);
        let bin = ((amplitude * HISTOGRAM_BINS as f64) as usize).min(HISTOGRAM_BINS - 1);
        self.histogram[bin].fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_zero(&self) {
        self.zero_count.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_overflow(&self) {
        self.overflow_count.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_not_divisible(&self) {
        self.not_divisible_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> Diagnostics {
        let mut histogram = [0u64; HISTOGRAM_BINS];
        for (dst, src) in histogram.iter_mut().zip(self.histogram.iter()) {
            *dst = src.load(Ordering::Relaxed);
        }
        Diagnostics {
            samples_processed: self.samples_processed.load(Ordering::Relaxed),
            candidates_tested: self.candidates_tested.load(Ordering::Relaxed),
            kernel_evaluations: self.kernel_evaluations.load(Ordering::Relaxed),
            histogram,
            zero_count: self.zero_count.load(Ordering::Relaxed),
            overflow_count: self.overflow_count.load(Ordering::Relaxed),
            not_divisible_count: self.not_divisible_count.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_bins_amplitudes_into_expected_slots() {
        let acc = DiagnosticsAccumulator::new();
        acc.record_kernel_evaluation(0.0);
        acc.record_kernel_evaluation(0.999);
        acc.record_kernel_evaluation(1.0);
        acc.record_kernel_evaluation(0.5);
        let d = acc.snapshot();
        assert_eq!(d.histogram[0], 1);
        assert_eq!(d.histogram[HISTOGRAM_BINS - 1], 2); // 0.999 and 1.0 both land in the last bin
        assert_eq!(d.histogram[32], 1); // 0.5 -> bin 32 of 64
        assert_eq!(d.kernel_evaluations, 4);
    }

    #[test]
    fn accumulator_tracks_failure_classes_independently() {
        let acc = DiagnosticsAccumulator::new();
        acc.record_zero();
        acc.record_zero();
        acc.record_overflow();
        acc.record_not_divisible();
        let d = acc.snapshot();
        assert_eq!(d.zero_count, 2);
        assert_eq!(d.overflow_count, 1);
        assert_eq!(d.not_divisible_count, 1);
    }

    #[test]
    fn outcome_helpers_report_success_and_diagnostics() {
        let cfg = EffectiveConfig {
            samples: 10,
            m_span: 5,
            j: 6,
            threshold: 0.9,
            k_lo: 0.25,
            k_hi: 0.45,
            timeout: Duration::from_secs(1),
            enable_shell_exclusion: false,
            enable_diagnostics: false,
        };
        let outcome = SearchOutcome::Success {
            p: Integer::from(3u32),
            q: Integer::from(5u32),
            elapsed: Duration::from_millis(1),
            config: cfg.clone(),
            diagnostics: None,
        };
        assert!(outcome.is_success());
        assert!(outcome.diagnostics().is_none());

        let fail = SearchOutcome::Failure {
            reason: FailureReason::SamplesExhausted,
            elapsed: Duration::from_millis(1),
            config: cfg,
            diagnostics: None,
        };
        assert!(!fail.is_success());
    }
}
