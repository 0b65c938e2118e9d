//! # Error — Precondition Violations on `factor()`'s Inputs
//!
//! The only error type the core surfaces through `std::error::Error`. Every
//! other failure mode (timeout, exhausted schedule, cancellation, rejected
//! candidates) is a normal `SearchOutcome` variant, not an `Err` — see
//! [`crate::result`].

use thiserror::Error;

/// A precondition violation on a [`crate::config::BaselineConfig`] or on `N`
/// itself, detected before a search begins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("target N = {0} must be greater than 1")]
    TargetTooSmall(String),

    #[error("k-range is inverted or empty: kLo = {k_lo}, kHi = {k_hi}")]
    KRangeInverted { k_lo: f64, k_hi: f64 },

    #[error("samples must be positive, got {0}")]
    ZeroSamples(u64),

    #[error("kernel order J must be >= 1, got {0}")]
    InvalidKernelOrder(u32),

    #[error("threshold must be in (0, 1], got {0}")]
    ThresholdOutOfRange(f64),

    #[error("timeout must be positive, got {0:?}")]
    NonPositiveTimeout(std::time::Duration),
}
