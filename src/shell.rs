//! # Shell Exclusion Filter
//!
//! An optional, deterministic predicate pruning k-values whose numeric
//! "shell" (position within a uniform partition of `[kLo, kHi)`) historically
//! correlates with zero candidate yield. Pure, deterministic, total,
//! idempotent, and documented to admit a nonzero floor fraction of the range
//! so the search is never starved.

/// A shell-exclusion predicate over `[k_lo, k_hi)`.
pub trait ShellFilter: Send + Sync {
    /// Returns whether `k` is admitted into the search.
    fn admit(&self, k: f64, k_lo: f64, k_hi: f64) -> bool;
}

/// Default: admits every `k`. The engine's baseline behavior when shell
/// exclusion is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdmitAll;

impl ShellFilter for AdmitAll {
    #[inline]
    fn admit(&self, _k: f64, _k_lo: f64, _k_hi: f64) -> bool {
        true
    }
}

/// Excludes the first third of a uniform 3-way partition of `[kLo, kHi)`,
/// admitting exactly 2/3 of the range — comfortably above the documented 25%
/// admission floor. One concrete predicate among many that would satisfy the
/// trait's contract; callers that want a different shell shape implement
/// `ShellFilter` themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcludeFirstThird;

impl ShellFilter for ExcludeFirstThird {
    fn admit(&self, k: f64, k_lo: f64, k_hi: f64) -> bool {
        if k_hi <= k_lo {
            return true;
        }
        let position = (k - k_lo) / (k_hi - k_lo);
        position >= 1.0 / 3.0
    }
}
