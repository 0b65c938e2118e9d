//! # Snap Projector
//!
//! Maps a `(ln N, theta)` pair to an integer factor candidate via the
//! identity "if `N = p*q` and `m/k` captures the log-ratio drift, then `p ~=
//! exp((ln N - theta) / 2)`".
//!
//! The source historically shipped a "phase correction" that added 1 to the
//! snap when the fractional part exceeded 0.5; it was a bug and is not
//! reintroduced here — rounding is pure half-away-from-zero.

use crate::hpmath::HpContext;
use rug::{Float, Integer};

/// Why a projection was rejected, for diagnostics classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Projected to a value `<= 1`.
    Zero,
    /// Projected to a value `>= n_bound`, or non-finite.
    Overflow,
}

/// `snap(lnN, theta, P)`: projects to an integer candidate, or `None` if the
/// projection is `<= 1` or `>= n_bound` (a saturating failure indicator).
pub fn snap(ctx: &HpContext, ln_n: &Float, theta: &Float, n_bound: &Integer) -> Option<Integer> {
    snap_with_reason(ctx, ln_n, theta, n_bound).ok()
}

/// As [`snap`], but reports *why* a rejected projection was rejected, so
/// callers can attribute the rejection to the right diagnostics bucket.
pub fn snap_with_reason(
    ctx: &HpContext,
    ln_n: &Float,
    theta: &Float,
    n_bound: &Integer,
) -> Result<Integer, Rejection> {
    let two = Float::with_val(ctx.bits(), 2u32);
    let diff = Float::with_val(ctx.bits(), ln_n - theta);
    let expo = Float::with_val(ctx.bits(), diff / &two);
    let p_hat = ctx.exp(&expo);
    if !p_hat.is_finite() {
        return Err(Rejection::Overflow);
    }
    let rounded = p_hat.round();
    let as_int = rounded.to_integer().ok_or(Rejection::Overflow)?;
    if as_int <= 1u32 {
        Err(Rejection::Zero)
    } else if &as_int >= n_bound {
        Err(Rejection::Overflow)
    } else {
        Ok(as_int)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Inverse check: pick a known prime p, derive (k, m, theta) so that
    /// snap(lnN, theta) recovers p exactly.
    ///
    /// Construction: choose any k and m, set theta = 2*pi*m/k (reduced), and
    /// pick lnN = theta + 2*ln(p) so that expo = (lnN - theta)/2 = ln(p)
    /// exactly, independent of k and m. This exercises the same arithmetic
    /// path the engine uses without requiring a full resonance search.
    #[test]
    fn snap_recovers_known_prime_within_one() {
        let ctx = HpContext::new(100);
        for &p in &[32_749u64, 10_000_019u64, 1_073_741_789u64] {
            let p_int = Integer::from(p);
            let ln_p = ctx.log(&ctx.from_integer(&p_int));
            for raw_theta in [0.0, 0.37, -1.1, 2.9] {
                let theta = ctx.from_f64(raw_theta);
                let ln_n = Float::with_val(ctx.bits(), &theta + Float::with_val(ctx.bits(), &ln_p * 2u32));
                let n_bound = Integer::from(&p_int * &p_int) + 1u32;
                let candidate = snap(&ctx, &ln_n, &theta, &n_bound).expect("snap should succeed");
                let diff = Integer::from(&candidate - &p_int).abs();
                assert!(diff <= 1u32, "snap({p}) = {candidate}, expected within 1");
            }
        }
    }

    /// Snap rejects projections that land outside (1, n_bound).
    #[test]
    fn snap_rejects_out_of_bounds_projections() {
        let ctx = HpContext::new(80);
        let n_bound = Integer::from(1_000u32);
        // expo = ln(0.5) -> p_hat ~ 0.5, rounds to 0 or 1 -> rejected.
        let ln_n = ctx.from_f64(2.0 * 0.5f64.ln());
        let theta = ctx.from_f64(0.0);
        assert_eq!(snap(&ctx, &ln_n, &theta, &n_bound), None);

        // expo = ln(10_000) -> far past n_bound -> rejected.
        let ln_n_big = ctx.from_f64(2.0 * 10_000f64.ln());
        assert_eq!(snap(&ctx, &ln_n_big, &theta, &n_bound), None);
    }

    /// No phase correction: a fractional part just above 0.5 must round
    /// down (half-away-from-zero, not "+1 on fraction > 0.5").
    #[test]
    fn snap_does_not_apply_historical_phase_correction() {
        let ctx = HpContext::new(80);
        let n_bound = Integer::from(1_000_000u32);
        // p_hat = 100.51 should round to 101 (nearest), not 102.
        let target = 100.51f64;
        let ln_n = ctx.from_f64(2.0 * target.ln());
        let theta = ctx.from_f64(0.0);
        let candidate = snap(&ctx, &ln_n, &theta, &n_bound).unwrap();
        assert_eq!(candidate, Integer::from(101u32));
    }
}
