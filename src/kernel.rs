//! # Dirichlet Kernel — Normalized Resonance Amplitude
//!
//! `amplitude(theta, J)` evaluates the normalized Dirichlet kernel
//! `|sin((2J+1)*phi/2)| / ((2J+1)*|sin(phi/2)|)` at the principal value of
//! `theta`, guarding the `phi = 0` singularity with a precision-scaled
//! cutoff. Pure and deterministic: the same `(theta, J, P)` always yields
//! the same amplitude.

use crate::hpmath::HpContext;
use crate::precision::epsilon_scale;
use rug::Float;

/// Evaluates the normalized Dirichlet kernel amplitude for `theta` at kernel
/// order `J`, returning a value in `[0, 1]`.
///
/// `ctx` must have been built at the working precision `P` this call
/// certifies against; `epsilon_scale(P)` derives the singularity cutoff.
pub fn amplitude(ctx: &HpContext, theta: &Float, j: u32) -> Float {
    let phi = ctx.principal_angle(theta);
    let half_phi = Float::with_val(ctx.bits(), &phi / 2u32);
    let sin_half = ctx.sin(&half_phi);
    let eps_scale = epsilon_scale(decimal_precision(ctx));
    let cutoff = Float::with_val(ctx.bits(), 10f64.powi(-(eps_scale as i32)));

    if sin_half.clone().abs() < cutoff {
        return Float::with_val(ctx.bits(), 1u32);
    }

    let order = 2 * j + 1;
    let arg = Float::with_val(ctx.bits(), &half_phi * order);
    let numerator = ctx.sin(&arg).abs();
    let denominator = Float::with_val(ctx.bits(), order * sin_half.abs());
    Float::with_val(ctx.bits(), numerator / denominator)
}

/// Recovers the decimal-digit precision `P` a context was built with, for
/// deriving `epsilon_scale`. `HpContext` stores only the MPFR bit precision,
/// so this inverts `precision::digits_to_bits` conservatively (ceiling means
/// the recovered `P` never understates the true working precision enough to
/// under-cap the cutoff).
fn decimal_precision(ctx: &HpContext) -> u32 {
    const LOG10_2: f64 = std::f64::consts::LOG10_2;
    ((ctx.bits() as f64) * LOG10_2).ceil() as u32
}
