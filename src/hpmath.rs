//! # High-Precision Math Facade
//!
//! Arbitrary-precision real arithmetic at a working precision `P` (decimal
//! significant digits), backed by `rug::Float` (MPFR). This is the only
//! module that touches `rug::Float` directly — the kernel, snap projector,
//! and engine consume [`HpContext`] so the backing library stays a
//! replaceable facade.
//!
//! MPFR precision is specified in *bits*; this module is the boundary where
//! the crate's decimal-digit `P` is converted to bits (`precision::digits_to_bits`)
//! and never again.

use crate::precision::digits_to_bits;
use rug::float::Constant;
use rug::Float;

/// A working-precision context for one invocation's high-precision real
/// arithmetic. Immutable once built; cheap to clone (caches π at this
/// precision so repeated `principal_angle` calls don't recompute it).
#[derive(Clone)]
pub struct HpContext {
    bits: u32,
    pi: Float,
    two_pi: Float,
}

impl HpContext {
    /// Builds a context at the given decimal-digit precision `p`.
    pub fn new(p: u32) -> Self {
        let bits = digits_to_bits(p);
        let pi = Float::with_val(bits, Constant::Pi);
        let two_pi = Float::with_val(bits, &pi * 2u32);
        HpContext { bits, pi, two_pi }
    }

    /// Bit precision MPFR was configured with (derived from the decimal `P`).
    #[inline]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// π at this context's working precision.
    #[inline]
    pub fn pi(&self) -> &Float {
        &self.pi
    }

    /// 2π at this context's working precision.
    #[inline]
    pub fn two_pi(&self) -> &Float {
        &self.two_pi
    }

    /// Lifts an `i64` into a high-precision real at this context's precision.
    #[inline]
    pub fn from_i64(&self, n: i64) -> Float {
        Float::with_val(self.bits, n)
    }

    /// Lifts a `u64` into a high-precision real at this context's precision.
    #[inline]
    pub fn from_u64(&self, n: u64) -> Float {
        Float::with_val(self.bits, n)
    }

    /// Lifts a `rug::Integer` into a high-precision real at this context's
    /// precision.
    #[inline]
    pub fn from_integer(&self, n: &rug::Integer) -> Float {
        Float::with_val(self.bits, n)
    }

    /// Lifts an `f64` into a high-precision real at this context's precision.
    #[inline]
    pub fn from_f64(&self, x: f64) -> Float {
        Float::with_val(self.bits, x)
    }

    /// `ln(x)` for `x > 0`.
    #[inline]
    pub fn log(&self, x: &Float) -> Float {
        Float::with_val(self.bits, x.ln_ref())
    }

    /// `exp(x)`.
    #[inline]
    pub fn exp(&self, x: &Float) -> Float {
        Float::with_val(self.bits, x.exp_ref())
    }

    /// `sin(x)`.
    #[inline]
    pub fn sin(&self, x: &Float) -> Float {
        Float::with_val(self.bits, x.sin_ref())
    }

    /// `cos(x)`.
    #[inline]
    pub fn cos(&self, x: &Float) -> Float {
        Float::with_val(self.bits, x.cos_ref())
    }

    /// `sqrt(x)` for `x >= 0`.
    #[inline]
    pub fn sqrt(&self, x: &Float) -> Float {
        Float::with_val(self.bits, x.sqrt_ref())
    }

    /// Reduces `theta` to its principal value in `(-pi, pi]` by subtracting
    /// an integer multiple of the *same* high-precision 2π constant used
    /// throughout this context. Trig input phases can be large
    /// (`theta = 2*pi*m/k` with `m` up to ~10^3), so argument reduction must
    /// not waste precision relative to the kernel's own 2π.
    pub fn principal_angle(&self, theta: &Float) -> Float {
        let two_pi = &self.two_pi;
        // k = round(theta / two_pi), then phi = theta - k*two_pi lands in
        // (-pi, pi] except for the boundary which we nudge below.
        let quotient = Float::with_val(self.bits, theta / two_pi);
        let k = quotient.round();
        let mut phi = Float::with_val(self.bits, theta - Float::with_val(self.bits, &k * two_pi));
        // Ties in `round()` go away from zero, which can leave phi at exactly
        // -pi; the reduced range is (-pi, pi], so nudge by 2π.
        let neg_pi = Float::with_val(self.bits, -&self.pi);
        let pos_pi = self.pi.clone();
        if phi <= neg_pi {
            phi += two_pi;
        } else if phi > pos_pi {
            phi -= two_pi;
        }
        phi
    }
}
