//! # Precision — Scale-Derived Working Precision
//!
//! Pure functions that turn the bit length of the target `N` into a working
//! precision (decimal significant digits) for the high-precision facade, and
//! a capped singularity-guard cutoff for the Dirichlet kernel.
//!
//! A heavier formula (`bits·4 + 200`) was tried historically and observed to
//! cause unusable slowdowns without corresponding accuracy gains; `bits·2 +
//! 150` is the current contract.

/// Cap on the epsilon-scale exponent: singularity cutoffs tighter than
/// `10^-50` do not improve resonance detection, only cost.
const EPSILON_SCALE_CAP: u32 = 50;

/// `derivePrecision(configuredP, bits)`: working precision in decimal
/// significant digits.
///
/// `P = max(configuredP, 2*bits + 150)`. Deterministic, pure.
#[inline]
pub fn derive_precision(configured_p: u32, bits: u32) -> u32 {
    configured_p.max(2u32.saturating_mul(bits).saturating_add(150))
}

/// `epsilonScale(P)`: singularity-guard cutoff exponent, `min(P, 50)`.
#[inline]
pub fn epsilon_scale(p: u32) -> u32 {
    p.min(EPSILON_SCALE_CAP)
}

/// Converts a decimal-digit precision count to the bit precision MPFR
/// (`rug::Float`) expects: `bits = ceil(P * log2(10))`.
#[inline]
pub fn digits_to_bits(p: u32) -> u32 {
    const LOG2_10: f64 = std::f64::consts::LOG2_10;
    ((p as f64) * LOG2_10).ceil() as u32
}
