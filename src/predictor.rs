//! LPC prediction and its exact inverse (C4).
//!
//! Both directions share one property: predictions are formed from the
//! *unscaled* sample block (the raw `i16` values widened to `i32`, not the
//! Q15-prescaled block [`crate::autocorrelate::prescale`] builds for
//! analysis) against LPC coefficients scaled by `2^Q`. Samples before the
//! start of the block (`n < i`) contribute zero, per spec.md §4.4's
//! "out-of-range samples are zero" edge case. Dividing the fixed-point
//! prediction back down by `2^Q` is an arithmetic right shift rather than a
//! general integer division. `Q` is always a power of two, and `>>` on a
//! signed `i64` floors toward negative infinity exactly like the spec's
//! `floor(prediction / 2^Q)`.

use crate::error::{invariant, Result};

/// Scales a dequantized reflection-derived LPC vector `a[1..=p]` (fractions
/// in `(-1, 1)`) into the fixed-point coefficients the predictor consumes,
/// prefixed with an implicit `a[0] = 0`. Truncates toward zero on the
/// `f64 -> i64` cast, matching the reference encoder's C-style conversion.
pub fn fixed_point_coeffs(lpc: &[f64], q: u32) -> Vec<i64> {
    let scale = (1i64 << q) as f64;
    let mut out = Vec::with_capacity(lpc.len() + 1);
    out.push(0i64);
    out.extend(lpc.iter().map(|&c| (c * scale) as i64));
    out
}

/// Computes the prediction residual of `samples` against fixed-point LPC
/// coefficients `a` (as produced by [`fixed_point_coeffs`]).
pub fn compute_residuals(samples: &[i32], a: &[i64], q: u32) -> Vec<i32> {
    let p = a.len() - 1;
    let mut residues = vec![0i32; samples.len()];
    for n in 0..samples.len() {
        let mut acc: i64 = 0;
        for i in 1..=p {
            if n >= i {
                acc += a[i] * samples[n - i] as i64;
            }
        }
        let prediction = acc >> q;
        residues[n] = (samples[n] as i64 - prediction) as i32;
    }
    residues
}

/// Reconstructs samples from residuals and the same fixed-point LPC
/// coefficients, the exact inverse of [`compute_residuals`]. Reconstruction
/// is sequential: each sample feeds the prediction of the ones after it, so
/// unlike the forward pass this cannot be computed out of order.
///
/// Returns `Error::InternalInvariant` if a reconstructed sample falls
/// outside `i16` range, which can only happen on a corrupted stream since a
/// genuine encoder output always round-trips.
pub fn reconstruct_samples(residues: &[i32], a: &[i64], q: u32) -> Result<Vec<i32>> {
    let p = a.len() - 1;
    let mut x = vec![0i32; residues.len()];
    for n in 0..residues.len() {
        let mut acc: i64 = 0;
        for i in 1..=p {
            if n >= i {
                acc += a[i] * x[n - i] as i64;
            }
        }
        let prediction = acc >> q;
        let sample = prediction + residues[n] as i64;
        if sample < i16::MIN as i64 || sample > i16::MAX as i64 {
            return invariant("reconstructed sample outside i16 range");
        }
        x[n] = sample as i32;
    }
    Ok(x)
}
