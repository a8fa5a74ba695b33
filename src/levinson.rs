//! Levinson-Durbin recursion (C2): autocorrelation lags to reflection
//! coefficients, plus the reflection-to-LPC step-up recursion used by both
//! the encoder (on dequantized coefficients, §4.3) and the decoder (§9 Open
//! Question 1 resolution, see SPEC_FULL.md).
//!
//! The teacher crate never implements an encoder, so this module has no
//! direct counterpart to adapt in `cauldron`. It follows spec.md §4.2
//! directly, using the textbook order-recursive formulation (each step
//! produces one new reflection coefficient and updates the whole direct-form
//! coefficient vector in place) rather than FLAC-style fixed tables.

use crate::MAX_LPC_ORDER;

/// The result of running Levinson-Durbin to (at most) `MAX_LPC_ORDER`.
pub struct Levinson {
    /// Effective order, `1..=MAX_LPC_ORDER`.
    pub order: usize,
    /// Reflection coefficients `k[0..order)`, each with `|k[i]| < 1`.
    pub reflection: Vec<f64>,
    /// Triangular LPC matrix: `matrix[i]` has `i + 1` entries and holds the
    /// direct-form predictor at order `i + 1`.
    pub matrix: Vec<Vec<f64>>,
}

/// Runs Levinson-Durbin on autocorrelation lags `r[0..=max_order]`.
///
/// Terminates early when the prediction error becomes non-positive or a
/// reflection coefficient would have `|k| >= 1` (an unstable filter). Falls
/// back to order 1, `k[0] = 0` when `r[0] <= 0` (a silent block), per
/// spec.md §4.2.
pub fn solve(r: &[i32], max_order: usize) -> Levinson {
    debug_assert!(max_order <= MAX_LPC_ORDER);
    let rf: Vec<f64> = r.iter().map(|&v| v as f64).collect();

    let mut lpc: Vec<f64> = Vec::with_capacity(max_order);
    let mut reflection: Vec<f64> = Vec::with_capacity(max_order);
    let mut matrix: Vec<Vec<f64>> = Vec::with_capacity(max_order);
    let mut error = rf[0];

    for i in 0..max_order {
        if error <= 0.0 {
            break;
        }
        let mut acc = rf[i + 1];
        for j in 0..i {
            acc -= lpc[j] * rf[i - j];
        }
        let k = acc / error;
        if !k.is_finite() || k.abs() >= 1.0 {
            break;
        }

        let mut next = vec![0.0; i + 1];
        for j in 0..i {
            next[j] = lpc[j] - k * lpc[i - 1 - j];
        }
        next[i] = k;
        lpc = next;

        error *= 1.0 - k * k;
        reflection.push(k);
        matrix.push(lpc.clone());
    }

    if reflection.is_empty() {
        reflection.push(0.0);
        matrix.push(vec![0.0]);
    }

    Levinson {
        order: reflection.len(),
        reflection,
        matrix,
    }
}

/// Rebuilds the direct-form LPC coefficients `a[1..=p]` from reflection
/// coefficients alone, via the same step-up update [`solve`] uses at each
/// order. This is all the decoder needs: it never sees autocorrelation
/// lags, only the transmitted (dequantized) reflection vector.
pub fn lpc_from_reflection(k: &[f64]) -> Vec<f64> {
    let mut lpc: Vec<f64> = Vec::with_capacity(k.len());
    for (i, &ki) in k.iter().enumerate() {
        let mut next = vec![0.0; i + 1];
        for j in 0..i {
            next[j] = lpc[j] - ki * lpc[i - 1 - j];
        }
        next[i] = ki;
        lpc = next;
    }
    lpc
}
