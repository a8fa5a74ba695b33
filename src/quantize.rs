//! Reflection coefficient quantization (C3).
//!
//! The only lossy step in the whole pipeline (spec.md §4.3): a reflection
//! coefficient `k in (-1, 1)` is scaled into Q15 and rounded to the nearest
//! `i16`, then carried around as an `i32` so downstream arithmetic never has
//! to think about width again.

const Q15: f64 = 32768.0;

/// Quantizes a single reflection coefficient to Q15, clamped to `i16` range.
pub fn quantize(k: f64) -> i32 {
    let scaled = (k * Q15).round();
    let clamped = scaled.clamp(i16::MIN as f64, i16::MAX as f64);
    clamped as i16 as i32
}

/// Quantizes a whole reflection vector.
pub fn quantize_all(k: &[f64]) -> Vec<i32> {
    k.iter().map(|&v| quantize(v)).collect()
}

/// Dequantizes a single Q15 reflection coefficient back to a fraction in
/// (approximately) `(-1, 1)`.
pub fn dequantize(q: i32) -> f64 {
    q as f64 / Q15
}

/// Dequantizes a whole reflection vector.
pub fn dequantize_all(q: &[i32]) -> Vec<f64> {
    q.iter().map(|&v| dequantize(v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_round_trips_exactly() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(dequantize(0), 0.0);
    }

    #[test]
    fn clamps_at_full_scale() {
        assert_eq!(quantize(1.0), i16::MAX as i32);
        assert_eq!(quantize(-1.0), i16::MIN as i32);
        assert_eq!(quantize(5.0), i16::MAX as i32);
        assert_eq!(quantize(-5.0), i16::MIN as i32);
    }

    #[test]
    fn round_trip_error_is_bounded_by_one_lsb() {
        let samples = [0.1, -0.1, 0.5, -0.5, 0.999, -0.999, 0.0001, -0.0001];
        for &k in &samples {
            let q = quantize(k);
            let back = dequantize(q);
            assert!((back - k).abs() <= 1.0 / Q15 + 1e-12);
        }
    }
}
