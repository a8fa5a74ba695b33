//! Autocorrelation of a pre-scaled sample block (C1).
//!
//! Mirrors the analysis half of the lattice predictor that `cauldron`'s FLAC
//! decoder only ever runs in reverse (`flac::decoder::predict_lpc_*`). There
//! is no FLAC *encoder* in the example pack to crib the forward direction
//! from, so this follows spec.md §4.1 directly: each 16-bit sample is
//! widened to `i32` and pre-scaled into Q15 before the lags are accumulated.

/// Widens a 16-bit sample block into the Q15 fixed-point representation
/// autocorrelation and the predictor operate on.
pub fn prescale(samples: &[i16]) -> Vec<i32> {
    samples.iter().map(|&s| (s as i32) << 15).collect()
}

/// Right-shift applied to every lag before narrowing to `i32`, per spec.md
/// §4.1's "saturated down to 32-bit by arithmetic right-shift of a fixed
/// normalization". A pre-scaled sample has magnitude up to `2^30`
/// (`i16::MIN << 15`), so a single product is up to `2^60` and the `r[0]`
/// sum of up to `BLOCK_SIZE` (240) such products is up to roughly `2^68`.
/// Shifting by 38 bits before the `i32` clamp keeps that worst case well
/// inside `i32` range without needing a wider accumulator at the output.
const NORM_SHIFT: u32 = 38;

/// Computes autocorrelation lags `r[0..=max_order]` of a pre-scaled block.
///
/// `r[m] = sum_{n=m}^{N-1} x[n] * x[n-m]`. The running sum is accumulated in
/// `i128` (a single term can already reach `2^60`, and summing up to
/// `BLOCK_SIZE` of them overflows `i64`), then normalized down to `i32` by
/// [`NORM_SHIFT`] and saturated, matching the signed 32-bit lag type spec.md
/// §3 specifies. The same shift is applied uniformly across `m`, so the
/// ratios Levinson-Durbin cares about are preserved. Returns a vector of
/// length `max_order + 1`.
pub fn autocorrelate(x: &[i32], max_order: usize) -> Vec<i32> {
    let n = x.len();
    let mut r = vec![0i32; max_order + 1];
    for (m, slot) in r.iter_mut().enumerate() {
        let mut acc: i128 = 0;
        for i in m..n {
            acc += (x[i] as i128) * (x[i - m] as i128);
        }
        let shifted = acc >> NORM_SHIFT;
        *slot = shifted.clamp(i32::MIN as i128, i32::MAX as i128) as i32;
    }
    r
}
