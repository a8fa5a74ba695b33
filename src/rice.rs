//! Golomb-Rice coding of zig-zagged residuals (C5), packed through the
//! word-aligned [`crate::bitio::BitWriter`]/[`crate::bitio::BitReader`] pair
//! rather than `cauldron`'s continuous FLAC bit reader. See bitio's module
//! doc for why the two bit-packing schemes are not interchangeable here.

use crate::bitio::{BitReader, BitWriter};
use crate::error::{truncated, Result};

/// Rice parameters above this are never useful: at `k = 31` the binary part
/// alone already exhausts a `u32` remainder's range.
const MAX_RICE_PARAM: u32 = 31;

/// Total bit length if every value in `values` were Rice-coded with
/// parameter `k`: `sum((v >> k) + 1 + k)`.
fn encoded_bit_length(values: &[u32], k: u32) -> u64 {
    let mut total: u64 = 0;
    for &v in values {
        total += (v >> k) as u64 + 1 + k as u64;
    }
    total
}

/// Finds the Rice parameter in `0..=31` that minimizes the encoded length of
/// `values`, breaking ties toward the smaller `k`. Returns the parameter and
/// the bit length it achieves.
pub fn best_rice_param(values: &[u32]) -> (u32, u64) {
    let mut best_k = 0;
    let mut best_len = encoded_bit_length(values, 0);
    for k in 1..=MAX_RICE_PARAM {
        let len = encoded_bit_length(values, k);
        if len < best_len {
            best_len = len;
            best_k = k;
        }
    }
    (best_k, best_len)
}

/// Rice-encodes `values` with parameter `k` into whole 32-bit words.
pub fn encode_block(values: &[u32], k: u32) -> Vec<u32> {
    let mut w = BitWriter::new();
    for &v in values {
        let q = v >> k;
        w.write_unary(q);
        if k > 0 {
            w.write_bits(v & ((1u32 << k) - 1), k);
        }
    }
    w.into_words()
}

/// Rice-decodes exactly `count` values with parameter `k` out of `words`.
pub fn decode_block(words: &[u32], k: u32, count: usize) -> Result<Vec<u32>> {
    let mut r = BitReader::new(words);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let q = match r.read_unary() {
            Some(v) => v,
            None => return truncated("rice unary quotient"),
        };
        let rem = if k > 0 {
            match r.read_bits(k) {
                Some(v) => v,
                None => return truncated("rice binary remainder"),
            }
        } else {
            0
        };
        out.push((q << k) | rem);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_values() {
        let values: Vec<u32> = (0..240).map(|i| (i * 37) % 500).collect();
        let (k, _) = best_rice_param(&values);
        let words = encode_block(&values, k);
        let back = decode_block(&words, k, values.len()).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn zero_param_round_trips() {
        let values = vec![0u32; 16];
        let words = encode_block(&values, 0);
        let back = decode_block(&words, 0, values.len()).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn picks_zero_for_all_zero_input() {
        let values = vec![0u32; 64];
        let (k, len) = best_rice_param(&values);
        assert_eq!(k, 0);
        assert_eq!(len, 64);
    }

    #[test]
    fn truncated_stream_is_an_error() {
        let words: Vec<u32> = vec![];
        assert!(decode_block(&words, 4, 1).is_err());
    }

    #[test]
    fn large_values_favor_higher_k() {
        let values = vec![100_000u32; 32];
        let (k, _) = best_rice_param(&values);
        assert!(k > 10);
        let words = encode_block(&values, k);
        let back = decode_block(&words, k, values.len()).unwrap();
        assert_eq!(back, values);
    }
}
