//! `sela`: a lossless codec for 16-bit PCM waveform audio.
//!
//! The core pipeline (autocorrelation, Levinson-Durbin, reflection
//! quantization, LPC residual coding, Golomb-Rice entropy coding, frame
//! packing) lives in [`codec`], built on the leaf modules below. [`wav`] is
//! the only bundled container adapter; the `sela` binary wires it to
//! [`codec::Encoder`]/[`codec::Decoder`].

pub mod autocorrelate;
pub mod bitio;
pub mod codec;
pub mod error;
pub mod frame;
pub mod levinson;
pub mod predictor;
pub mod quantize;
pub mod rice;
pub mod sign;
pub mod wav;

pub use codec::{Decoder, Encoder};
pub use error::{Error, Result};

/// Samples per channel, per frame. Fixed: variable block sizes are an
/// explicit non-goal (spec.md §1).
pub const BLOCK_SIZE: usize = 240;

/// Ceiling on the LPC order Levinson-Durbin will run to. Must match between
/// any encoder/decoder pair that is to interoperate (spec.md §3).
pub const MAX_LPC_ORDER: usize = 8;

/// Fixed-point scaling exponent for LPC coefficients: a coefficient `c` is
/// stored as `c * 2^Q`.
pub const Q: u32 = 35;

/// Marks the start of each frame.
pub const FRAME_SYNC: u32 = 0xAA55_FF00;

/// Reserved for a future metadata block; unused by the core (spec.md §3).
#[allow(dead_code)]
pub const METADATA_SYNC: u32 = 0xAA55_00FF;

/// The five bytes every encoded stream begins with.
pub const MAGIC: &[u8; 5] = b"hello";
