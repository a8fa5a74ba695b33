//! Pipeline driver (C8): `Encoder`/`Decoder` values that own all working
//! state and walk the component chain block by block.
//!
//! Per spec.md §9's design note, this replaces the C reference's stack
//! arrays and loose state structs with a single owning value per direction,
//! each exposing `process_block`/`next_frame` plus a `finish` that hands
//! the underlying stream back to the caller, the shape `cauldron`'s
//! `AudioReader`/`AudioDecoder` traits use for their own block iteration.

use std::io::{Read, Write};

use tracing::{debug, trace, warn};

use crate::autocorrelate::{autocorrelate, prescale};
use crate::error::{invariant, unsupported, Result};
use crate::frame::{ChannelRecord, Frame, MediaInfo};
use crate::levinson::{lpc_from_reflection, solve};
use crate::predictor::{compute_residuals, fixed_point_coeffs, reconstruct_samples};
use crate::quantize::{dequantize_all, quantize_all};
use crate::rice::{best_rice_param, decode_block, encode_block};
use crate::sign::{unzigzag, zigzag};
use crate::{BLOCK_SIZE, MAX_LPC_ORDER, Q};

/// Deinterleaves one block of samples into one buffer per channel, LPC-codes
/// each independently, and writes the resulting [`Frame`].
pub struct Encoder<W: Write> {
    writer: W,
    channels: usize,
}

impl<W: Write> Encoder<W> {
    /// Writes the media-info header and returns an encoder ready to accept
    /// blocks. `estimated_frames` is progress-only metadata (spec.md §6.1).
    pub fn new(
        mut writer: W,
        sample_rate: i32,
        channels: u8,
        estimated_frames: u32,
    ) -> Result<Encoder<W>> {
        if channels != 1 && channels != 2 {
            return unsupported("channels must be 1 or 2");
        }
        let info = MediaInfo {
            sample_rate,
            bits_per_sample: 16,
            channels: channels as i8,
            estimated_frames,
        };
        info.write_to(&mut writer)?;
        debug!(sample_rate, channels, estimated_frames, "wrote media info");
        Ok(Encoder {
            writer,
            channels: channels as usize,
        })
    }

    /// Encodes one interleaved block of up to `BLOCK_SIZE * channels`
    /// samples (fewer for a final partial block) and writes the frame.
    pub fn process_block(&mut self, interleaved: &[i16]) -> Result<()> {
        let channels = self.channels;
        debug_assert_eq!(interleaved.len() % channels, 0);
        let samples_per_channel = interleaved.len() / channels;
        debug_assert!(samples_per_channel <= BLOCK_SIZE);

        let mut per_channel: Vec<Vec<i16>> = vec![Vec::with_capacity(samples_per_channel); channels];
        for (i, &s) in interleaved.iter().enumerate() {
            per_channel[i % channels].push(s);
        }

        let mut records = Vec::with_capacity(channels);
        for samples in &per_channel {
            records.push(encode_channel(samples)?);
        }
        debug!(channels, samples_per_channel, "encoding frame");
        Frame { channels: records }.write_to(&mut self.writer)?;
        Ok(())
    }

    /// Flushes nothing further (there is no trailing metadata) and returns
    /// the underlying writer.
    pub fn finish(self) -> W {
        self.writer
    }
}

fn encode_channel(samples: &[i16]) -> Result<ChannelRecord> {
    let widened: Vec<i32> = samples.iter().map(|&s| s as i32).collect();
    let prescaled = prescale(samples);
    let autocorr = autocorrelate(&prescaled, MAX_LPC_ORDER);
    let solved = solve(&autocorr, MAX_LPC_ORDER);
    if solved.order == 0 || solved.order > MAX_LPC_ORDER {
        warn!(order = solved.order, "levinson produced an invalid order");
        return invariant("levinson order out of range");
    }
    if solved.order as u64 > u8::MAX as u64 {
        return invariant("lpc order does not fit in a u8");
    }

    let quantized_ref = quantize_all(&solved.reflection);
    let dequantized_ref = dequantize_all(&quantized_ref);
    let lpc = lpc_from_reflection(&dequantized_ref);
    let a = fixed_point_coeffs(&lpc, Q);
    let residues = compute_residuals(&widened, &a, Q);

    let unsigned_ref: Vec<u32> = quantized_ref.iter().map(|&k| zigzag(k)).collect();
    let (rice_param_ref, _) = best_rice_param(&unsigned_ref);
    let encoded_ref = encode_block(&unsigned_ref, rice_param_ref);

    let unsigned_residues: Vec<u32> = residues.iter().map(|&r| zigzag(r)).collect();
    let (rice_param_residue, _) = best_rice_param(&unsigned_residues);
    let encoded_residues = encode_block(&unsigned_residues, rice_param_residue);

    trace!(
        order = solved.order,
        rice_param_ref,
        rice_param_residue,
        "encoded channel"
    );

    Ok(ChannelRecord {
        rice_param_ref,
        encoded_ref,
        lpc_order: solved.order as u8,
        rice_param_residue,
        samples_per_channel: samples.len() as u16,
        encoded_residues,
    })
}

/// Reads media info, then yields one interleaved block of samples per
/// [`Decoder::next_frame`] call until the stream ends cleanly.
pub struct Decoder<R: Read> {
    reader: R,
    channels: usize,
}

impl<R: Read> Decoder<R> {
    /// Reads the media-info header and returns a decoder plus the parsed
    /// header (sample rate, channel count, etc.) for the adapter to act on.
    pub fn new(mut reader: R) -> Result<(Decoder<R>, MediaInfo)> {
        let info = MediaInfo::read_from(&mut reader)?;
        if info.bits_per_sample != 16 {
            return unsupported("bits_per_sample must be 16");
        }
        if info.channels != 1 && info.channels != 2 {
            return unsupported("channels must be 1 or 2");
        }
        debug!(
            sample_rate = info.sample_rate,
            channels = info.channels,
            "read media info"
        );
        let channels = info.channels as usize;
        Ok((Decoder { reader, channels }, info))
    }

    /// Decodes the next frame into an interleaved sample buffer, or returns
    /// `Ok(None)` at a clean end of stream (EOF or sync mismatch, spec.md
    /// §4.8).
    pub fn next_frame(&mut self) -> Result<Option<Vec<i16>>> {
        let frame = match Frame::read_from(&mut self.reader, self.channels)? {
            Some(f) => f,
            None => return Ok(None),
        };

        let mut per_channel = Vec::with_capacity(self.channels);
        for record in &frame.channels {
            per_channel.push(decode_channel(record)?);
        }
        let samples_per_channel = per_channel.first().map_or(0, |c| c.len());
        debug!(
            channels = self.channels,
            samples_per_channel, "decoded frame"
        );

        let mut interleaved = Vec::with_capacity(samples_per_channel * self.channels);
        for i in 0..samples_per_channel {
            for channel in &per_channel {
                interleaved.push(channel[i]);
            }
        }
        Ok(Some(interleaved))
    }

    /// Returns the underlying reader.
    pub fn finish(self) -> R {
        self.reader
    }
}

fn decode_channel(record: &ChannelRecord) -> Result<Vec<i16>> {
    let order = record.lpc_order as usize;
    if order == 0 || order > MAX_LPC_ORDER {
        return invariant("decoded lpc_order out of range");
    }
    if record.rice_param_ref > 31 || record.rice_param_residue > 31 {
        return invariant("decoded rice parameter exceeds 31");
    }

    let unsigned_ref = decode_block(&record.encoded_ref, record.rice_param_ref, order)?;
    let quantized_ref: Vec<i32> = unsigned_ref.iter().map(|&u| unzigzag(u)).collect();
    let dequantized_ref = dequantize_all(&quantized_ref);
    let lpc = lpc_from_reflection(&dequantized_ref);
    let a = fixed_point_coeffs(&lpc, Q);

    let n = record.samples_per_channel as usize;
    let unsigned_residues = decode_block(&record.encoded_residues, record.rice_param_residue, n)?;
    let residues: Vec<i32> = unsigned_residues.iter().map(|&u| unzigzag(u)).collect();

    let samples = reconstruct_samples(&residues, &a, Q)?;
    Ok(samples.into_iter().map(|s| s as i16).collect())
}
