//! Container format and frame records (C7): the `hello` magic, the fixed
//! media-info header, and the per-channel record layout of SPEC_FULL.md
//! §6.1 (spec.md §6.1 plus the `samples_per_channel` field that resolves
//! Open Question 2).
//!
//! Byte order is little-endian throughout, following the same
//! `read_le_*`/`write_le_*` convention `cauldron`'s `io` module uses for its
//! container headers.

use std::io::{Read, Write};

use crate::bitio::{ReadBytesExt, WriteBytesExt};
use crate::error::{truncated, Error, Result};
use crate::{FRAME_SYNC, MAGIC};

/// The fixed header that precedes the first frame.
pub struct MediaInfo {
    pub sample_rate: i32,
    pub bits_per_sample: i16,
    pub channels: i8,
    /// For progress reporting only; not authoritative (spec.md §6.1).
    pub estimated_frames: u32,
}

impl MediaInfo {
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(MAGIC)?;
        w.write_i32_le(self.sample_rate)?;
        w.write_i16_le(self.bits_per_sample)?;
        w.write_i8(self.channels)?;
        w.write_u32_le(self.estimated_frames)?;
        Ok(())
    }

    pub fn read_from<R: Read>(r: &mut R) -> Result<MediaInfo> {
        let mut magic = [0u8; 5];
        if r.read_exact(&mut magic).is_err() {
            return Err(Error::BadMagic);
        }
        if &magic != MAGIC {
            return Err(Error::BadMagic);
        }
        let sample_rate = r
            .read_i32_le()
            .or_else(|_| truncated("media info: sample_rate"))?;
        let bits_per_sample = r
            .read_i16_le()
            .or_else(|_| truncated("media info: bits_per_sample"))?;
        let channels = r
            .read_i8()
            .or_else(|_| truncated("media info: channels"))?;
        let estimated_frames = r
            .read_u32_le()
            .or_else(|_| truncated("media info: estimated_frames"))?;
        Ok(MediaInfo {
            sample_rate,
            bits_per_sample,
            channels,
            estimated_frames,
        })
    }
}

/// One channel's record within a frame, per SPEC_FULL.md §6.1.
pub struct ChannelRecord {
    pub rice_param_ref: u8,
    pub encoded_ref: Vec<u32>,
    pub lpc_order: u8,
    pub rice_param_residue: u8,
    pub samples_per_channel: u16,
    pub encoded_residues: Vec<u32>,
}

impl ChannelRecord {
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_u8(self.rice_param_ref)?;
        w.write_u16_le(self.encoded_ref.len() as u16)?;
        w.write_u8(self.lpc_order)?;
        for &word in &self.encoded_ref {
            w.write_u32_le(word)?;
        }
        w.write_u8(self.rice_param_residue)?;
        w.write_u16_le(self.encoded_residues.len() as u16)?;
        w.write_u16_le(self.samples_per_channel)?;
        for &word in &self.encoded_residues {
            w.write_u32_le(word)?;
        }
        Ok(())
    }

    pub fn read_from<R: Read>(r: &mut R) -> Result<ChannelRecord> {
        let rice_param_ref = r
            .read_u8()
            .or_else(|_| truncated("channel record: rice_param_ref"))?;
        let req_int_ref = r
            .read_u16_le()
            .or_else(|_| truncated("channel record: req_int_ref"))?;
        let lpc_order = r
            .read_u8()
            .or_else(|_| truncated("channel record: lpc_order"))?;
        let mut encoded_ref = Vec::with_capacity(req_int_ref as usize);
        for _ in 0..req_int_ref {
            encoded_ref.push(
                r.read_u32_le()
                    .or_else(|_| truncated("channel record: encoded_ref word"))?,
            );
        }
        let rice_param_residue = r
            .read_u8()
            .or_else(|_| truncated("channel record: rice_param_residue"))?;
        let req_int_residues = r
            .read_u16_le()
            .or_else(|_| truncated("channel record: req_int_residues"))?;
        let samples_per_channel = r
            .read_u16_le()
            .or_else(|_| truncated("channel record: samples_per_channel"))?;
        let mut encoded_residues = Vec::with_capacity(req_int_residues as usize);
        for _ in 0..req_int_residues {
            encoded_residues.push(
                r.read_u32_le()
                    .or_else(|_| truncated("channel record: encoded_residues word"))?,
            );
        }
        Ok(ChannelRecord {
            rice_param_ref,
            encoded_ref,
            lpc_order,
            rice_param_residue,
            samples_per_channel,
            encoded_residues,
        })
    }
}

/// A full frame: the sync word plus one [`ChannelRecord`] per channel, in
/// channel order (spec.md §5: channel 0's record precedes channel 1's).
pub struct Frame {
    pub channels: Vec<ChannelRecord>,
}

impl Frame {
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_u32_le(FRAME_SYNC)?;
        for ch in &self.channels {
            ch.write_to(w)?;
        }
        Ok(())
    }

    /// Reads the next frame, or `Ok(None)` if the sync word does not match,
    /// a clean end of stream per spec.md §4.8, not an error. Any failure
    /// reading the sync word itself (short read) is likewise treated as a
    /// clean end, since a genuine encoder always finishes on a word
    /// boundary and a dangling partial sync word carries no frame data.
    pub fn read_from<R: Read>(r: &mut R, channel_count: usize) -> Result<Option<Frame>> {
        let mut sync_bytes = [0u8; 4];
        let mut filled = 0;
        while filled < 4 {
            match r.read(&mut sync_bytes[filled..])? {
                0 => return Ok(None),
                n => filled += n,
            }
        }
        let sync = u32::from_le_bytes(sync_bytes);
        if sync != FRAME_SYNC {
            return Ok(None);
        }
        let mut channels = Vec::with_capacity(channel_count);
        for _ in 0..channel_count {
            channels.push(ChannelRecord::read_from(r)?);
        }
        Ok(Some(Frame { channels }))
    }
}
