//! WAV adapter (boundary, SPEC_FULL.md §6.2): reads/writes the canonical
//! `RIFF`/`WAVE`/`fmt `/`data` chunk layout for 16-bit PCM, mono or stereo.
//!
//! Follows the chunk-dispatch approach of the teacher's `wav::chunks`
//! module: walk chunks by id, validate the redundant `fmt` fields, skip
//! anything we don't recognize. Narrowed to exactly the one format this
//! codec core accepts; `WavReader` rejects everything else as
//! `Error::UnsupportedFormat` rather than growing a `CodecType` enum for
//! formats this crate never decodes.

use std::io::{Read, Write};

use crate::bitio::{ReadBytesExt, WriteBytesExt};
use crate::error::{truncated, unsupported, Error, Result};

const RIFF_MARKER: &[u8; 4] = b"RIFF";
const WAVE_MARKER: &[u8; 4] = b"WAVE";
const FMT_MARKER: &[u8; 4] = b"fmt ";
const DATA_MARKER: &[u8; 4] = b"data";

const WAVE_FORMAT_PCM: u16 = 0x0001;
const WAVE_FORMAT_EXTENSIBLE: u16 = 0xFFFE;

const KSDATAFORMAT_SUBTYPE_PCM: [u8; 16] = [
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x80, 0x00, 0x00, 0xaa, 0x00, 0x38, 0x9b, 0x71,
];

/// The subset of a WAV `fmt ` chunk this codec cares about.
pub struct WavInfo {
    pub sample_rate: u32,
    pub channels: u16,
    pub total_samples: u64,
}

/// Reads a WAV file's header and gives back an `i16` sample iterator over
/// its `data` chunk, deferring to the caller for buffering strategy (the
/// pipeline driver reads in `BLOCK_SIZE * channels`-sized chunks).
pub struct WavReader<R: Read> {
    reader: R,
    samples_left: u64,
}

impl<R: Read> WavReader<R> {
    /// Parses the RIFF/WAVE header, validates the `fmt` chunk, and leaves
    /// the reader positioned at the start of PCM sample data.
    pub fn new(mut reader: R) -> Result<(WavReader<R>, WavInfo)> {
        let mut tag = [0u8; 4];
        reader
            .read_exact(&mut tag)
            .map_err(|_| Error::BadMagic)?;
        if &tag != RIFF_MARKER {
            return Err(Error::BadMagic);
        }
        let _riff_len = reader.read_u32_le()?;
        reader
            .read_exact(&mut tag)
            .map_err(|_| Error::BadMagic)?;
        if &tag != WAVE_MARKER {
            return Err(Error::BadMagic);
        }

        let mut sample_rate = None;
        let mut channels = None;
        let mut bits_per_sample = None;

        loop {
            let mut chunk_id = [0u8; 4];
            if reader.read_exact(&mut chunk_id).is_err() {
                return truncated("wav: missing data chunk");
            }
            let chunk_len = reader
                .read_u32_le()
                .or_else(|_| truncated("wav: chunk length"))?;

            if &chunk_id == FMT_MARKER {
                let (sr, ch, bps) = read_fmt_chunk(&mut reader, chunk_len)?;
                sample_rate = Some(sr);
                channels = Some(ch);
                bits_per_sample = Some(bps);
            } else if &chunk_id == DATA_MARKER {
                let (sample_rate, channels, bits_per_sample) =
                    match (sample_rate, channels, bits_per_sample) {
                        (Some(sr), Some(ch), Some(bps)) => (sr, ch, bps),
                        _ => return unsupported("wav: data chunk before fmt chunk"),
                    };
                if bits_per_sample != 16 {
                    return unsupported("wav: bits_per_sample must be 16");
                }
                if channels != 1 && channels != 2 {
                    return unsupported("wav: channels must be 1 or 2");
                }
                let total_samples = (chunk_len as u64) / 2 / channels as u64;
                return Ok((
                    WavReader {
                        reader,
                        samples_left: total_samples * channels as u64,
                    },
                    WavInfo {
                        sample_rate,
                        channels,
                        total_samples,
                    },
                ));
            } else {
                skip_bytes(&mut reader, chunk_len as usize)?;
            }
        }
    }

    /// Reads up to `buf.len()` interleaved samples, returning how many were
    /// actually read (fewer than `buf.len()` only at the very end).
    pub fn read_samples(&mut self, buf: &mut [i16]) -> Result<usize> {
        let want = (buf.len() as u64).min(self.samples_left) as usize;
        for slot in buf.iter_mut().take(want) {
            *slot = self.reader.read_i16_le()?;
        }
        self.samples_left -= want as u64;
        Ok(want)
    }
}

fn read_fmt_chunk<R: Read>(reader: &mut R, chunk_len: u32) -> Result<(u32, u16, u16)> {
    if chunk_len < 16 {
        return unsupported("wav: fmt chunk too short");
    }
    let format_tag = reader.read_u16_le()?;
    let channels = reader.read_u16_le()?;
    let sample_rate = reader.read_u32_le()?;
    let _bytes_per_sec = reader.read_u32_le()?;
    let block_align = reader.read_u16_le()?;
    let bits_per_sample = reader.read_u16_le()?;

    let resolved_bits = match format_tag {
        WAVE_FORMAT_PCM => {
            if chunk_len > 16 {
                skip_bytes(reader, (chunk_len - 16) as usize)?;
            }
            bits_per_sample
        }
        WAVE_FORMAT_EXTENSIBLE => {
            if chunk_len < 40 {
                return unsupported("wav: malformed fmt_ext chunk");
            }
            let extra_size = reader.read_u16_le()?;
            if extra_size != 22 {
                return unsupported("wav: fmt_ext extra size must be 22");
            }
            let valid_bits = reader.read_u16_le()?;
            let _channel_mask = reader.read_u32_le()?;
            let mut sub_format = [0u8; 16];
            reader.read_exact(&mut sub_format)?;
            if sub_format != KSDATAFORMAT_SUBTYPE_PCM {
                return unsupported("wav: fmt_ext sub-type is not PCM");
            }
            valid_bits
        }
        _ => return unsupported("wav: only PCM is supported"),
    };

    if resolved_bits / 8 * channels != block_align {
        return unsupported("wav: inconsistent fmt chunk");
    }

    Ok((sample_rate, channels, resolved_bits))
}

fn skip_bytes<R: Read>(reader: &mut R, mut len: usize) -> Result<()> {
    let mut scratch = [0u8; 256];
    while len > 0 {
        let take = len.min(scratch.len());
        reader.read_exact(&mut scratch[..take])?;
        len -= take;
    }
    Ok(())
}

/// Writes a canonical 44-byte WAV header (PCM format tag) followed by
/// interleaved `i16` samples, in one pass. The codec decoder already has
/// the full sample count before any bytes are written, so there is no need
/// for cauldron-style streaming chunk updates.
pub struct WavWriter<W: Write> {
    writer: W,
}

impl<W: Write> WavWriter<W> {
    pub fn new(
        mut writer: W,
        sample_rate: u32,
        channels: u16,
        total_samples: u64,
    ) -> Result<WavWriter<W>> {
        let bytes_per_sample = 2u32;
        let block_align = bytes_per_sample * channels as u32;
        let data_len = total_samples as u32 * block_align;
        let riff_len = 36 + data_len;

        writer.write_all(RIFF_MARKER)?;
        writer.write_u32_le(riff_len)?;
        writer.write_all(WAVE_MARKER)?;

        writer.write_all(FMT_MARKER)?;
        writer.write_u32_le(16)?;
        writer.write_u16_le(WAVE_FORMAT_PCM)?;
        writer.write_u16_le(channels)?;
        writer.write_u32_le(sample_rate)?;
        writer.write_u32_le(sample_rate * block_align)?;
        writer.write_u16_le(block_align as u16)?;
        writer.write_u16_le(16)?;

        writer.write_all(DATA_MARKER)?;
        writer.write_u32_le(data_len)?;

        Ok(WavWriter { writer })
    }

    pub fn write_samples(&mut self, samples: &[i16]) -> Result<()> {
        for &s in samples {
            self.writer.write_i16_le(s)?;
        }
        Ok(())
    }

    pub fn finish(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn writes_and_reads_back_a_small_file() {
        let samples: Vec<i16> = vec![1, -1, 2, -2, 3, -3];
        let mut buf = Vec::new();
        {
            let mut w = WavWriter::new(&mut buf, 44100, 2, 3).unwrap();
            w.write_samples(&samples).unwrap();
        }

        let cursor = Cursor::new(buf);
        let (mut r, info) = WavReader::new(cursor).unwrap();
        assert_eq!(info.sample_rate, 44100);
        assert_eq!(info.channels, 2);
        assert_eq!(info.total_samples, 3);

        let mut out = vec![0i16; 6];
        let n = r.read_samples(&mut out).unwrap();
        assert_eq!(n, 6);
        assert_eq!(out, samples);
    }

    #[test]
    fn rejects_missing_riff_tag() {
        let cursor = Cursor::new(b"nope".to_vec());
        assert!(matches!(WavReader::new(cursor), Err(Error::BadMagic)));
    }

    #[test]
    fn skips_unknown_chunks_before_fmt() {
        let mut buf = Vec::new();
        buf.extend_from_slice(RIFF_MARKER);
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(WAVE_MARKER);
        buf.extend_from_slice(b"LIST");
        buf.extend_from_slice(&4u32.to_le_bytes());
        buf.extend_from_slice(b"INFO");
        buf.extend_from_slice(FMT_MARKER);
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&WAVE_FORMAT_PCM.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.extend_from_slice(&44100u32.to_le_bytes());
        buf.extend_from_slice(&88200u32.to_le_bytes());
        buf.extend_from_slice(&2u16.to_le_bytes());
        buf.extend_from_slice(&16u16.to_le_bytes());
        buf.extend_from_slice(DATA_MARKER);
        buf.extend_from_slice(&4u32.to_le_bytes());
        buf.extend_from_slice(&1i16.to_le_bytes());
        buf.extend_from_slice(&2i16.to_le_bytes());

        let cursor = Cursor::new(buf);
        let (_r, info) = WavReader::new(cursor).unwrap();
        assert_eq!(info.channels, 1);
        assert_eq!(info.total_samples, 2);
    }
}
