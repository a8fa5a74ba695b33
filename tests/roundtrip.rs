//! Black-box integration tests over the public `Encoder`/`Decoder` API,
//! covering every concrete scenario in spec.md §8, in the style of
//! `claxon`'s `tests/testsamples.rs`: build an in-memory stream with
//! `std::io::Cursor`, round-trip it, and check the samples come back intact.

use std::io::Cursor;

use sela::{Decoder, Encoder, BLOCK_SIZE};

fn encode_mono(samples: &[i16]) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut enc = Encoder::new(&mut buf, 44_100, 1, 1).unwrap();
    enc.process_block(samples).unwrap();
    buf
}

fn encode_stereo(interleaved: &[i16]) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut enc = Encoder::new(&mut buf, 44_100, 2, 1).unwrap();
    enc.process_block(interleaved).unwrap();
    buf
}

fn decode_all(bytes: Vec<u8>) -> (u16, Vec<i16>) {
    let cursor = Cursor::new(bytes);
    let (mut dec, info) = Decoder::new(cursor).unwrap();
    let mut out = Vec::new();
    while let Some(block) = dec.next_frame().unwrap() {
        out.extend_from_slice(&block);
    }
    (info.channels as u16, out)
}

#[test]
fn silence_mono_round_trips() {
    let samples = vec![0i16; BLOCK_SIZE];
    let (channels, decoded) = decode_all(encode_mono(&samples));
    assert_eq!(channels, 1);
    assert_eq!(decoded, samples);
}

#[test]
fn dc_stereo_round_trips() {
    let mut interleaved = Vec::with_capacity(BLOCK_SIZE * 2);
    for _ in 0..BLOCK_SIZE {
        interleaved.push(1000i16);
        interleaved.push(-1000i16);
    }
    let (channels, decoded) = decode_all(encode_stereo(&interleaved));
    assert_eq!(channels, 2);
    assert_eq!(decoded, interleaved);
}

#[test]
fn impulse_mono_round_trips() {
    let mut samples = vec![0i16; BLOCK_SIZE];
    samples[0] = 16384;
    let (_channels, decoded) = decode_all(encode_mono(&samples));
    assert_eq!(decoded, samples);
}

#[test]
fn ramp_mono_round_trips() {
    let samples: Vec<i16> = (0..BLOCK_SIZE as i32).map(|i| ((i - 120) * 100) as i16).collect();
    let (_channels, decoded) = decode_all(encode_mono(&samples));
    assert_eq!(decoded, samples);
}

#[test]
fn white_noise_mono_round_trips() {
    // A small linear congruential generator seeded with 1, matching spec.md
    // §8's "white noise, mono, seed 1" scenario.
    let mut state = 1u32;
    let samples: Vec<i16> = (0..BLOCK_SIZE)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            ((state >> 16) as i32 % 65536 - 32768) as i16
        })
        .collect();
    let (_channels, decoded) = decode_all(encode_mono(&samples));
    assert_eq!(decoded, samples);
}

#[test]
fn multi_frame_stream_round_trips() {
    let mut buf = Vec::new();
    let mut frames = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, 48_000, 1, 3).unwrap();
        for base in 0..3 {
            let samples: Vec<i16> = (0..BLOCK_SIZE as i32)
                .map(|i| ((i + base * 17) % 2000 - 1000) as i16)
                .collect();
            enc.process_block(&samples).unwrap();
            frames.push(samples);
        }
    }

    let cursor = Cursor::new(buf);
    let (mut dec, info) = Decoder::new(cursor).unwrap();
    assert_eq!(info.sample_rate, 48_000);
    for expected in &frames {
        let decoded = dec.next_frame().unwrap().unwrap();
        assert_eq!(&decoded, expected);
    }
    assert!(dec.next_frame().unwrap().is_none());
}

#[test]
fn partial_final_frame_round_trips() {
    // BLOCK_SIZE does not evenly divide this sample count, so the last
    // block handed to the encoder is short (spec.md §9 Open Question 2).
    let total = BLOCK_SIZE * 2 + 37;
    let samples: Vec<i16> = (0..total as i32).map(|i| (i % 1000 - 500) as i16).collect();

    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, 44_100, 1, 3).unwrap();
        for chunk in samples.chunks(BLOCK_SIZE) {
            enc.process_block(chunk).unwrap();
        }
    }

    let (_channels, decoded) = decode_all(buf);
    assert_eq!(decoded, samples);
}

#[test]
fn sync_loss_yields_exactly_one_frame_then_stops() {
    // Measure where the first frame ends by encoding it alone.
    let mut solo = Vec::new();
    {
        let mut enc = Encoder::new(&mut solo, 44_100, 1, 1).unwrap();
        enc.process_block(&vec![0i16; BLOCK_SIZE]).unwrap();
    }
    let first_frame_len = solo.len();

    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, 44_100, 1, 2).unwrap();
        enc.process_block(&vec![0i16; BLOCK_SIZE]).unwrap();
        enc.process_block(&vec![500i16; BLOCK_SIZE]).unwrap();
    }
    // Corrupt the second frame's sync word so decoding must stop there.
    buf[first_frame_len] ^= 0xFF;
    buf[first_frame_len + 1] ^= 0xFF;

    let cursor = Cursor::new(buf);
    let (mut dec, _info) = Decoder::new(cursor).unwrap();
    assert!(dec.next_frame().unwrap().is_some());
    assert!(dec.next_frame().unwrap().is_none());
}

#[test]
fn rejects_bad_magic() {
    let cursor = Cursor::new(b"not-a-sela-file-00000".to_vec());
    assert!(Decoder::new(cursor).is_err());
}
