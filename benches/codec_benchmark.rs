//! Criterion benchmark retargeted from the teacher's WAV/FLAC decode
//! benchmark onto this crate's `encode`/`decode` over a synthetic in-memory
//! buffer, so the benchmark neither depends on fixture files nor on the
//! adapters (`sela::wav`); only the codec core (SPEC_FULL.md §10).

use std::io::Cursor;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sela::{Decoder, Encoder, BLOCK_SIZE};

/// A mono block of pseudo-random 16-bit samples, deterministic across runs.
fn synthetic_block(len: usize) -> Vec<i16> {
    let mut state = 0x1234_5678u32;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            ((state >> 16) as i32 - 32768) as i16
        })
        .collect()
}

fn encode_frames(samples: &[i16], frames: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut enc = Encoder::new(&mut buf, 44_100, 1, frames as u32).unwrap();
    for _ in 0..frames {
        enc.process_block(samples).unwrap();
    }
    buf
}

fn bench_encode(c: &mut Criterion) {
    let samples = synthetic_block(BLOCK_SIZE);
    let mut group = c.benchmark_group("codec");
    group.sample_size(20).measurement_time(Duration::new(10, 0));
    group.bench_function("encode_100_frames", |b| {
        b.iter(|| black_box(encode_frames(&samples, 100)))
    });
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let samples = synthetic_block(BLOCK_SIZE);
    let encoded = encode_frames(&samples, 100);
    let mut group = c.benchmark_group("codec");
    group.sample_size(20).measurement_time(Duration::new(10, 0));
    group.bench_function("decode_100_frames", |b| {
        b.iter(|| {
            let cursor = Cursor::new(black_box(encoded.clone()));
            let (mut dec, _info) = Decoder::new(cursor).unwrap();
            let mut count = 0;
            while dec.next_frame().unwrap().is_some() {
                count += 1;
            }
            count
        })
    });
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
