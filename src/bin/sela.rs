//! CLI adapter (SPEC_FULL.md §6.3): `sela encode <in.wav> <out.hlo>` and
//! `sela decode <in.hlo> <out.wav>`. Installs a `tracing_subscriber`
//! formatter. The library crate itself never does this, matching the
//! convention that libraries only emit events.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::info;

use sela::wav::{WavReader, WavWriter};
use sela::{Decoder, Encoder, Error, BLOCK_SIZE};

#[derive(Parser)]
#[command(name = "sela", about = "A lossless codec for 16-bit PCM audio")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress a WAV file into a `.hlo` stream.
    Encode { input: PathBuf, output: PathBuf },
    /// Decompress a `.hlo` stream back into a WAV file.
    Decode { input: PathBuf, output: PathBuf },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Encode { input, output } => run_encode(&input, &output),
        Command::Decode { input, output } => run_decode(&input, &output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("sela: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_encode(input: &PathBuf, output: &PathBuf) -> Result<(), Error> {
    let start = Instant::now();
    let in_file = BufReader::new(File::open(input)?);
    let (mut wav, info) = WavReader::new(in_file)?;
    info!(
        sample_rate = info.sample_rate,
        channels = info.channels,
        total_samples = info.total_samples,
        "opened wav input"
    );

    let estimated_frames = (info.total_samples as f64 / BLOCK_SIZE as f64).ceil() as u32;
    let out_file = BufWriter::new(File::create(output)?);
    let mut encoder = Encoder::new(
        out_file,
        info.sample_rate as i32,
        info.channels as u8,
        estimated_frames,
    )?;

    let mut buf = vec![0i16; BLOCK_SIZE * info.channels as usize];
    let mut frames = 0u64;
    loop {
        let n = wav.read_samples(&mut buf)?;
        if n == 0 {
            break;
        }
        encoder.process_block(&buf[..n])?;
        frames += 1;
        eprint!("\rsela: encoded {frames} frame(s)");
    }
    eprintln!();

    let elapsed = start.elapsed();
    let uncompressed_bytes = info.total_samples * info.channels as u64 * 2;
    let compressed_bytes = std::fs::metadata(output)?.len();
    info!(
        frames,
        duration_secs = elapsed.as_secs_f64(),
        compression_ratio = uncompressed_bytes as f64 / compressed_bytes.max(1) as f64,
        bitrate_kbps = (compressed_bytes as f64 * 8.0 / 1000.0) / elapsed.as_secs_f64().max(1e-9),
        "encode finished"
    );
    Ok(())
}

fn run_decode(input: &PathBuf, output: &PathBuf) -> Result<(), Error> {
    let start = Instant::now();
    let in_file = BufReader::new(File::open(input)?);
    let (mut decoder, media_info) = Decoder::new(in_file)?;
    info!(
        sample_rate = media_info.sample_rate,
        channels = media_info.channels,
        "opened sela input"
    );

    let mut all_samples = Vec::new();
    let mut frames = 0u64;
    while let Some(block) = decoder.next_frame()? {
        all_samples.extend_from_slice(&block);
        frames += 1;
        eprint!("\rsela: decoded {frames} frame(s)");
    }
    eprintln!();

    let channels = media_info.channels as u16;
    let total_samples = all_samples.len() as u64 / channels as u64;
    let out_file = BufWriter::new(File::create(output)?);
    let mut writer = WavWriter::new(
        out_file,
        media_info.sample_rate as u32,
        channels,
        total_samples,
    )?;
    writer.write_samples(&all_samples)?;

    let elapsed = start.elapsed();
    info!(
        frames,
        duration_secs = elapsed.as_secs_f64(),
        total_samples,
        "decode finished"
    );
    Ok(())
}
