//! `file_converter`: a CLI around [`utf8lut`]'s block processor, ported
//! from `original_source/src/tests/FileConverter.cpp`'s `main`.
//!
//! Positional `<input> <output>`, each either a file path or a synthetic
//! token (`rnd<chars>:<n>` source, `hash` sink; see [`synth`]). Flags
//! mirror the original's `Config`: `-s=`/`-d=` encoding names, `-b=` max
//! fast-path byte length, `--small` (single-stream processor), `--file`
//! (stream file-to-file instead of loading the whole input into memory),
//! `--ec` (best-effort error correction: skip one byte past each fault and
//! keep going), `-k=` (repeat the conversion N times, for benchmarking).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::Parser;

use utf8lut::config::{Direction, Encoding, MaxBytes, Mode, OutputWidth, ProcessorConfig, Streams};
use utf8lut::file::{convert_files, FileSettings};
use utf8lut::memory::{convert_in_memory, convert_in_memory_size};
use utf8lut::result::{ConvertResult, Status};
use utf8lut::BlockProcessor;

mod synth;

/// Configuration error exit code (spec §6: "17 on configuration error").
const CONFIG_ERROR_EXIT_CODE: u8 = 17;

#[derive(Parser, Debug)]
#[command(name = "file_converter", version, about = "Convert text between UTF-8, UTF-16LE, and UTF-32LE")]
struct Cli {
    /// Input file path, or a `rnd<chars>:<n>` synthetic-source token.
    input: String,
    /// Output file path, or the `hash` synthetic-sink token.
    output: String,

    /// Source encoding: utf8, utf-16, or utf-32.
    #[arg(short = 's', long = "src", default_value = "utf8")]
    src: String,

    /// Destination encoding: utf8, utf-16, or utf-32.
    #[arg(short = 'd', long = "dst", default_value = "utf16")]
    dst: String,

    /// Fast vector path supports code points up to this many UTF-8 bytes
    /// (1, 2, or 3); longer code points always fall back to the scalar path.
    #[arg(short = 'b', long = "max-bytes", default_value_t = 3)]
    max_bytes: u8,

    /// Single-stream processor (bounded memory, lower throughput).
    #[arg(long)]
    small: bool,

    /// Stream file-to-file in bounded-size chunks instead of loading the
    /// whole input into memory at once.
    #[arg(long)]
    file: bool,

    /// Best-effort error correction: skip one input unit past each fault
    /// and keep converting, rather than stopping at the first one.
    #[arg(long = "ec")]
    error_correction: bool,

    /// Repeat the conversion this many times (throughput testing); only
    /// the last run's result is reported.
    #[arg(short = 'k', long = "runs", default_value_t = 1)]
    runs: u32,
}

fn parse_encoding(name: &str) -> Result<Encoding> {
    match name.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
        "utf8" => Ok(Encoding::Utf8),
        "utf16" => Ok(Encoding::Utf16),
        "utf32" => Ok(Encoding::Utf32),
        other => bail!("Unknown encoding: {other}"),
    }
}

fn output_width(encoding: Encoding) -> Option<OutputWidth> {
    match encoding {
        Encoding::Utf16 => Some(OutputWidth::Utf16),
        Encoding::Utf32 => Some(OutputWidth::Utf32),
        Encoding::Utf8 => None,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(result) => {
            eprintln!(
                "Conversion result: {}; converted {} bytes -> {} bytes",
                result.status, result.input_size, result.output_size
            );
            if result.status.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(CONFIG_ERROR_EXIT_CODE)
        }
    }
}

fn run(cli: Cli) -> Result<ConvertResult> {
    let src = parse_encoding(&cli.src)?;
    let dst = parse_encoding(&cli.dst)?;
    if src == dst {
        bail!("Source and destination encoding must be different");
    }
    let (direction, width) = match (src, dst) {
        (Encoding::Utf8, other) => (Direction::Decode, output_width(other).unwrap()),
        (other, Encoding::Utf8) => (Direction::Encode, output_width(other).unwrap()),
        _ => bail!("Either source or destination encoding must be UTF-8"),
    };
    if !(1..=3).contains(&cli.max_bytes) {
        bail!("Fast path can process up to 1-byte, 2-byte, or 3-byte code points ({})", cli.max_bytes);
    }
    if cli.file && (synth::parse_synth_source(&cli.input).is_some() || synth::is_hash_sink(&cli.output)) {
        bail!("Both input and output must be file paths when using --file mode");
    }

    let max_bytes = match cli.max_bytes {
        1 => MaxBytes::One,
        2 => MaxBytes::Two,
        _ => MaxBytes::Three,
    };
    let streams = if cli.small { Streams::One } else { Streams::Four };
    let streams = match direction {
        Direction::Decode => streams,
        Direction::Encode => Streams::One, // encode has no 4-stream split; see block.rs
    };
    let config = ProcessorConfig::new()
        .with_max_bytes(max_bytes)
        .with_mode(Mode::Validate)
        .with_streams(streams)
        .with_output(width);
    let processor = BlockProcessor::new(config);

    let mut last = None;
    for _ in 0..cli.runs.max(1) {
        last = Some(run_once(&processor, direction, &cli)?);
    }
    Ok(last.expect("runs is clamped to at least 1"))
}

fn run_once(processor: &BlockProcessor, direction: Direction, cli: &Cli) -> Result<ConvertResult> {
    if cli.file {
        let settings = FileSettings { small: cli.small };
        return Ok(convert_files(
            processor,
            direction,
            &PathBuf::from(&cli.input),
            &PathBuf::from(&cli.output),
            settings,
        ));
    }

    let input_data = match synth::parse_synth_source(&cli.input) {
        Some((lens, n)) => {
            let source_encoding = match direction {
                Direction::Decode => Encoding::Utf8,
                Direction::Encode => match processor.config().output {
                    OutputWidth::Utf16 => Encoding::Utf16,
                    OutputWidth::Utf32 => Encoding::Utf32,
                },
            };
            synth::generate_random_source(source_encoding, n, lens, None)
        }
        None => std::fs::read(&cli.input)?,
    };

    let result = if cli.error_correction {
        convert_with_error_correction(processor, direction, &input_data)
    } else {
        let mut out = vec![0u8; convert_in_memory_size(processor, direction, input_data.len())];
        let result = convert_in_memory(processor, direction, &input_data, &mut out);
        (result, out)
    };
    let (result, output_data) = result;

    if synth::is_hash_sink(&cli.output) {
        eprintln!("Computed hash value of output: {}", synth::hash_buffer(&output_data[..result.output_size]));
    } else if result.status.is_success() {
        std::fs::write(&cli.output, &output_data[..result.output_size])?;
    }
    Ok(result)
}

/// `on_error_miss_code_units` (spec §7): on a fault, skip one source unit
/// past it and resume, accumulating output and a running input offset.
fn convert_with_error_correction(processor: &BlockProcessor, direction: Direction, input: &[u8]) -> (ConvertResult, Vec<u8>) {
    let unit_bytes = match direction {
        Direction::Decode => 1,
        Direction::Encode => processor.config().output.unit_bytes(),
    };
    let mut offset = 0usize;
    let mut output = Vec::new();
    let mut status = Status::Success;
    while offset < input.len() {
        let remaining = &input[offset..];
        let mut out = vec![0u8; convert_in_memory_size(processor, direction, remaining.len())];
        let result = convert_in_memory(processor, direction, remaining, &mut out);
        output.extend_from_slice(&out[..result.output_size]);
        offset += result.input_size;
        if result.status.is_success() {
            break;
        }
        status = result.status;
        offset += unit_bytes; // skip the offending unit and retry
    }
    (ConvertResult { status, input_size: offset.min(input.len()), output_size: output.len() }, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_encoding_accepts_known_names() {
        assert_eq!(parse_encoding("UTF-8").unwrap(), Encoding::Utf8);
        assert_eq!(parse_encoding("utf16").unwrap(), Encoding::Utf16);
        assert_eq!(parse_encoding("UTF_32").unwrap(), Encoding::Utf32);
    }

    #[test]
    fn parse_encoding_rejects_unknown_names() {
        assert!(parse_encoding("latin1").is_err());
    }
}
