//! The in-memory conversion API (spec §6): `convert_in_memory`/
//! `convert_in_memory_size`, a single call over caller-owned buffers with no
//! chunking of its own — the streaming chunk loop lives in
//! [`crate::stream::Converter`] instead.

use crate::block::BlockProcessor;
use crate::config::Direction;
use crate::result::{status_for_error, ConvertResult};

/// Convert `in_buf` into `out_buf` in one call, treating `in_buf` as a
/// complete, final block (matching the original's "whole buffer at once"
/// in-memory entry point — there is no partial/continuation state to carry
/// between calls here; use [`crate::helpers::Interactive`] for that).
///
/// On any fault, `output_size`/`input_size` report the valid prefix
/// converted before the fault, per spec §7; nothing past that point is
/// written to `out_buf`.
pub fn convert_in_memory(processor: &BlockProcessor, direction: Direction, in_buf: &[u8], out_buf: &mut [u8]) -> ConvertResult {
    let min_out = convert_in_memory_size(processor, direction, in_buf.len());
    if out_buf.len() < min_out {
        return ConvertResult::failure(crate::result::Status::OverflowPossible, 0, 0);
    }
    match direction {
        Direction::Decode => {
            let streams = processor.streams_count();
            let per_stream_cap = processor.output_buffer_min_size(in_buf.len());
            let mut bufs: Vec<Vec<u8>> = (0..streams).map(|_| vec![0u8; per_stream_cap]).collect();
            let mut refs: Vec<&mut [u8]> = bufs.iter_mut().map(|b| b.as_mut_slice()).collect();
            match processor.decode(in_buf, &mut refs, true) {
                Ok(result) => {
                    let mut written = 0usize;
                    for (i, &n) in result.output_done.iter().enumerate() {
                        out_buf[written..written + n].copy_from_slice(&bufs[i][..n]);
                        written += n;
                    }
                    ConvertResult::success(result.input_done, written)
                }
                Err(err) => ConvertResult::failure(status_for_error(err.kind), err.offset, 0),
            }
        }
        Direction::Encode => match processor.encode(in_buf, out_buf, true) {
            Ok(result) => ConvertResult::success(result.input_done, result.output_done[0]),
            Err(err) => ConvertResult::failure(status_for_error(err.kind), err.offset, 0),
        },
    }
}

/// Minimum `out_buf` length [`convert_in_memory`] needs to guarantee it
/// never hits [`crate::error::ConvertErrorKind::OutputOverflow`] for an
/// input of `in_len` bytes, mirroring `GetOutputBufferMinSize`.
pub fn convert_in_memory_size(processor: &BlockProcessor, direction: Direction, in_len: usize) -> usize {
    match direction {
        Direction::Decode => processor.output_buffer_min_size(in_len) * processor.streams_count(),
        Direction::Encode => {
            // Worst case: every code unit expands to 3 (UTF-16, out of the
            // BMP via a surrogate pair still averages under this) or 4
            // (UTF-32) UTF-8 bytes; `+4` matches the decoder side's slack.
            let unit_bytes = processor.config().output.unit_bytes();
            (in_len / unit_bytes + 4) * 4
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProcessorConfig;
    use crate::result::Status;

    #[test]
    fn convert_in_memory_decodes_ascii() {
        let processor = BlockProcessor::new(ProcessorConfig::new());
        let mut out = vec![0u8; convert_in_memory_size(&processor, Direction::Decode, 5)];
        let result = convert_in_memory(&processor, Direction::Decode, b"Hello", &mut out);
        assert_eq!(result.status, Status::Success);
        assert_eq!(result.input_size, 5);
        assert_eq!(&out[..result.output_size], &[0x48, 0, 0x65, 0, 0x6C, 0, 0x6C, 0, 0x6F, 0]);
    }

    #[test]
    fn convert_in_memory_reports_overflow_possible_for_tiny_output() {
        let processor = BlockProcessor::new(ProcessorConfig::new());
        let mut out = [0u8; 1];
        let result = convert_in_memory(&processor, Direction::Decode, b"Hello", &mut out);
        assert_eq!(result.status, Status::OverflowPossible);
    }

    #[test]
    fn convert_in_memory_rejects_overlong_encoding() {
        let processor = BlockProcessor::new(ProcessorConfig::new());
        let mut out = vec![0u8; convert_in_memory_size(&processor, Direction::Decode, 2)];
        let result = convert_in_memory(&processor, Direction::Decode, &[0xC0, 0x80], &mut out);
        assert_eq!(result.status, Status::IncorrectData);
        assert_eq!(result.output_size, 0);
    }
}
