//! Chunked whole-buffer conversion: splits an in-memory source into
//! [`BlockProcessor::input_buffer_recommended_size`]-sized chunks and runs
//! each one through [`crate::block::BlockProcessor`], the way
//! `BaseBufferProcessor::Process` is driven in a loop by the original's
//! `ContiguousInput`/`ContiguousOutput` plugins (`Buffer/ProcessorPlugins.h`).
//!
//! This is the engine behind [`crate::memory::convert_in_memory`]; the CLI
//! (`src/bin/file_converter`) and [`crate::file::convert_files`] build on it
//! for file-sized input rather than re-deriving the chunk loop.

use crate::block::BlockProcessor;
use crate::config::ProcessorConfig;
use crate::error::ConvertError;

/// Runs a [`BlockProcessor`] to completion over a single in-memory buffer.
pub struct Converter {
    processor: BlockProcessor,
}

impl Converter {
    pub fn new(config: ProcessorConfig) -> Self {
        Self {
            processor: BlockProcessor::new(config),
        }
    }

    pub fn processor(&self) -> &BlockProcessor {
        &self.processor
    }

    /// Decode all of `input` (UTF-8) into the processor's configured output
    /// width. Returns the fully decoded buffer.
    pub fn decode_all(&self, input: &[u8]) -> Result<Vec<u8>, ConvertError> {
        let chunk_size = self.processor.input_buffer_recommended_size();
        let streams = self.processor.streams_count();
        let mut output = Vec::with_capacity(input.len() * 2 + 16);
        let mut done = 0usize;
        while done < input.len() {
            let take = (input.len() - done).min(chunk_size);
            let chunk = &input[done..done + take];
            let is_last = done + take == input.len();
            let per_stream_cap = self.processor.output_buffer_min_size(chunk.len());
            let mut bufs: Vec<Vec<u8>> = (0..streams).map(|_| vec![0u8; per_stream_cap]).collect();
            let mut refs: Vec<&mut [u8]> = bufs.iter_mut().map(|b| b.as_mut_slice()).collect();
            let result = self.processor.decode(chunk, &mut refs, is_last)?;
            for (i, &n) in result.output_done.iter().enumerate() {
                output.extend_from_slice(&bufs[i][..n]);
            }
            if result.input_done == 0 {
                break; // no progress possible (e.g. empty chunk); avoid looping forever
            }
            done += result.input_done;
        }
        Ok(output)
    }

    /// Encode all of `input` (UTF-16LE/UTF-32LE, per the processor's output
    /// width) into UTF-8.
    pub fn encode_all(&self, input: &[u8]) -> Result<Vec<u8>, ConvertError> {
        let chunk_size = self.processor.input_buffer_recommended_size();
        let mut output = Vec::with_capacity(input.len() + 16);
        let mut done = 0usize;
        while done < input.len() {
            let take = (input.len() - done).min(chunk_size);
            let chunk = &input[done..done + take];
            let is_last = done + take == input.len();
            // Worst case every code unit expands to 3 (UTF-16) or 4 (UTF-32)
            // UTF-8 bytes; `+4` matches `GetOutputBufferMinSize`'s slack.
            let cap = chunk.len() * 2 + 16;
            let mut buf = vec![0u8; cap];
            let result = self.processor.encode(chunk, &mut buf, is_last)?;
            output.extend_from_slice(&buf[..result.output_done[0]]);
            if result.input_done == 0 {
                break;
            }
            done += result.input_done;
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Mode, OutputWidth, ProcessorConfig};

    #[test]
    fn decode_all_roundtrips_ascii_across_chunk_boundary() {
        let converter = Converter::new(ProcessorConfig::new());
        let text = "hello world".repeat(10);
        let decoded = converter.decode_all(text.as_bytes()).unwrap();
        assert_eq!(decoded.len(), text.len() * 2);
    }

    #[test]
    fn encode_all_reencodes_utf16_back_to_utf8() {
        let config = ProcessorConfig::new().with_mode(Mode::Validate).with_output(OutputWidth::Utf16);
        let converter = Converter::new(config);
        let text = "héllo wörld";
        let decoded = converter.decode_all(text.as_bytes()).unwrap();
        let reencoded = converter.encode_all(&decoded).unwrap();
        assert_eq!(reencoded, text.as_bytes());
    }
}
