//! Incremental (push-based) conversion, for callers that don't have the
//! whole source in memory up front.
//!
//! Grounded in `original_source/Buffer/ProcessorPlugins.h`'s
//! `InteractiveInput`/`InteractiveOutput`: bytes are appended to an internal
//! buffer, the block processor runs over as much of it as forms complete
//! code points, and whatever's left unconsumed (a trailing partial
//! sequence) is kept for the next call. [`crate::stream::Converter`] plays
//! the role of the original's `ContiguousInput`/`ContiguousOutput` — the
//! whole-buffer-at-once case — so this module only covers the incremental
//! one.

use crate::block::BlockProcessor;
use crate::config::ProcessorConfig;
use crate::error::ConvertError;

/// Incremental decoder: feed it UTF-8 bytes as they arrive, get UTF-16LE/
/// UTF-32LE code units back.
pub struct Interactive {
    processor: BlockProcessor,
    pending: Vec<u8>,
}

impl Interactive {
    pub fn new(config: ProcessorConfig) -> Self {
        Self {
            processor: BlockProcessor::new(config),
            pending: Vec::new(),
        }
    }

    /// Feed `chunk` in and decode as much as now forms complete code
    /// points. Set `is_last` on the final call to force the trailing bytes
    /// to be treated as final (any leftover then becomes a
    /// [`crate::error::ConvertErrorKind::TruncatedSequence`]-style error
    /// surfaced by the scalar tail, rather than held back for more input).
    pub fn feed_decode(&mut self, chunk: &[u8], is_last: bool) -> Result<Vec<u8>, ConvertError> {
        self.pending.extend_from_slice(chunk);
        let streams = self.processor.streams_count();
        let cap = self.processor.output_buffer_min_size(self.pending.len().max(1));
        let mut bufs: Vec<Vec<u8>> = (0..streams).map(|_| vec![0u8; cap]).collect();
        let mut refs: Vec<&mut [u8]> = bufs.iter_mut().map(|b| b.as_mut_slice()).collect();
        let result = self.processor.decode(&self.pending, &mut refs, is_last)?;
        let mut output = Vec::new();
        for (i, &n) in result.output_done.iter().enumerate() {
            output.extend_from_slice(&bufs[i][..n]);
        }
        self.pending.drain(..result.input_done);
        Ok(output)
    }

    /// Bytes buffered but not yet decoded (a trailing partial sequence).
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }
}

/// Incremental encoder: feed it UTF-16LE/UTF-32LE code units, get UTF-8
/// bytes back. Single-stream, mirroring [`BlockProcessor::encode`].
pub struct InteractiveEncoder {
    processor: BlockProcessor,
    pending: Vec<u8>,
}

impl InteractiveEncoder {
    pub fn new(config: ProcessorConfig) -> Self {
        Self {
            processor: BlockProcessor::new(config),
            pending: Vec::new(),
        }
    }

    pub fn feed_encode(&mut self, chunk: &[u8], is_last: bool) -> Result<Vec<u8>, ConvertError> {
        self.pending.extend_from_slice(chunk);
        let cap = self.pending.len() * 2 + 16;
        let mut buf = vec![0u8; cap];
        let result = self.processor.encode(&self.pending, &mut buf, is_last)?;
        self.pending.drain(..result.input_done);
        Ok(buf[..result.output_done[0]].to_vec())
    }

    pub fn pending(&self) -> &[u8] {
        &self.pending
    }
}
