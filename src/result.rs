//! The wire-stable `Result` taxonomy (spec §6/§7).
//!
//! `Status` is kept as a plain `u8`-backed enum so its discriminants are
//! stable across crate versions for callers that cross an FFI boundary
//! (the `iconv` facade maps it to `errno` values).

use crate::error::{ConvertError, ConvertErrorKind};

/// Outcome of a conversion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    /// The whole input was converted successfully.
    Success = 0,
    /// The output buffer would not fit the worst-case expansion; nothing
    /// (or only a safe prefix) was written.
    OverflowPossible = 1,
    /// Input ended in the middle of a symbol (non-final block only).
    IncompleteData = 2,
    /// Input contains a byte sequence that is not valid in the source
    /// encoding (overlong, surrogate, out-of-range, bad framing).
    IncorrectData = 3,
    /// Input or output could not be opened/read/written.
    NoAccess = 4,
}

impl Status {
    /// True if the call fully succeeded.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Status::Success => "success",
            Status::OverflowPossible => "overflow_possible",
            Status::IncompleteData => "incomplete_data",
            Status::IncorrectData => "incorrect_data",
            Status::NoAccess => "no_access",
        };
        write!(f, "{s}")
    }
}

/// Result of an in-memory or file conversion call.
///
/// `input_size`/`output_size` report the valid prefix converted before a
/// fault, even on failure (spec §7: "no partial commits", but the caller is
/// told exactly how far the conversion got).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertResult {
    pub status: Status,
    /// Bytes consumed from the input.
    pub input_size: usize,
    /// Bytes written to the output.
    pub output_size: usize,
}

impl ConvertResult {
    pub(crate) fn success(input_size: usize, output_size: usize) -> Self {
        Self {
            status: Status::Success,
            input_size,
            output_size,
        }
    }

    pub(crate) fn failure(status: Status, input_size: usize, output_size: usize) -> Self {
        debug_assert!(!matches!(status, Status::Success));
        Self {
            status,
            input_size,
            output_size,
        }
    }
}

/// Maps a [`ConvertErrorKind`] onto the wire-stable [`Status`] taxonomy.
pub(crate) fn status_for_error(kind: ConvertErrorKind) -> Status {
    match kind {
        ConvertErrorKind::TruncatedSequence => Status::IncompleteData,
        ConvertErrorKind::OutputOverflow => Status::OverflowPossible,
        ConvertErrorKind::NoAccess | ConvertErrorKind::UnsupportedConversion => Status::NoAccess,
        ConvertErrorKind::InvalidLeadByte
        | ConvertErrorKind::InvalidContinuationByte
        | ConvertErrorKind::OverlongEncoding
        | ConvertErrorKind::SurrogateCodepoint
        | ConvertErrorKind::OutOfRangeCodepoint
        | ConvertErrorKind::UnpairedSurrogate => Status::IncorrectData,
    }
}

/// Convenience: turn a [`ConvertError`] into a failed [`ConvertResult`].
pub(crate) fn result_for_error(err: ConvertError, input_size: usize, output_size: usize) -> ConvertResult {
    ConvertResult::failure(status_for_error(err.kind), input_size, output_size)
}
