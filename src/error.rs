//! Error type for the internal conversion path.
//!
//! The public, wire-stable contract is [`crate::result::Status`]; this type
//! is the richer error carried internally (and surfaced to callers who want
//! more than a status code, e.g. the CLI's `--file` text diagnostics).

/// A UTF-8/UTF-16/UTF-32 conversion error with byte-offset detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertError {
    /// Byte offset into the source buffer where the fault was detected.
    pub offset: usize,
    /// The kind of fault.
    pub kind: ConvertErrorKind,
}

impl ConvertError {
    pub(crate) fn new(offset: usize, kind: ConvertErrorKind) -> Self {
        Self { offset, kind }
    }
}

impl core::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} at byte offset {}", self.kind, self.offset)
    }
}

/// The specific kind of conversion fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertErrorKind {
    /// A byte in 0x80-0xBF appeared where a lead byte was expected.
    InvalidLeadByte,
    /// A byte outside 0x80-0xBF appeared where a continuation byte was expected.
    InvalidContinuationByte,
    /// A character was encoded using more bytes than necessary.
    OverlongEncoding,
    /// A surrogate code point (U+D800..=U+DFFF) was encoded.
    SurrogateCodepoint,
    /// A code point above U+10FFFF was encoded.
    OutOfRangeCodepoint,
    /// A multi-byte sequence was cut off at the end of input.
    TruncatedSequence,
    /// An unpaired UTF-16 surrogate was encountered while decoding UTF-16.
    UnpairedSurrogate,
    /// The output buffer is too small for the worst-case expansion.
    OutputOverflow,
    /// The requested conversion pair is not supported (iconv facade).
    UnsupportedConversion,
    /// Input or output could not be accessed (I/O).
    NoAccess,
}

impl core::fmt::Display for ConvertErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidLeadByte => write!(f, "invalid UTF-8 lead byte"),
            Self::InvalidContinuationByte => write!(f, "invalid UTF-8 continuation byte"),
            Self::OverlongEncoding => write!(f, "overlong UTF-8 encoding"),
            Self::SurrogateCodepoint => write!(f, "surrogate code point in UTF-8"),
            Self::OutOfRangeCodepoint => write!(f, "code point above U+10FFFF"),
            Self::TruncatedSequence => write!(f, "truncated multi-byte sequence"),
            Self::UnpairedSurrogate => write!(f, "unpaired UTF-16 surrogate"),
            Self::OutputOverflow => write!(f, "output buffer too small"),
            Self::UnsupportedConversion => write!(f, "unsupported conversion pair"),
            Self::NoAccess => write!(f, "could not access input or output"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConvertError {}
