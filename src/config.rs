//! Compile-time-in-spirit parameters, expressed as runtime value types.
//!
//! The original source specializes `BufferDecoder<MaxBytes, OutputType, Mode,
//! StreamsNum>` as a C++ template per combination. Per the Design Notes
//! (spec §9: "dispatch once at the call site"), this crate keeps
//! `MaxBytes`/`Mode`/`Streams` as plain enum fields on one [`ProcessorConfig`]
//! value and dispatches once when a [`crate::block::BlockProcessor`] is
//! constructed, in the manner of `succinctly::Config` /
//! `succinctly::dsv::DsvConfig` (value-type config, `with_*` builder
//! methods, a `Default` impl for the common case).

/// How many bytes a UTF-8 sequence may use before the vector fast path
/// bails out to the scalar fallback (or, in [`Mode::Fast`], simply fails).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxBytes {
    /// Pure ASCII only; present for benchmarking (spec §9 Redesign Flags).
    One = 1,
    /// Up to 2-byte UTF-8 sequences (U+0000..=U+07FF).
    Two = 2,
    /// Up to 3-byte UTF-8 sequences (U+0000..=U+FFFF); 4-byte code points
    /// always fall back to the scalar codec, which emits a surrogate pair.
    Three = 3,
}

impl MaxBytes {
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Decode mode (spec §4.5 `DecoderMode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Decode only byte lengths within `MaxBytes`; no scalar fallback, no
    /// validation. Fastest, intended for known-good, ASCII-heavy input.
    Fast,
    /// Decode any well-formed UTF-8, falling back to the scalar codec for
    /// windows the vector step rejects (including anything over
    /// `MaxBytes`). Does not reject malformed input more strictly than the
    /// scalar codec's structural checks.
    #[default]
    Full,
    /// As `Full`, but also runs the validating LUT variant and the scalar
    /// codec's overlong/surrogate/range checks on every window.
    Validate,
}

/// Stream fan-out for the block processor (spec §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Streams {
    /// Purely scalar, no vector step at all.
    Zero,
    /// One vector loop over the whole buffer.
    #[default]
    One,
    /// Four independent, instruction-interleaved vector loops over
    /// UTF-8-boundary-aligned quarters of the buffer.
    Four,
}

impl Streams {
    #[inline]
    pub fn count(self) -> usize {
        match self {
            Streams::Zero => 1,
            Streams::One => 1,
            Streams::Four => 4,
        }
    }
}

/// Fixed-width output/input encoding used on the non-UTF-8 side of a
/// conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputWidth {
    /// UTF-16LE; 2 bytes per code unit, surrogate pairs above `U+FFFF`.
    Utf16,
    /// UTF-32LE; 4 bytes per code unit.
    Utf32,
}

impl OutputWidth {
    #[inline]
    pub fn unit_bytes(self) -> usize {
        match self {
            OutputWidth::Utf16 => 2,
            OutputWidth::Utf32 => 4,
        }
    }
}

/// Same representation as [`OutputWidth`], named for the encoder's input
/// side for readability at call sites.
pub type InputWidth = OutputWidth;

/// Which way a [`crate::block::BlockProcessor`] is being run: UTF-8 in
/// (decode) or UTF-8 out (encode). The original source has this baked into
/// the choice between `BufferDecoder<...>` and `BufferEncoder<...>`; here
/// it's a value passed alongside the processor at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// UTF-8 -> fixed-width (`output`).
    Decode,
    /// Fixed-width (`output`) -> UTF-8.
    Encode,
}

/// The externally-visible encoding names (spec §6 CLI `-s=`/`-d=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16,
    Utf32,
}

/// Value-type configuration for a [`crate::block::BlockProcessor`].
///
/// Mirrors the teacher's builder-style config structs: a `Default` for the
/// common case (validating decode, `MaxBytes = 3`, UTF-16 output, single
/// stream) plus `with_*` methods for the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorConfig {
    pub max_bytes: MaxBytes,
    pub mode: Mode,
    pub streams: Streams,
    pub output: OutputWidth,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            max_bytes: MaxBytes::Three,
            mode: Mode::Validate,
            streams: Streams::One,
            output: OutputWidth::Utf16,
        }
    }
}

impl ProcessorConfig {
    /// Start from the default (validating, `MaxBytes=3`, UTF-16, 1 stream).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_bytes(mut self, max_bytes: MaxBytes) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_streams(mut self, streams: Streams) -> Self {
        self.streams = streams;
        self
    }

    pub fn with_output(mut self, output: OutputWidth) -> Self {
        self.output = output;
        self
    }
}
