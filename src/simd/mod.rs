//! Vector decode/encode step: table-driven 128-bit SIMD windows over the
//! [`crate::lut`] tables.
//!
//! The C++ original compiles one `BufferDecoder<MaxBytes, OutputType, Mode,
//! StreamsNum>`/`BufferEncoder<...>` per template instantiation. Here the
//! vector step is a handful of plain functions parameterized by
//! [`crate::config::MaxBytes`]/[`crate::config::OutputWidth`] at the call
//! site (spec §9 Design Note), gated behind a runtime CPU feature check
//! instead of a build-time target.
//!
//! Only SSSE3 (`pshufb`, `pmaddubsw`) is required; every intrinsic used here
//! has been available on x86_64 since the Core 2 generation. There is no
//! scalar-equivalent "generic vector" fallback: when [`has_vector_support`]
//! is false, callers (`crate::block`) run the scalar codec for the entire
//! buffer.

#[cfg(target_arch = "x86_64")]
mod sse;

#[cfg(target_arch = "x86_64")]
pub use sse::{decode_window, encode_window_utf16, encode_window_utf32};

/// Whether this process can use the vector step at all.
///
/// Checked once by [`crate::block::BlockProcessor::new`] and cached; not
/// meant to be called per-window.
#[inline]
pub fn has_vector_support() -> bool {
    #[cfg(target_arch = "x86_64")]
    {
        is_x86_feature_detected!("ssse3")
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        false
    }
}

#[cfg(not(target_arch = "x86_64"))]
mod sse {
    //! Stand-ins for non-x86_64 targets; never called since
    //! [`super::has_vector_support`] returns `false` there.
    use crate::config::{MaxBytes, OutputWidth};

    pub unsafe fn decode_window(
        _src: *const u8,
        _dst: *mut u8,
        _max_bytes: MaxBytes,
        _validate: bool,
        _output: OutputWidth,
    ) -> Option<(usize, usize)> {
        unreachable!("has_vector_support() must gate all calls into this module")
    }

    pub unsafe fn encode_window_utf16(
        _src: *const u8,
        _dst: *mut u8,
        _max_bytes: MaxBytes,
        _validate: bool,
    ) -> Option<(usize, usize)> {
        unreachable!("has_vector_support() must gate all calls into this module")
    }

    pub unsafe fn encode_window_utf32(
        _src: *const u8,
        _dst: *mut u8,
        _validate: bool,
    ) -> Option<(usize, usize)> {
        unreachable!("has_vector_support() must gate all calls into this module")
    }
}

#[cfg(not(target_arch = "x86_64"))]
pub use sse::{decode_window, encode_window_utf16, encode_window_utf32};
