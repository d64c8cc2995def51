//! Precomputed lookup tables driving the vector decode/encode steps.
//!
//! Both tables are pure data (shuffle-index bytes, byte strides, header
//! masks) rather than platform SIMD types, so they build identically on
//! every target; only the vector step in [`crate::simd`] loads them into
//! registers. Each is built once, lazily, behind a [`std::sync::OnceLock`]
//! (spec §5: "guard with a once-initialisation primitive"), matching the
//! C++ original's `CreateInstance` lazy singleton
//! (`original_source/Core/DecoderLut.cpp`) without the raw `_mm_malloc`.

pub mod decoder;
pub mod encoder;

pub use decoder::{decoder_lut, DecoderLutEntry};
pub use encoder::{encoder_lut_2, encoder_lut_3, EncoderLutEntry};
