//! # utf8lut
//!
//! Vectorised UTF-8 to UTF-16LE/UTF-32LE transcoding using table-driven
//! 128-bit SIMD algorithms, ported from the `utf8lut` C++ project.
//!
//! The fast path decodes/encodes 16 bytes of UTF-8 (or 8/4 fixed-width code
//! units) per SIMD step using two precomputed lookup tables — one per
//! direction — indexed by a bitmask of each symbol's byte length. Any
//! window the vector step can't handle (a byte length outside the
//! configured [`config::MaxBytes`], or, in [`config::Mode::Validate`], a
//! malformed sequence) falls back to the scalar codec in [`scalar`].
//!
//! ## Module organization
//!
//! - [`config`] — runtime configuration (`MaxBytes`, `Mode`, `Streams`,
//!   `Direction`, `ProcessorConfig`) standing in for the original's
//!   per-instantiation C++ templates.
//! - [`error`] / [`result`] — the internal error type and the wire-stable
//!   `Status`/`ConvertResult` pair.
//! - [`scalar`] — the trivial (non-vectorised) codec: used for fallback
//!   windows, tails, and as the ground truth the vector step must agree
//!   with.
//! - [`lut`] — the decoder and encoder lookup tables, built once behind
//!   `OnceLock`.
//! - [`simd`] — the x86_64 SSSE3 vector decode/encode steps.
//! - [`block`] — [`block::BlockProcessor`]: dispatches vector vs. scalar per
//!   16-byte window, handles the 4-stream split for decode.
//! - [`stream`] — [`stream::Converter`]: chunks a whole in-memory buffer
//!   through a `BlockProcessor`.
//! - [`helpers`] — push-based incremental conversion for callers that don't
//!   have the whole source up front.
//! - [`memory`] — the in-memory API (`convert_in_memory`/
//!   `convert_in_memory_size`).
//! - [`file`] — file-to-file conversion, buffered or memory-mapped.
//! - [`iconv`] — an iconv-compatible C ABI facade.
//!
//! ## Quick start
//!
//! ```
//! use utf8lut::config::ProcessorConfig;
//! use utf8lut::stream::Converter;
//!
//! let converter = Converter::new(ProcessorConfig::new());
//! let utf16 = converter.decode_all("héllo".as_bytes()).unwrap();
//! let roundtrip = converter.encode_all(&utf16).unwrap();
//! assert_eq!(roundtrip, "héllo".as_bytes());
//! ```

pub mod block;
pub mod config;
pub mod error;
pub mod helpers;
pub mod lut;
pub mod memory;
pub mod result;
pub mod scalar;
pub mod simd;
pub mod stream;

#[cfg(feature = "std")]
pub mod file;

#[cfg(feature = "std")]
pub mod iconv;

pub use block::BlockProcessor;
pub use config::{Direction, Encoding, MaxBytes, Mode, OutputWidth, ProcessorConfig, Streams};
pub use error::{ConvertError, ConvertErrorKind};
pub use memory::{convert_in_memory, convert_in_memory_size};
pub use result::{ConvertResult, Status};
pub use stream::Converter;
