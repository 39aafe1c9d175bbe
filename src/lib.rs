//! # flato
//!
//! A streaming DEFLATE (RFC 1951) compression engine.
//!
//! The core is the classic LZ77 sliding-window match search: a 32 KiB
//! active window backed by chained-hash tables, with three block-production
//! modes (stored, greedy, lazy) selected by compression levels 0-9 and a
//! strategy knob for match acceptance. Tokens are entropy-coded into
//! stored, fixed-Huffman, or dynamic-Huffman blocks, whichever is cheapest.
//!
//! ## Example
//!
//! ```rust
//! use flato::{compress, Deflater};
//!
//! // One-shot:
//! let compressed = compress(b"Hello, Hello, Hello.", 6).unwrap();
//! assert!(compressed.len() < 20);
//!
//! // Streaming:
//! let mut engine = Deflater::new(9).unwrap();
//! let mut output = Vec::new();
//! for chunk in b"streamed input".chunks(7) {
//!     engine.set_input(chunk, 0, chunk.len()).unwrap();
//!     while !engine.needs_input() {
//!         engine.deflate(false, false);
//!         engine.drain_output(&mut output);
//!     }
//! }
//! while engine.deflate(true, true) {
//!     engine.drain_output(&mut output);
//! }
//! engine.drain_output(&mut output);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod adler32;
pub mod bits;
pub mod engine;
pub mod error;
pub mod huffman;
pub mod zlib;

pub use engine::{Deflater, Strategy};
pub use error::{Error, Result};
pub use zlib::{compress, compress_zlib};
