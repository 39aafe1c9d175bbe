//! Error types for the flato library.

use thiserror::Error;

/// Result type alias for flato operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the compression engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested input region lies outside the supplied buffer.
    #[error("input region {offset}+{count} out of bounds for buffer of {buffer_len} bytes")]
    RegionOutOfBounds {
        /// Offset of the region within the buffer.
        offset: usize,
        /// Length of the region.
        count: usize,
        /// Actual buffer length.
        buffer_len: usize,
    },
    /// Compression level outside the supported 0-9 range.
    #[error("invalid compression level {0}: must be 0-9")]
    InvalidLevel(u32),
    /// `set_input` was called while previously attached input is still
    /// unconsumed.
    #[error("previous input not fully consumed")]
    InputPending,
}
