//! # qoif
//!
//! A 100% Rust encoder for the QOI ("Quite OK Image") format.
//!
//! ## Features
//!
//! - **Encoder**: bit-exact QOI chunk selection (RUN, INDEX, DIFF, LUMA, RGB, RGBA)
//! - **Pixel sources**: encode from a raw RGB/RGBA buffer or any type implementing [`PixelSource`]
//!
//! ## Quick Start
//!
//! ```ignore
//! use qoif::{qoi_encode_default, RawImage};
//!
//! // RGBA image data (4 bytes per pixel)
//! let rgba = vec![255u8, 0, 0, 255, 0, 255, 0, 255]; // red and green pixel
//! let image = RawImage::rgba(&rgba, 2, 1)?;
//! let qoi = qoi_encode_default(&image)?;
//! assert_eq!(&qoi[..4], b"qoif");
//! ```
//!
//! The output carries no end-of-stream marker unless
//! [`EncodeOptions::end_marker`] is set.

use thiserror::Error;

pub mod encoder;
pub mod pixel;
pub mod source;

pub use encoder::{
    encoded_size_limit, qoi_encode, qoi_encode_default, ChunkStats, EncodeOptions, Encoder, Header,
};
pub use pixel::{Pixel, PixelDiff};
pub use source::{PixelSource, RawImage};

/// Errors that can occur while preparing or encoding a QOI image.
#[derive(Debug, Error)]
pub enum QoiError {
    /// The pixel source could not be read
    #[error("pixel source unavailable: {0}")]
    SourceUnavailable(String),

    /// Channel count other than 3 (RGB) or 4 (RGBA)
    #[error("unsupported channel count: {0} (expected 3 or 4)")]
    UnsupportedChannelCount(u8),

    /// Width or height does not fit the 32-bit header field
    #[error("dimensions {width}x{height} exceed the 32-bit header limit")]
    DimensionOverflow { width: usize, height: usize },

    /// Buffer size doesn't match expected size for dimensions
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Writing the encoded image failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for QOI operations.
pub type Result<T> = core::result::Result<T, QoiError>;

pub(crate) const QOI_MAGIC: [u8; 4] = *b"qoif";
pub(crate) const QOI_HEADER_SIZE: usize = 14;
pub(crate) const QOI_END_MARKER: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];
