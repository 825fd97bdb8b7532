//! # Scribe QR
//!
//! Turns document text into a QR raster and back.
//!
//! - [`encode`] renders text into a grayscale [`QrRaster`] with fixed symbol
//!   parameters ([`QrSettings::STANDARD`]: version 1, error correction L,
//!   10 px modules, 4 module quiet zone)
//! - [`decode_image`] / [`decode_file`] find the first readable QR symbol in
//!   a raster and return its payload
//!
//! Version 1 is a hard cap: text that does not fit is an error, never
//! silently truncated or promoted to a larger symbol.

mod decode;
mod encode;

pub use decode::{decode_file, decode_image};
pub use encode::{ErrorCorrection, QrRaster, QrSettings, encode};

use std::path::PathBuf;

/// Result type for QR operations
pub type QrResult<T> = Result<T, QrError>;

/// Errors that can occur while rendering or scanning QR codes
#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("QR version {0} is outside 1..=40")]
    InvalidVersion(u8),

    #[error("{len} bytes of text do not fit in a version {version} QR code: {source}")]
    PayloadTooLarge {
        version: u8,
        len: usize,
        source: qrcodegen::DataTooLong,
    },

    #[error("Failed to read image {}: {source}", path.display())]
    ImageRead {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write image: {0}")]
    ImageWrite(#[from] image::ImageError),
}
