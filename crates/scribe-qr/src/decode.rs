//! QR raster to text.

use image::GrayImage;
use std::path::Path;

use crate::{QrError, QrResult};

/// Returns the payload of the first readable QR symbol in `image`.
///
/// `None` when no symbol is found, none decodes, or the payload is empty.
pub fn decode_image(image: &GrayImage) -> Option<String> {
    let (width, height) = image.dimensions();
    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
            image.get_pixel(x as u32, y as u32).0[0]
        });

    let grids = prepared.detect_grids();
    tracing::debug!("Found {} QR candidate(s) in {}x{} image", grids.len(), width, height);

    for grid in grids {
        match grid.decode() {
            Ok((_, content)) if !content.is_empty() => return Some(content),
            Ok(_) => {}
            Err(err) => tracing::debug!("Skipping unreadable QR candidate: {}", err),
        }
    }

    None
}

/// Loads an image file (PNG or JPEG) and decodes the first QR symbol in it.
///
/// An unreadable or undecodable file is an error; a readable image without
/// a QR code is `Ok(None)`.
pub fn decode_file(path: impl AsRef<Path>) -> QrResult<Option<String>> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| QrError::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(decode_image(&image.to_luma8()))
}
