//! Text to QR raster.

use image::{GrayImage, ImageFormat, Luma};
use qrcodegen::{QrCode, QrCodeEcc, QrSegment, Version};
use std::path::Path;

use crate::{QrError, QrResult};

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// QR error-correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCorrection {
    /// ~7% recovery, most capacity
    Low,
    /// ~15% recovery
    Medium,
    /// ~25% recovery
    Quartile,
    /// ~30% recovery
    High,
}

impl From<ErrorCorrection> for QrCodeEcc {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => QrCodeEcc::Low,
            ErrorCorrection::Medium => QrCodeEcc::Medium,
            ErrorCorrection::Quartile => QrCodeEcc::Quartile,
            ErrorCorrection::High => QrCodeEcc::High,
        }
    }
}

/// Symbol and rendering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrSettings {
    /// Symbol version (1..=40). Encoding never picks a larger one.
    pub version: u8,
    /// Error-correction level; never boosted.
    pub error_correction: ErrorCorrection,
    /// Pixels per module edge
    pub module_size: u32,
    /// Quiet zone width in modules
    pub border: u32,
}

impl QrSettings {
    /// Parameters used by the editor's "Generate QR Code".
    pub const STANDARD: QrSettings = QrSettings {
        version: 1,
        error_correction: ErrorCorrection::Low,
        module_size: 10,
        border: 4,
    };
}

impl Default for QrSettings {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A rendered QR symbol: black modules on white, quiet zone included.
#[derive(Debug, Clone)]
pub struct QrRaster {
    image: GrayImage,
    modules: u32,
}

impl QrRaster {
    fn render(code: &QrCode, settings: &QrSettings) -> Self {
        let modules = code.size() as u32;
        let side = (modules + 2 * settings.border) * settings.module_size;
        let mut image = GrayImage::from_pixel(side, side, LIGHT);

        for y in 0..code.size() {
            for x in 0..code.size() {
                if !code.get_module(x, y) {
                    continue;
                }
                let left = (x as u32 + settings.border) * settings.module_size;
                let top = (y as u32 + settings.border) * settings.module_size;
                for py in top..top + settings.module_size {
                    for px in left..left + settings.module_size {
                        image.put_pixel(px, py, DARK);
                    }
                }
            }
        }

        Self { image, modules }
    }

    /// Modules per side, quiet zone excluded.
    pub fn modules(&self) -> u32 {
        self.modules
    }

    /// Pixels per side.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// The raster as a grayscale image.
    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    /// Writes the raster as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> QrResult<()> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    /// Encodes the raster as PNG bytes.
    pub fn to_png_bytes(&self) -> QrResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

/// Encodes `text` into a QR raster.
///
/// The segment mode (numeric, alphanumeric, byte) is picked from the text.
/// Fails with [`QrError::PayloadTooLarge`] when the text exceeds what the
/// configured version holds at the configured error-correction level.
pub fn encode(text: &str, settings: &QrSettings) -> QrResult<QrRaster> {
    if !(1..=40).contains(&settings.version) {
        return Err(QrError::InvalidVersion(settings.version));
    }

    let segments = QrSegment::make_segments(text);
    let version = Version::new(settings.version);
    let code = QrCode::encode_segments_advanced(
        &segments,
        settings.error_correction.into(),
        version,
        version,
        None,
        false,
    )
    .map_err(|source| QrError::PayloadTooLarge {
        version: settings.version,
        len: text.len(),
        source,
    })?;

    tracing::debug!(
        "Encoded {} bytes into a {}x{} QR symbol",
        text.len(),
        code.size(),
        code.size()
    );

    Ok(QrRaster::render(&code, settings))
}
