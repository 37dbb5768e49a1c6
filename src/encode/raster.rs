use std::io::Cursor;

use crate::foundation::error::{BehindError, BehindResult};
use crate::render::surface::RasterSurface;

/// Default JPEG quality in `[0, 1]`.
pub const DEFAULT_JPEG_QUALITY: f64 = 0.92;

/// Output file format of an export.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum ExportFormat {
    /// Lossless, keeps alpha.
    #[default]
    Png,
    /// Lossy; `quality` in `[0, 1]`. Transparent areas are flattened onto black.
    Jpeg { quality: f64 },
}

impl ExportFormat {
    pub fn jpeg() -> Self {
        Self::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg { .. } => "jpg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg { .. } => "image/jpeg",
        }
    }
}

/// Map a `[0, 1]` quality onto the encoder's `1..=100` scale. Non-finite input uses the default.
pub(crate) fn jpeg_quality_percent(quality: f64) -> u8 {
    let q = if quality.is_finite() {
        quality.clamp(0.0, 1.0)
    } else {
        DEFAULT_JPEG_QUALITY
    };
    ((q * 100.0).round() as u8).clamp(1, 100)
}

/// Encode a rendered surface.
pub fn encode_surface(surface: &RasterSurface, format: ExportFormat) -> BehindResult<Vec<u8>> {
    let mut buf = Vec::new();
    match format {
        ExportFormat::Png => {
            image::DynamicImage::ImageRgba8(surface.to_rgba_image())
                .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
                .map_err(|e| BehindError::encode(format!("write png: {e}")))?;
        }
        ExportFormat::Jpeg { quality } => {
            // Premultiplied color over black is exactly the flattened result.
            let rgb: Vec<u8> = surface
                .data()
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            let rgb = image::RgbImage::from_raw(surface.width(), surface.height(), rgb)
                .ok_or_else(|| BehindError::encode("surface buffer does not match its size"))?;
            image::codecs::jpeg::JpegEncoder::new_with_quality(
                &mut buf,
                jpeg_quality_percent(quality),
            )
            .encode_image(&rgb)
            .map_err(|e| BehindError::encode(format!("write jpeg: {e}")))?;
        }
    }
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/raster.rs"]
mod tests;
