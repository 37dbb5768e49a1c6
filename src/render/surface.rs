use std::borrow::Cow;

use crate::assets::decode::DecodedImage;
use crate::foundation::core::RenderTarget;
use crate::foundation::error::{BehindError, BehindResult};
use crate::foundation::math::unpremul_u8;
use crate::render::composite::over_in_place;

/// Premultiplied RGBA8 raster that renders are drawn into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterSurface {
    /// A fully transparent surface of `target` size.
    pub fn new(target: RenderTarget) -> BehindResult<Self> {
        let target = target.validate()?;
        Ok(Self {
            width: target.width,
            height: target.height,
            data: vec![0u8; target.byte_len()],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn target(&self) -> RenderTarget {
        RenderTarget::new(self.width, self.height)
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Overwrite this surface with `other` when both have the same size. Returns whether the
    /// copy happened.
    pub fn copy_from(&mut self, other: &RasterSurface) -> bool {
        if self.width != other.width || self.height != other.height {
            return false;
        }
        self.data.copy_from_slice(&other.data);
        true
    }

    /// Draw `image` stretched to exactly cover the surface.
    pub fn draw_image(&mut self, image: &DecodedImage) -> BehindResult<()> {
        let scaled = scale_to(image, self.target())?;
        over_in_place(&mut self.data, &scaled, 1.0)
    }

    /// Draw a same-sized premultiplied layer with a global opacity.
    pub fn draw_layer(&mut self, layer: &[u8], opacity: f32) -> BehindResult<()> {
        over_in_place(&mut self.data, layer, opacity)
    }

    /// Straight-alpha copy for encoders.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = px[3];
            for c in &mut px[..3] {
                *c = unpremul_u8(*c, a);
            }
        }
        image::RgbaImage::from_raw(self.width, self.height, out)
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }
}

/// Resample a premultiplied image to exactly `target`, ignoring aspect ratio.
pub(crate) fn scale_to(image: &DecodedImage, target: RenderTarget) -> BehindResult<Cow<'_, [u8]>> {
    if image.width == target.width && image.height == target.height {
        return Ok(Cow::Borrowed(image.rgba8_premul.as_slice()));
    }
    let view = image::ImageBuffer::<image::Rgba<u8>, &[u8]>::from_raw(
        image.width,
        image.height,
        image.rgba8_premul.as_slice(),
    )
    .ok_or_else(|| BehindError::validation("decoded image buffer does not match its size"))?;
    let scaled = image::imageops::resize(
        &view,
        target.width,
        target.height,
        image::imageops::FilterType::Triangle,
    );
    Ok(Cow::Owned(scaled.into_raw()))
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
