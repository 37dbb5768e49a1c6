use crate::foundation::error::{BehindError, BehindResult};

pub use kurbo::{Point, Rect, Size};

/// Largest raster edge the compositor will allocate.
pub const MAX_SURFACE_DIM: u32 = 16_384;

/// Natural (decoded) pixel dimensions of a source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct NaturalSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl NaturalSize {
    /// Construct a natural size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height. Degenerate sizes report `1.0`.
    pub fn aspect(self) -> f64 {
        if self.width == 0 || self.height == 0 {
            return 1.0;
        }
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Pixel dimensions of one raster surface drawn by a single render call.
///
/// Targets are derived per render from a source image's natural size (see
/// [`crate::pick_target_size`]) and are never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RenderTarget {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl RenderTarget {
    /// Construct a target.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Reject targets the compositor cannot allocate.
    pub fn validate(self) -> BehindResult<Self> {
        if self.width == 0 || self.height == 0 {
            return Err(BehindError::validation(format!(
                "render target must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_SURFACE_DIM || self.height > MAX_SURFACE_DIM {
            return Err(BehindError::validation(format!(
                "render target too large: {}x{} (max {MAX_SURFACE_DIM}x{MAX_SURFACE_DIM})",
                self.width, self.height
            )));
        }
        Ok(self)
    }

    /// Width divided by height.
    pub fn aspect(self) -> f64 {
        NaturalSize::new(self.width, self.height).aspect()
    }

    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn byte_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
