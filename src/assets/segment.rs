use crate::assets::decode::{DecodedImage, decode_image};
use crate::foundation::core::NaturalSize;
use crate::foundation::error::{BehindResult, Diagnostic};

/// Error returned by a [`Segmenter`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SegmentationError {
    message: String,
}

impl SegmentationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Subject segmentation capability: encoded image in, encoded alpha-matted cutout out.
///
/// The cutout is expected to match the input's dimensions and be transparent outside the
/// subject. The model behind it is opaque to this crate.
pub trait Segmenter {
    fn segment(&self, image: &[u8]) -> Result<Vec<u8>, SegmentationError>;
}

impl<F> Segmenter for F
where
    F: Fn(&[u8]) -> Result<Vec<u8>, SegmentationError>,
{
    fn segment(&self, image: &[u8]) -> Result<Vec<u8>, SegmentationError> {
        self(image)
    }
}

/// A cutout produced ahead of time (e.g. fetched from storage).
#[derive(Clone, Debug)]
pub struct PrecomputedCutout(pub Vec<u8>);

impl Segmenter for PrecomputedCutout {
    fn segment(&self, _image: &[u8]) -> Result<Vec<u8>, SegmentationError> {
        Ok(self.0.clone())
    }
}

/// Segmenter used when no capability is configured. Always fails, so the background doubles
/// as the foreground.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSegmenter;

impl Segmenter for NoSegmenter {
    fn segment(&self, _image: &[u8]) -> Result<Vec<u8>, SegmentationError> {
        Err(SegmentationError::new("no segmentation capability configured"))
    }
}

/// A decoded background and its foreground cutout, ready to composite.
#[derive(Clone, Debug)]
pub struct SourceAssets {
    pub background: DecodedImage,
    pub foreground: DecodedImage,
    /// Absorbed failures hit while preparing the pair.
    pub diagnostics: Vec<Diagnostic>,
}

impl SourceAssets {
    pub fn new(background: DecodedImage, foreground: DecodedImage) -> Self {
        if background.natural_size() != foreground.natural_size() {
            tracing::debug!(
                background = ?background.natural_size(),
                foreground = ?foreground.natural_size(),
                "foreground size differs from background; both are stretched to the target"
            );
        }
        Self {
            background,
            foreground,
            diagnostics: Vec::new(),
        }
    }

    /// Use the background as its own foreground, recording why.
    pub fn background_only(background: DecodedImage, error: &SegmentationError) -> Self {
        tracing::warn!(error = %error, "segmentation failed, using background as foreground");
        Self {
            foreground: background.clone(),
            background,
            diagnostics: vec![Diagnostic::SegmentationFailure {
                error: error.to_string(),
            }],
        }
    }

    /// Decode both images. Either failing to decode is a hard error.
    pub fn from_encoded(background: &[u8], foreground: &[u8]) -> BehindResult<Self> {
        let background = decode_image(background)?;
        let foreground = decode_image(foreground)?;
        Ok(Self::new(background, foreground))
    }

    /// Decode the background and obtain its cutout from `segmenter`.
    ///
    /// A background that cannot be decoded is a hard error. A failing segmenter, or a cutout
    /// that cannot be decoded, falls back to the background as foreground.
    #[tracing::instrument(skip(background, segmenter), fields(bytes = background.len()))]
    pub fn prepare(background: &[u8], segmenter: &dyn Segmenter) -> BehindResult<Self> {
        let decoded = decode_image(background)?;

        let cutout = match segmenter.segment(background) {
            Ok(bytes) => bytes,
            Err(e) => return Ok(Self::background_only(decoded, &e)),
        };
        match decode_image(&cutout) {
            Ok(foreground) => Ok(Self::new(decoded, foreground)),
            Err(e) => Ok(Self::background_only(
                decoded,
                &SegmentationError::new(format!("segmentation output unreadable: {e}")),
            )),
        }
    }

    pub fn natural_size(&self) -> NaturalSize {
        self.background.natural_size()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/segment.rs"]
mod tests;
