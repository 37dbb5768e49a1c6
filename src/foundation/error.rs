/// Convenience result type used across behindtext.
pub type BehindResult<T> = Result<T, BehindError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Only image decoding is a hard failure of a render. Segmentation failures, missing fonts and
/// out-of-range style fields are absorbed and reported as [`crate::Diagnostic`] values instead.
#[derive(thiserror::Error, Debug)]
pub enum BehindError {
    /// A background or foreground image could not be decoded.
    #[error("image decode error: {0}")]
    ImageDecode(String),

    /// Invalid caller-provided arguments or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing project or config records.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Errors while encoding a rendered surface.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BehindError {
    /// Build a [`BehindError::ImageDecode`] value.
    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    /// Build a [`BehindError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BehindError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`BehindError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Whether this error aborted a render because an input image was unreadable.
    pub fn is_image_decode(&self) -> bool {
        matches!(self, Self::ImageDecode(_))
    }
}

/// A failure that was absorbed by a defined fallback.
///
/// Returned next to every render output so callers can surface substitutions without the render
/// itself failing.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Subject segmentation failed; the background was used as the foreground.
    SegmentationFailure { error: String },
    /// The requested font could not be used; `substituted` was drawn instead.
    FontUnavailable {
        requested: String,
        substituted: String,
    },
    /// A style field was out of range and was clamped or replaced.
    InvalidStyleSpec { field: String, detail: String },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SegmentationFailure { error } => {
                write!(f, "segmentation failed, using background as foreground: {error}")
            }
            Self::FontUnavailable {
                requested,
                substituted,
            } => write!(f, "font {requested:?} unavailable, drew {substituted:?}"),
            Self::InvalidStyleSpec { field, detail } => write!(f, "style field {field}: {detail}"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
