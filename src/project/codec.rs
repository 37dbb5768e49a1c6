use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{BehindError, BehindResult};
use crate::style::spec::{
    DEFAULT_BASE_FONT_SIZE, DEFAULT_COLOR, DEFAULT_FONT_NAME, DEFAULT_FONT_WEIGHT, DEFAULT_TEXT,
    FontStyle, StyleSpec, TextDecoration, TextPosition,
};

/// Stored anchor position. Either coordinate may be missing in older records.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayPosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

/// Flat overlay record exchanged with the persistence layer.
///
/// Every field is optional on the way in; unknown fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOverlayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<OverlayPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
}

impl ProjectOverlayConfig {
    pub fn from_json_str(s: &str) -> BehindResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| BehindError::serde(format!("parse overlay config JSON: {e}")))
    }

    pub fn to_json_string(&self) -> BehindResult<String> {
        serde_json::to_string(self)
            .map_err(|e| BehindError::serde(format!("write overlay config JSON: {e}")))
    }
}

/// Flatten a style into a storable record. Every field is written.
pub fn encode_overlay(spec: &StyleSpec) -> ProjectOverlayConfig {
    ProjectOverlayConfig {
        text: Some(spec.text.clone()),
        font_size: Some(spec.base_font_size),
        font_family: Some(spec.font_name.clone()),
        color: Some(spec.color.clone()),
        position: Some(OverlayPosition {
            x: Some(spec.position.x),
            y: Some(spec.position.y),
        }),
        rotation: Some(spec.rotation_degrees),
        opacity: Some(spec.opacity),
        font_weight: Some(spec.font_weight.clone()),
        font_style: Some(spec.font_style.as_str().to_owned()),
        text_decoration: Some(spec.text_decoration.as_str().to_owned()),
    }
}

/// Rebuild a style from a stored record, substituting defaults for anything missing or
/// unrecognized.
pub fn decode_overlay(config: &ProjectOverlayConfig) -> StyleSpec {
    let position = config.position.unwrap_or_default();
    StyleSpec {
        text: config
            .text
            .clone()
            .unwrap_or_else(|| DEFAULT_TEXT.to_owned()),
        font_name: config
            .font_family
            .clone()
            .unwrap_or_else(|| DEFAULT_FONT_NAME.to_owned()),
        base_font_size: config.font_size.unwrap_or(DEFAULT_BASE_FONT_SIZE),
        position: TextPosition::new(
            position.x.unwrap_or(TextPosition::CENTER.x),
            position.y.unwrap_or(TextPosition::CENTER.y),
        ),
        rotation_degrees: config.rotation.unwrap_or(0.0),
        color: config
            .color
            .clone()
            .unwrap_or_else(|| DEFAULT_COLOR.to_owned()),
        opacity: config.opacity.unwrap_or(1.0),
        font_weight: config
            .font_weight
            .clone()
            .unwrap_or_else(|| DEFAULT_FONT_WEIGHT.to_owned()),
        font_style: config
            .font_style
            .as_deref()
            .and_then(FontStyle::from_css)
            .unwrap_or_default(),
        text_decoration: config
            .text_decoration
            .as_deref()
            .and_then(TextDecoration::from_css)
            .unwrap_or_default(),
    }
}

/// A persisted project: the overlay plus a reference to its background asset.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProject {
    #[serde(default)]
    pub overlay: ProjectOverlayConfig,
    /// Storage key or URL of the background image.
    #[serde(default)]
    pub background: String,
    /// Storage key or URL of a previously computed cutout, if one was kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
}

impl StoredProject {
    pub fn new(spec: &StyleSpec, background: impl Into<String>) -> Self {
        Self {
            overlay: encode_overlay(spec),
            background: background.into(),
            foreground: None,
        }
    }

    pub fn style(&self) -> StyleSpec {
        decode_overlay(&self.overlay)
    }

    /// Parse a stored project from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> BehindResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| BehindError::serde(format!("parse project JSON: {e}")))
    }

    /// Parse a stored project from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BehindResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BehindError::validation(format!("open project JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> BehindResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BehindError::serde(format!("write project JSON: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/codec.rs"]
mod tests;
