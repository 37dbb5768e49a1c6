use std::fmt;

use crate::style::color::FillColor;

/// Size substituted for a non-positive base font size, in design units. Positive sizes are
/// kept as given.
pub const MIN_BASE_FONT_SIZE: f64 = 1.0;

pub const DEFAULT_TEXT: &str = "Your Text Here";
pub const DEFAULT_FONT_NAME: &str = "Inter";
pub const DEFAULT_BASE_FONT_SIZE: f64 = 80.0;
pub const DEFAULT_COLOR: &str = "#FFFFFF";
pub const DEFAULT_FONT_WEIGHT: &str = "700";

/// Text anchor position as percentages of the canvas width and height.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextPosition {
    /// Horizontal position, `0..=100` percent of the canvas width.
    pub x: f64,
    /// Vertical position, `0..=100` percent of the canvas height.
    pub y: f64,
}

impl TextPosition {
    pub const CENTER: Self = Self { x: 50.0, y: 50.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for TextPosition {
    fn default() -> Self {
        Self::CENTER
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
        }
    }

    /// Lenient parse used at the persistence boundary; unknown values yield `None`.
    pub fn from_css(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "italic" | "oblique" => Some(Self::Italic),
            _ => None,
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
}

impl TextDecoration {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Underline => "underline",
        }
    }

    pub fn from_css(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "underline" => Some(Self::Underline),
            _ => None,
        }
    }
}

impl fmt::Display for TextDecoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete description of one text overlay.
///
/// A `StyleSpec` is pure value data: it is edited field by field by a session, stored through
/// [`crate::encode_overlay`], and restored with [`crate::decode_overlay`]. Sizes are expressed in
/// design units relative to a 1000 px reference edge, so the same spec renders proportionally
/// identical at preview and export resolutions.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleSpec {
    /// Text to draw. Empty text is valid and draws nothing.
    pub text: String,
    /// Logical font name, resolved through the [`crate::FontCatalog`] at render time.
    pub font_name: String,
    /// Nominal font size in design units.
    pub base_font_size: f64,
    /// Anchor position in percent of the canvas.
    pub position: TextPosition,
    /// Signed rotation about the anchor, in degrees. Any finite value is accepted.
    pub rotation_degrees: f64,
    /// CSS color (hex or `rgb()`/`rgba()`).
    pub color: String,
    /// Global text alpha in `[0, 1]`.
    pub opacity: f64,
    /// CSS weight string, forwarded to the rasterizer as-is.
    pub font_weight: String,
    pub font_style: FontStyle,
    pub text_decoration: TextDecoration,
}

impl Default for StyleSpec {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_owned(),
            font_name: DEFAULT_FONT_NAME.to_owned(),
            base_font_size: DEFAULT_BASE_FONT_SIZE,
            position: TextPosition::CENTER,
            rotation_degrees: 0.0,
            color: DEFAULT_COLOR.to_owned(),
            opacity: 1.0,
            font_weight: DEFAULT_FONT_WEIGHT.to_owned(),
            font_style: FontStyle::Normal,
            text_decoration: TextDecoration::None,
        }
    }
}

/// A field that was outside its documented range and got clamped or replaced.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StyleAdjustment {
    pub field: &'static str,
    pub detail: String,
}

impl StyleAdjustment {
    fn new(field: &'static str, detail: impl Into<String>) -> Self {
        Self {
            field,
            detail: detail.into(),
        }
    }
}

impl StyleSpec {
    /// Builder-style text setter.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder-style font setter.
    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }

    /// Return a copy with every field inside its documented range, plus the list of fields
    /// that had to be changed.
    ///
    /// Nothing is rejected: non-finite numbers fall back to defaults, out-of-range numbers are
    /// clamped, and unparseable colors become the default white.
    pub fn sanitized(&self) -> (StyleSpec, Vec<StyleAdjustment>) {
        let mut out = self.clone();
        let mut adjustments = Vec::new();

        if !out.base_font_size.is_finite() {
            adjustments.push(StyleAdjustment::new(
                "baseFontSize",
                format!("{} is not finite, using {DEFAULT_BASE_FONT_SIZE}", self.base_font_size),
            ));
            out.base_font_size = DEFAULT_BASE_FONT_SIZE;
        } else if out.base_font_size <= 0.0 {
            out.base_font_size = MIN_BASE_FONT_SIZE;
            adjustments.push(StyleAdjustment::new(
                "baseFontSize",
                format!("{} is not positive, using {MIN_BASE_FONT_SIZE}", self.base_font_size),
            ));
        }

        out.position.x = clamp_percent(self.position.x, "position.x", &mut adjustments);
        out.position.y = clamp_percent(self.position.y, "position.y", &mut adjustments);

        if !out.rotation_degrees.is_finite() {
            adjustments.push(StyleAdjustment::new(
                "rotation",
                format!("{} is not finite, using 0", self.rotation_degrees),
            ));
            out.rotation_degrees = 0.0;
        }

        if !out.opacity.is_finite() {
            adjustments.push(StyleAdjustment::new(
                "opacity",
                format!("{} is not finite, using 1", self.opacity),
            ));
            out.opacity = 1.0;
        } else if !(0.0..=1.0).contains(&out.opacity) {
            out.opacity = out.opacity.clamp(0.0, 1.0);
            adjustments.push(StyleAdjustment::new(
                "opacity",
                format!("{} clamped to {}", self.opacity, out.opacity),
            ));
        }

        if let Err(e) = FillColor::parse(&out.color) {
            adjustments.push(StyleAdjustment::new(
                "color",
                format!("{e}, using {DEFAULT_COLOR}"),
            ));
            out.color = DEFAULT_COLOR.to_owned();
        }

        (out, adjustments)
    }

    /// Parsed fill color, falling back to white when `color` is invalid.
    pub fn fill_color(&self) -> FillColor {
        FillColor::parse(&self.color).unwrap_or(FillColor::WHITE)
    }

    /// Numeric weight for font matching. Keywords map to their CSS values; anything else is 400.
    pub fn numeric_weight(&self) -> u16 {
        parse_font_weight(&self.font_weight)
    }
}

fn clamp_percent(v: f64, field: &'static str, adjustments: &mut Vec<StyleAdjustment>) -> f64 {
    if !v.is_finite() {
        adjustments.push(StyleAdjustment::new(
            field,
            format!("{v} is not finite, using 50"),
        ));
        return 50.0;
    }
    if !(0.0..=100.0).contains(&v) {
        let c = v.clamp(0.0, 100.0);
        adjustments.push(StyleAdjustment::new(field, format!("{v} clamped to {c}")));
        return c;
    }
    v
}

pub(crate) fn parse_font_weight(s: &str) -> u16 {
    let s = s.trim();
    match s.to_ascii_lowercase().as_str() {
        "normal" => return 400,
        "bold" => return 700,
        "lighter" => return 300,
        "bolder" => return 800,
        _ => {}
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => v.round().clamp(1.0, 1000.0) as u16,
        _ => 400,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/spec.rs"]
mod tests;
