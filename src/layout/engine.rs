use crate::foundation::core::{Point, Rect, RenderTarget};
use crate::foundation::error::Diagnostic;
use crate::foundation::math::degrees_to_radians;
use crate::fonts::catalog::FontChain;
use crate::fonts::resolver::{FontResolver, ResolutionSource};
use crate::layout::measure::{FontRequest, TextMeasurer};
use crate::style::spec::StyleSpec;

/// Canvas edge (in pixels) at which one design unit equals one pixel.
pub const REFERENCE_EDGE_PX: f64 = 1000.0;
/// Lower bound of the resolution scale factor.
pub const MIN_SCALE: f64 = 0.3;
/// Fraction of the canvas width text may occupy before it is shrunk.
pub const FIT_FRACTION: f64 = 0.9;
/// Average glyph advance, in em, used when text cannot be measured at all.
pub const AVERAGE_ADVANCE_EM: f64 = 0.55;

/// Why the drawn font differs from the catalog's choice for the requested name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionReason {
    /// The logical name has no catalog entry.
    UnknownName,
    /// Loading the preferred face was known to have failed before layout.
    LoadFailed,
    /// The preferred face was not usable when checked at render time.
    Unverified,
    /// Text could not be measured with the preferred chain.
    MeasureFailed,
}

/// A font substitution made while laying out one render.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FontSubstitution {
    /// Logical font name from the style.
    pub requested: String,
    /// Chain actually used.
    pub substituted: FontChain,
    pub reason: SubstitutionReason,
}

impl FontSubstitution {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::FontUnavailable {
            requested: self.requested.clone(),
            substituted: self.substituted.to_css(),
        }
    }
}

/// Pixel-space placement of a text overlay for one render target.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ComputedLayout {
    /// Final font size after scaling and auto-fit.
    pub font_size_px: f64,
    /// Text center in pixels.
    pub anchor_px: Point,
    /// Axis-aligned box centered on the anchor, `(measured width, font size)` in size.
    /// Never rotated, even when the text is.
    pub bounds_px: Rect,
    /// Rendered width at `font_size_px`.
    pub measured_width: f64,
    /// Whether `measured_width` is an estimate rather than a shaped measurement.
    pub width_estimated: bool,
    /// Rotation about the anchor in radians, normalized into `[0, 2π)`.
    pub rotation_rad: f64,
    /// Family chain the text is drawn with.
    pub font_chain: FontChain,
    pub substitution: Option<FontSubstitution>,
}

/// Resolution scale factor for a target: the longer edge over the reference edge, floored.
pub fn scale_factor(target: RenderTarget) -> f64 {
    let longest = f64::from(target.width.max(target.height));
    (longest / REFERENCE_EDGE_PX).max(MIN_SCALE)
}

/// Computes [`ComputedLayout`]s. Pure given its resolver and measurer.
pub struct LayoutEngine<'a> {
    resolver: &'a FontResolver,
    measurer: &'a dyn TextMeasurer,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(resolver: &'a FontResolver, measurer: &'a dyn TextMeasurer) -> Self {
        Self { resolver, measurer }
    }

    /// Lay out `spec` on `target`.
    ///
    /// Out-of-range style fields are clamped first. Font problems never fail layout: the chain
    /// degrades to the resolver's safe fallback, and when nothing can be measured the width is
    /// estimated from the character count.
    pub fn compute_layout(&self, spec: &StyleSpec, target: RenderTarget) -> ComputedLayout {
        let (spec, _) = spec.sanitized();
        let resolved = self.resolver.resolve(&spec.font_name);
        let safe = self.resolver.safe_fallback();

        let mut chain = resolved.chain;
        let mut substitution = match resolved.source {
            ResolutionSource::Catalog => None,
            ResolutionSource::UnknownName => Some(SubstitutionReason::UnknownName),
            ResolutionSource::LoadFailed => Some(SubstitutionReason::LoadFailed),
        };

        let mut font_size_px = spec.base_font_size * scale_factor(target);

        if !spec.text.is_empty() && &chain != safe {
            let request = FontRequest {
                chain: &chain,
                size_px: font_size_px,
                weight: &spec.font_weight,
                style: spec.font_style,
            };
            if !self.measurer.verify(&request) {
                tracing::warn!(
                    requested = %spec.font_name,
                    fallback = %safe,
                    "font not usable, substituting safe fallback"
                );
                chain = safe.clone();
                substitution = Some(SubstitutionReason::Unverified);
            }
        }

        let (mut width, mut estimated) = if spec.text.is_empty() {
            (0.0, false)
        } else {
            match self.measure(&spec, &chain, font_size_px) {
                Some(w) => (w, false),
                None if &chain != safe => {
                    tracing::warn!(
                        requested = %spec.font_name,
                        fallback = %safe,
                        "text measurement failed, retrying with safe fallback"
                    );
                    chain = safe.clone();
                    substitution = Some(SubstitutionReason::MeasureFailed);
                    match self.measure(&spec, &chain, font_size_px) {
                        Some(w) => (w, false),
                        None => (estimate_width(&spec.text, font_size_px), true),
                    }
                }
                None => (estimate_width(&spec.text, font_size_px), true),
            }
        };

        let max_width = f64::from(target.width) * FIT_FRACTION;
        if width > max_width && width > 0.0 {
            let shrink = max_width / width;
            let before = font_size_px;
            font_size_px *= shrink;
            match (estimated, self.measure(&spec, &chain, font_size_px)) {
                (false, Some(w)) => width = w,
                _ => {
                    width *= shrink;
                    estimated = true;
                }
            }
            tracing::debug!(before, after = font_size_px, width, "auto-fit shrink");
        }

        let anchor_px = Point::new(
            f64::from(target.width) * spec.position.x / 100.0,
            f64::from(target.height) * spec.position.y / 100.0,
        );
        let bounds_px = Rect::from_center_size(anchor_px, (width, font_size_px));

        ComputedLayout {
            font_size_px,
            anchor_px,
            bounds_px,
            measured_width: width,
            width_estimated: estimated,
            rotation_rad: degrees_to_radians(spec.rotation_degrees),
            substitution: substitution.map(|reason| FontSubstitution {
                requested: spec.font_name.clone(),
                substituted: chain.clone(),
                reason,
            }),
            font_chain: chain,
        }
    }

    fn measure(&self, spec: &StyleSpec, chain: &FontChain, size_px: f64) -> Option<f64> {
        let request = FontRequest {
            chain,
            size_px,
            weight: &spec.font_weight,
            style: spec.font_style,
        };
        self.measurer
            .measure(&spec.text, &request)
            .filter(|w| w.is_finite() && *w >= 0.0)
    }
}

fn estimate_width(text: &str, size_px: f64) -> f64 {
    text.chars().count() as f64 * size_px * AVERAGE_ADVANCE_EM
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
