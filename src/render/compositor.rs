use std::sync::Arc;

use crate::assets::decode::{DecodedImage, decode_image};
use crate::assets::segment::SourceAssets;
use crate::foundation::core::RenderTarget;
use crate::foundation::error::{BehindResult, Diagnostic};
use crate::fonts::inventory::FontInventory;
use crate::fonts::resolver::FontResolver;
use crate::layout::engine::{ComputedLayout, LayoutEngine};
use crate::layout::measure::{SvgTextMeasurer, TextMeasurer};
use crate::render::surface::RasterSurface;
use crate::render::text_svg::{TextPaint, TextRun, draw_document, parse_tree, rasterize_premul_rgba8};
use crate::style::spec::StyleSpec;

/// Result of one render: the surface, the layout it was drawn with, and absorbed failures.
#[derive(Clone, Debug)]
pub struct RenderOutput {
    pub surface: RasterSurface,
    pub layout: ComputedLayout,
    pub diagnostics: Vec<Diagnostic>,
}

/// Three-pass text-behind-subject renderer: background, then text, then foreground.
#[derive(Clone)]
pub struct Compositor {
    resolver: FontResolver,
    inventory: FontInventory,
    measurer: Arc<dyn TextMeasurer>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("resolver", &self.resolver)
            .field("inventory", &self.inventory)
            .finish_non_exhaustive()
    }
}

impl Compositor {
    /// Compositor measuring and drawing text with `inventory`.
    pub fn new(resolver: FontResolver, inventory: FontInventory) -> Self {
        let measurer = Arc::new(SvgTextMeasurer::new(&inventory));
        Self {
            resolver,
            inventory,
            measurer,
        }
    }

    /// Replace the text measurer used for layout. Drawing still goes through the inventory.
    pub fn with_measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    pub fn resolver(&self) -> &FontResolver {
        &self.resolver
    }

    pub fn inventory(&self) -> &FontInventory {
        &self.inventory
    }

    /// Layout only, without drawing.
    pub fn layout(&self, spec: &StyleSpec, target: RenderTarget) -> ComputedLayout {
        LayoutEngine::new(&self.resolver, self.measurer.as_ref()).compute_layout(spec, target)
    }

    /// Render decoded assets, carrying their preparation diagnostics into the output.
    pub fn render_assets(
        &self,
        assets: &SourceAssets,
        spec: &StyleSpec,
        target: RenderTarget,
    ) -> BehindResult<RenderOutput> {
        let mut out = self.render(&assets.background, &assets.foreground, spec, target)?;
        if !assets.diagnostics.is_empty() {
            let mut diagnostics = assets.diagnostics.clone();
            diagnostics.append(&mut out.diagnostics);
            out.diagnostics = diagnostics;
        }
        Ok(out)
    }

    /// Decode both images, then render. Nothing is drawn unless both decode.
    pub fn render_encoded(
        &self,
        background: &[u8],
        foreground: &[u8],
        spec: &StyleSpec,
        target: RenderTarget,
    ) -> BehindResult<RenderOutput> {
        let background = decode_image(background)?;
        let foreground = decode_image(foreground)?;
        self.render(&background, &foreground, spec, target)
    }

    /// Draw the background stretched to `target`, the styled text, then the foreground on top.
    ///
    /// Style fields out of range are clamped and font problems fall back to the resolver's safe
    /// chain; both are reported in [`RenderOutput::diagnostics`].
    #[tracing::instrument(skip(self, background, foreground, spec), fields(width = target.width, height = target.height))]
    pub fn render(
        &self,
        background: &DecodedImage,
        foreground: &DecodedImage,
        spec: &StyleSpec,
        target: RenderTarget,
    ) -> BehindResult<RenderOutput> {
        let mut surface = RasterSurface::new(target)?;

        let (spec, adjustments) = spec.sanitized();
        let mut diagnostics: Vec<Diagnostic> = adjustments
            .into_iter()
            .map(|a| {
                tracing::warn!(field = a.field, detail = %a.detail, "style field adjusted");
                Diagnostic::InvalidStyleSpec {
                    field: a.field.to_owned(),
                    detail: a.detail,
                }
            })
            .collect();

        let layout = self.layout(&spec, target);
        if let Some(sub) = &layout.substitution {
            diagnostics.push(sub.to_diagnostic());
        }

        surface.draw_image(background)?;

        if !spec.text.is_empty() {
            let layer = self.text_layer(&spec, &layout, target)?;
            surface.draw_layer(&layer, 1.0)?;
        }

        surface.draw_image(foreground)?;

        Ok(RenderOutput {
            surface,
            layout,
            diagnostics,
        })
    }

    fn text_layer(
        &self,
        spec: &StyleSpec,
        layout: &ComputedLayout,
        target: RenderTarget,
    ) -> BehindResult<Vec<u8>> {
        let run = TextRun {
            text: &spec.text,
            font_family_css: layout.font_chain.to_css(),
            font_size_px: layout.font_size_px,
            font_weight: &spec.font_weight,
            font_style: spec.font_style,
            text_decoration: spec.text_decoration,
        };
        let paint = TextPaint {
            fill: spec.fill_color(),
            opacity: spec.opacity,
            anchor: layout.anchor_px,
            rotation_degrees: spec.rotation_degrees,
        };
        let svg = draw_document(&run, &paint, target);
        let tree = parse_tree(&svg, &self.inventory.svg_options())?;
        rasterize_premul_rgba8(&tree, target)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
