use std::sync::Arc;

use crate::adapt::resolution::{ExportConstraints, TargetMode, pick_target_size};
use crate::assets::segment::{Segmenter, SourceAssets};
use crate::config::EngineConfig;
use crate::encode::raster::{ExportFormat, encode_surface};
use crate::fonts::inventory::FontInventory;
use crate::fonts::resolver::FontResolver;
use crate::foundation::core::{NaturalSize, RenderTarget};
use crate::foundation::error::{BehindResult, Diagnostic};
use crate::layout::engine::ComputedLayout;
use crate::project::codec::{ProjectOverlayConfig, decode_overlay};
use crate::render::compositor::{Compositor, RenderOutput};
use crate::session::preview::PreviewCanvas;
use crate::style::spec::StyleSpec;

/// How an export is sized and encoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub constraints: ExportConstraints,
    pub format: ExportFormat,
}

/// An encoded export and what went into it.
#[derive(Clone, Debug)]
pub struct ExportedImage {
    pub bytes: Vec<u8>,
    pub target: RenderTarget,
    pub format: ExportFormat,
    pub layout: ComputedLayout,
    pub diagnostics: Vec<Diagnostic>,
}

/// Entry point tying configuration, fonts, layout, compositing and encoding together.
///
/// The same compositor (and so the same font resolver) serves interactive previews and
/// exports.
#[derive(Clone, Debug)]
pub struct Engine {
    config: EngineConfig,
    compositor: Compositor,
}

impl Engine {
    /// Load fonts as configured and build the engine.
    pub fn new(config: EngineConfig) -> Self {
        let inventory = FontInventory::load(config.load_system_fonts, &config.font_dirs);
        Self::with_inventory(config, inventory)
    }

    /// Build the engine over an already loaded font inventory.
    pub fn with_inventory(config: EngineConfig, inventory: FontInventory) -> Self {
        let resolver = FontResolver::new(config.fonts.clone(), Arc::new(inventory.clone()));
        Self {
            compositor: Compositor::new(resolver, inventory),
            config,
        }
    }

    /// Replace the compositor, e.g. to inject a custom text measurer.
    pub fn with_compositor(mut self, compositor: Compositor) -> Self {
        self.compositor = compositor;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn resolver(&self) -> &FontResolver {
        self.compositor.resolver()
    }

    /// Export options using the configured default bounds.
    pub fn default_export_options(&self, format: ExportFormat) -> ExportOptions {
        ExportOptions {
            constraints: self.config.export,
            format,
        }
    }

    /// Decode a background and segment it, falling back to the background as foreground.
    pub fn prepare_assets(
        &self,
        background: &[u8],
        segmenter: &dyn Segmenter,
    ) -> BehindResult<SourceAssets> {
        SourceAssets::prepare(background, segmenter)
    }

    /// Canvas size for on-screen display inside `viewport`.
    pub fn interactive_target(&self, natural: NaturalSize, viewport: NaturalSize) -> RenderTarget {
        pick_target_size(
            natural,
            &TargetMode::Interactive {
                viewport,
                budget: self.config.interactive,
            },
        )
    }

    /// Render at an explicit target.
    pub fn render_at(
        &self,
        assets: &SourceAssets,
        spec: &StyleSpec,
        target: RenderTarget,
    ) -> BehindResult<RenderOutput> {
        self.compositor.render_assets(assets, spec, target)
    }

    /// Render for display and present it on `canvas`. Returns whether the canvas was updated.
    pub fn render_interactive(
        &self,
        canvas: &mut PreviewCanvas,
        assets: &SourceAssets,
        spec: &StyleSpec,
        viewport: NaturalSize,
    ) -> BehindResult<bool> {
        let ticket = canvas.submit();
        let target = self.interactive_target(assets.natural_size(), viewport);
        let output = self.render_at(assets, spec, target)?;
        Ok(canvas.present(ticket, output))
    }

    /// Render into a fresh surface sized for export and encode it.
    #[tracing::instrument(skip(self, assets, spec))]
    pub fn export(
        &self,
        assets: &SourceAssets,
        spec: &StyleSpec,
        options: &ExportOptions,
    ) -> BehindResult<ExportedImage> {
        let target = pick_target_size(
            assets.natural_size(),
            &TargetMode::Export(options.constraints),
        );
        let RenderOutput {
            surface,
            layout,
            diagnostics,
        } = self.render_at(assets, spec, target)?;
        let bytes = encode_surface(&surface, options.format)?;
        for d in &diagnostics {
            tracing::debug!(diagnostic = %d, "export diagnostic");
        }
        tracing::info!(
            width = target.width,
            height = target.height,
            bytes = bytes.len(),
            "export encoded"
        );
        Ok(ExportedImage {
            bytes,
            target,
            format: options.format,
            layout,
            diagnostics,
        })
    }

    /// Regenerate a final image from a stored overlay and its background alone.
    ///
    /// The target is re-derived from the background's current natural size, so a project saved
    /// while editing a preview exports at full resolution.
    #[tracing::instrument(skip(self, overlay, background, segmenter))]
    pub fn regenerate(
        &self,
        overlay: &ProjectOverlayConfig,
        background: &[u8],
        segmenter: &dyn Segmenter,
        options: &ExportOptions,
    ) -> BehindResult<ExportedImage> {
        let spec = decode_overlay(overlay);
        let assets = self.prepare_assets(background, segmenter)?;
        self.export(&assets, &spec, options)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/engine.rs"]
mod tests;
