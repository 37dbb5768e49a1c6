//! behindtext composites styled text *behind* the subject of a photo.
//!
//! Given a background image, a cutout of its foreground subject and a [`StyleSpec`], the
//! [`Compositor`] draws three passes onto a fresh raster: the background, the text, then the
//! cutout on top. Text stays visible around the subject and disappears wherever the subject is
//! opaque.
//!
//! # Pipeline overview
//!
//! 1. **Prepare**: decode the background and obtain a cutout from a [`Segmenter`]
//!    ([`SourceAssets::prepare`]). A failing segmenter degrades to using the background as
//!    the foreground.
//! 2. **Size**: [`pick_target_size`] derives the raster size for an interactive canvas or for an
//!    export from the background's natural size.
//! 3. **Lay out**: [`LayoutEngine::compute_layout`] scales the font relative to a 1000 px
//!    reference edge, shrinks it once to fit 90% of the width, and anchors it by percentage.
//! 4. **Composite**: [`Compositor::render`] draws background, text and foreground.
//! 5. **Encode**: [`encode_surface`] writes PNG or JPEG.
//!
//! Styles persist as a flat [`ProjectOverlayConfig`] ([`encode_overlay`] /
//! [`decode_overlay`]) and the [`Engine`] facade can regenerate an export from that record and
//! the background alone.
//!
//! Only undecodable images fail a render. Segmentation failures, font substitutions and
//! clamped style fields are reported as [`Diagnostic`] values next to the output.
#![forbid(unsafe_code)]

mod adapt;
mod assets;
mod config;
mod encode;
mod fonts;
mod foundation;
mod layout;
mod project;
mod render;
mod session;
mod style;

pub use adapt::resolution::{ExportConstraints, InteractiveBudget, TargetMode, pick_target_size};
pub use assets::decode::{DecodedImage, decode_image};
pub use assets::segment::{
    NoSegmenter, PrecomputedCutout, SegmentationError, Segmenter, SourceAssets,
};
pub use config::{ENV_FONT_DIRS, ENV_NO_SYSTEM_FONTS, EngineConfig};
pub use encode::raster::{DEFAULT_JPEG_QUALITY, ExportFormat, encode_surface};
pub use fonts::catalog::{FontCatalog, FontChain, FontFamily};
pub use fonts::inventory::FontInventory;
pub use fonts::resolver::{FontAvailability, FontResolver, KnownFonts, ResolutionSource, ResolvedFont};
pub use foundation::core::{MAX_SURFACE_DIM, NaturalSize, Point, Rect, RenderTarget, Rgba8Premul, Size};
pub use foundation::error::{BehindError, BehindResult, Diagnostic};
pub use layout::engine::{
    AVERAGE_ADVANCE_EM, ComputedLayout, FIT_FRACTION, FontSubstitution, LayoutEngine, MIN_SCALE,
    REFERENCE_EDGE_PX, SubstitutionReason, scale_factor,
};
pub use layout::measure::{FontRequest, SvgTextMeasurer, TextMeasurer};
pub use project::codec::{
    OverlayPosition, ProjectOverlayConfig, StoredProject, decode_overlay, encode_overlay,
};
pub use render::composite::{PremulRgba8, over, over_in_place};
pub use render::compositor::{Compositor, RenderOutput};
pub use render::surface::RasterSurface;
pub use session::engine::{Engine, ExportOptions, ExportedImage};
pub use session::preview::{PreviewCanvas, RenderTicket};
pub use style::color::{ColorParseError, FillColor};
pub use style::spec::{
    DEFAULT_BASE_FONT_SIZE, DEFAULT_COLOR, DEFAULT_FONT_NAME, DEFAULT_FONT_WEIGHT, DEFAULT_TEXT,
    FontStyle, MIN_BASE_FONT_SIZE, StyleAdjustment, StyleSpec, TextDecoration,
    TextPosition,
};
