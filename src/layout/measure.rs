use crate::fonts::catalog::{FontChain, FontFamily};
use crate::fonts::inventory::FontInventory;
use crate::render::text_svg::{TextRun, measure_document, parse_tree, text_width};
use crate::style::spec::{FontStyle, TextDecoration, parse_font_weight};

/// Font parameters a measurement is taken with.
#[derive(Clone, Copy, Debug)]
pub struct FontRequest<'a> {
    pub chain: &'a FontChain,
    pub size_px: f64,
    /// CSS weight string, as carried by the style.
    pub weight: &'a str,
    pub style: FontStyle,
}

/// Measures rendered text width and checks that a font chain is usable.
///
/// Layout is written against this trait so it can be exercised without installed fonts.
pub trait TextMeasurer: Send + Sync {
    /// Advance width of `text` in pixels, or `None` when it could not be measured.
    fn measure(&self, text: &str, font: &FontRequest<'_>) -> Option<f64>;

    /// Whether the chain's primary family can actually be drawn.
    fn verify(&self, font: &FontRequest<'_>) -> bool {
        let _ = font;
        true
    }
}

/// [`TextMeasurer`] backed by the same usvg text shaping the compositor draws with.
#[derive(Clone, Debug)]
pub struct SvgTextMeasurer {
    inventory: FontInventory,
}

impl SvgTextMeasurer {
    pub fn new(inventory: &FontInventory) -> Self {
        Self {
            inventory: inventory.clone(),
        }
    }
}

impl TextMeasurer for SvgTextMeasurer {
    fn measure(&self, text: &str, font: &FontRequest<'_>) -> Option<f64> {
        if text.is_empty() {
            return Some(0.0);
        }
        let run = TextRun {
            text,
            font_family_css: font.chain.to_css(),
            font_size_px: font.size_px,
            font_weight: font.weight,
            font_style: font.style,
            text_decoration: TextDecoration::None,
        };
        let tree = match parse_tree(&measure_document(&run), &self.inventory.svg_options()) {
            Ok(tree) => tree,
            Err(e) => {
                tracing::debug!(error = %e, "text measurement document rejected");
                return None;
            }
        };
        text_width(&tree)
    }

    fn verify(&self, font: &FontRequest<'_>) -> bool {
        let primary: &FontFamily = font.chain.primary();
        self.inventory
            .match_family(primary, parse_font_weight(font.weight), font.style)
            .is_some()
    }
}
