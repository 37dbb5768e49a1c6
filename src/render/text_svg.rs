use std::fmt::Write as _;

use crate::foundation::core::{Point, RenderTarget};
use crate::foundation::error::{BehindError, BehindResult};
use crate::foundation::math::normalize_degrees;
use crate::style::color::FillColor;
use crate::style::spec::{FontStyle, TextDecoration};

/// Font and string half of an SVG text element.
#[derive(Clone, Debug)]
pub(crate) struct TextRun<'a> {
    pub text: &'a str,
    pub font_family_css: String,
    pub font_size_px: f64,
    pub font_weight: &'a str,
    pub font_style: FontStyle,
    pub text_decoration: TextDecoration,
}

/// Placement and paint half of an SVG text element.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TextPaint {
    pub fill: FillColor,
    pub opacity: f64,
    pub anchor: Point,
    pub rotation_degrees: f64,
}

/// A 1x1 document holding the run at the origin. Only used for its bounding box.
pub(crate) fn measure_document(run: &TextRun<'_>) -> String {
    let mut svg = String::with_capacity(256);
    svg.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1">"#);
    svg.push_str("<text x=\"0\" y=\"0\"");
    push_font_attrs(&mut svg, run);
    svg.push('>');
    svg.push_str(&escape_xml(run.text));
    svg.push_str("</text></svg>");
    svg
}

/// Full-canvas document drawing the run centered on the anchor.
pub(crate) fn draw_document(run: &TextRun<'_>, paint: &TextPaint, target: RenderTarget) -> String {
    let [r, g, b, _] = paint.fill.to_rgba8();
    let mut svg = String::with_capacity(512);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = target.width,
        h = target.height
    );
    let _ = write!(
        svg,
        r#"<text x="{x}" y="{y}" text-anchor="middle" dominant-baseline="central""#,
        x = fmt_num(paint.anchor.x),
        y = fmt_num(paint.anchor.y)
    );
    push_font_attrs(&mut svg, run);
    let _ = write!(
        svg,
        r#" fill="rgb({r},{g},{b})" fill-opacity="{fa}" opacity="{o}""#,
        fa = fmt_num(paint.fill.a.clamp(0.0, 1.0)),
        o = fmt_num(paint.opacity.clamp(0.0, 1.0))
    );

    let deg = normalize_degrees(paint.rotation_degrees);
    if deg != 0.0 {
        let _ = write!(
            svg,
            r#" transform="rotate({d} {x} {y})""#,
            d = fmt_num(deg),
            x = fmt_num(paint.anchor.x),
            y = fmt_num(paint.anchor.y)
        );
    }
    svg.push('>');
    svg.push_str(&escape_xml(run.text));
    svg.push_str("</text></svg>");
    svg
}

fn push_font_attrs(svg: &mut String, run: &TextRun<'_>) {
    let _ = write!(
        svg,
        r#" xml:space="preserve" font-family="{family}" font-size="{size}" font-weight="{weight}" font-style="{style}""#,
        family = escape_xml(&run.font_family_css),
        size = fmt_num(run.font_size_px),
        weight = escape_xml(run.font_weight.trim()),
        style = run.font_style.as_str(),
    );
    if run.text_decoration == TextDecoration::Underline {
        svg.push_str(r#" text-decoration="underline""#);
    }
}

fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-0" {
        "0".to_owned()
    } else {
        s.to_owned()
    }
}

/// Escape markup characters and drop code points XML 1.0 cannot carry.
pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if (c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            c => out.push(c),
        }
    }
    out
}

pub(crate) fn parse_tree(svg: &str, opts: &usvg::Options<'_>) -> BehindResult<usvg::Tree> {
    usvg::Tree::from_str(svg, opts)
        .map_err(|e| BehindError::Other(anyhow::anyhow!("parse text svg: {e}")))
}

/// Width of the first text node's bounding box. `None` when no glyphs were laid out.
pub(crate) fn text_width(tree: &usvg::Tree) -> Option<f64> {
    fn walk(group: &usvg::Group) -> Option<f64> {
        for node in group.children() {
            match node {
                usvg::Node::Text(text) => {
                    let w = f64::from(text.bounding_box().width());
                    if w.is_finite() {
                        return Some(w);
                    }
                }
                usvg::Node::Group(g) => {
                    if let Some(w) = walk(g) {
                        return Some(w);
                    }
                }
                _ => {}
            }
        }
        None
    }
    walk(tree.root())
}

/// Rasterize a tree at its own size into premultiplied RGBA8.
pub(crate) fn rasterize_premul_rgba8(tree: &usvg::Tree, target: RenderTarget) -> BehindResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(target.width, target.height)
        .ok_or_else(|| BehindError::validation("failed to allocate text layer pixmap"))?;

    let sx = target.width as f32 / tree.size().width();
    let sy = target.height as f32 / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.take())
}

#[cfg(test)]
#[path = "../../tests/unit/render/text_svg.rs"]
mod tests;
