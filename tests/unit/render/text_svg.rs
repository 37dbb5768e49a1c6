use super::*;

fn run(text: &str) -> TextRun<'_> {
    TextRun {
        text,
        font_family_css: "'Open Sans', Arial, sans-serif".to_owned(),
        font_size_px: 80.0,
        font_weight: "700",
        font_style: FontStyle::Italic,
        text_decoration: TextDecoration::Underline,
    }
}

fn paint(rotation_degrees: f64) -> TextPaint {
    TextPaint {
        fill: FillColor::rgba(1.0, 0.0, 0.0, 0.5),
        opacity: 0.25,
        anchor: Point::new(320.0, 240.0),
        rotation_degrees,
    }
}

#[test]
fn escape_xml_handles_markup_and_control_chars() {
    assert_eq!(escape_xml("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
    assert_eq!(escape_xml("x\u{0}y\u{7}z"), "xyz");
    assert_eq!(escape_xml("line\nbreak"), "line\nbreak");
}

#[test]
fn draw_document_carries_style_attributes() {
    let svg = draw_document(&run("Hi & bye"), &paint(0.0), RenderTarget::new(640, 480));
    assert!(svg.contains(r#"width="640" height="480""#));
    assert!(svg.contains(r#"x="320" y="240""#));
    assert!(svg.contains(r#"text-anchor="middle""#));
    assert!(svg.contains(r#"font-family="&apos;Open Sans&apos;, Arial, sans-serif""#));
    assert!(svg.contains(r#"font-size="80""#));
    assert!(svg.contains(r#"font-weight="700""#));
    assert!(svg.contains(r#"font-style="italic""#));
    assert!(svg.contains(r#"text-decoration="underline""#));
    assert!(svg.contains(r#"fill="rgb(255,0,0)" fill-opacity="0.5" opacity="0.25""#));
    assert!(svg.contains("Hi &amp; bye"));
    assert!(!svg.contains("rotate("));
}

#[test]
fn rotation_is_normalized_and_pivots_on_anchor() {
    let svg = draw_document(&run("x"), &paint(-90.0), RenderTarget::new(640, 480));
    assert!(svg.contains(r#"transform="rotate(270 320 240)""#));

    let svg = draw_document(&run("x"), &paint(720.0), RenderTarget::new(640, 480));
    assert!(!svg.contains("rotate("));
}

#[test]
fn generated_documents_parse() {
    let opts = usvg::Options::default();
    let target = RenderTarget::new(64, 32);
    let tree = parse_tree(&draw_document(&run("<&>"), &paint(15.0), target), &opts).unwrap();
    assert_eq!(tree.size().width(), 64.0);
    parse_tree(&measure_document(&run("weird \u{1} text")), &opts).unwrap();
}

#[test]
fn text_without_fonts_measures_nothing_and_draws_nothing() {
    let opts = usvg::Options {
        fontdb: std::sync::Arc::new(usvg::fontdb::Database::new()),
        ..Default::default()
    };
    let tree = parse_tree(&measure_document(&run("Hello")), &opts).unwrap();
    assert_eq!(text_width(&tree), None);

    let target = RenderTarget::new(16, 8);
    let tree = parse_tree(&draw_document(&run("Hello"), &paint(0.0), target), &opts).unwrap();
    let px = rasterize_premul_rgba8(&tree, target).unwrap();
    assert_eq!(px.len(), 16 * 8 * 4);
    assert!(px.iter().all(|&b| b == 0));
}

#[test]
fn fmt_num_trims_trailing_zeros() {
    assert_eq!(fmt_num(80.0), "80");
    assert_eq!(fmt_num(153.6), "153.6");
    assert_eq!(fmt_num(-0.00001), "0");
    assert_eq!(fmt_num(f64::NAN), "0");
}
