use super::*;

#[test]
fn defaults_match_a_fresh_editing_session() {
    let s = StyleSpec::default();
    assert_eq!(s.text, "Your Text Here");
    assert_eq!(s.font_name, "Inter");
    assert_eq!(s.base_font_size, 80.0);
    assert_eq!(s.position, TextPosition::new(50.0, 50.0));
    assert_eq!(s.rotation_degrees, 0.0);
    assert_eq!(s.color, "#FFFFFF");
    assert_eq!(s.opacity, 1.0);
    assert_eq!(s.font_weight, "700");
    assert_eq!(s.font_style, FontStyle::Normal);
    assert_eq!(s.text_decoration, TextDecoration::None);
}

#[test]
fn valid_spec_sanitizes_to_itself() {
    let s = StyleSpec::default();
    let (out, adjustments) = s.sanitized();
    assert_eq!(out, s);
    assert!(adjustments.is_empty());
}

#[test]
fn out_of_range_fields_are_clamped_not_rejected() {
    let s = StyleSpec {
        base_font_size: -4.0,
        position: TextPosition::new(140.0, -3.0),
        opacity: -0.5,
        color: "not-a-color".to_owned(),
        rotation_degrees: f64::INFINITY,
        ..StyleSpec::default()
    };
    let (out, adjustments) = s.sanitized();
    assert_eq!(out.base_font_size, MIN_BASE_FONT_SIZE);
    assert_eq!(out.position, TextPosition::new(100.0, 0.0));
    assert_eq!(out.opacity, 0.0);
    assert_eq!(out.color, DEFAULT_COLOR);
    assert_eq!(out.rotation_degrees, 0.0);

    let fields: Vec<&str> = adjustments.iter().map(|a| a.field).collect();
    for f in ["baseFontSize", "position.x", "position.y", "opacity", "color", "rotation"] {
        assert!(fields.contains(&f), "missing adjustment for {f}: {fields:?}");
    }
}

#[test]
fn large_rotation_is_kept_verbatim() {
    let s = StyleSpec {
        rotation_degrees: 725.0,
        ..StyleSpec::default()
    };
    let (out, adjustments) = s.sanitized();
    assert_eq!(out.rotation_degrees, 725.0);
    assert!(adjustments.is_empty());
}

#[test]
fn weights_parse_numbers_and_keywords() {
    assert_eq!(parse_font_weight("700"), 700);
    assert_eq!(parse_font_weight(" 300 "), 300);
    assert_eq!(parse_font_weight("bold"), 700);
    assert_eq!(parse_font_weight("Normal"), 400);
    assert_eq!(parse_font_weight("heavy-ish"), 400);
}

#[test]
fn enum_css_parsing_is_lenient() {
    assert_eq!(FontStyle::from_css("ITALIC"), Some(FontStyle::Italic));
    assert_eq!(FontStyle::from_css("slanted"), None);
    assert_eq!(
        TextDecoration::from_css("underline"),
        Some(TextDecoration::Underline)
    );
    assert_eq!(TextDecoration::from_css("line-through"), None);
}

#[test]
fn positive_base_font_sizes_are_kept_as_given() {
    for size in [0.5, 1200.0, 5000.0] {
        let s = StyleSpec {
            base_font_size: size,
            ..StyleSpec::default()
        };
        let (out, adjustments) = s.sanitized();
        assert_eq!(out.base_font_size, size);
        assert!(adjustments.is_empty());
    }
}
