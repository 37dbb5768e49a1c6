use super::*;

fn styled() -> StyleSpec {
    StyleSpec {
        text: "SUMMER".to_owned(),
        font_name: "Bebas Neue".to_owned(),
        base_font_size: 240.0,
        position: TextPosition::new(30.0, 62.5),
        rotation_degrees: -12.0,
        color: "rgba(255, 200, 0, 0.8)".to_owned(),
        opacity: 0.75,
        font_weight: "900".to_owned(),
        font_style: FontStyle::Italic,
        text_decoration: TextDecoration::Underline,
    }
}

#[test]
fn encode_then_decode_restores_the_style() {
    for spec in [StyleSpec::default(), styled(), StyleSpec::default().with_text("")] {
        assert_eq!(decode_overlay(&encode_overlay(&spec)), spec);
    }
}

#[test]
fn json_field_names_match_the_stored_record() {
    let json = encode_overlay(&styled()).to_json_string().unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    for key in [
        "text",
        "fontSize",
        "fontFamily",
        "color",
        "position",
        "rotation",
        "opacity",
        "fontWeight",
        "fontStyle",
        "textDecoration",
    ] {
        assert!(v.get(key).is_some(), "missing {key}");
    }
    assert_eq!(v["position"]["x"], 30.0);
    assert_eq!(v["fontStyle"], "italic");
    assert_eq!(
        decode_overlay(&ProjectOverlayConfig::from_json_str(&json).unwrap()),
        styled()
    );
}

#[test]
fn missing_fields_take_defaults() {
    let config = ProjectOverlayConfig::from_json_str(r#"{"text":"hello","position":{"x":10}}"#)
        .unwrap();
    let spec = decode_overlay(&config);
    assert_eq!(spec.text, "hello");
    assert_eq!(spec.position, TextPosition::new(10.0, 50.0));
    assert_eq!(
        StyleSpec {
            text: "hello".to_owned(),
            position: TextPosition::new(10.0, 50.0),
            ..StyleSpec::default()
        },
        spec
    );

    assert_eq!(
        decode_overlay(&ProjectOverlayConfig::from_json_str("{}").unwrap()),
        StyleSpec::default()
    );
}

#[test]
fn unknown_fields_and_values_are_tolerated() {
    let config = ProjectOverlayConfig::from_json_str(
        r#"{"fontStyle":"slanted","textDecoration":"blink","shadow":{"blur":4},"id":7}"#,
    )
    .unwrap();
    let spec = decode_overlay(&config);
    assert_eq!(spec.font_style, FontStyle::Normal);
    assert_eq!(spec.text_decoration, TextDecoration::None);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = ProjectOverlayConfig::from_json_str(r#"{"fontSize":"big"}"#).unwrap_err();
    assert!(err.to_string().contains("serialization error"));
}

#[test]
fn stored_project_round_trips_through_json() {
    let project = StoredProject::new(&styled(), "uploads/beach.jpg");
    let json = project.to_json_pretty().unwrap();
    let back = StoredProject::from_reader(json.as_bytes()).unwrap();
    assert_eq!(back, project);
    assert_eq!(back.style(), styled());
    assert!(!json.contains("foreground"));
}

#[test]
fn stored_project_from_missing_path_is_validation_error() {
    let err = StoredProject::from_path("/definitely/missing/project.json").unwrap_err();
    assert!(err.to_string().contains("validation error"));
}
