use super::*;

#[test]
fn parses_hex_forms() {
    assert_eq!(FillColor::parse("#FFFFFF").unwrap(), FillColor::WHITE);
    assert_eq!(FillColor::parse("#f00").unwrap().to_rgba8(), [255, 0, 0, 255]);
    assert_eq!(
        FillColor::parse("#0000ff80").unwrap().to_rgba8(),
        [0, 0, 255, 128]
    );
    assert_eq!(FillColor::parse("#0f08").unwrap().to_rgba8(), [0, 255, 0, 136]);
}

#[test]
fn parses_functional_rgb_and_rgba() {
    assert_eq!(
        FillColor::parse("rgba(255, 128, 0, 0.5)").unwrap().to_rgba8(),
        [255, 128, 0, 128]
    );
    assert_eq!(
        FillColor::parse("rgb(10 20 30 / 50%)").unwrap().to_rgba8(),
        [10, 20, 30, 128]
    );
    assert_eq!(
        FillColor::parse("RGB(100%, 0%, 0%)").unwrap().to_rgba8(),
        [255, 0, 0, 255]
    );
}

#[test]
fn parses_named_colors() {
    assert_eq!(FillColor::parse("Black").unwrap().to_rgba8(), [0, 0, 0, 255]);
    assert_eq!(FillColor::parse("transparent").unwrap().a, 0.0);
}

#[test]
fn rejects_garbage() {
    assert!(FillColor::parse("").is_err());
    assert!(FillColor::parse("#12345").is_err());
    assert!(FillColor::parse("#zzzzzz").is_err());
    assert!(FillColor::parse("rgb(1,2)").is_err());
    assert!(FillColor::parse("chartreuse-ish").is_err());
    let err = FillColor::parse("#xyz").unwrap_err();
    assert!(err.to_string().contains("#xyz"));
}

#[test]
fn premul_conversion_uses_alpha() {
    let c = FillColor::parse("rgba(255, 255, 255, 0.5)").unwrap();
    assert_eq!(c.to_rgba8_premul().to_array(), [128, 128, 128, 128]);
}
