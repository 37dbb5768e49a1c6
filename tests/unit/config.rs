use std::ffi::OsString;

use super::*;

#[test]
fn empty_object_is_the_default_config() {
    let cfg = EngineConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, EngineConfig::default());
    assert!(cfg.load_system_fonts);
    assert_eq!(cfg.export.max_width, 1920);
    assert_eq!(cfg.export.max_height, None);
    assert_eq!(cfg.interactive.max_width, 1000);
    assert!(cfg.fonts.lookup("Inter").is_some());
}

#[test]
fn partial_sections_keep_their_other_defaults() {
    let cfg = EngineConfig::from_reader(
        r#"{
            "export": {"max_height": 1080},
            "fonts": {"safe_fallback": "Helvetica, sans-serif"},
            "load_system_fonts": false
        }"#
        .as_bytes(),
    )
    .unwrap();
    assert_eq!(cfg.export.max_width, 1920);
    assert_eq!(cfg.export.max_height, Some(1080));
    assert_eq!(cfg.fonts.safe_fallback.to_css(), "Helvetica, sans-serif");
    assert!(cfg.fonts.lookup("Lobster").is_some());
    assert!(!cfg.load_system_fonts);
}

#[test]
fn bad_json_is_a_serde_error() {
    let err = EngineConfig::from_reader("{".as_bytes()).unwrap_err();
    assert!(err.to_string().contains("serialization error"));
    assert!(EngineConfig::from_path("/no/such/config.json").is_err());
}

#[test]
fn env_overrides_append_font_dirs_and_disable_system_fonts() {
    let joined = std::env::join_paths(["/opt/fonts", "/srv/brand-fonts"]).unwrap();
    let cfg = EngineConfig {
        font_dirs: vec![PathBuf::from("/usr/local/fonts")],
        ..EngineConfig::default()
    }
    .with_overrides_from(|key| match key {
        ENV_FONT_DIRS => Some(joined.clone()),
        ENV_NO_SYSTEM_FONTS => Some(OsString::from("1")),
        _ => None,
    });
    assert_eq!(
        cfg.font_dirs,
        vec![
            PathBuf::from("/usr/local/fonts"),
            PathBuf::from("/opt/fonts"),
            PathBuf::from("/srv/brand-fonts"),
        ]
    );
    assert!(!cfg.load_system_fonts);
}

#[test]
fn unrelated_env_values_change_nothing() {
    let cfg = EngineConfig::default().with_overrides_from(|key| match key {
        ENV_NO_SYSTEM_FONTS => Some(OsString::from("0")),
        _ => None,
    });
    assert_eq!(cfg, EngineConfig::default());
}
