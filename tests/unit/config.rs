use super::*;
use crate::test_support::system_font_bytes;

#[test]
fn empty_object_yields_defaults() {
    let cfg = ComposerConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, ComposerConfig::default());
    assert_eq!(cfg.grid, GridSpec { rows: 3, cols: 3 });
    assert_eq!(cfg.frame_duration_ms, 120);
    assert_eq!(cfg.aspect_ratio, AspectRatio::Square);
    assert!(cfg.font_path.is_none());
}

#[test]
fn fields_override_defaults() {
    let cfg = ComposerConfig::from_json_str(
        r#"{
            "aspect_ratio": "9:16",
            "grid": { "cols": 4 },
            "frame_duration_ms": 150,
            "overlay": { "padding_scale": 0.1 },
            "font_path": "fonts/Bold.ttf"
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.aspect_ratio, AspectRatio::Vertical);
    assert_eq!(cfg.grid, GridSpec { rows: 3, cols: 4 });
    assert_eq!(cfg.timing().unwrap().encoder_duration_secs(), 0.15);
    assert!((cfg.overlay.padding_scale - 0.1).abs() < 1e-6);
    assert!((cfg.overlay.font_scale - 0.07).abs() < 1e-6);
    assert_eq!(cfg.font_path.as_deref(), Some(Path::new("fonts/Bold.ttf")));
}

#[test]
fn invalid_values_fail_validation() {
    for json in [
        r#"{ "grid": { "rows": 0 } }"#,
        r#"{ "frame_duration_ms": 0 }"#,
        r#"{ "overlay": { "font_scale": -1.0 } }"#,
        r#"{ "aspect_ratio": "4:3" }"#,
        "not json",
    ] {
        let err = ComposerConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, AdcompError::Validation(_)), "{json}: {err}");
    }
}

#[test]
fn from_path_reads_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("adcomp.json");
    std::fs::write(&path, r#"{ "frame_duration_ms": 90 }"#).unwrap();
    assert_eq!(ComposerConfig::from_path(&path).unwrap().frame_duration_ms, 90);

    let missing = ComposerConfig::from_path(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(missing, AdcompError::Validation(_)));
}

#[test]
fn overlay_without_font() {
    let cfg = ComposerConfig::default();
    assert!(cfg.build_overlay("   ").is_ok());
    assert!(matches!(
        cfg.build_overlay("Save big"),
        Err(AdcompError::Validation(_))
    ));
}

#[test]
fn overlay_with_font() {
    let Some(bytes) = system_font_bytes() else {
        eprintln!("no system font found; skipping");
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("caption.ttf");
    std::fs::write(&path, bytes).unwrap();

    let cfg = ComposerConfig {
        font_path: Some(path),
        ..ComposerConfig::default()
    };
    assert!(cfg.build_overlay("Save big").is_ok());
}
