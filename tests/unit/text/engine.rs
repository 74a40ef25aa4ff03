use super::*;
use crate::test_support::system_font_bytes;

#[test]
fn garbage_font_bytes_are_rejected() {
    let err = TextLayoutEngine::from_font_bytes(b"not a font".to_vec()).unwrap_err();
    assert!(matches!(err, AdcompError::Validation(_)));
}

#[test]
fn missing_font_file_is_an_error() {
    assert!(TextLayoutEngine::from_font_path(Path::new("/nonexistent/adcomp/font.ttf")).is_err());
}

#[test]
fn measure_grows_with_text_and_size() {
    let Some(bytes) = system_font_bytes() else {
        eprintln!("no system font found; skipping");
        return;
    };
    let mut engine = TextLayoutEngine::from_font_bytes(bytes).unwrap();
    assert!(!engine.family_name().trim().is_empty());

    let short = engine.measure("Save", 40.0);
    let long = engine.measure("Save big today", 40.0);
    assert!(short > 0.0);
    assert!(long > short);
    assert!(engine.measure("Save big today", 80.0) > long);
    assert!(engine.measure("Save ", 40.0) >= short);
}

#[test]
fn layout_line_never_breaks() {
    let Some(bytes) = system_font_bytes() else {
        eprintln!("no system font found; skipping");
        return;
    };
    let mut engine = TextLayoutEngine::from_font_bytes(bytes).unwrap();
    let layout = engine.layout_line("a fairly long caption that would wrap elsewhere", 60.0);
    assert_eq!(layout.lines().count(), 1);
}
