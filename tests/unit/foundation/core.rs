use super::*;

#[test]
fn aspect_ratio_canvas_sizes() {
    assert_eq!(
        AspectRatio::Square.canvas(),
        Canvas {
            width: 1080,
            height: 1080
        }
    );
    assert_eq!(
        AspectRatio::Vertical.canvas(),
        Canvas {
            width: 1080,
            height: 1920
        }
    );
}

#[test]
fn aspect_ratio_parses_ratio_strings_and_serde_names() {
    assert_eq!("1:1".parse::<AspectRatio>().unwrap(), AspectRatio::Square);
    assert_eq!("9:16".parse::<AspectRatio>().unwrap(), AspectRatio::Vertical);
    assert!("4:3".parse::<AspectRatio>().is_err());

    let v: AspectRatio = serde_json::from_str("\"9:16\"").unwrap();
    assert_eq!(v, AspectRatio::Vertical);
    assert_eq!(serde_json::to_string(&AspectRatio::Square).unwrap(), "\"1:1\"");
}

#[test]
fn grid_cell_size_floors_and_rejects_zero_axes() {
    let grid = GridSpec::default();
    assert_eq!(grid.cell_count(), 9);
    assert_eq!(grid.cell_size(9, 9), (3, 3));
    assert_eq!(grid.cell_size(10, 11), (3, 3));
    assert_eq!(grid.cell_size(2, 9), (0, 3));

    assert!(GridSpec::new(0, 3).is_err());
    assert!(GridSpec::new(3, 0).is_err());
    assert_eq!(GridSpec::new(2, 4).unwrap().cell_count(), 8);
}

#[test]
fn timing_converts_millis_to_encoder_seconds_exactly() {
    let t = AnimationTiming::from_millis(150).unwrap();
    assert_eq!(t.encoder_duration_secs(), 0.15);
    assert_eq!(AnimationTiming::default().frame_duration_ms, 120);
    assert!(AnimationTiming::from_millis(0).is_err());
}

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(1, 1).is_ok());
}

#[test]
fn rgba8_reads_straight_channels_from_json() {
    let c: Rgba8 = serde_json::from_str(r#"{ "r": 0, "g": 0, "b": 0, "a": 179 }"#).unwrap();
    assert_eq!(c, Rgba8::new(0, 0, 0, 179));
    assert_eq!(Rgba8::WHITE, Rgba8::new(255, 255, 255, 255));
}

#[test]
fn deserialized_zero_timing_is_only_caught_by_from_millis() {
    let t: AnimationTiming = serde_json::from_str(r#"{ "frame_duration_ms": 0 }"#).unwrap();
    assert!(AnimationTiming::from_millis(t.frame_duration_ms).is_err());
}
