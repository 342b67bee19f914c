use std::io::Cursor;

use super::*;

#[test]
fn defaults_are_valid() {
    let cfg = FrameConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.surface().unwrap().px, 500);
    assert_eq!(cfg.font.family, "sans-serif");
    assert!(cfg.font.path.is_none());
}

#[test]
fn parses_partial_json() {
    let json = r##"{ "surface_px": 256, "style": { "text": "HI", "font_size_px": 18 } }"##;
    let cfg = FrameConfig::from_reader(Cursor::new(json)).unwrap();
    assert_eq!(cfg.surface_px, 256);
    assert_eq!(cfg.style.text, "HI");
    assert_eq!(cfg.style.font_size_px, 18);
    assert_eq!(cfg.zoom_range, DEFAULT_ZOOM_RANGE);
}

#[test]
fn rejects_unknown_fields_and_bad_ranges() {
    let err = FrameConfig::from_reader(Cursor::new(r#"{ "surface": 10 }"#)).unwrap_err();
    assert!(matches!(err, HaloError::Serde(_)));

    let err = FrameConfig::from_reader(Cursor::new(r#"{ "surface_px": 0 }"#)).unwrap_err();
    assert!(matches!(err, HaloError::Validation(_)));

    let err = FrameConfig::from_reader(Cursor::new(r#"{ "zoom_range": [2.0, 1.0] }"#)).unwrap_err();
    assert!(matches!(err, HaloError::Validation(_)));

    let err = FrameConfig::from_reader(Cursor::new(r#"{ "zoom_range": [0.0, 1.0] }"#)).unwrap_err();
    assert!(matches!(err, HaloError::Validation(_)));
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = FrameConfig::from_path("does/not/exist.json").unwrap_err();
    assert!(format!("{err:#}").contains("does/not/exist.json"));
}

#[test]
fn zoom_clamps_into_range() {
    let cfg = FrameConfig::default();
    assert_eq!(cfg.clamp_zoom(0.0), 0.1);
    assert_eq!(cfg.clamp_zoom(-3.0), 0.1);
    assert_eq!(cfg.clamp_zoom(9.0), 5.0);
    assert_eq!(cfg.clamp_zoom(1.7), 1.7);
    assert_eq!(cfg.clamp_zoom(f64::NAN), 1.0);
}
