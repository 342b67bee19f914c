use std::io::Cursor;

use super::*;

fn config(px: u32) -> FrameConfig {
    FrameConfig {
        surface_px: px,
        ..FrameConfig::default()
    }
}

fn png(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

#[test]
fn new_session_draws_the_empty_state_once() {
    let s = EditorSession::new(config(64)).unwrap();
    assert_eq!(s.redraw_count(), 1);
    assert!(s.frame().is_blank());
    assert!(!s.has_image());
    assert_eq!(s.zoom_control(), 1.0);
    assert_eq!(s.transform(), ImageTransform::centered(s.surface()));
}

#[test]
fn invalid_config_is_rejected() {
    assert!(EditorSession::new(config(0)).is_err());
}

#[test]
fn pointer_without_image_is_a_no_op() {
    let mut s = EditorSession::new(config(64)).unwrap();
    assert!(!s.handle(InputEvent::PointerDown(Point::new(5.0, 5.0))).unwrap());
    assert_eq!(s.drag(), DragState::Idle);
    assert!(!s.handle(InputEvent::PointerMove(Point::new(9.0, 9.0))).unwrap());
    assert_eq!(s.redraw_count(), 1);
}

#[test]
fn zoom_without_image_updates_control_only() {
    let mut s = EditorSession::new(config(64)).unwrap();
    assert!(!s.handle(InputEvent::Zoom(2.0)).unwrap());
    assert_eq!(s.zoom_control(), 2.0);
    assert_eq!(s.transform().scale, 1.0);
    assert_eq!(s.redraw_count(), 1);
}

#[test]
fn zoom_is_clamped_into_the_configured_range() {
    let mut s = EditorSession::new(config(64)).unwrap();
    s.load_image_bytes(&png(8, 8, [0, 255, 0, 255])).unwrap();
    assert!(s.handle(InputEvent::Zoom(0.0)).unwrap());
    assert_eq!(s.transform().scale, 0.1);
    assert!(s.handle(InputEvent::Zoom(50.0)).unwrap());
    assert_eq!(s.transform().scale, 5.0);
}

#[test]
fn loading_an_image_resets_transform_and_zoom_control() {
    let mut s = EditorSession::new(config(100)).unwrap();
    s.load_image_bytes(&png(10, 10, [255, 0, 0, 255])).unwrap();
    assert!(s.has_image());

    s.handle(InputEvent::Zoom(3.0)).unwrap();
    s.handle(InputEvent::PointerDown(Point::new(50.0, 50.0))).unwrap();
    s.handle(InputEvent::PointerMove(Point::new(20.0, 70.0))).unwrap();
    s.handle(InputEvent::PointerUp).unwrap();
    assert_eq!(s.transform().center(), Point::new(20.0, 70.0));
    assert_eq!(s.transform().scale, 3.0);

    s.load_image_bytes(&png(4, 4, [0, 0, 255, 255])).unwrap();
    assert_eq!(s.transform(), ImageTransform::centered(s.surface()));
    assert_eq!(s.zoom_control(), 1.0);
    assert_eq!(s.frame().pixel(50, 50), Some([0, 0, 255, 255]));
}

#[test]
fn dragging_redraws_on_every_move() {
    let mut s = EditorSession::new(config(100)).unwrap();
    s.load_image_bytes(&png(10, 10, [255, 0, 0, 255])).unwrap();
    let before = s.redraw_count();

    assert!(!s.handle(InputEvent::PointerDown(Point::new(50.0, 50.0))).unwrap());
    assert!(s.handle(InputEvent::PointerMove(Point::new(60.0, 50.0))).unwrap());
    assert!(s.handle(InputEvent::PointerMove(Point::new(70.0, 50.0))).unwrap());
    assert!(!s.handle(InputEvent::PointerLeave).unwrap());
    assert!(!s.handle(InputEvent::PointerMove(Point::new(0.0, 0.0))).unwrap());

    assert_eq!(s.redraw_count(), before + 2);
    assert_eq!(s.transform().center(), Point::new(70.0, 50.0));
    assert_eq!(s.frame().pixel(70, 50), Some([255, 0, 0, 255]));
    assert_eq!(s.frame().pixel(50, 50), Some([0, 0, 0, 0]));
}

#[test]
fn stale_load_is_ignored() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let mut s = EditorSession::new(config(32)).unwrap();
    let first = s.begin_image_load();
    let second = s.begin_image_load();

    assert!(s.complete_image_load(second, &png(2, 2, [1, 2, 3, 255])).unwrap());
    assert!(!s.complete_image_load(first, &png(2, 2, [9, 9, 9, 255])).unwrap());
    assert_eq!(s.frame().pixel(16, 16), Some([1, 2, 3, 255]));
}

#[test]
fn failed_decode_keeps_the_previous_image() {
    let mut s = EditorSession::new(config(32)).unwrap();
    s.load_image_bytes(&png(2, 2, [1, 2, 3, 255])).unwrap();
    let before = s.frame().clone();
    assert!(s.load_image_bytes(b"nope").is_err());
    assert!(s.has_image());
    assert_eq!(s.frame(), &before);
}

#[test]
fn style_events_redraw_and_validate() {
    let mut s = EditorSession::new(config(200)).unwrap();
    assert!(s.handle(InputEvent::Text("HELLO".to_owned())).unwrap());
    assert!(!s.frame().is_blank());
    assert!(s.handle(InputEvent::BannerColor1(HexColor::parse("#ff0000").unwrap())).unwrap());
    assert!(s.handle(InputEvent::BannerColor2(HexColor::parse("#00ff00").unwrap())).unwrap());
    assert!(s.handle(InputEvent::TextColor(HexColor::parse("#000000").unwrap())).unwrap());
    assert!(s.handle(InputEvent::BannerOpacity(0.25)).unwrap());
    assert!(s.handle(InputEvent::FontSize(30)).unwrap());
    assert_eq!(s.style().font_size_px, 30);
    assert_eq!(s.style().banner_opacity, 0.25);

    let count = s.redraw_count();
    assert!(s.handle(InputEvent::BannerOpacity(1.5)).is_err());
    assert!(s.handle(InputEvent::FontSize(0)).is_err());
    assert_eq!(s.style().banner_opacity, 0.25);
    assert_eq!(s.redraw_count(), count);

    assert!(s.handle(InputEvent::Text(String::new())).unwrap());
    assert!(s.frame().is_blank());
}

#[test]
fn text_layout_reflects_current_style() {
    let mut s = EditorSession::new(config(400)).unwrap();
    s.handle(InputEvent::Text("HELLO".to_owned())).unwrap();
    s.handle(InputEvent::FontSize(20)).unwrap();
    let layout = s.text_layout();
    assert_eq!(layout.banner.thickness, 30.0);
    assert_eq!(layout.banner.radius, 200.0 - 15.0);
    assert_eq!(layout.chars.len(), 5);
}

#[test]
fn export_matches_the_surface() {
    let mut s = EditorSession::new(config(40)).unwrap();
    s.load_image_bytes(&png(40, 40, [200, 100, 50, 255])).unwrap();
    let bytes = s.export_png().unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (40, 40));
    assert_eq!(decoded.get_pixel(20, 20).0, [200, 100, 50, 255]);
    assert_eq!(decoded.get_pixel(0, 0).0[3], 0);

    let dir = std::path::PathBuf::from("target").join("editor_export");
    std::fs::create_dir_all(&dir).unwrap();
    let path = s.export_to_dir(&dir).unwrap();
    assert!(path.ends_with("profile-picture.png"));
    assert_eq!(std::fs::read(&path).unwrap(), bytes);
}
