use super::*;

#[test]
fn png_round_trips_straight_pixels() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![255, 0, 0, 255, 64, 32, 0, 128],
        premultiplied: true,
    };
    let bytes = encode_png(&frame).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(decoded.get_pixel(1, 0).0, [128, 64, 0, 128]);
}

#[test]
fn mismatched_buffer_is_rejected() {
    let frame = FrameRGBA {
        width: 4,
        height: 4,
        data: vec![0; 10],
        premultiplied: true,
    };
    assert!(matches!(
        encode_png(&frame).unwrap_err(),
        HaloError::Validation(_)
    ));
}

#[test]
fn write_png_creates_the_file() {
    let dir = std::path::PathBuf::from("target").join("png_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(DEFAULT_EXPORT_NAME);
    let _ = std::fs::remove_file(&path);
    write_png(&FrameRGBA::transparent(3, 3), &path).unwrap();
    assert!(path.exists());
}
