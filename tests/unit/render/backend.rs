use super::*;

fn frame(data: Vec<u8>, premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data,
        premultiplied,
    }
}

#[test]
fn pixel_reads_back_straight_alpha() {
    let f = frame(vec![255, 0, 0, 255, 64, 0, 0, 128], true);
    assert_eq!(f.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(1, 0), Some([128, 0, 0, 128]));
    assert_eq!(f.pixel(2, 0), None);

    let straight = frame(vec![1, 2, 3, 4, 5, 6, 7, 8], false);
    assert_eq!(straight.pixel(1, 0), Some([5, 6, 7, 8]));
}

#[test]
fn png_has_signature_and_decodes() {
    let f = frame(vec![255, 0, 0, 255, 0, 0, 0, 0], true);
    let png = f.encode_png().unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let img = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
        .unwrap()
        .to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0, 0]);
}

#[test]
fn short_buffer_is_a_render_error() {
    let f = frame(vec![0; 4], false);
    let err = f.encode_png().unwrap_err();
    assert!(err.to_string().starts_with("render error:"));
}
