use super::*;

fn surface(w: u32, h: u32) -> RasterSurface {
    RasterSurface::new(Canvas::new(w, h).unwrap(), &FontLibrary::empty()).unwrap()
}

fn rect_path(r: Rect) -> BezPath {
    r.to_path(0.1)
}

#[test]
fn solid_fill_covers_whole_pixels() {
    let mut s = surface(8, 8);
    s.fill(
        &rect_path(Rect::new(0.0, 0.0, 8.0, 4.0)),
        &Paint::solid(Rgba8::rgb(255, 0, 0)),
    );
    let frame = s.finish().unwrap();
    assert_eq!((frame.width, frame.height), (8, 8));
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(3, 1), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(3, 6), Some([0, 0, 0, 0]));
}

#[test]
fn linear_gradient_runs_left_to_right() {
    let mut s = surface(64, 4);
    let paint = Paint::linear(
        Point::new(0.0, 0.0),
        Point::new(64.0, 0.0),
        Rgba8::BLACK,
        Rgba8::WHITE,
    );
    s.fill(&rect_path(Rect::new(0.0, 0.0, 64.0, 4.0)), &paint);
    let frame = s.finish().unwrap();
    let left = frame.pixel(1, 2).unwrap();
    let right = frame.pixel(62, 2).unwrap();
    assert_eq!(left[3], 255);
    assert!(left[0] < 20, "{left:?}");
    assert!(right[0] > 235, "{right:?}");
}

#[test]
fn opacity_layer_halves_alpha() {
    let mut s = surface(4, 4);
    s.push_opacity(0.5);
    s.fill(
        &rect_path(Rect::new(0.0, 0.0, 4.0, 4.0)),
        &Paint::solid(Rgba8::WHITE),
    );
    s.pop_layer();
    s.pop_layer();
    let a = s.finish().unwrap().pixel(2, 2).unwrap()[3];
    assert!((120..=135).contains(&a), "alpha {a}");
}

#[test]
fn text_paints_glyph_pixels() {
    let mut s = RasterSurface::new(Canvas::new(96, 32).unwrap(), &FontLibrary::bundled()).unwrap();
    let style = TextStyle::new(18.0, Rgba8::WHITE).bold();
    s.fill_text("Hello", Point::new(48.0, 16.0), &style.centered());
    let frame = s.finish().unwrap();
    let lit = frame.data.chunks_exact(4).filter(|px| px[3] > 0).count();
    assert!(lit > 30, "only {lit} pixels painted");
}

#[test]
fn empty_library_still_measures_text() {
    let mut s = surface(16, 16);
    let style = TextStyle::new(10.0, Rgba8::WHITE);
    assert!(s.measure_text("hello", &style) > 0.0);
}

#[test]
fn same_draw_calls_give_identical_pixels() {
    let draw = || {
        let mut s = surface(32, 32);
        s.fill(
            &crate::draw::primitives::circle_path(Point::new(16.0, 16.0), 11.3),
            &Paint::radial(Point::new(16.0, 16.0), 12.0, Rgba8::WHITE, Rgba8::BLACK),
        );
        s.stroke(
            &crate::draw::primitives::arc_path(Point::new(16.0, 16.0), 8.0, 0.0, 2.0),
            3.0,
            &Paint::solid(Rgba8::rgb(20, 200, 90)),
        );
        s.finish().unwrap().data
    };
    assert_eq!(draw(), draw());
}

#[test]
fn oversized_canvas_is_rejected() {
    let canvas = Canvas {
        width: 70_000,
        height: 10,
    };
    assert!(RasterSurface::new(canvas, &FontLibrary::empty()).is_err());
}
