use super::*;
use crate::render::recording::RecordingSurface;
use crate::theme::palette::ThemeId;

#[test]
fn dark_themes_fade_to_black_light_themes_stay_flat() {
    let canvas = Canvas::new(300, 600).unwrap();
    let dark = Theme::new(ThemeId::Midnight);
    let paint = backdrop_paint(canvas, &dark);
    let Paint::Radial { center, stops, .. } = &paint else {
        panic!("expected radial backdrop");
    };
    assert_eq!(*center, Point::new(150.0, 200.0));
    assert_eq!(stops[0].1, dark.palette.background);
    assert_eq!(stops[1].1, Rgba8::BLACK);

    let light = Theme::new(ThemeId::Paper);
    let paint = backdrop_paint(canvas, &light);
    assert_eq!(paint.sample(Point::new(0.0, 600.0)), light.palette.background);
}

#[test]
fn covers_the_whole_canvas() {
    let mut s = RecordingSurface::new(Canvas::new(300, 600).unwrap());
    paint_background(&mut s, &Theme::new(ThemeId::Ocean));
    let list = s.finish().unwrap();
    let (bounds, _) = list.fills().next().unwrap();
    assert_eq!(bounds, Rect::new(0.0, 0.0, 300.0, 600.0));
}
