use crate::compose::Theme;
use crate::draw::surface::{Paint, Surface};
use crate::foundation::core::{Canvas, Point, Rect, Rgba8};

/// Radial backdrop centered a third of the way down.
///
/// Dark themes fade from the background color to black; light themes stay flat.
pub fn backdrop_paint(canvas: Canvas, theme: &Theme) -> Paint {
    let bg = theme.palette.background;
    let outer = if theme.palette.dark { Rgba8::BLACK } else { bg };
    Paint::radial(
        Point::new(canvas.w() / 2.0, canvas.h() / 3.0),
        canvas.w().hypot(canvas.h()) * 0.75,
        bg,
        outer,
    )
}

pub fn paint_background(s: &mut dyn Surface, theme: &Theme) {
    let canvas = s.canvas();
    let full = Rect::new(0.0, 0.0, canvas.w(), canvas.h());
    s.fill(&kurbo::Shape::to_path(&full, 0.1), &backdrop_paint(canvas, theme));
}

#[cfg(test)]
#[path = "../../tests/unit/compose/background.rs"]
mod tests;
