//! Centered quote and branding footer.

use crate::compose::Scene;
use crate::draw::primitives::{draw_text, wrap_words};
use crate::draw::surface::{Surface, TextStyle};
use crate::foundation::core::Point;

/// Footer branding line.
pub const BRAND: &str = "LIFEGRID";

const QUOTE_SIZE: f64 = 30.0;
const LINE_HEIGHT: f64 = 44.0;
const MAX_LINES: usize = 4;

/// Quote lines as painted: upper-cased, wrapped to fit `width`, at most four lines.
pub fn quote_lines(quote: &str, width: f64, font_size: f64) -> Vec<String> {
    let per_line = (width / (font_size * 0.62)).floor().max(8.0) as usize;
    let mut lines = wrap_words(&quote.to_uppercase(), per_line);
    if lines.len() > MAX_LINES {
        lines.truncate(MAX_LINES);
        if let Some(last) = lines.last_mut() {
            last.push('…');
        }
    }
    lines
}

/// Paint `quote` centered from `top`. Returns the height consumed; zero when there is no quote.
pub fn paint_quote(s: &mut dyn Surface, scene: &Scene<'_>, top: f64, quote: Option<&str>) -> f64 {
    let Some(quote) = quote.map(str::trim).filter(|q| !q.is_empty()) else {
        return 0.0;
    };
    let p = &scene.theme.palette;
    let cx = scene.canvas.w() / 2.0;
    let width = scene.canvas.w() - 2.0 * scene.margin() - scene.px(80.0);
    let size = scene.px(QUOTE_SIZE);
    let line_h = scene.px(LINE_HEIGHT);

    let quote_style = TextStyle::new(size, p.text_main.with_alpha(0.85)).bold().centered();
    let lines = quote_lines(quote, width, size);
    let mut y = top + line_h / 2.0;
    for line in &lines {
        draw_text(s, line, Point::new(cx, y), &quote_style);
        y += line_h;
    }

    let brand_y = y + scene.px(18.0);
    draw_text(
        s,
        BRAND,
        Point::new(cx, brand_y),
        &TextStyle::new(scene.px(16.0), p.text_sub.with_alpha(0.7)).bold().centered(),
    );
    brand_y + scene.px(30.0) - top
}

#[cfg(test)]
#[path = "../../tests/unit/compose/quote.rs"]
mod tests;
