//! Domain-free drawing helpers built on [`Surface`].

use kurbo::{Arc, Circle, RoundedRect, Shape};

use crate::draw::surface::{Paint, Surface, TextStyle};
use crate::foundation::core::{BezPath, Point, Rect, Rgba8, Vec2};

const TOLERANCE: f64 = 0.1;

/// Rounded rectangle path; the radius is clamped to half the shorter edge.
pub fn round_rect_path(rect: Rect, radius: f64) -> BezPath {
    let r = radius.max(0.0).min(rect.width().min(rect.height()) / 2.0);
    RoundedRect::from_rect(rect, r).to_path(TOLERANCE)
}

pub fn fill_round_rect(s: &mut dyn Surface, rect: Rect, radius: f64, paint: &Paint) {
    s.fill(&round_rect_path(rect, radius), paint);
}

pub fn stroke_round_rect(s: &mut dyn Surface, rect: Rect, radius: f64, width: f64, paint: &Paint) {
    s.stroke(&round_rect_path(rect, radius), width, paint);
}

pub fn circle_path(center: Point, radius: f64) -> BezPath {
    Circle::new(center, radius.max(0.0)).to_path(TOLERANCE)
}

pub fn fill_circle(s: &mut dyn Surface, center: Point, radius: f64, paint: &Paint) {
    s.fill(&circle_path(center, radius), paint);
}

/// Open arc starting at `start` radians and sweeping `sweep` radians (positive is clockwise in
/// y-down screen space).
pub fn arc_path(center: Point, radius: f64, start: f64, sweep: f64) -> BezPath {
    let arc = Arc::new(center, (radius, radius), start, sweep, 0.0);
    let mut path = BezPath::new();
    path.move_to(center + Vec2::from_angle(start) * radius);
    arc.to_cubic_beziers(TOLERANCE, |p1, p2, p3| path.curve_to(p1, p2, p3));
    path
}

/// A straight line segment as a path.
pub fn line_path(from: Point, to: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(from);
    path.line_to(to);
    path
}

/// Soft drop shadow under a rounded rect: a few expanding low-alpha layers offset by `offset`.
pub fn drop_shadow(s: &mut dyn Surface, rect: Rect, radius: f64, offset: Vec2, color: Rgba8) {
    let base = f64::from(color.a) / 255.0;
    for i in 0..3 {
        let spread = f64::from(i) * 1.5;
        let alpha = base * (0.5 - f64::from(i) * 0.15);
        fill_round_rect(
            s,
            (rect + offset).inflate(spread, spread),
            radius + spread,
            &Paint::solid(color.with_alpha(alpha)),
        );
    }
}

/// Draw one line of text with control characters flattened to spaces.
///
/// Shadows are never inherited: the only shadow text gets is the explicit one from
/// [`draw_text_with_shadow`].
pub fn draw_text(s: &mut dyn Surface, text: &str, at: Point, style: &TextStyle) {
    let clean = sanitize_text(text);
    if clean.trim().is_empty() {
        return;
    }
    s.fill_text(&clean, at, style);
}

/// Text over a busy backdrop: a dark copy nudged down-right, then the text itself.
pub fn draw_text_with_shadow(
    s: &mut dyn Surface,
    text: &str,
    at: Point,
    style: &TextStyle,
    shadow: Rgba8,
) {
    let nudge = (style.size / 24.0).clamp(1.0, 3.0);
    draw_text(s, text, at + Vec2::new(nudge, nudge), &style.with_color(shadow));
    draw_text(s, text, at, style);
}

pub fn sanitize_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Cut `text` to at most `max_chars` characters, ending with `…` when shortened.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.truncate(out.trim_end().len());
    out.push('…');
    out
}

/// Greedy word wrap to lines of at most `max_chars` characters. Words longer than a line are
/// hard-split.
pub fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..max_chars).collect());
        }
        if word.is_empty() {
            continue;
        }
        let word: String = word.into_iter().collect();
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/draw/primitives.rs"]
mod tests;
