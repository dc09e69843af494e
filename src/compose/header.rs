//! Life readout, streak badge, and the 7-day dashboard header.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::compose::Scene;
use crate::draw::primitives::{
    arc_path, circle_path, draw_text, draw_text_with_shadow, fill_circle, fill_round_rect,
    stroke_round_rect,
};
use crate::draw::surface::{Paint, Surface, TextStyle};
use crate::foundation::core::{BezPath, Point, Rect, Rgba8};

/// Height reserved for the life readout / streak row.
pub const LIFE_ROW_HEIGHT: f64 = 110.0;
/// Height the dashboard header consumes (card plus gap below).
pub const DASHBOARD_HEIGHT: f64 = 290.0;
/// Placeholder series drawn when there is no history to chart.
const PLACEHOLDER: [f64; 7] = [22.0; 7];

pub const DONE_GREEN: Rgba8 = Rgba8::rgb(0x22, 0xC5, 0x5E);
pub const MISSED_RED: Rgba8 = Rgba8::rgb(0xEF, 0x44, 0x44);

/// "42.5% of life lived" with the age underneath, top-left at `top`.
pub fn paint_life_header(s: &mut dyn Surface, scene: &Scene<'_>, top: f64) {
    let p = &scene.theme.palette;
    let m = scene.metrics;
    let x = scene.margin();
    let shadow = Rgba8::BLACK.with_alpha(0.35);

    draw_text_with_shadow(
        s,
        &format!("{:.1}%", m.life_percent),
        Point::new(x, top + scene.px(34.0)),
        &TextStyle::new(scene.px(52.0), p.text_main).bold(),
        shadow,
    );
    draw_text(
        s,
        &format!("OF LIFE LIVED · AGE {}", m.age_years),
        Point::new(x, top + scene.px(84.0)),
        &TextStyle::new(scene.px(20.0), p.text_sub),
    );
}

/// Streak numeral, flame and today's status, right-aligned to `right` at `top`.
///
/// Paints nothing and returns `false` when there is no streak.
pub fn paint_streak(s: &mut dyn Surface, scene: &Scene<'_>, right: f64, top: f64) -> bool {
    let m = scene.metrics;
    if m.streak == 0 {
        return false;
    }
    let p = &scene.theme.palette;

    let numeral = m.streak.to_string();
    let style = TextStyle::new(scene.px(52.0), p.text_main).bold().right();
    let mid = top + scene.px(34.0);
    draw_text_with_shadow(
        s,
        &numeral,
        Point::new(right, mid),
        &style,
        Rgba8::BLACK.with_alpha(0.35),
    );

    let width = s.measure_text(&numeral, &style);
    let flame_center = Point::new(right - width - scene.px(30.0), mid);
    s.fill(
        &flame_path(flame_center, scene.px(24.0)),
        &Paint::linear(
            flame_center - (0.0, scene.px(24.0)),
            flame_center + (0.0, scene.px(16.0)),
            Rgba8::rgb(0xFB, 0xBF, 0x24),
            Rgba8::rgb(0xEA, 0x58, 0x0C),
        ),
    );
    s.fill(
        &flame_path(flame_center + (0.0, scene.px(6.0)), scene.px(11.0)),
        &Paint::solid(Rgba8::rgb(0xFE, 0xF3, 0xC7)),
    );

    let (label, color) = if m.logged_today {
        ("DONE TODAY", DONE_GREEN)
    } else {
        ("NOT LOGGED", MISSED_RED)
    };
    draw_text(
        s,
        label,
        Point::new(right, top + scene.px(84.0)),
        &TextStyle::new(scene.px(18.0), color).bold().right(),
    );
    true
}

/// Teardrop flame of half-height `size` around `center`.
pub fn flame_path(center: Point, size: f64) -> BezPath {
    let (cx, cy) = (center.x, center.y);
    let mut path = BezPath::new();
    path.move_to((cx, cy - size));
    path.curve_to(
        (cx + 0.25 * size, cy - 0.45 * size),
        (cx + 0.8 * size, cy + 0.65 * size),
        (cx, cy + 0.66 * size),
    );
    path.curve_to(
        (cx - 0.8 * size, cy + 0.65 * size),
        (cx - 0.25 * size, cy - 0.45 * size),
        (cx, cy - size),
    );
    path.close_path();
    path
}

/// Chart + completion ring card. Returns the height consumed.
pub fn paint_dashboard_header(s: &mut dyn Surface, scene: &Scene<'_>, top: f64) -> f64 {
    let p = &scene.theme.palette;
    let m = scene.metrics;
    let x0 = scene.margin();
    let x1 = scene.canvas.w() - scene.margin();
    let card = Rect::new(x0, top, x1, top + scene.px(250.0));

    fill_round_rect(s, card, scene.px(32.0), &Paint::solid(p.card.with_alpha(0.82)));
    stroke_round_rect(
        s,
        card,
        scene.px(32.0),
        scene.px(1.5),
        &Paint::solid(Rgba8::WHITE.with_alpha(0.06)),
    );

    let pad = scene.px(32.0);
    let split = card.x0 + card.width() * 0.64;
    draw_text(
        s,
        "LAST 7 DAYS",
        Point::new(card.x0 + pad, card.y0 + pad),
        &TextStyle::new(scene.px(18.0), p.text_sub).bold(),
    );

    let chart = Rect::new(
        card.x0 + pad,
        card.y0 + pad + scene.px(30.0),
        split - pad,
        card.y1 - pad,
    );
    paint_area_chart(s, scene, chart, &m.history);

    let ring_center = Point::new((split + card.x1) / 2.0, card.center().y);
    let ring_radius = (card.height() / 2.0 - pad).min((card.x1 - split) / 2.0 - pad / 2.0);
    paint_ring(s, scene, ring_center, ring_radius, m.today_percent);

    scene.px(DASHBOARD_HEIGHT)
}

/// Points for `history` (percent values) inside `area`, oldest on the left.
pub fn chart_points(area: Rect, history: &[f64]) -> Vec<Point> {
    let series: &[f64] = if history.is_empty() || history.iter().all(|v| *v <= 0.0) {
        &PLACEHOLDER
    } else {
        history
    };
    let n = series.len();
    let step = if n > 1 {
        area.width() / (n - 1) as f64
    } else {
        0.0
    };
    series
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let t = v.clamp(0.0, 100.0) / 100.0;
            Point::new(area.x0 + step * i as f64, area.y1 - t * area.height())
        })
        .collect()
}

/// Catmull-Rom spline through `points` as cubic segments.
pub fn smooth_line(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some(&first) = points.first() else {
        return path;
    };
    path.move_to(first);
    for i in 0..points.len().saturating_sub(1) {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(points.len() - 1)];
        let c1 = p1 + (p2 - p0) / 6.0;
        let c2 = p2 - (p3 - p1) / 6.0;
        path.curve_to(c1, c2, p2);
    }
    path
}

fn paint_area_chart(s: &mut dyn Surface, scene: &Scene<'_>, area: Rect, history: &[f64]) {
    let p = &scene.theme.palette;
    let placeholder = history.iter().all(|v| *v <= 0.0);
    let points = chart_points(area, history);
    let line = smooth_line(&points);
    let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) else {
        return;
    };

    let accent = if placeholder {
        p.text_sub.with_alpha(0.5)
    } else {
        p.accent
    };

    let mut fill = line.clone();
    fill.line_to((last.x, area.y1));
    fill.line_to((first.x, area.y1));
    fill.close_path();
    s.fill(
        &fill,
        &Paint::linear(
            Point::new(area.x0, area.y0),
            Point::new(area.x0, area.y1),
            accent.with_alpha(if placeholder { 0.12 } else { 0.45 }),
            accent.with_alpha(0.0),
        ),
    );
    s.stroke(&line, scene.px(4.0), &Paint::solid(accent));
    fill_circle(s, last, scene.px(7.0), &Paint::solid(accent));
}

/// Track circle plus a clockwise arc from 12 o'clock covering `percent`.
fn paint_ring(s: &mut dyn Surface, scene: &Scene<'_>, center: Point, radius: f64, percent: u32) {
    let p = &scene.theme.palette;
    let width = scene.px(14.0);
    s.stroke(
        &circle_path(center, radius),
        width,
        &Paint::solid(p.grid_inactive),
    );
    let sweep = f64::from(percent.min(100)) / 100.0 * TAU;
    if sweep > 0.0 {
        s.stroke(
            &arc_path(center, radius, -FRAC_PI_2, sweep),
            width,
            &Paint::solid(p.accent),
        );
    }
    draw_text(
        s,
        &format!("{percent}%"),
        center - (0.0, scene.px(10.0)),
        &TextStyle::new(scene.px(40.0), p.text_main).bold().centered(),
    );
    draw_text(
        s,
        "TODAY",
        center + (0.0, scene.px(26.0)),
        &TextStyle::new(scene.px(15.0), p.text_sub).centered(),
    );
}

#[cfg(test)]
#[path = "../../tests/unit/compose/header.rs"]
mod tests;
