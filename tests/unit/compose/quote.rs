use chrono::NaiveDate;

use super::*;
use crate::compose::Theme;
use crate::foundation::core::Canvas;
use crate::metrics::derive::WallpaperMetrics;
use crate::render::recording::{DrawOp, RecordingSurface};
use crate::theme::palette::ThemeId;

fn metrics() -> WallpaperMetrics {
    let now = NaiveDate::from_ymd_opt(2024, 6, 10)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    WallpaperMetrics::derive(&[], None, 80.0, now)
}

#[test]
fn no_quote_paints_nothing() {
    let canvas = Canvas::new(1170, 2532).unwrap();
    let m = metrics();
    let scene = Scene::new(canvas, Theme::new(ThemeId::Midnight), &m);
    let mut s = RecordingSurface::new(canvas);
    assert_eq!(paint_quote(&mut s, &scene, 2200.0, None), 0.0);
    assert_eq!(paint_quote(&mut s, &scene, 2200.0, Some("   ")), 0.0);
    assert!(s.ops().is_empty());
}

#[test]
fn quote_is_uppercased_and_centered_above_the_brand() {
    let canvas = Canvas::new(1170, 2532).unwrap();
    let m = metrics();
    let scene = Scene::new(canvas, Theme::new(ThemeId::Paper), &m);
    let mut s = RecordingSurface::new(canvas);
    let used = paint_quote(&mut s, &scene, 2200.0, Some("Small steps, every day"));
    assert!(used > 0.0);

    let list = s.finish().unwrap();
    let texts: Vec<(&str, f64)> = list
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, at, .. } => Some((text.as_str(), at.x)),
            _ => None,
        })
        .collect();
    assert_eq!(texts[0], ("SMALL STEPS, EVERY DAY", 585.0));
    assert_eq!(texts.last().map(|t| t.0), Some(BRAND));
}

#[test]
fn long_quotes_wrap_and_cap_at_four_lines() {
    let long = "word ".repeat(200);
    let lines = quote_lines(&long, 300.0, 30.0);
    assert_eq!(lines.len(), 4);
    assert!(lines[3].ends_with('…'));
    assert!(lines[..3].iter().all(|l| l.chars().count() <= 16));

    assert_eq!(quote_lines("carpe diem", 900.0, 30.0), vec!["CARPE DIEM"]);
}
