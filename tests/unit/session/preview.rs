use chrono::NaiveDate;

use super::*;
use crate::model::settings::GridMode;

fn at(h: u32, m: u32, s: u32, milli: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 12, 31)
        .unwrap()
        .and_hms_milli_opt(h, m, s, milli)
        .unwrap()
}

#[test]
fn first_repaint_waits_for_the_next_minute() {
    assert_eq!(delay_to_next_minute(at(9, 0, 15, 0)), Duration::from_secs(45));
    assert_eq!(delay_to_next_minute(at(9, 0, 59, 500)), Duration::from_millis(500));
    assert_eq!(delay_to_next_minute(at(9, 0, 0, 0)), REPAINT_PERIOD);

    let s = PreviewScheduler::new(at(9, 0, 15, 250));
    assert_eq!(s.due(), Some(at(9, 1, 0, 0)));
    assert_eq!(s.next_delay(at(9, 0, 15, 250)), Some(Duration::from_millis(44_750)));
}

#[test]
fn repaints_every_minute_after_alignment() {
    let mut s = PreviewScheduler::new(at(9, 0, 15, 0));
    assert!(!s.poll(at(9, 0, 59, 999)));
    assert!(s.poll(at(9, 1, 0, 0)));
    assert_eq!(s.due(), Some(at(9, 2, 0, 0)));
    assert!(!s.poll(at(9, 1, 30, 0)));

    // A late wake-up skips missed ticks instead of firing repeatedly.
    assert!(s.poll(at(9, 5, 10, 0)));
    assert_eq!(s.due(), Some(at(9, 6, 0, 0)));
    assert!(!s.poll(at(9, 5, 11, 0)));
}

#[test]
fn background_views_never_repaint() {
    let mut s = PreviewScheduler::new(at(9, 0, 0, 0));
    s.background();
    assert!(!s.is_visible());
    assert_eq!(s.next_delay(at(9, 0, 30, 0)), None);
    assert!(!s.poll(at(9, 10, 0, 0)));

    assert!(s.foreground(at(9, 10, 20, 0)));
    assert_eq!(s.due(), Some(at(9, 11, 0, 0)));
    // Already visible: nothing to do.
    assert!(!s.foreground(at(9, 10, 21, 0)));
}

#[test]
fn session_repaints_with_the_current_clock() {
    let mut input = WallpaperInput::default();
    input.settings.year_grid_mode = GridMode::Days;
    let mut session = PreviewSession::start(input, at(23, 59, 30, 0)).unwrap();
    assert_eq!(session.repaints(), 1);
    let (list, _) = session.frame().unwrap();
    assert!(list.has_text("DAY 366 / 366"));

    assert!(!session.tick(at(23, 59, 45, 0)).unwrap());
    let midnight = NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert!(session.tick(midnight).unwrap());
    assert_eq!(session.repaints(), 2);
    assert_eq!(session.input().now, midnight);
    let (list, stats) = session.frame().unwrap();
    assert!(list.has_text("DAY 1 / 365"));
    assert_eq!(stats.grid.as_ref().and_then(|g| g.now_index), Some(0));
}

#[test]
fn foregrounding_repaints_immediately() {
    let mut session = PreviewSession::start(WallpaperInput::default(), at(8, 0, 0, 0)).unwrap();
    session.background();
    assert!(!session.tick(at(8, 3, 0, 0)).unwrap());
    assert!(session.foreground(at(8, 3, 5, 0)).unwrap());
    assert_eq!(session.repaints(), 2);
    assert!(!session.foreground(at(8, 3, 6, 0)).unwrap());
}

#[test]
fn export_without_fonts_still_produces_png() {
    let mut input = WallpaperInput::default();
    input.settings.canvas_width = 234;
    input.settings.canvas_height = 506;
    let session = PreviewSession::start(input, at(12, 0, 0, 0)).unwrap();
    let png = session.export_png(&FontLibrary::empty()).unwrap();
    assert_eq!(&png[1..4], b"PNG");
}
