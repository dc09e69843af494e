use chrono::NaiveDate;

use super::*;
use crate::compose::Theme;
use crate::draw::surface::Paint;
use crate::foundation::core::Canvas;
use crate::metrics::derive::WallpaperMetrics;
use crate::model::records::{HabitLog, SubGoal};
use crate::render::recording::{DrawOp, RecordingSurface};
use crate::theme::palette::ThemeId;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn canvas() -> Canvas {
    Canvas::new(1170, 2532).unwrap()
}

fn metrics(habits: &[Habit], today: NaiveDate) -> WallpaperMetrics {
    WallpaperMetrics::derive(habits, None, 80.0, today.and_hms_opt(7, 0, 0).unwrap())
}

fn area() -> Rect {
    Rect::new(60.0, 1800.0, 1110.0, 1800.0)
}

fn habit(title: &str, done: &[NaiveDate]) -> Habit {
    let mut h = Habit::new(title);
    h.logs = done
        .iter()
        .map(|&date| HabitLog {
            date: Some(date),
            done: true,
        })
        .collect();
    h
}

fn sub(title: &str, completed: bool) -> SubGoal {
    SubGoal {
        title: title.to_owned(),
        completed,
    }
}

#[test]
fn goal_view_prefers_the_focus_goal() {
    let mut goal = Goal::new("Ship v2");
    goal.progress = Some(10.0);
    goal.sub_goals = vec![sub("Design", true), sub("Build", true), sub("Launch", false)];
    let mut settings = Settings::default();
    settings.goal_enabled = true;
    settings.goal_title = Some("Overlay".into());

    let view = GoalView::resolve(&[goal], &settings, d(2024, 6, 10));
    assert_eq!(
        view,
        GoalView::Focus {
            title: "Ship v2".into(),
            percent: 67,
            next_step: Some("Launch".into()),
        }
    );
}

#[test]
fn goal_view_falls_back_to_the_overlay() {
    let mut settings = Settings::default();
    settings.goal_enabled = true;
    settings.goal_title = Some("Read 12 books".into());
    settings.goal_start_date = Some(d(2024, 6, 1));
    settings.goal_duration_days = Some(40);

    let mut done = Goal::new("finished");
    done.completed = true;
    let view = GoalView::resolve(&[done], &settings, d(2024, 6, 11));
    assert_eq!(
        view,
        GoalView::Overlay {
            title: "Read 12 books".into(),
            percent: 25,
            days_left: 30,
        }
    );

    let late = GoalView::resolve(&[], &settings, d(2024, 9, 1));
    assert!(matches!(late, GoalView::Overlay { percent: 100, days_left: 0, .. }));
}

#[test]
fn incomplete_overlay_settings_mean_no_goal() {
    let mut settings = Settings::default();
    settings.goal_enabled = true;
    settings.goal_title = Some("x".into());
    settings.goal_start_date = Some(d(2024, 6, 1));
    assert_eq!(GoalView::resolve(&[], &settings, d(2024, 6, 2)), GoalView::Empty);

    settings.goal_duration_days = Some(0);
    assert_eq!(GoalView::resolve(&[], &settings, d(2024, 6, 2)), GoalView::Empty);

    settings.goal_duration_days = Some(10);
    settings.goal_enabled = false;
    assert_eq!(GoalView::resolve(&[], &settings, d(2024, 6, 2)), GoalView::Empty);
}

#[test]
fn empty_states_render_without_data() {
    let today = d(2024, 6, 10);
    let m = metrics(&[], today);
    let scene = Scene::new(canvas(), Theme::new(ThemeId::Midnight), &m);
    let mut s = RecordingSurface::new(canvas());
    let used = paint_bottom(
        &mut s,
        &scene,
        area(),
        &[],
        &GoalView::Empty,
        true,
        PanelArrangement::SideBySide,
    );
    assert!(used > 0.0);
    let list = s.finish().unwrap();
    assert!(list.has_text("No active habits"));
    assert!(list.has_text("No active goal"));
}

#[test]
fn habit_rows_show_today_and_the_sunday_first_week() {
    // 2024-06-12 is a Wednesday; its week starts Sunday 2024-06-09.
    let today = d(2024, 6, 12);
    let mut read = habit("Read", &[d(2024, 6, 9), today]);
    read.scheduled_time = Some("07:30".into());
    let habits = vec![read, habit("Drink more water daily", &[d(2024, 6, 10)])];
    let m = metrics(&habits, today);
    let scene = Scene::new(canvas(), Theme::new(ThemeId::Forest), &m);
    let mut s = RecordingSurface::new(canvas());
    paint_bottom(
        &mut s,
        &scene,
        area(),
        &habits,
        &GoalView::Empty,
        true,
        PanelArrangement::SideBySide,
    );
    let list = s.finish().unwrap();

    assert!(list.has_text("1/2"));
    assert!(list.has_text("7:30 AM"));
    assert!(list.has_text("Drink more wate…"));
    let initials: Vec<&str> = list
        .texts()
        .filter(|t| t.len() == 1 && t.chars().all(|c| c.is_ascii_uppercase()))
        .take(7)
        .collect();
    assert_eq!(initials, vec!["S", "M", "T", "W", "T", "F", "S"]);

    let accent = scene.theme.palette.accent;
    let dot_r = scene.px(7.0);
    let accent_dots = list
        .fills()
        .filter(|(b, p)| {
            (b.width() - 2.0 * dot_r).abs() < 0.5 && **p == Paint::solid(accent)
        })
        .count();
    // Sunday + Wednesday for "Read", Monday for the second habit.
    assert_eq!(accent_dots, 3);
}

#[test]
fn inactive_habits_are_skipped_and_capped() {
    let today = d(2024, 6, 12);
    let mut habits: Vec<Habit> = (0..7).map(|i| habit(&format!("h{i}"), &[])).collect();
    habits[0].active = false;
    let m = metrics(&habits, today);
    let scene = Scene::new(canvas(), Theme::new(ThemeId::Midnight), &m);
    let mut s = RecordingSurface::new(canvas());
    paint_bottom(
        &mut s,
        &scene,
        area(),
        &habits,
        &GoalView::Empty,
        true,
        PanelArrangement::Stacked,
    );
    let list = s.finish().unwrap();
    assert!(!list.has_text("h0"));
    assert!(list.has_text("h5"));
    assert!(!list.has_text("h6"));
    assert!(list.has_text("0/5"));
}

#[test]
fn goal_panel_draws_progress_and_next_step() {
    let today = d(2024, 6, 12);
    let m = metrics(&[], today);
    let scene = Scene::new(canvas(), Theme::new(ThemeId::Midnight), &m);
    let goal = GoalView::Focus {
        title: "Ship v2".into(),
        percent: 67,
        next_step: Some("Launch".into()),
    };
    let mut s = RecordingSurface::new(canvas());
    paint_bottom(&mut s, &scene, area(), &[], &goal, false, PanelArrangement::SideBySide);
    let list = s.finish().unwrap();

    assert!(list.has_text("Ship v2"));
    assert!(list.has_text("67% complete"));
    assert!(list.has_text("Next: Launch"));
    assert!(!list.has_text("HABITS"));

    let gradients: Vec<Rect> = list
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Fill {
                bounds,
                paint: Paint::Linear { .. },
                ..
            } => Some(*bounds),
            _ => None,
        })
        .collect();
    assert_eq!(gradients.len(), 1);
    // Without the habit panel the goal spans the whole width.
    let track_w = 1050.0 - 2.0 * scene.px(28.0);
    assert!((gradients[0].width() - track_w * 0.67).abs() < 1e-6);
}

#[test]
fn overlay_shows_days_left() {
    let m = metrics(&[], d(2024, 6, 12));
    let scene = Scene::new(canvas(), Theme::new(ThemeId::Midnight), &m);
    let mut s = RecordingSurface::new(canvas());
    let goal = GoalView::Overlay {
        title: "Marathon".into(),
        percent: 90,
        days_left: 1,
    };
    paint_bottom(&mut s, &scene, area(), &[], &goal, false, PanelArrangement::SideBySide);
    let list = s.finish().unwrap();
    assert!(list.has_text("90% complete"));
    assert!(list.has_text("1 day left"));
}

#[test]
fn stacked_is_taller_than_side_by_side() {
    let today = d(2024, 6, 12);
    let habits = vec![habit("a", &[]), habit("b", &[])];
    let m = metrics(&habits, today);
    let scene = Scene::new(canvas(), Theme::new(ThemeId::Midnight), &m);
    let side = paint_bottom(
        &mut RecordingSurface::new(canvas()),
        &scene,
        area(),
        &habits,
        &GoalView::Empty,
        true,
        PanelArrangement::SideBySide,
    );
    let stacked = paint_bottom(
        &mut RecordingSurface::new(canvas()),
        &scene,
        area(),
        &habits,
        &GoalView::Empty,
        true,
        PanelArrangement::Stacked,
    );
    assert!(stacked > side);
}

#[test]
fn bottom_height_matches_what_paint_bottom_consumes() {
    let today = d(2024, 6, 12);
    let habits: Vec<Habit> = (0..7).map(|i| habit(&format!("h{i}"), &[])).collect();
    let m = metrics(&habits, today);
    let scene = Scene::new(canvas(), Theme::new(ThemeId::Midnight), &m);
    for show in [true, false] {
        for arrangement in [PanelArrangement::SideBySide, PanelArrangement::Stacked] {
            for listed in [&habits[..0], &habits[..2], &habits[..]] {
                let painted = paint_bottom(
                    &mut RecordingSurface::new(canvas()),
                    &scene,
                    area(),
                    listed,
                    &GoalView::Empty,
                    show,
                    arrangement,
                );
                let measured = bottom_height(&scene, listed, show, arrangement);
                assert_eq!(painted, measured, "{arrangement:?} show={show} n={}", listed.len());
            }
        }
    }
}
