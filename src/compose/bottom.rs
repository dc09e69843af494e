//! Habit checklist and focus-goal panels.

use chrono::{Duration, NaiveDate};

use crate::compose::Scene;
use crate::draw::primitives::{
    circle_path, draw_text, fill_circle, fill_round_rect, stroke_round_rect, truncate_chars,
};
use crate::draw::surface::{Paint, Surface, TextStyle};
use crate::foundation::core::{Point, Rect, Rgba8};
use crate::foundation::math::{clamp_percent, percent};
use crate::model::records::{Goal, Habit, select_focus_goal};
use crate::model::settings::Settings;
use crate::time::calendar::{week_start_sunday, weekday_initial};

/// Habits listed in the checklist.
pub const MAX_HABITS: usize = 5;
/// Character budget for habit titles.
pub const HABIT_TITLE_CHARS: usize = 16;
/// Character budget for goal titles.
pub const GOAL_TITLE_CHARS: usize = 26;

const PANEL_HEADER: f64 = 64.0;
const HABIT_ROW: f64 = 104.0;
const GOAL_PANEL: f64 = 300.0;
const PAD: f64 = 28.0;

/// What the goal panel shows.
#[derive(Clone, Debug, PartialEq)]
pub enum GoalView {
    /// A real goal.
    Focus {
        title: String,
        percent: u32,
        next_step: Option<String>,
    },
    /// The settings-driven overlay used when no real goal exists.
    Overlay {
        title: String,
        percent: u32,
        days_left: u32,
    },
    Empty,
}

impl GoalView {
    /// Focus goal if any, else the configured overlay, else empty.
    pub fn resolve(goals: &[Goal], settings: &Settings, today: NaiveDate) -> Self {
        if let Some(goal) = select_focus_goal(goals) {
            return GoalView::Focus {
                title: goal.title.clone(),
                percent: goal.progress_percent(),
                next_step: goal.next_step().map(|s| s.title.clone()),
            };
        }
        overlay(settings, today).unwrap_or(GoalView::Empty)
    }
}

fn overlay(settings: &Settings, today: NaiveDate) -> Option<GoalView> {
    if !settings.goal_enabled {
        return None;
    }
    let title = settings.goal_title.clone()?;
    let start = settings.goal_start_date?;
    let duration = settings.goal_duration_days.filter(|d| *d > 0)?;
    let elapsed = (today - start).num_days().max(0);
    let pct = clamp_percent(percent(elapsed as f64, f64::from(duration)));
    Some(GoalView::Overlay {
        title,
        percent: pct.round() as u32,
        days_left: (i64::from(duration) - elapsed).max(0) as u32,
    })
}

/// How the two panels share `area`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelArrangement {
    SideBySide,
    /// Habits above the goal (narrow column in `life` mode).
    Stacked,
}

fn listed_habits(habits: &[Habit]) -> Vec<&Habit> {
    habits.iter().filter(|h| h.active).take(MAX_HABITS).collect()
}

fn habit_panel_height(scene: &Scene<'_>, listed: usize) -> f64 {
    scene.px(PANEL_HEADER + PAD) + scene.px(HABIT_ROW) * listed.max(1) as f64
}

/// Height [`paint_bottom`] consumes for the same arguments, without painting.
pub fn bottom_height(
    scene: &Scene<'_>,
    habits: &[Habit],
    show_habits: bool,
    arrangement: PanelArrangement,
) -> f64 {
    let goal_h = scene.px(GOAL_PANEL);
    let gap = scene.px(24.0);
    if !show_habits {
        return goal_h + gap;
    }
    let habit_h = habit_panel_height(scene, listed_habits(habits).len());
    match arrangement {
        PanelArrangement::SideBySide => habit_h.max(goal_h) + gap,
        PanelArrangement::Stacked => habit_h + gap + goal_h + gap,
    }
}

/// Paint the bottom section into `area` (only `x0`, `x1` and `y0` are used).
/// Returns the height consumed.
pub fn paint_bottom(
    s: &mut dyn Surface,
    scene: &Scene<'_>,
    area: Rect,
    habits: &[Habit],
    goal: &GoalView,
    show_habits: bool,
    arrangement: PanelArrangement,
) -> f64 {
    let active = listed_habits(habits);
    let habit_h = habit_panel_height(scene, active.len());
    let goal_h = scene.px(GOAL_PANEL);
    let gap = scene.px(24.0);

    if !show_habits {
        let rect = Rect::new(area.x0, area.y0, area.x1, area.y0 + goal_h);
        paint_goal_panel(s, scene, rect, goal);
        return goal_h + gap;
    }

    match arrangement {
        PanelArrangement::SideBySide => {
            let h = habit_h.max(goal_h);
            let mid = (area.x0 + area.x1) / 2.0;
            let left = Rect::new(area.x0, area.y0, mid - gap / 2.0, area.y0 + h);
            let right = Rect::new(mid + gap / 2.0, area.y0, area.x1, area.y0 + h);
            paint_habit_panel(s, scene, left, &active);
            paint_goal_panel(s, scene, right, goal);
            h + gap
        }
        PanelArrangement::Stacked => {
            let top = Rect::new(area.x0, area.y0, area.x1, area.y0 + habit_h);
            let bottom = Rect::new(area.x0, top.y1 + gap, area.x1, top.y1 + gap + goal_h);
            paint_habit_panel(s, scene, top, &active);
            paint_goal_panel(s, scene, bottom, goal);
            habit_h + gap + goal_h + gap
        }
    }
}

fn panel(s: &mut dyn Surface, scene: &Scene<'_>, rect: Rect, title: &str) {
    let p = &scene.theme.palette;
    let r = scene.px(28.0);
    fill_round_rect(s, rect, r, &Paint::solid(p.card.with_alpha(0.82)));
    stroke_round_rect(s, rect, r, scene.px(1.5), &Paint::solid(Rgba8::WHITE.with_alpha(0.06)));
    draw_text(
        s,
        title,
        Point::new(rect.x0 + scene.px(PAD), rect.y0 + scene.px(PANEL_HEADER) / 2.0 + scene.px(8.0)),
        &TextStyle::new(scene.px(18.0), p.text_sub).bold(),
    );
}

fn empty_state(s: &mut dyn Surface, scene: &Scene<'_>, rect: Rect, text: &str) {
    let center = Point::new(rect.center().x, rect.y0 + (rect.height() + scene.px(PANEL_HEADER)) / 2.0);
    draw_text(
        s,
        text,
        center,
        &TextStyle::new(scene.px(22.0), scene.theme.palette.text_sub).centered(),
    );
}

fn paint_habit_panel(s: &mut dyn Surface, scene: &Scene<'_>, rect: Rect, habits: &[&Habit]) {
    let p = &scene.theme.palette;
    let today = scene.metrics.today;
    panel(s, scene, rect, "HABITS");

    if habits.is_empty() {
        empty_state(s, scene, rect, "No active habits");
        return;
    }

    let done = habits.iter().filter(|h| h.done_on(today)).count();
    draw_text(
        s,
        &format!("{done}/{}", habits.len()),
        Point::new(rect.x1 - scene.px(PAD), rect.y0 + scene.px(PANEL_HEADER) / 2.0 + scene.px(8.0)),
        &TextStyle::new(scene.px(18.0), p.accent).bold().right(),
    );

    let week_start = week_start_sunday(today);
    let x0 = rect.x0 + scene.px(PAD);
    let dot_r = scene.px(7.0);
    let dot_step = scene.px(34.0);
    for (i, habit) in habits.iter().enumerate() {
        let top = rect.y0 + scene.px(PANEL_HEADER) + scene.px(HABIT_ROW) * i as f64;
        let line = top + scene.px(24.0);

        let indicator = Point::new(x0 + scene.px(12.0), line);
        if habit.done_on(today) {
            fill_circle(s, indicator, scene.px(12.0), &Paint::solid(p.accent));
        } else {
            s.stroke(
                &circle_path(indicator, scene.px(11.0)),
                scene.px(2.5),
                &Paint::solid(p.text_sub),
            );
        }
        draw_text(
            s,
            &truncate_chars(&habit.title, HABIT_TITLE_CHARS),
            Point::new(x0 + scene.px(36.0), line),
            &TextStyle::new(scene.px(24.0), p.text_main).bold(),
        );
        if let Some(time) = habit.time_label() {
            draw_text(
                s,
                &time,
                Point::new(rect.x1 - scene.px(PAD), line),
                &TextStyle::new(scene.px(16.0), p.text_sub).right(),
            );
        }

        for k in 0..7 {
            let day = week_start + Duration::days(k);
            let cx = x0 + scene.px(48.0) + dot_step * k as f64;
            let dot = Point::new(cx, top + scene.px(60.0));
            let color = if habit.done_on(day) {
                p.accent
            } else if day > today {
                p.grid_inactive.with_alpha(0.4)
            } else {
                p.grid_inactive
            };
            fill_circle(s, dot, dot_r, &Paint::solid(color));
            if day == today {
                s.stroke(
                    &circle_path(dot, dot_r + scene.px(3.0)),
                    scene.px(1.5),
                    &Paint::solid(p.text_main.with_alpha(0.6)),
                );
            }
            draw_text(
                s,
                weekday_initial(chrono::Datelike::weekday(&day)),
                Point::new(cx, top + scene.px(86.0)),
                &TextStyle::new(scene.px(13.0), p.text_sub).centered(),
            );
        }
    }
}

fn paint_goal_panel(s: &mut dyn Surface, scene: &Scene<'_>, rect: Rect, goal: &GoalView) {
    let p = &scene.theme.palette;
    panel(s, scene, rect, "FOCUS");

    let (title, pct, footer) = match goal {
        GoalView::Empty => {
            empty_state(s, scene, rect, "No active goal");
            return;
        }
        GoalView::Focus {
            title,
            percent,
            next_step,
        } => (
            title,
            *percent,
            next_step.as_ref().map(|n| format!("Next: {}", truncate_chars(n, GOAL_TITLE_CHARS))),
        ),
        GoalView::Overlay {
            title,
            percent,
            days_left,
        } => (
            title,
            *percent,
            Some(match days_left {
                1 => "1 day left".to_owned(),
                n => format!("{n} days left"),
            }),
        ),
    };

    let x0 = rect.x0 + scene.px(PAD);
    let x1 = rect.x1 - scene.px(PAD);
    let top = rect.y0 + scene.px(PANEL_HEADER);
    draw_text(
        s,
        &truncate_chars(title, GOAL_TITLE_CHARS),
        Point::new(x0, top + scene.px(26.0)),
        &TextStyle::new(scene.px(28.0), p.text_main).bold(),
    );

    let track = Rect::new(x0, top + scene.px(74.0), x1, top + scene.px(92.0));
    let r = track.height() / 2.0;
    fill_round_rect(s, track, r, &Paint::solid(p.grid_inactive));
    let pct = pct.min(100);
    if pct > 0 {
        let fill_w = (track.width() * f64::from(pct) / 100.0).max(track.height());
        let bar = Rect::new(track.x0, track.y0, track.x0 + fill_w, track.y1);
        fill_round_rect(
            s,
            bar,
            r,
            &Paint::linear(
                Point::new(track.x0, track.y0),
                Point::new(track.x1, track.y0),
                p.accent,
                p.grid_active,
            ),
        );
    }

    draw_text(
        s,
        &format!("{pct}% complete"),
        Point::new(x0, top + scene.px(128.0)),
        &TextStyle::new(scene.px(20.0), p.text_main),
    );
    if let Some(footer) = footer {
        draw_text(
            s,
            &footer,
            Point::new(x0, top + scene.px(170.0)),
            &TextStyle::new(scene.px(18.0), p.text_sub),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/bottom.rs"]
mod tests;
