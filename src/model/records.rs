use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::math::round_percent;
use crate::model::lenient;
use crate::time::calendar::{format_12h, parse_time_of_day};

/// One day's check-in for a habit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HabitLog {
    /// Local calendar day; `None` if the stored value could not be parsed.
    #[serde(deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient::flag")]
    pub done: bool,
}

/// A recurring habit with its completion history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default = "lenient::untitled", deserialize_with = "lenient::title")]
    pub title: String,
    /// `HH:MM`, 24-hour.
    #[serde(default, alias = "time", deserialize_with = "lenient::text")]
    pub scheduled_time: Option<String>,
    #[serde(default = "lenient::yes", deserialize_with = "lenient::flag_default_true")]
    pub active: bool,
    #[serde(default, deserialize_with = "lenient::list")]
    pub logs: Vec<HabitLog>,
}

impl Habit {
    /// Titled, active habit with no logs.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            scheduled_time: None,
            active: true,
            logs: Vec::new(),
        }
    }

    /// Whether any log on `date` is marked done. Duplicate logs for a day count once.
    pub fn done_on(&self, date: NaiveDate) -> bool {
        self.logs.iter().any(|l| l.done && l.date == Some(date))
    }

    /// Scheduled time as a 12-hour label, when set and parseable.
    pub fn time_label(&self) -> Option<String> {
        self.scheduled_time
            .as_deref()
            .and_then(parse_time_of_day)
            .map(format_12h)
    }
}

/// A checklist step inside a goal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubGoal {
    #[serde(default = "lenient::untitled", deserialize_with = "lenient::title")]
    pub title: String,
    #[serde(default, alias = "done", deserialize_with = "lenient::flag")]
    pub completed: bool,
}

/// A goal, optionally broken into sub-goals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default = "lenient::untitled", deserialize_with = "lenient::title")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    /// Free text; `LifeMilestone` (any case) marks life milestones.
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub completed: bool,
    /// Stored progress `0..=100`, used only when there are no sub-goals.
    #[serde(default, deserialize_with = "lenient::number")]
    pub progress: Option<f64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub pinned: bool,
    #[serde(default, deserialize_with = "lenient::list")]
    pub sub_goals: Vec<SubGoal>,
    #[serde(default, deserialize_with = "lenient::datetime")]
    pub created_at: Option<NaiveDateTime>,
}

impl Goal {
    /// Open goal with a title and nothing else.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: None,
            category: None,
            completed: false,
            progress: None,
            pinned: false,
            sub_goals: Vec::new(),
            created_at: None,
        }
    }

    /// Displayed progress percent.
    ///
    /// With sub-goals this is `round(100 * completed / total)` and the stored field is ignored.
    pub fn progress_percent(&self) -> u32 {
        if self.sub_goals.is_empty() {
            let p = self.progress.unwrap_or(0.0);
            if p.is_finite() {
                p.clamp(0.0, 100.0).round() as u32
            } else {
                0
            }
        } else {
            let done = self.sub_goals.iter().filter(|s| s.completed).count() as u32;
            round_percent(done, self.sub_goals.len() as u32)
        }
    }

    /// First sub-goal not yet completed.
    pub fn next_step(&self) -> Option<&SubGoal> {
        self.sub_goals.iter().find(|s| !s.completed)
    }

    pub fn is_life_milestone(&self) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| c.trim().eq_ignore_ascii_case("lifemilestone"))
    }
}

/// Pick the "active focus" goal: open goals only, pinned first, then the most recently created.
///
/// Goals without a creation time sort oldest; ties go to the later list entry.
pub fn select_focus_goal(goals: &[Goal]) -> Option<&Goal> {
    goals
        .iter()
        .filter(|g| !g.completed)
        .max_by_key(|g| (g.pinned, g.created_at))
}

/// A dated reminder shown as a callout on the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default = "lenient::untitled", deserialize_with = "lenient::title")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub end_date: Option<NaiveDate>,
    /// `HH:MM`, 24-hour.
    #[serde(default, deserialize_with = "lenient::text")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub full_day: bool,
    #[serde(default, deserialize_with = "lenient::color")]
    pub marker_color: Option<Rgba8>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub marker_icon: Option<String>,
    /// `1..=4`, higher is more urgent.
    #[serde(default = "lenient::one", deserialize_with = "lenient::priority")]
    pub priority: u8,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub important: bool,
}

impl Reminder {
    /// Single-day reminder on `date`.
    pub fn on(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: None,
            start_date: Some(date),
            end_date: Some(date),
            start_time: None,
            end_time: None,
            full_day: false,
            marker_color: None,
            marker_icon: None,
            priority: 1,
            important: false,
        }
    }

    /// Inclusive date span. Missing start means `today`, missing end means the start day,
    /// and an end before the start collapses to the start day.
    pub fn span(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = self.start_date.unwrap_or(today);
        let end = self.end_date.unwrap_or(start).max(start);
        (start, end)
    }

    pub fn covers(&self, date: NaiveDate, today: NaiveDate) -> bool {
        let (start, end) = self.span(today);
        start <= date && date <= end
    }

    /// Minutes since midnight used for ordering; full-day or untimed reminders sort as `00:00`.
    pub fn sort_minutes(&self) -> u32 {
        if self.full_day {
            return 0;
        }
        self.start_time
            .as_deref()
            .and_then(parse_time_of_day)
            .unwrap_or(0)
    }

    /// `All Day` or the 12-hour start time.
    pub fn time_label(&self) -> String {
        if self.full_day {
            return "All Day".to_owned();
        }
        match self.start_time.as_deref().and_then(parse_time_of_day) {
            Some(m) => format_12h(m),
            None => "All Day".to_owned(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/records.rs"]
mod tests;
