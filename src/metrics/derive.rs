//! Render-scoped metrics recomputed from raw records on every render.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::foundation::math::{clamp_percent, percent};
use crate::model::records::Habit;
use crate::time::calendar::local_date_key;

/// Days per year used by the life-progress ratio.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Local `YYYY-MM-DD` -> number of distinct active habits completed that day.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivityMap {
    counts: BTreeMap<String, u32>,
}

impl ActivityMap {
    /// Build from habit logs. Inactive habits are skipped; a habit contributes at most one to
    /// any given day no matter how many done-logs it has there.
    pub fn from_habits(habits: &[Habit]) -> Self {
        let mut counts = BTreeMap::<String, u32>::new();
        for habit in habits.iter().filter(|h| h.active) {
            let days: BTreeSet<NaiveDate> = habit
                .logs
                .iter()
                .filter(|l| l.done)
                .filter_map(|l| l.date)
                .collect();
            for day in days {
                *counts.entry(local_date_key(day)).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    /// Count for `date` (zero when absent).
    pub fn count(&self, date: NaiveDate) -> u32 {
        self.counts.get(&local_date_key(date)).copied().unwrap_or(0)
    }

    /// Count by raw key.
    pub fn get(&self, key: &str) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Sum of counts over `days` consecutive days starting at `start`.
    pub fn sum_range(&self, start: NaiveDate, days: u32) -> u32 {
        (0..days)
            .map(|i| self.count(start + Duration::days(i64::from(i))))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }
}

/// Consecutive active days ending today, or ending yesterday when today has no activity yet.
pub fn current_streak(activity: &ActivityMap, today: NaiveDate) -> u32 {
    let mut day = if activity.count(today) > 0 {
        today
    } else {
        today - Duration::days(1)
    };
    let mut streak = 0;
    while activity.count(day) > 0 {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}

/// Completion percent per day for the 7 days ending today, oldest first.
pub fn growth_history(activity: &ActivityMap, today: NaiveDate, habit_count: u32) -> [f64; 7] {
    let mut out = [0.0; 7];
    for (i, slot) in out.iter_mut().enumerate() {
        let day = today - Duration::days(6 - i as i64);
        *slot = percent(f64::from(activity.count(day)), f64::from(habit_count));
    }
    out
}

/// Share of `life_expectancy_years` elapsed since `dob`, clamped to `0..=100`.
pub fn life_progress_percent(dob: NaiveDate, now: NaiveDateTime, life_expectancy_years: f64) -> f64 {
    let Some(born) = dob.and_hms_opt(0, 0, 0) else {
        return 0.0;
    };
    let lived_days = (now - born).num_seconds() as f64 / 86_400.0;
    clamp_percent(percent(lived_days, life_expectancy_years * DAYS_PER_YEAR))
}

/// Whole years between `dob` and `today`.
pub fn age_years(dob: NaiveDate, today: NaiveDate) -> u32 {
    today.years_since(dob).unwrap_or(0)
}

/// Everything the renderers need that is derived rather than stored.
#[derive(Clone, Debug, PartialEq)]
pub struct WallpaperMetrics {
    /// Local "today".
    pub today: NaiveDate,
    pub activity: ActivityMap,
    /// Number of active habits (the completion denominator).
    pub active_habits: u32,
    pub streak: u32,
    /// At least one habit logged today.
    pub logged_today: bool,
    /// Last 7 days of completion percent, oldest first.
    pub history: [f64; 7],
    pub today_percent: u32,
    pub life_percent: f64,
    pub age_years: u32,
}

impl WallpaperMetrics {
    /// Derive metrics from active habits and the date of birth at `now`.
    ///
    /// A missing date of birth is treated as "born today".
    pub fn derive(
        habits: &[Habit],
        dob: Option<NaiveDate>,
        life_expectancy_years: f64,
        now: NaiveDateTime,
    ) -> Self {
        let today = now.date();
        let activity = ActivityMap::from_habits(habits);
        let active_habits = habits.iter().filter(|h| h.active).count() as u32;
        let todays = activity.count(today);
        let dob = dob.unwrap_or(today);

        Self {
            today,
            streak: current_streak(&activity, today),
            logged_today: todays > 0,
            history: growth_history(&activity, today, active_habits),
            today_percent: percent(f64::from(todays), f64::from(active_habits)).round() as u32,
            life_percent: life_progress_percent(dob, now, life_expectancy_years),
            age_years: age_years(dob, today),
            active_habits,
            activity,
        }
    }

    /// Completion percent for one day.
    pub fn day_percent(&self, date: NaiveDate) -> f64 {
        percent(
            f64::from(self.activity.count(date)),
            f64::from(self.active_habits),
        )
    }

    /// Completion percent for `days` days starting at `start`, against `habits * days`.
    pub fn span_percent(&self, start: NaiveDate, days: u32) -> f64 {
        percent(
            f64::from(self.activity.sum_range(start, days)),
            f64::from(self.active_habits) * f64::from(days),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/metrics/derive.rs"]
mod tests;
