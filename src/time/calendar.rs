//! Calendar math shared by the grid renderer and metric derivation.
//!
//! Every function works on naive *local* calendar dates. Habit logs are matched by local
//! day-string equality, so nothing here ever shifts a date through UTC.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Number of cells in the `weeks` grid (13 x 4).
pub const WEEKS_PER_GRID_YEAR: u32 = 52;

/// `YYYY-MM-DD` key for a local calendar day.
pub fn local_date_key(date: NaiveDate) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month(),
        date.day()
    )
}

/// Parse a `YYYY-MM-DD` prefix (extra time/zone suffixes are ignored).
///
/// `2024-03-05T23:30:00Z` yields `2024-03-05`: the calendar day as written, never shifted.
pub fn parse_local_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let head = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Day of year, `1..=366`.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Gregorian leap-year rule (4/100/400).
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// 365 or 366.
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// ISO-8601 week number (`1..=53`, Thursday-anchored).
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Whole weeks from `from` to `to`: `floor(days / 7)`; negative when `to` precedes `from`.
pub fn weeks_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days().div_euclid(7)
}

/// Day-of-week with Sunday = 0.
pub fn weekday_from_sunday(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Sunday on or before `date`.
pub fn week_start_sunday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(weekday_from_sunday(date)))
}

/// Index of `date` in the 52-cell `weeks` grid.
///
/// Weeks are counted from Jan 1 with boundaries on Sundays (the partial first week is week 0).
/// Days past the 52nd boundary (the tail of the year) fold into the last cell, so the "now"
/// highlight and per-week aggregation always agree.
pub fn week_of_year_index(date: NaiveDate) -> u32 {
    let Some(jan1) = NaiveDate::from_ymd_opt(date.year(), 1, 1) else {
        return 0;
    };
    let idx = (date.ordinal0() + weekday_from_sunday(jan1)) / 7;
    idx.min(WEEKS_PER_GRID_YEAR - 1)
}

/// First day of `year`.
pub fn year_start(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// Last day of `year`.
pub fn year_end(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 12, 31)
}

/// Month shape used by the `month` grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthLayout {
    /// 28..=31.
    pub days_in_month: u32,
    /// Weekday of the 1st, Sunday = 0.
    pub start_weekday_offset: u32,
}

impl MonthLayout {
    /// Rows a 7-column calendar needs for this month (4..=6).
    pub fn rows_needed(self) -> u32 {
        (self.start_weekday_offset + self.days_in_month).div_ceil(7)
    }
}

/// Day count and weekday offset for `month` (`1..=12`) of `year`.
pub fn month_grid_layout(year: i32, month: u32) -> Option<MonthLayout> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(MonthLayout {
        days_in_month: (next - first).num_days() as u32,
        start_weekday_offset: weekday_from_sunday(first),
    })
}

/// First and last day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let layout = month_grid_layout(date.year(), date.month())?;
    let first = date.with_day(1)?;
    let last = date.with_day(layout.days_in_month)?;
    Some((first, last))
}

/// One-letter weekday label, Sunday-first.
pub fn weekday_initial(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "S",
        Weekday::Mon => "M",
        Weekday::Tue => "T",
        Weekday::Wed => "W",
        Weekday::Thu => "T",
        Weekday::Fri => "F",
        Weekday::Sat => "S",
    }
}

/// Parse `HH:MM` (24-hour, optional `:SS`) into minutes since midnight.
pub fn parse_time_of_day(s: &str) -> Option<u32> {
    let mut parts = s.trim().split(':');
    let h: u32 = parts.next()?.trim().parse().ok()?;
    let m: u32 = parts.next()?.trim().parse().ok()?;
    (h < 24 && m < 60).then_some(h * 60 + m)
}

/// Format minutes since midnight as a 12-hour clock label (`7:30 AM`).
pub fn format_12h(minutes: u32) -> String {
    let h = (minutes / 60) % 24;
    let m = minutes % 60;
    let suffix = if h < 12 { "AM" } else { "PM" };
    let h12 = match h % 12 {
        0 => 12,
        x => x,
    };
    format!("{h12}:{m:02} {suffix}")
}

#[cfg(test)]
#[path = "../../tests/unit/time/calendar.rs"]
mod tests;
