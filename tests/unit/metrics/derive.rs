use super::*;
use crate::model::records::HabitLog;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn noon(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(12, 0, 0).unwrap()
}

fn habit_done_on(title: &str, days: &[NaiveDate]) -> Habit {
    let mut h = Habit::new(title);
    h.logs = days
        .iter()
        .map(|&date| HabitLog {
            date: Some(date),
            done: true,
        })
        .collect();
    h
}

#[test]
fn activity_counts_distinct_active_habits() {
    let day = d(2024, 3, 10);
    let a = habit_done_on("a", &[day, day]);
    let b = habit_done_on("b", &[day]);
    let mut inactive = habit_done_on("c", &[day]);
    inactive.active = false;

    let map = ActivityMap::from_habits(&[a.clone(), b, inactive]);
    assert_eq!(map.count(day), 2);
    assert_eq!(map.get("2024-03-10"), 2);

    // One more duplicate done-log for the same habit/day does not change the count.
    let mut a2 = a;
    a2.logs.push(HabitLog {
        date: Some(day),
        done: true,
    });
    let map2 = ActivityMap::from_habits(&[a2, habit_done_on("b", &[day])]);
    assert_eq!(map2.count(day), 2);
}

#[test]
fn streak_counts_back_from_yesterday_when_today_not_logged() {
    let today = d(2024, 6, 10);
    let h = habit_done_on("run", &[d(2024, 6, 7), d(2024, 6, 8), d(2024, 6, 9)]);
    let map = ActivityMap::from_habits(std::slice::from_ref(&h));
    assert_eq!(current_streak(&map, today), 3);

    let mut h2 = h;
    h2.logs.push(HabitLog {
        date: Some(today),
        done: true,
    });
    let map = ActivityMap::from_habits(&[h2]);
    assert_eq!(current_streak(&map, today), 4);
}

#[test]
fn streak_breaks_on_gap() {
    let today = d(2024, 6, 10);
    let h = habit_done_on("run", &[d(2024, 6, 6), d(2024, 6, 9)]);
    let map = ActivityMap::from_habits(&[h]);
    assert_eq!(current_streak(&map, today), 1);
    assert_eq!(current_streak(&ActivityMap::default(), today), 0);
}

#[test]
fn history_is_oldest_first_and_guarded() {
    let today = d(2024, 6, 10);
    let h1 = habit_done_on("a", &[today, d(2024, 6, 4)]);
    let h2 = habit_done_on("b", &[today]);
    let map = ActivityMap::from_habits(&[h1, h2]);
    let hist = growth_history(&map, today, 2);
    assert_eq!(hist[0], 50.0);
    assert_eq!(hist[6], 100.0);
    assert_eq!(hist[3], 0.0);

    let zero = growth_history(&map, today, 0);
    assert!(zero.iter().all(|v| *v == 0.0));
}

#[test]
fn life_progress_uses_quarter_day_years() {
    let p = life_progress_percent(d(2000, 1, 1), d(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap(), 80.0);
    assert!((p - 8766.0 / (80.0 * 365.25) * 100.0).abs() < 1e-9);

    assert_eq!(life_progress_percent(d(2030, 1, 1), noon(d(2024, 1, 1)), 80.0), 0.0);
    assert_eq!(life_progress_percent(d(1900, 1, 1), noon(d(2024, 1, 1)), 80.0), 100.0);
}

#[test]
fn empty_state_still_derives_life_progress() {
    let m = WallpaperMetrics::derive(&[], Some(d(1990, 1, 1)), 80.0, noon(d(2024, 1, 1)));
    assert_eq!(m.active_habits, 0);
    assert_eq!(m.today_percent, 0);
    assert_eq!(m.streak, 0);
    assert!(!m.logged_today);
    assert!(m.life_percent > 40.0 && m.life_percent < 45.0);
    assert_eq!(m.age_years, 34);
    assert_eq!(m.day_percent(d(2024, 1, 1)), 0.0);
    assert_eq!(m.span_percent(d(2024, 1, 1), 7), 0.0);
}

#[test]
fn today_percent_rounds() {
    let today = d(2024, 6, 10);
    let habits = vec![
        habit_done_on("a", &[today]),
        habit_done_on("b", &[today]),
        habit_done_on("c", &[]),
    ];
    let m = WallpaperMetrics::derive(&habits, None, 80.0, noon(today));
    assert_eq!(m.today_percent, 67);
    assert!(m.logged_today);
    assert_eq!(m.life_percent, 0.0);
}
