use super::*;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn date_key_is_zero_padded_local_day() {
    assert_eq!(local_date_key(d(2024, 3, 5)), "2024-03-05");
    assert_eq!(
        parse_local_date("2024-03-05T23:30:00Z"),
        Some(d(2024, 3, 5))
    );
    assert_eq!(parse_local_date("not a date"), None);
}

#[test]
fn leap_year_rule() {
    assert!(is_leap_year(2024));
    assert!(is_leap_year(2000));
    assert!(!is_leap_year(1900));
    assert!(!is_leap_year(2023));
    assert_eq!(days_in_year(2024), 366);
    assert_eq!(days_in_year(2025), 365);
    assert_eq!(day_of_year(d(2024, 12, 31)), 366);
}

#[test]
fn weeks_between_floors_whole_weeks() {
    // 24 years with six leap days.
    assert_eq!(weeks_between(d(2000, 1, 1), d(2024, 1, 1)), 8766 / 7);
    assert_eq!(weeks_between(d(2024, 1, 1), d(2024, 1, 7)), 0);
    assert_eq!(weeks_between(d(2024, 1, 1), d(2024, 1, 8)), 1);
    assert_eq!(weeks_between(d(2024, 1, 8), d(2024, 1, 1)), -1);
}

#[test]
fn iso_weeks_cross_year_boundaries() {
    assert_eq!(iso_week_number(d(2021, 1, 1)), 53);
    assert_eq!(iso_week_number(d(2024, 12, 30)), 1);
    assert_eq!(iso_week_number(d(2024, 6, 15)), 24);
}

#[test]
fn month_layout_offsets_from_sunday() {
    let feb = month_grid_layout(2024, 2).unwrap();
    assert_eq!(feb.days_in_month, 29);
    assert_eq!(feb.start_weekday_offset, 4);
    assert_eq!(feb.rows_needed(), 5);

    let dec = month_grid_layout(2023, 12).unwrap();
    assert_eq!(dec.days_in_month, 31);
    assert_eq!(dec.start_weekday_offset, 5);
    assert_eq!(dec.rows_needed(), 6);

    assert!(month_grid_layout(2024, 13).is_none());
}

#[test]
fn sunday_anchored_week_index() {
    // 2024-01-01 is a Monday.
    assert_eq!(week_of_year_index(d(2024, 1, 1)), 0);
    assert_eq!(week_of_year_index(d(2024, 1, 6)), 0);
    assert_eq!(week_of_year_index(d(2024, 1, 7)), 1);
    assert_eq!(week_of_year_index(d(2024, 12, 31)), 51);
    assert_eq!(week_start_sunday(d(2024, 1, 3)), d(2023, 12, 31));
}

#[test]
fn time_of_day_parsing_and_12h_format() {
    assert_eq!(parse_time_of_day("09:00"), Some(540));
    assert_eq!(parse_time_of_day("14:30:00"), Some(870));
    assert_eq!(parse_time_of_day("24:00"), None);
    assert_eq!(parse_time_of_day("soon"), None);

    assert_eq!(format_12h(0), "12:00 AM");
    assert_eq!(format_12h(450), "7:30 AM");
    assert_eq!(format_12h(12 * 60), "12:00 PM");
    assert_eq!(format_12h(13 * 60 + 5), "1:05 PM");
}
