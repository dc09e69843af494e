use super::*;

#[test]
fn defaults_fill_missing_fields() {
    let s: Settings = serde_json::from_value(serde_json::json!({})).unwrap();
    assert_eq!(s, Settings::default());
    assert_eq!(s.life_expectancy(), 80.0);
    assert!(s.show_quote);
}

#[test]
fn lenient_fields_never_fail_the_record() {
    let s: Settings = serde_json::from_value(serde_json::json!({
        "theme": "neon",
        "dateOfBirth": "garbage",
        "yearGridMode": "hours",
        "wallpaperType": "LOCKSCREEN",
        "showQuote": "false",
        "goalEnabled": 1,
        "goalDurationDays": "30",
        "goalStartDate": "2024-02-01T08:00:00.000Z",
    }))
    .unwrap();
    assert_eq!(s.theme, ThemeId::Midnight);
    assert_eq!(s.date_of_birth, None);
    assert_eq!(s.year_grid_mode, GridMode::Days);
    assert_eq!(s.wallpaper_type, WallpaperType::Lockscreen);
    assert!(!s.show_quote);
    assert!(s.goal_enabled);
    assert_eq!(s.goal_duration_days, Some(30));
    assert_eq!(s.goal_start_date, NaiveDate::from_ymd_opt(2024, 2, 1));
}

#[test]
fn overrides_apply_per_field_without_mutating_base() {
    let base = Settings {
        theme: ThemeId::Ocean,
        show_quote: true,
        quote_text: "stored".to_owned(),
        ..Settings::default()
    };
    let o = SettingsOverrides {
        theme: Some("paper".to_owned()),
        width: Some("640".to_owned()),
        height: Some("abc".to_owned()),
        year_grid_mode: Some("life".to_owned()),
        show_quote: Some("1".to_owned()),
        show_age_stats: Some("true".to_owned()),
        dob: Some("1990-06-15".to_owned()),
        life_expectancy_years: Some("90".to_owned()),
        ..SettingsOverrides::default()
    };
    let s = base.with_overrides(&o);

    assert_eq!(s.theme, ThemeId::Paper);
    assert_eq!(s.canvas_width, 640);
    assert_eq!(s.canvas_height, DEFAULT_CANVAS_HEIGHT);
    assert_eq!(s.year_grid_mode, GridMode::Life);
    // Only the literal "true" turns a flag on.
    assert!(!s.show_quote);
    assert!(s.show_age_stats);
    assert_eq!(s.date_of_birth, NaiveDate::from_ymd_opt(1990, 6, 15));
    assert_eq!(s.life_expectancy_years, 90.0);

    assert_eq!(base.theme, ThemeId::Ocean);
    assert!(base.show_quote);
}

#[test]
fn overrides_deserialize_from_camel_case_query_keys() {
    let o: SettingsOverrides = serde_json::from_value(serde_json::json!({
        "lifeExpectancyYears": "75",
        "yearGridMode": "month",
        "showHabitLayer": "true",
    }))
    .unwrap();
    assert_eq!(o.life_expectancy_years.as_deref(), Some("75"));
    assert_eq!(o.year_grid_mode.as_deref(), Some("month"));
    assert_eq!(o.show_habit_layer.as_deref(), Some("true"));
}

#[test]
fn quote_is_bounded_and_hidden_when_disabled() {
    let s = Settings {
        quote_text: "x".repeat(500),
        ..Settings::default()
    };
    assert_eq!(s.quote().unwrap().chars().count(), MAX_QUOTE_CHARS);

    let hidden = Settings {
        show_quote: false,
        quote_text: "hi".to_owned(),
        ..Settings::default()
    };
    assert_eq!(hidden.quote(), None);
    assert_eq!(Settings::default().quote(), None);
}

#[test]
fn grid_visibility_follows_mode_toggle() {
    let s = Settings {
        year_grid_mode: GridMode::Life,
        show_life_grid: false,
        ..Settings::default()
    };
    assert!(!s.grid_visible());
    let s = Settings {
        year_grid_mode: GridMode::Weeks,
        show_life_grid: false,
        ..Settings::default()
    };
    assert!(s.grid_visible());
}

#[test]
fn invalid_life_expectancy_uses_default() {
    let s = Settings {
        life_expectancy_years: -3.0,
        ..Settings::default()
    };
    assert_eq!(s.life_expectancy(), DEFAULT_LIFE_EXPECTANCY_YEARS);
}

#[test]
fn life_expectancy_is_clamped_to_a_drawable_range() {
    let huge = Settings {
        life_expectancy_years: 1e12,
        ..Settings::default()
    };
    assert_eq!(huge.life_expectancy(), MAX_LIFE_EXPECTANCY_YEARS);
    let tiny = Settings {
        life_expectancy_years: 0.25,
        ..Settings::default()
    };
    assert_eq!(tiny.life_expectancy(), MIN_LIFE_EXPECTANCY_YEARS);

    let o = SettingsOverrides {
        life_expectancy_years: Some("1e12".to_owned()),
        ..SettingsOverrides::default()
    };
    assert_eq!(
        Settings::default().with_overrides(&o).life_expectancy_years,
        MAX_LIFE_EXPECTANCY_YEARS
    );
    let o = SettingsOverrides {
        life_expectancy_years: Some("-5".to_owned()),
        ..SettingsOverrides::default()
    };
    assert_eq!(
        Settings::default().with_overrides(&o).life_expectancy_years,
        DEFAULT_LIFE_EXPECTANCY_YEARS
    );
}
