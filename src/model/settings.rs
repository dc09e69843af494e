use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::foundation::core::Canvas;
use crate::foundation::error::LifegridResult;
use crate::model::lenient;
use crate::theme::palette::ThemeId;
use crate::time::calendar::parse_local_date;

/// Longest quote kept after resolution, in characters.
pub const MAX_QUOTE_CHARS: usize = 160;

/// Default canvas: a modern phone lock screen.
pub const DEFAULT_CANVAS_WIDTH: u32 = 1170;
/// Default canvas height.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 2532;
/// Default life expectancy in years.
pub const DEFAULT_LIFE_EXPECTANCY_YEARS: f64 = 80.0;
/// Shortest life expectancy a grid is drawn for.
pub const MIN_LIFE_EXPECTANCY_YEARS: f64 = 1.0;
/// Longest life expectancy a grid is drawn for; bounds the `life` grid's cell count.
pub const MAX_LIFE_EXPECTANCY_YEARS: f64 = 150.0;

/// Which calendar grid the wallpaper shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    /// One cell per day of the current year.
    #[default]
    Days,
    /// One cell per week of the current year (13 x 4).
    Weeks,
    /// One cell per week of the whole expected lifetime.
    Life,
    /// A single month calendar.
    Month,
}

impl GridMode {
    /// Case-insensitive lookup.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "days" => Some(GridMode::Days),
            "weeks" => Some(GridMode::Weeks),
            "life" => Some(GridMode::Life),
            "month" => Some(GridMode::Month),
            _ => None,
        }
    }

    /// Stable identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            GridMode::Days => "days",
            GridMode::Weeks => "weeks",
            GridMode::Life => "life",
            GridMode::Month => "month",
        }
    }
}

impl<'de> Deserialize<'de> for GridMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s).unwrap_or_default())
    }
}

/// Target screen for the wallpaper; only shifts where content starts vertically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WallpaperType {
    /// Leaves room for the system clock.
    #[default]
    Lockscreen,
    /// Leaves room for the status bar only.
    Homescreen,
    /// Full-bleed calendar.
    Calendar,
}

impl WallpaperType {
    /// Case-insensitive lookup.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lockscreen" => Some(WallpaperType::Lockscreen),
            "homescreen" => Some(WallpaperType::Homescreen),
            "calendar" => Some(WallpaperType::Calendar),
            _ => None,
        }
    }

    /// Fraction of canvas height above the first painted section.
    pub fn start_fraction(self) -> f64 {
        match self {
            WallpaperType::Lockscreen => 0.26,
            WallpaperType::Homescreen => 0.09,
            WallpaperType::Calendar => 0.05,
        }
    }
}

impl<'de> Deserialize<'de> for WallpaperType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s).unwrap_or_default())
    }
}

/// Per-user wallpaper settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Palette.
    #[serde(deserialize_with = "lenient::or_default")]
    pub theme: ThemeId,
    /// Output width in pixels.
    #[serde(deserialize_with = "canvas_width")]
    pub canvas_width: u32,
    /// Output height in pixels.
    #[serde(deserialize_with = "canvas_height")]
    pub canvas_height: u32,
    /// Date of birth; `None` when missing or unparseable.
    #[serde(deserialize_with = "lenient::date")]
    pub date_of_birth: Option<NaiveDate>,
    /// Expected lifespan in years.
    #[serde(deserialize_with = "life_expectancy_years")]
    pub life_expectancy_years: f64,
    /// Grid layout.
    #[serde(deserialize_with = "lenient::or_default")]
    pub year_grid_mode: GridMode,
    /// Target screen.
    #[serde(deserialize_with = "lenient::or_default")]
    pub wallpaper_type: WallpaperType,
    /// Show the grid in `life` mode.
    #[serde(deserialize_with = "lenient::flag_default_true")]
    pub show_life_grid: bool,
    /// Show the grid in the other modes.
    #[serde(deserialize_with = "lenient::flag_default_true")]
    pub show_year_grid: bool,
    /// Show the life-progress header.
    #[serde(deserialize_with = "lenient::flag_default_true")]
    pub show_age_stats: bool,
    /// Show the quote footer.
    #[serde(deserialize_with = "lenient::flag_default_true")]
    pub show_quote: bool,
    /// Show the habit checklist panel.
    #[serde(deserialize_with = "lenient::flag_default_true")]
    pub show_habit_layer: bool,
    /// Motivational quote.
    #[serde(deserialize_with = "lenient::string")]
    pub quote_text: String,
    /// Enable the settings-driven goal panel used when no real goal exists.
    #[serde(deserialize_with = "lenient::flag")]
    pub goal_enabled: bool,
    /// Fallback goal title.
    #[serde(deserialize_with = "lenient::text")]
    pub goal_title: Option<String>,
    /// Fallback goal start.
    #[serde(deserialize_with = "lenient::date")]
    pub goal_start_date: Option<NaiveDate>,
    /// Fallback goal length in days.
    #[serde(deserialize_with = "lenient::count")]
    pub goal_duration_days: Option<u32>,
}

fn canvas_width<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient::count(deserializer)?
        .filter(|w| *w > 0)
        .unwrap_or(DEFAULT_CANVAS_WIDTH))
}

fn canvas_height<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient::count(deserializer)?
        .filter(|h| *h > 0)
        .unwrap_or(DEFAULT_CANVAS_HEIGHT))
}

fn life_expectancy_years<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient::number(deserializer)?.unwrap_or(DEFAULT_LIFE_EXPECTANCY_YEARS))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeId::default(),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            date_of_birth: None,
            life_expectancy_years: DEFAULT_LIFE_EXPECTANCY_YEARS,
            year_grid_mode: GridMode::default(),
            wallpaper_type: WallpaperType::default(),
            show_life_grid: true,
            show_year_grid: true,
            show_age_stats: true,
            show_quote: true,
            show_habit_layer: true,
            quote_text: String::new(),
            goal_enabled: false,
            goal_title: None,
            goal_start_date: None,
            goal_duration_days: None,
        }
    }
}

impl Settings {
    /// Validated canvas for these settings.
    pub fn canvas(&self) -> LifegridResult<Canvas> {
        Canvas::new(self.canvas_width, self.canvas_height)
    }

    /// Life expectancy with non-positive or non-finite values replaced by the default, and
    /// everything else clamped into
    /// [`MIN_LIFE_EXPECTANCY_YEARS`]`..=`[`MAX_LIFE_EXPECTANCY_YEARS`].
    pub fn life_expectancy(&self) -> f64 {
        clamp_life_expectancy(self.life_expectancy_years).unwrap_or(DEFAULT_LIFE_EXPECTANCY_YEARS)
    }

    /// Quote trimmed and bounded to [`MAX_QUOTE_CHARS`]; `None` when hidden or empty.
    pub fn quote(&self) -> Option<String> {
        if !self.show_quote {
            return None;
        }
        let q = self.quote_text.trim();
        if q.is_empty() {
            return None;
        }
        Some(q.chars().take(MAX_QUOTE_CHARS).collect())
    }

    /// Whether the active grid mode's visibility toggle is on.
    pub fn grid_visible(&self) -> bool {
        match self.year_grid_mode {
            GridMode::Life => self.show_life_grid,
            _ => self.show_year_grid,
        }
    }

    /// Apply per-request overrides without touching `self`.
    pub fn with_overrides(&self, o: &SettingsOverrides) -> Settings {
        let mut s = self.clone();

        if let Some(t) = o.theme.as_deref().and_then(ThemeId::parse) {
            s.theme = t;
        }
        if let Some(w) = o.width.as_deref().and_then(parse_positive_u32) {
            s.canvas_width = w;
        }
        if let Some(h) = o.height.as_deref().and_then(parse_positive_u32) {
            s.canvas_height = h;
        }
        if let Some(dob) = o.dob.as_deref().and_then(parse_local_date) {
            s.date_of_birth = Some(dob);
        }
        if let Some(y) = o
            .life_expectancy_years
            .as_deref()
            .and_then(parse_number)
            .and_then(clamp_life_expectancy)
        {
            s.life_expectancy_years = y;
        }
        if let Some(m) = o.year_grid_mode.as_deref().and_then(GridMode::parse) {
            s.year_grid_mode = m;
        }
        if let Some(t) = o.wallpaper_type.as_deref().and_then(WallpaperType::parse) {
            s.wallpaper_type = t;
        }
        override_flag(&mut s.show_life_grid, o.show_life_grid.as_deref());
        override_flag(&mut s.show_year_grid, o.show_year_grid.as_deref());
        override_flag(&mut s.show_age_stats, o.show_age_stats.as_deref());
        override_flag(&mut s.show_quote, o.show_quote.as_deref());
        override_flag(&mut s.show_habit_layer, o.show_habit_layer.as_deref());
        if let Some(q) = &o.quote {
            s.quote_text = q.clone();
        }
        override_flag(&mut s.goal_enabled, o.goal_enabled.as_deref());
        if let Some(t) = o.goal_title.as_deref().filter(|t| !t.trim().is_empty()) {
            s.goal_title = Some(t.to_owned());
        }
        if let Some(d) = o.goal_start_date.as_deref().and_then(parse_local_date) {
            s.goal_start_date = Some(d);
        }
        if let Some(n) = o.goal_duration_days.as_deref().and_then(parse_positive_u32) {
            s.goal_duration_days = Some(n);
        }
        s
    }
}

/// Query-string overrides for a single render.
///
/// Values stay raw strings so one bad parameter is ignored instead of rejecting the request.
/// Booleans are on only for the literal `"true"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsOverrides {
    pub theme: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub dob: Option<String>,
    pub life_expectancy_years: Option<String>,
    pub year_grid_mode: Option<String>,
    pub wallpaper_type: Option<String>,
    pub show_life_grid: Option<String>,
    pub show_year_grid: Option<String>,
    pub show_age_stats: Option<String>,
    pub show_quote: Option<String>,
    pub quote: Option<String>,
    pub goal_enabled: Option<String>,
    pub goal_title: Option<String>,
    pub goal_start_date: Option<String>,
    pub goal_duration_days: Option<String>,
    pub show_habit_layer: Option<String>,
}

fn clamp_life_expectancy(years: f64) -> Option<f64> {
    (years.is_finite() && years > 0.0)
        .then(|| years.clamp(MIN_LIFE_EXPECTANCY_YEARS, MAX_LIFE_EXPECTANCY_YEARS))
}

fn override_flag(slot: &mut bool, raw: Option<&str>) {
    if let Some(v) = raw {
        *slot = v == "true";
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_positive_u32(s: &str) -> Option<u32> {
    let v = parse_number(s)?;
    (v >= 1.0 && v <= f64::from(u32::MAX)).then(|| v.round() as u32)
}

#[cfg(test)]
#[path = "../../tests/unit/model/settings.rs"]
mod tests;
