//! The wallpaper orchestrator: one entry point that paints every section in order.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::compose::background::paint_background;
use crate::compose::bottom::{GoalView, PanelArrangement, bottom_height, paint_bottom};
use crate::compose::grid::{GridRequest, GridSummary, SECTION_GAP, paint_grid_section};
use crate::compose::header::{
    LIFE_ROW_HEIGHT, paint_dashboard_header, paint_life_header, paint_streak,
};
use crate::compose::quote::paint_quote;
use crate::compose::{Scene, Theme};
use crate::draw::surface::Surface;
use crate::draw::text::FontLibrary;
use crate::foundation::core::Rect;
use crate::foundation::error::{LifegridError, LifegridResult};
use crate::metrics::derive::WallpaperMetrics;
use crate::model::lenient;
use crate::model::records::{Goal, Habit, Reminder};
use crate::model::settings::{GridMode, Settings};
use crate::render::raster::RasterSurface;
use crate::render::recording::{DisplayList, RecordingSurface};

/// Smallest canvas edge the layout can work with.
pub const MIN_CANVAS_EDGE: u32 = 64;

/// Spacer used in place of the dashboard header.
const HEADER_SPACER: f64 = 40.0;
/// Space kept free for the quote when the grid is height-constrained.
const QUOTE_RESERVE: f64 = 260.0;
/// Share of the content width given to the grid in `life` mode.
const LIFE_GRID_SHARE: f64 = 0.6;

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Everything one render consumes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WallpaperInput {
    #[serde(deserialize_with = "lenient::or_default")]
    pub settings: Settings,
    #[serde(deserialize_with = "lenient::list")]
    pub habits: Vec<Habit>,
    #[serde(deserialize_with = "lenient::list")]
    pub goals: Vec<Goal>,
    #[serde(deserialize_with = "lenient::list")]
    pub reminders: Vec<Reminder>,
    /// Local wall-clock time of the render; the current time when omitted.
    #[serde(default = "local_now")]
    pub now: NaiveDateTime,
}

impl Default for WallpaperInput {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            habits: Vec::new(),
            goals: Vec::new(),
            reminders: Vec::new(),
            now: local_now(),
        }
    }
}

impl WallpaperInput {
    /// Parse an input document.
    pub fn from_json(json: &str) -> LifegridResult<Self> {
        serde_json::from_str(json).map_err(|e| LifegridError::serde(e.to_string()))
    }
}

/// How sections were arranged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// Header, grid, bottom panels and quote stacked top to bottom.
    Stack,
    /// Grid on the left, habits and goal stacked on the right (`life` mode).
    SideBySide,
}

/// Layout metrics returned by [`render_wallpaper`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderStats {
    /// Distance from the canvas top to the bottom of the last painted section.
    pub consumed_height: f64,
    pub layout: LayoutKind,
    /// `None` when the grid is toggled off.
    pub grid: Option<GridSummary>,
}

/// Paint the whole wallpaper onto `surface`.
///
/// Sections run in a fixed order: background, life header and streak, dashboard header (or a
/// spacer), grid, bottom panels, quote. The surface's canvas decides the geometry; the settings'
/// canvas size is only used by callers that create the surface.
#[tracing::instrument(
    skip_all,
    fields(
        mode = input.settings.year_grid_mode.as_str(),
        theme = input.settings.theme.as_str(),
    )
)]
pub fn render_wallpaper(
    surface: &mut dyn Surface,
    input: &WallpaperInput,
) -> LifegridResult<RenderStats> {
    let canvas = surface.canvas();
    if canvas.width < MIN_CANVAS_EDGE || canvas.height < MIN_CANVAS_EDGE {
        return Err(LifegridError::validation(format!(
            "canvas {}x{} is smaller than {MIN_CANVAS_EDGE}px",
            canvas.width, canvas.height
        )));
    }

    let settings = &input.settings;
    let metrics = WallpaperMetrics::derive(
        &input.habits,
        settings.date_of_birth,
        settings.life_expectancy(),
        input.now,
    );
    let theme = Theme::new(settings.theme);
    let scene = Scene::new(canvas, theme, &metrics);
    let margin = scene.margin();
    let right = canvas.w() - margin;

    paint_background(surface, &theme);

    let mut y = canvas.h() * settings.wallpaper_type.start_fraction();
    if settings.show_age_stats {
        paint_life_header(surface, &scene, y);
    }
    let streak = paint_streak(surface, &scene, right, y);
    if settings.show_age_stats || streak {
        y += scene.px(LIFE_ROW_HEIGHT);
    }

    if settings.show_habit_layer && metrics.active_habits > 0 {
        y += paint_dashboard_header(surface, &scene, y);
    } else {
        y += scene.px(HEADER_SPACER);
    }

    let goal = GoalView::resolve(&input.goals, settings, metrics.today);
    let grid_request = |area: Rect| GridRequest {
        mode: settings.year_grid_mode,
        area,
        dob: settings.date_of_birth.unwrap_or(metrics.today),
        life_expectancy_years: settings.life_expectancy(),
    };
    let quote_floor = canvas.h() - margin - scene.px(QUOTE_RESERVE);

    let (layout, grid) = if settings.year_grid_mode == GridMode::Life {
        let gap = scene.px(32.0);
        let split = margin + (right - margin) * LIFE_GRID_SHARE;
        let mut grid = None;
        let mut used = 0.0_f64;
        if settings.grid_visible() {
            let floor = quote_floor - scene.px(SECTION_GAP);
            let area = Rect::new(margin, y, split - gap / 2.0, floor.max(y));
            let (h, summary) = paint_grid_section(surface, &scene, &grid_request(area), &input.reminders);
            used = h;
            grid = Some(summary);
        }
        let column = Rect::new(split + gap / 2.0, y, right, y);
        let panels = paint_bottom(
            surface,
            &scene,
            column,
            &input.habits,
            &goal,
            settings.show_habit_layer,
            PanelArrangement::Stacked,
        );
        y += used.max(panels);
        (LayoutKind::SideBySide, grid)
    } else {
        let mut grid = None;
        if settings.grid_visible() {
            let panels = bottom_height(
                &scene,
                &input.habits,
                settings.show_habit_layer,
                PanelArrangement::SideBySide,
            );
            let floor = quote_floor - panels - scene.px(SECTION_GAP);
            let area = Rect::new(margin, y, right, floor.max(y));
            let (h, summary) = paint_grid_section(surface, &scene, &grid_request(area), &input.reminders);
            y += h;
            grid = Some(summary);
        }
        y += paint_bottom(
            surface,
            &scene,
            Rect::new(margin, y, right, y),
            &input.habits,
            &goal,
            settings.show_habit_layer,
            PanelArrangement::SideBySide,
        );
        (LayoutKind::Stack, grid)
    };

    y += paint_quote(surface, &scene, y, settings.quote().as_deref());

    tracing::debug!(
        consumed_height = y,
        cells = grid.as_ref().map_or(0, |g| g.cells),
        "wallpaper painted"
    );
    Ok(RenderStats {
        consumed_height: y,
        layout,
        grid,
    })
}

/// Render `input` with the raster backend and encode the result as PNG.
pub fn render_png(input: &WallpaperInput, fonts: &FontLibrary) -> LifegridResult<Vec<u8>> {
    let canvas = input.settings.canvas()?;
    let mut surface = RasterSurface::new(canvas, fonts)?;
    render_wallpaper(&mut surface, input)?;
    surface.finish()?.encode_png()
}

/// Render `input` into a display list (preview/export path).
pub fn render_display_list(input: &WallpaperInput) -> LifegridResult<(DisplayList, RenderStats)> {
    let canvas = input.settings.canvas()?;
    let mut surface = RecordingSurface::new(canvas);
    let stats = render_wallpaper(&mut surface, input)?;
    Ok((surface.finish()?, stats))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/wallpaper.rs"]
mod tests;
