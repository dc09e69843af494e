use axum::extract::{Path, Query, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};

use crate::compose::wallpaper::{WallpaperInput, render_png};
use crate::model::settings::SettingsOverrides;
use crate::server::app::AppState;
use crate::server::error::{AppError, AppResult};

/// Every response reflects the moment it was rendered.
pub const NO_CACHE: &str = "no-cache, no-store, must-revalidate, max-age=0";

/// `GET /w/{token}/image.png`: render the user's wallpaper with query overrides applied.
pub async fn wallpaper_png(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(overrides): Query<SettingsOverrides>,
) -> AppResult<Response> {
    let record = state.source.lookup(&token).ok_or(AppError::NotFound)?;
    let settings = record.settings.ok_or(AppError::NotFound)?;
    let input = WallpaperInput {
        settings: settings.with_overrides(&overrides),
        habits: record.habits,
        goals: record.goals,
        reminders: record.reminders,
        now: (state.clock)(),
    };
    tracing::debug!(
        width = input.settings.canvas_width,
        height = input.settings.canvas_height,
        mode = input.settings.year_grid_mode.as_str(),
        "rendering wallpaper"
    );

    let fonts = state.fonts.clone();
    let png = tokio::task::spawn_blocking(move || render_png(&input, &fonts))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok((
        [(CONTENT_TYPE, "image/png"), (CACHE_CONTROL, NO_CACHE)],
        png,
    )
        .into_response())
}
