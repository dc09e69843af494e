use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use axum::Router;
use axum::routing::get;
use chrono::NaiveDateTime;
use tower_http::trace::TraceLayer;

use crate::draw::text::FontLibrary;
use crate::foundation::error::LifegridResult;
use crate::server::handlers;
use crate::server::store::UserDataSource;

/// Shared, read-only state for every request.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn UserDataSource>,
    pub fonts: Arc<FontLibrary>,
    /// Local wall clock; swapped out in tests.
    pub clock: fn() -> NaiveDateTime,
}

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

impl AppState {
    pub fn new(source: impl UserDataSource + 'static, fonts: Arc<FontLibrary>) -> Self {
        Self {
            source: Arc::new(source),
            fonts,
            clock: local_now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/w/{token}/image.png", get(handlers::wallpaper_png))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the wallpaper route on `addr` until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> LifegridResult<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await
        .context("http server")?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/server/app.rs"]
mod tests;
