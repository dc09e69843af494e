//! Lifegrid renders a personalized life-calendar wallpaper from habits, goals, reminders and a
//! date of birth.
//!
//! The public API is centered on:
//!
//! - [`WallpaperInput`]: settings plus records and the current time
//! - [`render_wallpaper`]: paint every section onto any [`Surface`]
//! - [`RasterSurface`] / [`RecordingSurface`]: the PNG and display-list backends
#![forbid(unsafe_code)]

pub mod compose;
pub mod draw;
pub mod foundation;
pub mod metrics;
pub mod model;
pub mod render;
pub mod server;
pub mod session;
pub mod theme;
pub mod time;

pub use crate::compose::wallpaper::{
    LayoutKind, RenderStats, WallpaperInput, render_display_list, render_png, render_wallpaper,
};
pub use crate::draw::surface::{FontWeight, Paint, Surface, TextAlign, TextStyle};
pub use crate::draw::text::{FontLibrary, FontSources, ensure_fonts_loaded};
pub use crate::foundation::core::{BezPath, Canvas, Point, Rect, Rgba8};
pub use crate::foundation::error::{LifegridError, LifegridResult};
pub use crate::model::settings::{GridMode, Settings, SettingsOverrides, WallpaperType};
pub use crate::render::backend::FrameRGBA;
pub use crate::render::raster::RasterSurface;
pub use crate::render::recording::{DisplayList, RecordingSurface};
pub use crate::theme::palette::ThemeId;
