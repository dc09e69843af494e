//! Section renderers and the wallpaper orchestrator.
//!
//! Every renderer is a function of `(surface, scene, placement)` that paints one section and,
//! where sections stack, returns the height it consumed.

pub mod background;
pub mod bottom;
pub mod callout;
pub mod grid;
pub mod header;
pub mod quote;
pub mod wallpaper;

use crate::foundation::core::Canvas;
use crate::metrics::derive::WallpaperMetrics;
use crate::theme::palette::{HeatRamp, Palette, ThemeId};

/// Canvas width the section geometry is designed against.
pub const REFERENCE_WIDTH: f64 = 1170.0;

/// A resolved theme: id plus its palette and heat ramp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub id: ThemeId,
    pub palette: Palette,
    pub ramp: HeatRamp,
}

impl Theme {
    pub fn new(id: ThemeId) -> Self {
        Self {
            id,
            palette: id.palette(),
            ramp: id.ramp(),
        }
    }
}

/// Read-only state shared by every section of one render.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    pub canvas: Canvas,
    pub theme: Theme,
    pub metrics: &'a WallpaperMetrics,
    /// Canvas pixels per reference pixel.
    pub u: f64,
}

impl<'a> Scene<'a> {
    pub fn new(canvas: Canvas, theme: Theme, metrics: &'a WallpaperMetrics) -> Self {
        Self {
            canvas,
            theme,
            metrics,
            u: (canvas.w() / REFERENCE_WIDTH).max(0.05),
        }
    }

    /// Horizontal page margin.
    pub fn margin(&self) -> f64 {
        60.0 * self.u
    }

    /// Scale a reference length.
    pub fn px(&self, v: f64) -> f64 {
        v * self.u
    }
}
