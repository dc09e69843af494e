//! Live preview: repaint at the top of every minute and whenever the view returns to the
//! foreground, so the "now" cell and percentages track the clock.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use chrono::{NaiveDateTime, Timelike};

use crate::compose::wallpaper::{RenderStats, WallpaperInput, render_display_list, render_png};
use crate::draw::text::FontLibrary;
use crate::foundation::error::LifegridResult;
use crate::render::recording::DisplayList;

/// Repaint period once aligned to the minute.
pub const REPAINT_PERIOD: Duration = Duration::from_secs(60);

/// Time from `now` until the next minute boundary; a full period when `now` sits exactly on one.
pub fn delay_to_next_minute(now: NaiveDateTime) -> Duration {
    let into_minute = Duration::from_secs(u64::from(now.second()))
        + Duration::from_nanos(u64::from(now.nanosecond() % 1_000_000_000));
    if into_minute.is_zero() {
        REPAINT_PERIOD
    } else {
        REPAINT_PERIOD.saturating_sub(into_minute)
    }
}

fn add(t: NaiveDateTime, d: Duration) -> NaiveDateTime {
    chrono::Duration::from_std(d).map_or(t, |d| t + d)
}

/// Decides when a preview repaints.
///
/// The first timed repaint lands on the next minute boundary, later ones every
/// [`REPAINT_PERIOD`]. A backgrounded view never repaints; bringing it back repaints at once and
/// re-aligns the timer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewScheduler {
    visible: bool,
    due: NaiveDateTime,
}

impl PreviewScheduler {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            visible: true,
            due: add(now, delay_to_next_minute(now)),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Next timed repaint, if the view is visible.
    pub fn due(&self) -> Option<NaiveDateTime> {
        self.visible.then_some(self.due)
    }

    /// How long to wait from `now` until the next timed repaint.
    pub fn next_delay(&self, now: NaiveDateTime) -> Option<Duration> {
        self.due()
            .map(|due| (due - now).to_std().unwrap_or(Duration::ZERO))
    }

    /// Whether a timed repaint is due at `now`. Consumes the tick and schedules the next one.
    pub fn poll(&mut self, now: NaiveDateTime) -> bool {
        if !self.visible || now < self.due {
            return false;
        }
        while self.due <= now {
            self.due = add(self.due, REPAINT_PERIOD);
        }
        true
    }

    /// The view went to the background; timed repaints stop.
    pub fn background(&mut self) {
        self.visible = false;
    }

    /// The view is visible again. Returns `true` when this requires an immediate repaint.
    pub fn foreground(&mut self, now: NaiveDateTime) -> bool {
        let was_hidden = !self.visible;
        self.visible = true;
        if was_hidden {
            self.due = add(now, delay_to_next_minute(now));
        }
        was_hidden
    }
}

/// A preview over one input snapshot, repainted with a fresh clock each time.
#[derive(Debug)]
pub struct PreviewSession {
    input: WallpaperInput,
    scheduler: PreviewScheduler,
    frame: Option<(DisplayList, RenderStats)>,
    repaints: u64,
}

impl PreviewSession {
    /// Start a session and paint the first frame at `now`.
    pub fn start(input: WallpaperInput, now: NaiveDateTime) -> LifegridResult<Self> {
        let mut session = Self {
            input,
            scheduler: PreviewScheduler::new(now),
            frame: None,
            repaints: 0,
        };
        session.repaint(now)?;
        Ok(session)
    }

    pub fn scheduler(&self) -> &PreviewScheduler {
        &self.scheduler
    }

    pub fn input(&self) -> &WallpaperInput {
        &self.input
    }

    /// Number of frames painted so far.
    pub fn repaints(&self) -> u64 {
        self.repaints
    }

    /// Latest display list and its layout metrics.
    pub fn frame(&self) -> Option<&(DisplayList, RenderStats)> {
        self.frame.as_ref()
    }

    /// Paint now, regardless of the schedule.
    pub fn repaint(&mut self, now: NaiveDateTime) -> LifegridResult<&RenderStats> {
        self.input.now = now;
        let frame = render_display_list(&self.input)?;
        self.repaints += 1;
        let (_, stats) = self.frame.insert(frame);
        Ok(stats)
    }

    /// Repaint if the timer is due. Returns whether a frame was painted.
    pub fn tick(&mut self, now: NaiveDateTime) -> LifegridResult<bool> {
        if !self.scheduler.poll(now) {
            return Ok(false);
        }
        self.repaint(now)?;
        Ok(true)
    }

    pub fn background(&mut self) {
        self.scheduler.background();
    }

    /// Foreground the view, repainting immediately if it was hidden.
    pub fn foreground(&mut self, now: NaiveDateTime) -> LifegridResult<bool> {
        if !self.scheduler.foreground(now) {
            return Ok(false);
        }
        self.repaint(now)?;
        Ok(true)
    }

    /// Export the current state as PNG bytes with the raster backend.
    pub fn export_png(&self, fonts: &FontLibrary) -> LifegridResult<Vec<u8>> {
        render_png(&self.input, fonts)
    }
}

/// Options for [`run_preview`].
#[derive(Clone, Debug)]
pub struct PreviewLoopOpts {
    /// PNG rewritten on every repaint.
    pub out: PathBuf,
    /// Stop after this many frames; runs until Ctrl-C when `None`.
    pub max_frames: Option<u64>,
}

/// Drive a preview against the local clock, writing a PNG per repaint.
pub async fn run_preview(
    input: WallpaperInput,
    fonts: &FontLibrary,
    opts: PreviewLoopOpts,
) -> LifegridResult<u64> {
    let now = chrono::Local::now().naive_local();
    let mut session = PreviewSession::start(input, now)?;
    write_frame(&session, fonts, &opts.out).await?;

    let done = |n: u64| opts.max_frames.is_some_and(|max| n >= max);
    while !done(session.repaints()) {
        let now = chrono::Local::now().naive_local();
        let wait = session.scheduler().next_delay(now).unwrap_or(REPAINT_PERIOD);
        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("preview stopped");
                break;
            }
        }
        let now = chrono::Local::now().naive_local();
        if session.tick(now)? {
            write_frame(&session, fonts, &opts.out).await?;
        }
    }
    Ok(session.repaints())
}

async fn write_frame(
    session: &PreviewSession,
    fonts: &FontLibrary,
    out: &std::path::Path,
) -> LifegridResult<()> {
    let png = session.export_png(fonts)?;
    tokio::fs::write(out, &png)
        .await
        .with_context(|| format!("write {}", out.display()))?;
    tracing::info!(
        path = %out.display(),
        bytes = png.len(),
        frame = session.repaints(),
        "preview frame written"
    );
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/session/preview.rs"]
mod tests;
