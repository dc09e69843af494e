//! Calendar grid: one of four layouts per render, computed as a pure [`GridLayout`] and then
//! painted.
//!
//! | mode  | cells                      | columns | sizing                      |
//! |-------|----------------------------|---------|-----------------------------|
//! | days  | 365 / 366                  | 25      | width                       |
//! | weeks | 52                         | 13      | width                       |
//! | life  | `years * 52`               | 52      | `max(min, min(by_w, by_h))` |
//! | month | 42 (7 x 6)                 | 7       | `min(by_w, by_h)`           |

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::compose::Scene;
use crate::compose::callout::{CalloutSummary, paint_callout};
use crate::draw::primitives::{draw_text, drop_shadow, fill_round_rect, stroke_round_rect};
use crate::draw::surface::{Paint, Surface, TextStyle};
use crate::foundation::core::{Point, Rect, Rgba8, Vec2};
use crate::foundation::math::percent;
use crate::model::records::Reminder;
use crate::model::settings::{GridMode, MAX_LIFE_EXPECTANCY_YEARS, MIN_LIFE_EXPECTANCY_YEARS};
use crate::theme::palette::HeatBucket;
use crate::time::calendar::{
    WEEKS_PER_GRID_YEAR, day_of_year, days_in_year, month_grid_layout, week_of_year_index,
    week_start_sunday, weekday_initial, weeks_between,
};

const DAYS_COLUMNS: u32 = 25;
const WEEKS_COLUMNS: u32 = 13;
const LIFE_COLUMNS: u32 = 52;
const MONTH_COLUMNS: u32 = 7;
const MONTH_ROWS: u32 = 6;

/// Reference height of the caption row above the cells.
const CAPTION_HEIGHT: f64 = 56.0;
/// Reference height of the weekday header row in `month` mode.
const WEEKDAY_HEADER_HEIGHT: f64 = 40.0;
/// Smallest cell edge in canvas pixels.
const MIN_BOX: f64 = 2.0;
/// Reference space left below the grid section.
pub const SECTION_GAP: f64 = 40.0;

/// Where a cell sits relative to "now".
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    Past,
    /// The cell containing today (or this week).
    Now,
    Future,
    /// Padding outside the current month.
    Outside,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GridCell {
    pub rect: Rect,
    /// First day the cell covers.
    pub date: Option<NaiveDate>,
    pub state: CellState,
    /// Completion percent over the cell's days.
    pub percent: f64,
    pub color: Rgba8,
    /// Day numeral (`month` mode).
    pub label: Option<String>,
}

/// Placement of the grid: `x0..x1` is the usable width, `y0` the top, `y1` the lowest point
/// height-constrained modes may reach.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridRequest {
    pub mode: GridMode,
    pub area: Rect,
    pub dob: NaiveDate,
    pub life_expectancy_years: f64,
}

/// Fully resolved grid geometry and coloring.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GridLayout {
    pub mode: GridMode,
    pub columns: u32,
    pub rows: u32,
    pub box_size: f64,
    pub gap: f64,
    /// Bounding box of the cells.
    pub bounds: Rect,
    pub cells: Vec<GridCell>,
    pub now_index: Option<usize>,
    /// Left and right caption above the cells.
    pub caption: (String, String),
    /// Weekday initials and their centers (`month` mode).
    pub weekday_headers: Vec<(String, Point)>,
    /// Inclusive range of days the grid shows.
    pub window: (NaiveDate, NaiveDate),
    /// Top of the section, caption included.
    pub top: f64,
    /// Day that cell 0 counts from.
    origin: NaiveDate,
    /// Leading padding cells (`month` mode).
    offset: u32,
}

impl GridLayout {
    /// Cell index showing `date`, if it is on the grid.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        if date < self.window.0 || date > self.window.1 {
            return None;
        }
        let idx = match self.mode {
            GridMode::Days => (date - self.origin).num_days(),
            GridMode::Weeks => i64::from(week_of_year_index(date)),
            GridMode::Life => weeks_between(self.origin, date),
            GridMode::Month => i64::from(self.offset) + i64::from(date.day()) - 1,
        };
        usize::try_from(idx).ok().filter(|i| *i < self.cells.len())
    }

    /// Bottom edge of the section.
    pub fn bottom(&self) -> f64 {
        self.bounds.y1
    }
}

/// Per-cell date span before coloring.
struct Slot {
    date: Option<NaiveDate>,
    days: u32,
    /// Completion denominator in days.
    per: u32,
    state: CellState,
    label: Option<String>,
}

/// Compute the layout for `req` against the scene's metrics and theme.
pub fn compute_layout(scene: &Scene<'_>, req: &GridRequest) -> GridLayout {
    let today = scene.metrics.today;
    let year = today.year();
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(today);
    let dec31 = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(today);
    let relative = |date: NaiveDate, now: bool| {
        if now {
            CellState::Now
        } else if date < today {
            CellState::Past
        } else {
            CellState::Future
        }
    };

    let mut offset = 0;
    let mut weekday_row = false;
    let (columns, ratio, origin, window, slots, caption) = match req.mode {
        GridMode::Days => {
            let total = days_in_year(year);
            let slots = (0..total)
                .map(|i| {
                    let date = jan1 + Duration::days(i64::from(i));
                    Slot {
                        date: Some(date),
                        days: 1,
                        per: 1,
                        state: relative(date, date == today),
                        label: None,
                    }
                })
                .collect::<Vec<Slot>>();
            let doy = day_of_year(today);
            let caption = (
                format!("DAY {doy} / {total}"),
                format!("{:.1}% OF {year}", percent(f64::from(doy), f64::from(total))),
            );
            (DAYS_COLUMNS, 0.22, jan1, (jan1, dec31), slots, caption)
        }
        GridMode::Weeks => {
            let base = week_start_sunday(jan1);
            let now = week_of_year_index(today);
            let slots = (0..WEEKS_PER_GRID_YEAR)
                .map(|i| {
                    let start = (base + Duration::weeks(i64::from(i))).max(jan1);
                    let end = if i + 1 == WEEKS_PER_GRID_YEAR {
                        dec31
                    } else {
                        (base + Duration::weeks(i64::from(i)) + Duration::days(6)).min(dec31)
                    };
                    Slot {
                        date: Some(start),
                        days: ((end - start).num_days() + 1).max(0) as u32,
                        per: 7,
                        state: relative(start, i == now),
                        label: None,
                    }
                })
                .collect::<Vec<Slot>>();
            let caption = (
                format!("WEEK {} / {WEEKS_PER_GRID_YEAR}", now + 1),
                year.to_string(),
            );
            (WEEKS_COLUMNS, 0.22, jan1, (jan1, dec31), slots, caption)
        }
        GridMode::Life => {
            let years = if req.life_expectancy_years.is_finite() {
                req.life_expectancy_years
                    .clamp(MIN_LIFE_EXPECTANCY_YEARS, MAX_LIFE_EXPECTANCY_YEARS)
            } else {
                MIN_LIFE_EXPECTANCY_YEARS
            };
            let total = (years * f64::from(LIFE_COLUMNS)).round() as u32;
            let lived = weeks_between(req.dob, today);
            let slots = (0..total)
                .map(|i| {
                    let start = req.dob + Duration::weeks(i64::from(i));
                    Slot {
                        date: Some(start),
                        days: 7,
                        per: 7,
                        state: relative(start, i64::from(i) == lived),
                        label: None,
                    }
                })
                .collect::<Vec<Slot>>();
            let end = req.dob + Duration::days(i64::from(total) * 7 - 1);
            let caption = (
                format!("WEEK {} / {total}", (lived + 1).clamp(0, i64::from(total))),
                format!("{} YEARS", years.round()),
            );
            (LIFE_COLUMNS, 0.18, req.dob, (req.dob, end), slots, caption)
        }
        GridMode::Month => {
            let layout = month_grid_layout(year, today.month());
            let (dim, off) = layout
                .map(|l| (l.days_in_month, l.start_weekday_offset))
                .unwrap_or((30, 0));
            offset = off;
            weekday_row = true;
            let first = today.with_day(1).unwrap_or(today);
            let last = first + Duration::days(i64::from(dim) - 1);
            let slots = (0..MONTH_COLUMNS * MONTH_ROWS)
                .map(|i| {
                    let day = i as i64 - i64::from(off) + 1;
                    if day < 1 || day > i64::from(dim) {
                        return Slot {
                            date: None,
                            days: 0,
                            per: 1,
                            state: CellState::Outside,
                            label: None,
                        };
                    }
                    let date = first + Duration::days(day - 1);
                    Slot {
                        date: Some(date),
                        days: 1,
                        per: 1,
                        state: relative(date, date == today),
                        label: Some(day.to_string()),
                    }
                })
                .collect::<Vec<Slot>>();
            let caption = (
                today.format("%B %Y").to_string().to_uppercase(),
                format!("DAY {} / {dim}", today.day()),
            );
            (MONTH_COLUMNS, 0.14, first, (first, last), slots, caption)
        }
    };

    let count = slots.len() as u32;
    let rows = count.div_ceil(columns).max(1);
    let width = req.area.width().max(1.0);
    let cells_top = req.area.y0
        + scene.px(CAPTION_HEIGHT)
        + if weekday_row {
            scene.px(WEEKDAY_HEADER_HEIGHT)
        } else {
            0.0
        };
    let available_h = (req.area.y1 - cells_top).max(1.0);
    let fit = |n: u32, extent: f64| extent / (f64::from(n) + f64::from(n.saturating_sub(1)) * ratio);
    let by_w = fit(columns, width);
    // Days and weeks are sized by width and only shrink when the area is too short for them.
    let box_size = match req.mode {
        GridMode::Days | GridMode::Weeks | GridMode::Life => {
            by_w.min(fit(rows, available_h)).max(MIN_BOX)
        }
        GridMode::Month => by_w.min(fit(rows, available_h)).max(8.0),
    };
    let gap = box_size * ratio;
    let grid_w = f64::from(columns) * box_size + f64::from(columns - 1) * gap;
    let grid_h = f64::from(rows) * box_size + f64::from(rows - 1) * gap;
    let x0 = req.area.center().x - grid_w / 2.0;
    let bounds = Rect::new(x0, cells_top, x0 + grid_w, cells_top + grid_h);

    let weekday_headers = if weekday_row {
        const SUNDAY_FIRST: [Weekday; 7] = [
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ];
        SUNDAY_FIRST
            .iter()
            .enumerate()
            .map(|(c, wd)| {
                let cx = x0 + c as f64 * (box_size + gap) + box_size / 2.0;
                (
                    weekday_initial(*wd).to_owned(),
                    Point::new(cx, cells_top - scene.px(WEEKDAY_HEADER_HEIGHT) / 2.0),
                )
            })
            .collect()
    } else {
        Vec::new()
    };

    let palette = &scene.theme.palette;
    let ramp = &scene.theme.ramp;
    let metrics = scene.metrics;
    let habits = f64::from(metrics.active_habits);
    let mut now_index = None;
    let cells = slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| {
            let col = i as u32 % columns;
            let row = i as u32 / columns;
            let cx = x0 + f64::from(col) * (box_size + gap);
            let cy = cells_top + f64::from(row) * (box_size + gap);
            let rect = Rect::new(cx, cy, cx + box_size, cy + box_size);

            let pct = match (slot.date, slot.state) {
                (Some(date), CellState::Past | CellState::Now) => percent(
                    f64::from(metrics.activity.sum_range(date, slot.days)),
                    habits * f64::from(slot.per),
                ),
                _ => 0.0,
            };
            let color = match slot.state {
                CellState::Now => {
                    now_index = Some(i);
                    ramp.full
                }
                CellState::Past => HeatBucket::for_percent(pct).color(palette, ramp),
                CellState::Future | CellState::Outside => palette.grid_inactive,
            };
            GridCell {
                rect,
                date: slot.date,
                state: slot.state,
                percent: pct,
                color,
                label: slot.label,
            }
        })
        .collect();

    GridLayout {
        mode: req.mode,
        columns,
        rows,
        box_size,
        gap,
        bounds,
        cells,
        now_index,
        caption,
        weekday_headers,
        window,
        top: req.area.y0,
        origin,
        offset,
    }
}

/// Paint captions, headers and every cell of `layout`.
pub fn paint_grid(s: &mut dyn Surface, scene: &Scene<'_>, layout: &GridLayout) {
    let p = &scene.theme.palette;
    let caption_y = layout.top + scene.px(CAPTION_HEIGHT) / 2.0;
    draw_text(
        s,
        &layout.caption.0,
        Point::new(layout.bounds.x0, caption_y),
        &TextStyle::new(scene.px(22.0), p.text_main).bold(),
    );
    draw_text(
        s,
        &layout.caption.1,
        Point::new(layout.bounds.x1, caption_y),
        &TextStyle::new(scene.px(20.0), p.text_sub).right(),
    );

    let header_style =
        TextStyle::new((layout.box_size * 0.3).min(scene.px(22.0)), p.text_sub).bold().centered();
    for (label, at) in &layout.weekday_headers {
        draw_text(s, label, *at, &header_style);
    }

    let radius = layout.box_size
        * if layout.mode == GridMode::Life {
            0.2
        } else {
            0.28
        };
    for cell in &layout.cells {
        paint_cell(s, scene, layout, cell, radius);
    }
}

fn paint_cell(s: &mut dyn Surface, scene: &Scene<'_>, layout: &GridLayout, cell: &GridCell, radius: f64) {
    let p = &scene.theme.palette;
    let ramp = &scene.theme.ramp;
    let b = layout.box_size;
    let rich = b >= 8.0;

    match cell.state {
        CellState::Outside => {
            fill_round_rect(s, cell.rect, radius, &Paint::solid(p.grid_inactive.with_alpha(0.25)));
        }
        CellState::Future => {
            fill_round_rect(s, cell.rect, radius, &Paint::solid(cell.color));
        }
        CellState::Past => {
            let active = cell.percent > 0.0;
            if active && rich {
                drop_shadow(s, cell.rect, radius, Vec2::new(0.0, b * 0.08), Rgba8::BLACK.with_alpha(0.35));
            }
            fill_round_rect(s, cell.rect, radius, &Paint::solid(cell.color));
            if active && rich {
                fill_round_rect(
                    s,
                    cell.rect,
                    radius,
                    &Paint::linear(
                        Point::new(cell.rect.x0, cell.rect.y0),
                        cell.rect.center(),
                        Rgba8::WHITE.with_alpha(0.16),
                        Rgba8::WHITE.with_alpha(0.0),
                    ),
                );
            }
        }
        CellState::Now => {
            let glow_step = (b * 0.16).max(1.0);
            let glow_alpha = f64::from(ramp.glow.a) / 255.0;
            for k in (1..=4).rev() {
                let grow = glow_step * f64::from(k);
                let alpha = glow_alpha * (0.12 + 0.1 * f64::from(4 - k));
                fill_round_rect(
                    s,
                    cell.rect.inflate(grow, grow),
                    radius + grow,
                    &Paint::solid(ramp.glow.with_alpha(alpha)),
                );
            }
            fill_round_rect(s, cell.rect, radius, &Paint::solid(cell.color));
            stroke_round_rect(
                s,
                cell.rect,
                radius,
                (b * 0.07).max(1.0),
                &Paint::solid(ramp.full.mix(Rgba8::WHITE, 0.35)),
            );
            let inset = cell.rect.inset(-(b * 0.12));
            fill_round_rect(
                s,
                inset,
                (radius - b * 0.12).max(0.0),
                &Paint::Linear {
                    start: Point::new(inset.x0, inset.y0),
                    end: Point::new(inset.x1, inset.y1),
                    stops: vec![
                        (0.0, Rgba8::WHITE.with_alpha(0.38)),
                        (0.55, Rgba8::WHITE.with_alpha(0.0)),
                        (1.0, Rgba8::WHITE.with_alpha(0.0)),
                    ],
                },
            );
        }
    }

    if let Some(label) = &cell.label {
        let color = if cell.state == CellState::Now {
            if ramp.full.luma() > 0.6 {
                Rgba8::BLACK
            } else {
                Rgba8::WHITE
            }
        } else {
            p.text_main
        };
        draw_text(
            s,
            label,
            cell.rect.center(),
            &TextStyle::new(b * 0.34, color).bold().centered(),
        );
    }
}

/// What the grid showed; part of the render metrics.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GridSummary {
    pub mode: GridMode,
    pub cells: usize,
    pub columns: u32,
    pub rows: u32,
    pub box_size: f64,
    pub bounds: Rect,
    pub now_index: Option<usize>,
    /// Fill color of the "now" cell.
    pub now_color: Option<Rgba8>,
    pub now_rect: Option<Rect>,
    pub callout: Option<CalloutSummary>,
}

/// Lay out, paint, and overlay the reminder callout. Returns the height consumed from
/// `req.area.y0` and the summary.
pub fn paint_grid_section(
    s: &mut dyn Surface,
    scene: &Scene<'_>,
    req: &GridRequest,
    reminders: &[Reminder],
) -> (f64, GridSummary) {
    let layout = compute_layout(scene, req);
    paint_grid(s, scene, &layout);
    let callout = paint_callout(s, scene, &layout, reminders, layout.top);
    let now_cell = layout.now_index.and_then(|i| layout.cells.get(i));

    let summary = GridSummary {
        mode: layout.mode,
        cells: layout.cells.len(),
        columns: layout.columns,
        rows: layout.rows,
        box_size: layout.box_size,
        bounds: layout.bounds,
        now_index: layout.now_index,
        now_color: now_cell.map(|c| c.color),
        now_rect: now_cell.map(|c| c.rect),
        callout,
    };
    let bottom = summary
        .callout
        .as_ref()
        .map_or(layout.bottom(), |c| c.card.y1.max(layout.bottom()));
    (bottom - req.area.y0 + scene.px(SECTION_GAP), summary)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/grid.rs"]
mod tests;
