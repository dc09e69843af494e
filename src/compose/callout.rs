//! Reminder callout: anchor selection, card placement and painting.

use chrono::{Duration, NaiveDate};
use kurbo::Size;

use crate::compose::Scene;
use crate::compose::grid::GridLayout;
use crate::draw::primitives::{
    draw_text, fill_circle, fill_round_rect, line_path, stroke_round_rect, truncate_chars,
};
use crate::draw::surface::{Paint, Surface, TextStyle};
use crate::foundation::core::{BezPath, Point, Rect, Rgba8};
use crate::model::records::Reminder;
use crate::theme::palette::priority_color;

/// Most reminders listed on one card.
pub const MAX_CALLOUT_REMINDERS: usize = 4;

const CARD_FILL: Rgba8 = Rgba8::rgba(10, 10, 14, 219);

/// Whether the card floats above or below its anchor cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Above,
    Below,
}

/// What the callout showed and where.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CalloutSummary {
    pub anchor_date: NaiveDate,
    /// Index of the anchor cell in the grid.
    pub anchor_index: usize,
    /// Listed reminder titles, in display order.
    pub titles: Vec<String>,
    pub placement: Placement,
    pub card: Rect,
}

/// Date the callout anchors to within the inclusive `window`.
///
/// Today wins whenever it has reminders; otherwise the earliest later day that has any.
pub fn select_anchor(
    reminders: &[Reminder],
    today: NaiveDate,
    window: (NaiveDate, NaiveDate),
) -> Option<NaiveDate> {
    let (lo, hi) = window;
    if lo <= today && today <= hi && reminders.iter().any(|r| r.covers(today, today)) {
        return Some(today);
    }
    let tomorrow = today + Duration::days(1);
    reminders
        .iter()
        .filter_map(|r| {
            let (start, end) = r.span(today);
            let first = start.max(tomorrow).max(lo);
            (first <= end.min(hi)).then_some(first)
        })
        .min()
}

/// Reminders covering `date`, earliest start time first, at most [`MAX_CALLOUT_REMINDERS`].
pub fn reminders_on(reminders: &[Reminder], date: NaiveDate, today: NaiveDate) -> Vec<&Reminder> {
    let mut out: Vec<&Reminder> = reminders
        .iter()
        .filter(|r| r.covers(date, today))
        .collect();
    out.sort_by_key(|r| r.sort_minutes());
    out.truncate(MAX_CALLOUT_REMINDERS);
    out
}

/// Place a card of `size` for `anchor`: centered on it and clamped into `bounds` horizontally,
/// above it unless that would cross `min_top`.
pub fn place_card(anchor: Rect, bounds: Rect, min_top: f64, size: Size, gap: f64) -> (Rect, Placement) {
    let max_x = (bounds.x1 - size.width).max(bounds.x0);
    let x = (anchor.center().x - size.width / 2.0).clamp(bounds.x0, max_x);
    let above = anchor.y0 - gap - size.height;
    if above >= min_top {
        (Rect::new(x, above, x + size.width, above + size.height), Placement::Above)
    } else {
        let y = anchor.y1 + gap;
        (Rect::new(x, y, x + size.width, y + size.height), Placement::Below)
    }
}

/// Elbow connector from the anchor cell edge to the card edge.
pub fn connector_path(anchor: Rect, card: Rect, placement: Placement) -> BezPath {
    let (from, to_y) = match placement {
        Placement::Above => (Point::new(anchor.center().x, anchor.y0), card.y1),
        Placement::Below => (Point::new(anchor.center().x, anchor.y1), card.y0),
    };
    let mid = (from.y + to_y) / 2.0;
    let card_x = card.center().x;
    let mut path = line_path(from, Point::new(from.x, mid));
    path.line_to((card_x, mid));
    path.line_to((card_x, to_y));
    path
}

/// Paint the callout for `layout` if a reminder falls in its window.
pub fn paint_callout(
    s: &mut dyn Surface,
    scene: &Scene<'_>,
    layout: &GridLayout,
    reminders: &[Reminder],
    min_top: f64,
) -> Option<CalloutSummary> {
    let today = scene.metrics.today;
    let anchor_date = select_anchor(reminders, today, layout.window)?;
    let anchor_index = layout.index_of(anchor_date)?;
    let anchor = layout.cells.get(anchor_index)?.rect;
    let listed = reminders_on(reminders, anchor_date, today);
    if listed.is_empty() {
        return None;
    }

    let pad = scene.px(22.0);
    let header = scene.px(44.0);
    let row = scene.px(58.0);
    let size = Size::new(
        layout.bounds.width().min(scene.px(620.0)),
        pad * 2.0 + header + row * listed.len() as f64,
    );
    let (card, placement) = place_card(anchor, layout.bounds, min_top, size, scene.px(36.0));

    let line = Paint::solid(Rgba8::WHITE.with_alpha(0.55));
    s.stroke(&connector_path(anchor, card, placement), scene.px(2.5), &line);
    let dot = match placement {
        Placement::Above => Point::new(anchor.center().x, anchor.y0),
        Placement::Below => Point::new(anchor.center().x, anchor.y1),
    };
    fill_circle(s, dot, scene.px(5.0), &Paint::solid(scene.theme.palette.accent));

    let radius = scene.px(24.0);
    fill_round_rect(s, card, radius, &Paint::solid(CARD_FILL));
    stroke_round_rect(
        s,
        card,
        radius,
        scene.px(1.5),
        &Paint::solid(Rgba8::WHITE.with_alpha(0.08)),
    );

    let heading = if anchor_date == today {
        "TODAY".to_owned()
    } else {
        anchor_date.format("%a, %b %-d").to_string().to_uppercase()
    };
    draw_text(
        s,
        &heading,
        Point::new(card.x0 + pad, card.y0 + pad + header / 2.0),
        &TextStyle::new(scene.px(16.0), Rgba8::WHITE.with_alpha(0.6)).bold(),
    );

    let title_style = TextStyle::new(scene.px(22.0), Rgba8::WHITE).bold();
    let badge_style = TextStyle::new(scene.px(16.0), Rgba8::WHITE.with_alpha(0.85)).centered();
    for (i, r) in listed.iter().enumerate() {
        let cy = card.y0 + pad + header + row * (i as f64 + 0.5);
        fill_circle(
            s,
            Point::new(card.x0 + pad + scene.px(8.0), cy),
            scene.px(8.0),
            &Paint::solid(priority_color(r.priority)),
        );

        let label = r.time_label();
        let badge_w = s.measure_text(&label, &badge_style) + scene.px(24.0);
        let badge = Rect::new(
            card.x1 - pad - badge_w,
            cy - scene.px(16.0),
            card.x1 - pad,
            cy + scene.px(16.0),
        );
        fill_round_rect(
            s,
            badge,
            scene.px(16.0),
            &Paint::solid(r.marker_color.unwrap_or(Rgba8::WHITE).with_alpha(0.14)),
        );
        draw_text(s, &label, badge.center(), &badge_style);

        let title_x = card.x0 + pad + scene.px(30.0);
        let room = (badge.x0 - scene.px(12.0) - title_x).max(0.0);
        let budget = (room / (title_style.size * 0.58)).floor() as usize;
        draw_text(
            s,
            &truncate_chars(&r.title, budget.max(4)),
            Point::new(title_x, cy),
            &title_style,
        );
    }

    Some(CalloutSummary {
        anchor_date,
        anchor_index,
        titles: listed.iter().map(|r| r.title.clone()).collect(),
        placement,
        card,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compose/callout.rs"]
mod tests;
