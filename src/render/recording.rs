//! A [`Surface`] that records draw calls into a serializable display list.

use kurbo::Shape;

use crate::draw::surface::{Paint, Surface, TextStyle};
use crate::draw::text::approximate_width;
use crate::foundation::core::{BezPath, Canvas, Point, Rect};
use crate::foundation::error::{LifegridError, LifegridResult};

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Fill {
        /// SVG path data.
        path: String,
        bounds: Rect,
        paint: Paint,
    },
    Stroke {
        path: String,
        bounds: Rect,
        width: f64,
        paint: Paint,
    },
    Text {
        text: String,
        at: Point,
        /// Measured advance width.
        width: f64,
        style: TextStyle,
    },
    PushOpacity {
        opacity: f32,
    },
    PopLayer,
}

/// Every draw call of one render, in order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DisplayList {
    pub canvas: Canvas,
    pub ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn to_json(&self) -> LifegridResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| LifegridError::serde(e.to_string()))
    }

    /// Recorded text strings, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Whether any text op contains `needle`.
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    /// Fill ops as `(bounds, paint)`.
    pub fn fills(&self) -> impl Iterator<Item = (Rect, &Paint)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Fill { bounds, paint, .. } => Some((*bounds, paint)),
            _ => None,
        })
    }
}

/// Recording backend. Text is measured with the font-independent width estimate.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    list: DisplayList,
    depth: usize,
}

impl RecordingSurface {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            list: DisplayList {
                canvas,
                ops: Vec::new(),
            },
            depth: 0,
        }
    }

    /// Ops recorded so far.
    pub fn ops(&self) -> &[DrawOp] {
        &self.list.ops
    }

    /// Close the recording; fails when opacity groups are left open.
    pub fn finish(self) -> LifegridResult<DisplayList> {
        if self.depth != 0 {
            return Err(LifegridError::render(format!(
                "{} opacity layer(s) left open",
                self.depth
            )));
        }
        Ok(self.list)
    }
}

fn path_record(path: &BezPath) -> (String, Rect) {
    (path.to_svg(), path.bounding_box())
}

impl Surface for RecordingSurface {
    fn canvas(&self) -> Canvas {
        self.list.canvas
    }

    fn fill(&mut self, path: &BezPath, paint: &Paint) {
        let (path, bounds) = path_record(path);
        self.list.ops.push(DrawOp::Fill {
            path,
            bounds,
            paint: paint.clone(),
        });
    }

    fn stroke(&mut self, path: &BezPath, width: f64, paint: &Paint) {
        let (path, bounds) = path_record(path);
        self.list.ops.push(DrawOp::Stroke {
            path,
            bounds,
            width,
            paint: paint.clone(),
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.list.ops.push(DrawOp::Text {
            text: text.to_owned(),
            at,
            width: approximate_width(text, style),
            style: *style,
        });
    }

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> f64 {
        approximate_width(text, style)
    }

    fn push_opacity(&mut self, opacity: f32) {
        self.depth += 1;
        self.list.ops.push(DrawOp::PushOpacity { opacity });
    }

    fn pop_layer(&mut self) {
        if self.depth == 0 {
            return;
        }
        self.depth -= 1;
        self.list.ops.push(DrawOp::PopLayer);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
