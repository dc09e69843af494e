use crate::foundation::core::{BezPath, Canvas, Point, Rgba8};

/// How a filled or stroked path is colored.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Paint {
    /// Flat color.
    Solid { color: Rgba8 },
    /// Linear gradient from `start` to `end`, stops at offsets `0..=1`.
    Linear {
        start: Point,
        end: Point,
        stops: Vec<(f32, Rgba8)>,
    },
    /// Radial gradient centered at `center`.
    Radial {
        center: Point,
        radius: f64,
        stops: Vec<(f32, Rgba8)>,
    },
}

impl Paint {
    pub fn solid(color: Rgba8) -> Self {
        Paint::Solid { color }
    }

    /// Two-stop linear gradient.
    pub fn linear(start: Point, end: Point, from: Rgba8, to: Rgba8) -> Self {
        Paint::Linear {
            start,
            end,
            stops: vec![(0.0, from), (1.0, to)],
        }
    }

    /// Two-stop radial gradient.
    pub fn radial(center: Point, radius: f64, inner: Rgba8, outer: Rgba8) -> Self {
        Paint::Radial {
            center,
            radius,
            stops: vec![(0.0, inner), (1.0, outer)],
        }
    }

    /// Straight-alpha color of the paint at `p`. Gradients pad beyond their ends.
    pub fn sample(&self, p: Point) -> Rgba8 {
        match self {
            Paint::Solid { color } => *color,
            Paint::Linear { start, end, stops } => {
                let axis = *end - *start;
                let len2 = axis.hypot2();
                let t = if len2 <= f64::EPSILON {
                    0.0
                } else {
                    (p - *start).dot(axis) / len2
                };
                color_at(stops, t)
            }
            Paint::Radial {
                center,
                radius,
                stops,
            } => {
                let t = if *radius <= f64::EPSILON {
                    1.0
                } else {
                    (p - *center).hypot() / radius
                };
                color_at(stops, t)
            }
        }
    }

    /// Representative color (solid color or first stop), used by tests and summaries.
    pub fn primary_color(&self) -> Rgba8 {
        match self {
            Paint::Solid { color } => *color,
            Paint::Linear { stops, .. } | Paint::Radial { stops, .. } => {
                stops.first().map(|(_, c)| *c).unwrap_or(Rgba8::TRANSPARENT)
            }
        }
    }
}

fn color_at(stops: &[(f32, Rgba8)], t: f64) -> Rgba8 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let Some(&(first_at, first)) = stops.first() else {
        return Rgba8::TRANSPARENT;
    };
    if t <= f64::from(first_at) {
        return first;
    }
    for pair in stops.windows(2) {
        let (a_at, a) = (f64::from(pair[0].0), pair[0].1);
        let (b_at, b) = (f64::from(pair[1].0), pair[1].1);
        if t <= b_at {
            let span = b_at - a_at;
            return if span <= f64::EPSILON {
                b
            } else {
                a.mix(b, (t - a_at) / span)
            };
        }
    }
    stops.last().map(|(_, c)| *c).unwrap_or(first)
}

impl From<Rgba8> for Paint {
    fn from(color: Rgba8) -> Self {
        Paint::solid(color)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Horizontal anchoring of text relative to the draw position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Text appearance. The draw position's `y` is the vertical middle of the line.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f64,
    pub weight: FontWeight,
    pub color: Rgba8,
    pub align: TextAlign,
}

impl TextStyle {
    pub fn new(size: f64, color: Rgba8) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
            color,
            align: TextAlign::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }

    pub fn right(mut self) -> Self {
        self.align = TextAlign::Right;
        self
    }

    pub fn with_color(mut self, color: Rgba8) -> Self {
        self.color = color;
        self
    }
}

/// The immediate-mode 2D drawing seam every renderer paints against.
///
/// Implementations: [`crate::RasterSurface`] (pixels via `vello_cpu`) and
/// [`crate::RecordingSurface`] (a serializable display list). Renderers never know which one
/// they are driving.
pub trait Surface {
    /// Pixel size of the drawing area.
    fn canvas(&self) -> Canvas;

    /// Fill `path` (non-zero winding).
    fn fill(&mut self, path: &BezPath, paint: &Paint);

    /// Stroke `path` with round caps and joins.
    fn stroke(&mut self, path: &BezPath, width: f64, paint: &Paint);

    /// Draw a single line of text anchored at `at` (see [`TextStyle`]).
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);

    /// Advance width of `text` in pixels.
    fn measure_text(&mut self, text: &str, style: &TextStyle) -> f64;

    /// Start a group whose content is composited with `opacity`.
    fn push_opacity(&mut self, opacity: f32);

    /// End the innermost group started by [`Surface::push_opacity`].
    fn pop_layer(&mut self);
}

#[cfg(test)]
#[path = "../../tests/unit/draw/surface.rs"]
mod tests;
