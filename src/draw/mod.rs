//! Backend-neutral drawing: the [`surface::Surface`] seam, shape helpers and fonts.

pub mod primitives;
/// The drawing surface trait and paint/text styles.
pub mod surface;
/// Font discovery and Parley text layout.
pub mod text;
