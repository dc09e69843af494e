//! Drawing backends.
//!
//! [`raster::RasterSurface`] paints pixels with `vello_cpu`; [`recording::RecordingSurface`]
//! captures a display list for previews, exports and tests.

/// Frame readback and PNG encoding.
pub mod backend;
/// CPU raster backend.
pub mod raster;
/// Display-list backend.
pub mod recording;
