//! Export encoders for rendered surfaces.

/// PNG and JPEG encoding of a [`crate::RasterSurface`].
pub mod raster;
