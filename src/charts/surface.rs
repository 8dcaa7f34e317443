//! Charting library seam.
//! A library turns a [`BarChartConfig`] into pixels on a surface it owns.

use crate::charts::BarChartConfig;
use image::RgbImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Unknown axis key: {0}")]
    UnknownAxisKey(String),
    #[error("Chart configuration has no dataset")]
    EmptyDataset,
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("Pixel buffer does not match surface size")]
    Buffer,
}

/// Drawable target owned by a charting library handle.
pub trait RenderSurface {
    /// Current pixel buffer.
    fn pixels(&self) -> &RgbImage;

    /// Release the surface and its drawing context.
    fn destroy(self);
}

pub trait ChartingLibrary {
    type Surface: RenderSurface;

    /// Draw `config` onto a fresh surface.
    fn create(&mut self, config: &BarChartConfig) -> Result<Self::Surface, ChartError>;
}
