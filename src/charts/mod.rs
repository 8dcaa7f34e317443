//! Charts module - Chart configuration, rendering and presentation

mod config;
mod presenter;
mod renderer;
mod surface;

pub use config::{
    format_value, BarChartConfig, BarPoint, ChartData, ChartKind, ChartOptions, Dataset,
    LabelPosition, Rgba, DATASET_LABEL, HIGHLIGHT_COLOR, MUTED_COLOR,
};
pub use presenter::{ChartPresenter, PresenterState};
pub use renderer::{BitmapSurface, PlottersLibrary, RenderSettings};
pub use surface::{ChartError, ChartingLibrary, RenderSurface};
