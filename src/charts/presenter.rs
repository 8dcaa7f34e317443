//! Chart Presenter
//! Owns the dataset, the active metric and the live render surface.
//! Every metric change destroys the surface and builds a new one.

use crate::charts::{BarChartConfig, ChartError, ChartingLibrary, RenderSurface};
use crate::data::{FinancialRecord, MetricKey};
use crate::export::{self, ExportError, ExportFormat, ExportedImage, DEFAULT_QUALITY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterState {
    /// No surface.
    Idle,
    /// Surface exists and shows this metric.
    Rendered(MetricKey),
}

pub struct ChartPresenter<L: ChartingLibrary> {
    library: L,
    records: Vec<FinancialRecord>,
    active: MetricKey,
    config: Option<BarChartConfig>,
    surface: Option<L::Surface>,
}

impl<L: ChartingLibrary> ChartPresenter<L> {
    /// Mount with the default metric and render once.
    pub fn mount(library: L, records: &[FinancialRecord]) -> Result<Self, ChartError> {
        let mut presenter = Self {
            library,
            records: records.to_vec(),
            active: MetricKey::default(),
            config: None,
            surface: None,
        };
        presenter.render()?;
        Ok(presenter)
    }

    /// Switch the displayed metric. Always re-renders, even for the active one.
    pub fn select_metric(&mut self, key: MetricKey) -> Result<(), ChartError> {
        tracing::info!(metric = %key, previous = %self.active, "Selecting metric");
        self.active = key;
        self.render()
    }

    fn render(&mut self) -> Result<(), ChartError> {
        self.destroy_surface();

        let config = BarChartConfig::for_metric(&self.records, self.active);
        let surface = self.library.create(&config)?;
        self.surface = Some(surface);
        self.config = Some(config);
        Ok(())
    }

    /// Encode the current surface; the file name is `chart.<format>`.
    pub fn export_image(&self, format: ExportFormat) -> Result<ExportedImage, ExportError> {
        self.export_image_with_quality(format, DEFAULT_QUALITY)
    }

    pub fn export_image_with_quality(
        &self,
        format: ExportFormat,
        quality: f32,
    ) -> Result<ExportedImage, ExportError> {
        let surface = self.surface.as_ref().ok_or(ExportError::NoSurface)?;
        export::encode(surface.pixels(), format, quality)
    }

    /// Tear down the surface and return to `Idle`.
    pub fn unmount(&mut self) {
        self.destroy_surface();
    }

    fn destroy_surface(&mut self) {
        self.config = None;
        if let Some(surface) = self.surface.take() {
            surface.destroy();
        }
    }

    pub fn active_metric(&self) -> MetricKey {
        self.active
    }

    pub fn state(&self) -> PresenterState {
        match self.surface {
            Some(_) => PresenterState::Rendered(self.active),
            None => PresenterState::Idle,
        }
    }

    pub fn surface(&self) -> Option<&L::Surface> {
        self.surface.as_ref()
    }

    /// Configuration the current surface was built from.
    pub fn config(&self) -> Option<&BarChartConfig> {
        self.config.as_ref()
    }

    pub fn records(&self) -> &[FinancialRecord] {
        &self.records
    }

    pub fn library(&self) -> &L {
        &self.library
    }
}

impl<L: ChartingLibrary> Drop for ChartPresenter<L> {
    fn drop(&mut self) {
        self.destroy_surface();
    }
}
