//! FinChart Main Application
//! Main window with the metric tab bar and the chart card.

use crate::charts::{ChartPresenter, PlottersLibrary, RenderSurface};
use crate::config::AppConfig;
use crate::data::{MetricKey, FINANCIALS};
use crate::export::ExportFormat;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use anyhow::Context;
use std::path::PathBuf;

/// Main application window.
pub struct FinChartApp {
    config: AppConfig,
    presenter: Option<ChartPresenter<PlottersLibrary>>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl FinChartApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            presenter: None,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            config,
        };

        let library = PlottersLibrary::new(app.config.render_settings());
        match ChartPresenter::mount(library, &FINANCIALS) {
            Ok(presenter) => {
                app.presenter = Some(presenter);
                app.sync_texture(&cc.egui_ctx);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to render chart");
                app.control_panel.set_status(&format!("Error: {}", e));
            }
        }
        app
    }

    fn active_metric(&self) -> MetricKey {
        self.presenter
            .as_ref()
            .map(|p| p.active_metric())
            .unwrap_or_default()
    }

    /// Mirror the presenter's surface into the viewer texture.
    fn sync_texture(&mut self, ctx: &egui::Context) {
        match self.presenter.as_ref().and_then(|p| p.surface()) {
            Some(surface) => self.chart_viewer.set_surface(ctx, surface.pixels()),
            None => self.chart_viewer.clear(),
        }
    }

    fn handle_select_metric(&mut self, ctx: &egui::Context, key: MetricKey) {
        let Some(presenter) = self.presenter.as_mut() else {
            return;
        };

        match presenter.select_metric(key) {
            Ok(()) => self.control_panel.set_status(key.label()),
            Err(e) => {
                tracing::error!(metric = %key, error = %e, "Failed to render chart");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
        self.sync_texture(ctx);
    }

    /// Handle image download - encode the surface, then ask where to save it
    fn handle_download(&mut self, format: ExportFormat) {
        match self.export_to_file(format) {
            Ok(Some(path)) => self
                .control_panel
                .set_status(&format!("Saved {}", path.display())),
            Ok(None) => {} // User cancelled
            Err(e) => {
                tracing::error!(%format, error = %e, "Export failed");
                self.control_panel.set_status(&format!("Export error: {:#}", e));
            }
        }
    }

    fn export_to_file(&self, format: ExportFormat) -> anyhow::Result<Option<PathBuf>> {
        let presenter = self
            .presenter
            .as_ref()
            .context("Chart is not mounted")?;
        let image = presenter
            .export_image_with_quality(format, self.config.jpeg_quality)
            .with_context(|| format!("Failed to export {}", format.label()))?;

        let Some(path) = rfd::FileDialog::new()
            .add_filter(format.label(), &[format.extension()])
            .set_file_name(&image.file_name)
            .save_file()
        else {
            return Ok(None);
        };

        image
            .save_to(&path)
            .with_context(|| format!("Failed to save {}", path.display()))?;
        Ok(Some(path))
    }
}

impl eframe::App for FinChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("control_panel").show(ctx, |ui| {
            let active = self.active_metric();
            let action = self.control_panel.show(ui, active);

            match action {
                ControlPanelAction::SelectMetric(key) => self.handle_select_metric(ctx, key),
                ControlPanelAction::Download(format) => self.handle_download(format),
                ControlPanelAction::None => {}
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
