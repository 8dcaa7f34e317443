//! FinChart - Financial metrics bar chart viewer
//!
//! A Rust application showing five years of financial metrics as an interactive bar chart.

use anyhow::Context;
use eframe::egui;
use finchart::config::AppConfig;
use finchart::gui::FinChartApp;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> anyhow::Result<()> {
    setup_logging();

    let config = AppConfig::discover().context("Failed to load configuration")?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 500.0])
            .with_title("FinChart"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "FinChart",
        options,
        Box::new(move |cc| Ok(Box::new(FinChartApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))
}
