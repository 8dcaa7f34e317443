//! Application Configuration
//! Window and render settings, read from an optional JSON file.

use crate::charts::RenderSettings;
use crate::export::DEFAULT_QUALITY;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "FINCHART_CONFIG";
/// Looked up in the working directory when the variable is unset.
pub const CONFIG_FILE: &str = "finchart.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_size: [f32; 2],
    pub chart_width: u32,
    pub chart_height: u32,
    pub jpeg_quality: f32,
    pub draw_labels: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let render = RenderSettings::default();
        Self {
            window_size: [1200.0, 700.0],
            chart_width: render.width,
            chart_height: render.height,
            jpeg_quality: DEFAULT_QUALITY,
            draw_labels: render.draw_labels,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `$FINCHART_CONFIG`, then `./finchart.json`, then defaults.
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            let path = PathBuf::from(path);
            tracing::info!(path = %path.display(), "Loading config from {}", CONFIG_ENV);
            return Self::load(&path);
        }

        let local = Path::new(CONFIG_FILE);
        if local.is_file() {
            tracing::info!(path = %local.display(), "Loading config");
            return Self::load(local);
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            width: self.chart_width.max(1),
            height: self.chart_height.max(1),
            draw_labels: self.draw_labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{ "chart_width": 640 }"#).unwrap();
        assert_eq!(config.chart_width, 640);
        assert_eq!(config.chart_height, 540);
        assert_eq!(config.jpeg_quality, 1.0);
        assert!(config.draw_labels);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "window_size": [800, 600], "draw_labels": false, "jpeg_quality": 0.8 }}"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.window_size, [800.0, 600.0]);
        assert_eq!(config.jpeg_quality, 0.8);
        assert!(!config.render_settings().draw_labels);
    }

    #[test]
    fn reports_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn zero_sized_chart_is_clamped() {
        let config = AppConfig {
            chart_width: 0,
            chart_height: 0,
            ..AppConfig::default()
        };
        let settings = config.render_settings();
        assert_eq!((settings.width, settings.height), (1, 1));
    }
}
