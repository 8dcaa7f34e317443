//! Image Export Module
//! Encodes a rendered chart surface as PNG or JPEG named `chart.<format>`.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageError, RgbImage};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Full quality, matching a `toDataURL(mime, 1.0)` export.
pub const DEFAULT_QUALITY: f32 = 1.0;

const FILE_STEM: &str = "chart";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No chart has been rendered yet")]
    NoSurface,
    #[error("Failed to encode image: {0}")]
    Encode(#[from] ImageError),
    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported image format: {0}")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    /// Download menu order.
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Jpeg, ExportFormat::Png];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }

    /// Menu caption.
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Jpeg => "JPEG",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.{}", FILE_STEM, self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpeg" | "jpg" => Ok(ExportFormat::Jpeg),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Encoded chart ready to be saved.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportedImage {
    pub fn save_to(&self, path: &Path) -> Result<(), ExportError> {
        fs::write(path, &self.bytes)?;
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "Saved chart image");
        Ok(())
    }
}

/// Encode `pixels`. `quality` in `[0, 1]` only affects JPEG.
pub fn encode(
    pixels: &RgbImage,
    format: ExportFormat,
    quality: f32,
) -> Result<ExportedImage, ExportError> {
    let (width, height) = pixels.dimensions();
    let mut bytes = Vec::new();

    match format {
        ExportFormat::Png => {
            PngEncoder::new(&mut bytes).write_image(
                pixels.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
        }
        ExportFormat::Jpeg => {
            JpegEncoder::new_with_quality(&mut bytes, jpeg_quality(quality)).write_image(
                pixels.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
        }
    }

    tracing::debug!(%format, width, height, bytes = bytes.len(), "Encoded chart image");
    Ok(ExportedImage {
        file_name: format.file_name(),
        mime_type: format.mime_type(),
        bytes,
    })
}

fn jpeg_quality(quality: f32) -> u8 {
    let quality = if quality.is_nan() { DEFAULT_QUALITY } else { quality };
    ((quality.clamp(0.0, 1.0) * 100.0).round() as u8).max(1)
}
