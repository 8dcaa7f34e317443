//! Chart Viewer Widget
//! Chart card showing the current render surface as a texture.

use egui::{Color32, RichText, TextureHandle, TextureOptions};
use image::RgbImage;

const CARD_FILL: Color32 = Color32::from_rgba_premultiplied(11, 32, 47, 51);
const BOX_BORDER: Color32 = Color32::from_rgb(54, 162, 235);
const BOX_WIDTH_RATIO: f32 = 0.7;

/// Holds the texture mirroring the presenter's surface.
#[derive(Default)]
pub struct ChartViewer {
    texture: Option<TextureHandle>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the texture with a freshly rendered surface.
    pub fn set_surface(&mut self, ctx: &egui::Context, pixels: &RgbImage) {
        let size = [pixels.width() as usize, pixels.height() as usize];
        let image = egui::ColorImage::from_rgb(size, pixels.as_raw());
        // Dropping the previous handle frees its GPU texture
        self.texture = Some(ctx.load_texture("chart", image, TextureOptions::LINEAR));
    }

    pub fn clear(&mut self) {
        self.texture = None;
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(texture) = &self.texture else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        egui::Frame::none()
            .fill(CARD_FILL)
            .inner_margin(20.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    let box_width = ui.available_width() * BOX_WIDTH_RATIO;
                    egui::Frame::none()
                        .fill(Color32::WHITE)
                        .stroke(egui::Stroke::new(2.0, BOX_BORDER))
                        .inner_margin(12.0)
                        .show(ui, |ui| {
                            ui.set_max_width(box_width);
                            ui.add(
                                egui::Image::new(egui::load::SizedTexture::from_handle(texture))
                                    .max_width(box_width)
                                    .maintain_aspect_ratio(true),
                            );
                        });
                });
            });
    }
}
