//! Control Panel Widget
//! Top bar with the metric tabs and the download menu.

use crate::data::MetricKey;
use crate::export::ExportFormat;
use egui::{Color32, RichText};

const TAB_FILL: Color32 = Color32::from_rgba_premultiplied(11, 32, 47, 51);
const TAB_TEXT: Color32 = Color32::from_rgb(54, 162, 235);
const ACTIVE_FILL: Color32 = Color32::from_rgb(40, 54, 173);
const ACTIVE_TEXT: Color32 = Color32::WHITE;
const TITLE_COLOR: Color32 = Color32::from_rgb(92, 196, 188);
const FONT_SIZE: f32 = 16.0;

/// Action requested from the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    SelectMetric(MetricKey),
    Download(ExportFormat),
}

pub struct ControlPanel {
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the tab bar; `active` gets the highlighted tab.
    pub fn show(&mut self, ui: &mut egui::Ui, active: MetricKey) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            for key in MetricKey::ALL {
                let is_active = key == active;
                let (fill, text) = if is_active {
                    (ACTIVE_FILL, ACTIVE_TEXT)
                } else {
                    (TAB_FILL, TAB_TEXT)
                };
                let caption = RichText::new(key.label()).size(FONT_SIZE).color(text);
                let button = egui::Button::new(caption).fill(fill).rounding(0.0);
                if ui.add(button).clicked() {
                    action = ControlPanelAction::SelectMetric(key);
                }
                ui.add_space(10.0);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.menu_button(
                    RichText::new("Download").size(FONT_SIZE).color(TAB_TEXT),
                    |ui| {
                        for format in ExportFormat::ALL {
                            if ui.button(format.label()).clicked() {
                                action = ControlPanelAction::Download(format);
                                ui.close_menu();
                            }
                        }
                    },
                );
            });
        });

        ui.add_space(5.0);
        ui.label(RichText::new(&self.status).size(12.0).color(TITLE_COLOR));
        ui.add_space(5.0);

        action
    }
}
