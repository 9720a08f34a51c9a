//! Device status tile column.
//!
//! Five stacked tiles: station branding, device state, battery voltage, a
//! spacer, and the command-channel round trip. Tile contents come from the
//! pure derivations in [`super::tiles`].

use eframe::egui;

use super::AppState;
use super::tiles::{self, Tile};

const INFO_FILL: egui::Color32 = egui::Color32::from_rgb(30, 45, 70);
const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(140, 25, 25);

/// Render the status tile column.
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    let telemetry = state.telemetry();
    let column = [
        Tile {
            label: "",
            text: "RC Control\nStation".to_string(),
            ok: true,
        },
        tiles::status_tile(telemetry.device_state.as_deref()),
        tiles::battery_tile(telemetry.battery, state.battery_limit()),
        Tile {
            label: "",
            text: String::new(),
            ok: true,
        },
        tiles::connect_tile(state.command_latency_ms(), state.max_ping_ms()),
    ];

    let spacing = ui.spacing().item_spacing.y;
    let tile_height = (ui.available_height() - spacing * (column.len() - 1) as f32) / column.len() as f32;
    for tile in &column {
        tile_frame(ui, tile, tile_height);
    }
}

fn tile_frame(ui: &mut egui::Ui, tile: &Tile, height: f32) {
    let fill = if tile.ok { INFO_FILL } else { ERROR_FILL };
    egui::Frame::default()
        .fill(fill)
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.set_height(height - 16.0);
            if !tile.label.is_empty() {
                ui.label(tile.label);
            }
            if !tile.text.is_empty() {
                ui.label(egui::RichText::new(&tile.text).size(20.0).strong());
            }
        });
}
