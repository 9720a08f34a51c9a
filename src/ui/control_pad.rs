//! The four-zone control pad and its input adapters.
//!
//! Three adapters feed the same press/release reconciliation: the pointer
//! (mouse, or the primary synthesized touch), the raw multi-touch point set,
//! and held arrow/WASD keys. A zone counts as pressed while any adapter
//! reports it pressed; the intent core only ever sees the resulting edges.

use eframe::egui;
use std::collections::HashMap;

use super::AppState;
use crate::control::Zone;

const THROTTLE_ACTIVE_FILL: egui::Color32 = egui::Color32::from_rgb(20, 110, 50);
const STEERING_ACTIVE_FILL: egui::Color32 = egui::Color32::from_rgb(25, 80, 150);

/// Active touch points by id.
///
/// A zone is touched while at least one point lies inside it, and zero
/// remaining points is a release. No multi-touch disambiguation beyond that.
#[derive(Default)]
pub struct TouchState {
    points: HashMap<u64, egui::Pos2>,
}

impl TouchState {
    /// Folds this frame's raw touch events into the active point set.
    pub fn update(&mut self, ctx: &egui::Context) {
        ctx.input(|input| {
            for event in &input.events {
                if let egui::Event::Touch { id, phase, pos, .. } = event {
                    match phase {
                        egui::TouchPhase::Start | egui::TouchPhase::Move => {
                            self.points.insert(id.0, *pos);
                        }
                        egui::TouchPhase::End | egui::TouchPhase::Cancel => {
                            self.points.remove(&id.0);
                        }
                    }
                }
            }
        });
    }

    fn any_inside(&self, rect: egui::Rect) -> bool {
        self.points.values().any(|pos| rect.contains(*pos))
    }
}

/// Renders the forward/backward zones stacked in one column.
pub fn render_throttle_zones(ui: &mut egui::Ui, state: &AppState, pressed: &mut [bool; Zone::ALL.len()]) {
    let spacing = ui.spacing().item_spacing.y;
    let half = egui::vec2(ui.available_width(), (ui.available_height() - spacing) / 2.0);
    pressed[Zone::Forward.index()] = zone_button(ui, state, Zone::Forward, half);
    pressed[Zone::Backward.index()] = zone_button(ui, state, Zone::Backward, half);
}

/// Renders the left/right zones side by side in one column.
pub fn render_steering_zones(ui: &mut egui::Ui, state: &AppState, pressed: &mut [bool; Zone::ALL.len()]) {
    let spacing = ui.spacing().item_spacing.x;
    let half = egui::vec2((ui.available_width() - spacing) / 2.0, ui.available_height());
    ui.horizontal(|ui| {
        pressed[Zone::Left.index()] = zone_button(ui, state, Zone::Left, half);
        pressed[Zone::Right.index()] = zone_button(ui, state, Zone::Right, half);
    });
}

/// Draws one zone and reports whether any input modality holds it pressed.
fn zone_button(ui: &mut egui::Ui, state: &AppState, zone: Zone, size: egui::Vec2) -> bool {
    let mut button = egui::Button::new(egui::RichText::new(zone.label()).size(28.0).strong());
    if state.intent().is_active(zone) {
        button = button.fill(active_fill(zone));
    }
    let response = ui.add_sized(size, button);

    let pointer = response.is_pointer_button_down_on();
    let touched = state.touch().any_inside(response.rect);
    let key = ui.input(|input| key_held(input, zone));
    pointer || touched || key
}

fn active_fill(zone: Zone) -> egui::Color32 {
    match zone {
        Zone::Forward | Zone::Backward => THROTTLE_ACTIVE_FILL,
        Zone::Left | Zone::Right => STEERING_ACTIVE_FILL,
    }
}

fn key_held(input: &egui::InputState, zone: Zone) -> bool {
    match zone {
        Zone::Forward => input.key_down(egui::Key::ArrowUp) || input.key_down(egui::Key::W),
        Zone::Backward => input.key_down(egui::Key::ArrowDown) || input.key_down(egui::Key::S),
        Zone::Left => input.key_down(egui::Key::ArrowLeft) || input.key_down(egui::Key::A),
        Zone::Right => input.key_down(egui::Key::ArrowRight) || input.key_down(egui::Key::D),
    }
}
