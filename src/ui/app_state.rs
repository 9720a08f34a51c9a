//! # Application State Management
//!
//! Implements the central `AppState` struct owning all UI-visible state and
//! the `eframe::App` main loop.
//!
//! State is updated by draining refresh messages from the link tasks, then
//! the whole interface is rebuilt every frame (immediate mode). The render
//! layer reads state through accessors; mutation happens only here.

use eframe::egui;
use std::time::Duration;

use super::control_pad::{self, TouchState};
use super::status_panel;
use crate::control::{AppConfig, DriveIntent, PointerInput, Zone};
use crate::link::{LinkEvent, TelemetrySnapshot};
use crate::{CancelSignal, DriveCommandSender, LinkEventReceiver};

/// Central application state.
pub struct AppState {
    /// Receiver for refresh messages from the link tasks.
    link_rx: LinkEventReceiver,
    /// Sender for changed drive intents to the command loop.
    drive_tx: DriveCommandSender,
    /// Cancellation signals for both link loops, fired on shutdown.
    command_cancel: &'static CancelSignal,
    telemetry_cancel: &'static CancelSignal,

    /// Desired motion intent derived from the currently pressed zones.
    intent: DriveIntent,
    /// Whether `intent` still has to be handed to the command loop.
    intent_dirty: bool,
    /// Pressed state per zone from the previous frame, for edge detection.
    zones_pressed: [bool; Zone::ALL.len()],
    /// Active touch points for the control pad's touch adapter.
    touch: TouchState,

    /// Last observed device status.
    telemetry: TelemetrySnapshot,
    /// Round trip of the most recent command push.
    command_latency_ms: Option<u32>,

    // Display thresholds from the station configuration
    max_ping_ms: u32,
    battery_limit: f32,
}

impl AppState {
    pub fn new(
        link_rx: LinkEventReceiver,
        drive_tx: DriveCommandSender,
        command_cancel: &'static CancelSignal,
        telemetry_cancel: &'static CancelSignal,
        config: &AppConfig,
    ) -> Self {
        Self {
            link_rx,
            drive_tx,
            command_cancel,
            telemetry_cancel,
            intent: DriveIntent::default(),
            intent_dirty: false,
            zones_pressed: [false; Zone::ALL.len()],
            touch: TouchState::default(),
            telemetry: TelemetrySnapshot::default(),
            command_latency_ms: None,
            max_ping_ms: config.max_ping_ms,
            battery_limit: config.battery_limit,
        }
    }

    /// Latest telemetry snapshot for the status tiles.
    pub fn telemetry(&self) -> &TelemetrySnapshot {
        &self.telemetry
    }

    /// Round trip of the most recent command push. Command channel only.
    pub fn command_latency_ms(&self) -> Option<u32> {
        self.command_latency_ms
    }

    pub fn battery_limit(&self) -> f32 {
        self.battery_limit
    }

    pub fn max_ping_ms(&self) -> u32 {
        self.max_ping_ms
    }

    /// Current drive intent, for the pad highlights.
    pub fn intent(&self) -> DriveIntent {
        self.intent
    }

    /// Active touch points, for the control pad's touch adapter.
    pub fn touch(&self) -> &TouchState {
        &self.touch
    }

    fn drain_link_events(&mut self) {
        while let Ok(event) = self.link_rx.try_receive() {
            match event {
                LinkEvent::CommandLatency(latency) => self.command_latency_ms = latency,
                LinkEvent::Telemetry(snapshot) => self.telemetry = snapshot,
            }
        }
    }

    /// Folds this frame's pressed state per zone into the drive intent.
    ///
    /// Any net change triggers an immediate command push on top of the
    /// periodic cadence. If the drive queue is momentarily full the change
    /// is retried next frame, so the freshest intent always reaches the
    /// command loop.
    fn reconcile_zones(&mut self, pressed: [bool; Zone::ALL.len()]) {
        for (slot, zone) in Zone::ALL.into_iter().enumerate() {
            if pressed[slot] != self.zones_pressed[slot] {
                self.zones_pressed[slot] = pressed[slot];
                if self.intent.apply(PointerInput { zone, pressed: pressed[slot] }) {
                    self.intent_dirty = true;
                }
            }
        }
        if self.intent_dirty && self.drive_tx.try_send(self.intent).is_ok() {
            self.intent_dirty = false;
        }
    }
}

impl eframe::App for AppState {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Repaint periodically so link updates are visible without input
        ctx.request_repaint_after(Duration::from_millis(50));

        self.drain_link_events();
        self.touch.update(ctx);

        let mut pressed = [false; Zone::ALL.len()];
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(3, |columns| {
                control_pad::render_throttle_zones(&mut columns[0], self, &mut pressed);
                status_panel::render(&mut columns[1], self);
                control_pad::render_steering_zones(&mut columns[2], self, &mut pressed);
            });
        });

        self.reconcile_zones(pressed);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("stopping link loops");
        self.command_cancel.signal(());
        self.telemetry_cancel.signal(());
    }
}
