use eframe::egui;
use embassy_executor::Executor;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use env_logger::Builder;
use log::{LevelFilter, info};
use std::path::Path;
use std::thread;

use crate::control::{AppConfig, DeviceClient, DriveIntent};
use crate::link::LinkEvent;
use crate::ui::AppState;

mod control;
mod link;
mod ui;

const LINK_EVENT_CHANNEL_SIZE: usize = 64;
pub type LinkEventChannel = embassy_sync::channel::Channel<CriticalSectionRawMutex, LinkEvent, LINK_EVENT_CHANNEL_SIZE>;
pub type LinkEventReceiver = embassy_sync::channel::Receiver<'static, CriticalSectionRawMutex, LinkEvent, LINK_EVENT_CHANNEL_SIZE>;
pub type LinkEventSender = embassy_sync::channel::Sender<'static, CriticalSectionRawMutex, LinkEvent, LINK_EVENT_CHANNEL_SIZE>;

const DRIVE_COMMAND_CHANNEL_SIZE: usize = 8;
pub type DriveCommandChannel = embassy_sync::channel::Channel<CriticalSectionRawMutex, DriveIntent, DRIVE_COMMAND_CHANNEL_SIZE>;
pub type DriveCommandReceiver =
    embassy_sync::channel::Receiver<'static, CriticalSectionRawMutex, DriveIntent, DRIVE_COMMAND_CHANNEL_SIZE>;
pub type DriveCommandSender =
    embassy_sync::channel::Sender<'static, CriticalSectionRawMutex, DriveIntent, DRIVE_COMMAND_CHANNEL_SIZE>;

/// Cancellation token for a link loop, fired once on shutdown.
pub type CancelSignal = embassy_sync::signal::Signal<CriticalSectionRawMutex, ()>;

fn main() {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("rc_control_station"), LevelFilter::Debug)
        .init();

    info!("Starting up");

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let config = match AppConfig::load_or_default(Path::new(&config_path)) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err:#}");
            std::process::exit(2);
        }
    };
    info!("Controlling device at {}", config.device_url);

    let client = DeviceClient::new(&config).expect("failed to create device client");

    let link_event_channel: &'static LinkEventChannel = Box::leak(Box::new(LinkEventChannel::new()));
    let drive_command_channel: &'static DriveCommandChannel = Box::leak(Box::new(DriveCommandChannel::new()));
    let command_cancel: &'static CancelSignal = Box::leak(Box::new(CancelSignal::new()));
    let telemetry_cancel: &'static CancelSignal = Box::leak(Box::new(CancelSignal::new()));

    let link_event_tx = link_event_channel.sender();
    let link_event_rx = link_event_channel.receiver();
    let drive_tx = drive_command_channel.sender();
    let drive_rx = drive_command_channel.receiver();

    // One executor thread per link loop: a slow telemetry response must
    // never stall the command cadence.
    let command_client = client.clone();
    let command_interval = config.command_interval_ms;
    let _command_handle = thread::Builder::new()
        .name("command-link".to_string())
        .spawn(move || {
            // Leak the executor to satisfy the 'static lifetime required by run()
            let executor: &'static mut Executor = Box::leak(Box::new(Executor::new()));
            executor.run(|spawner| {
                let _ = spawner.spawn(link::command_task(
                    command_client,
                    command_interval,
                    drive_rx,
                    link_event_tx,
                    command_cancel,
                ));
            });
        })
        .expect("failed to spawn command link thread");

    let telemetry_client = client;
    let telemetry_interval = config.telemetry_interval_ms;
    let _telemetry_handle = thread::Builder::new()
        .name("telemetry-link".to_string())
        .spawn(move || {
            let executor: &'static mut Executor = Box::leak(Box::new(Executor::new()));
            executor.run(|spawner| {
                let _ = spawner.spawn(link::telemetry_task(
                    telemetry_client,
                    telemetry_interval,
                    link_event_tx,
                    telemetry_cancel,
                ));
            });
        })
        .expect("failed to spawn telemetry link thread");

    // Start the GUI on the main thread (required on macOS)
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 540.0]),
        ..Default::default()
    };
    let _ = eframe::run_native(
        "RC Control Station",
        native_options,
        Box::new(move |_cc| {
            Ok(Box::new(AppState::new(
                link_event_rx,
                drive_tx,
                command_cancel,
                telemetry_cancel,
                &config,
            )))
        }),
    );
}
