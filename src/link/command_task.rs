//! Command push loop.

use embassy_futures::select::{Either3, select3};
use embassy_time::{Duration, Timer};

use super::LinkEvent;
use crate::control::{DeviceClient, DriveIntent};
use crate::{CancelSignal, DriveCommandReceiver, LinkEventSender};

/// Pushes the drive intent to the device.
///
/// One push at startup, then another after every cadence timeout or as soon
/// as the UI reports a changed intent, whichever comes first. A fresh intent
/// supersedes the pending cadence wait, so at most one push is ever
/// scheduled. The next iteration starts only after the previous request has
/// settled; updates queued while a push is in flight are coalesced to the
/// freshest intent.
#[embassy_executor::task]
pub async fn command_task(
    client: DeviceClient,
    interval_ms: u64,
    drive_rx: DriveCommandReceiver,
    events_tx: LinkEventSender,
    cancel: &'static CancelSignal,
) {
    log::info!("command link started ({} ms cadence)", interval_ms);
    let interval = Duration::from_millis(interval_ms);
    let mut intent = DriveIntent::default();

    loop {
        while let Ok(updated) = drive_rx.try_receive() {
            intent = updated;
        }

        let latency = match client.send_command(&intent) {
            Ok(rtt) => Some(rtt.as_millis() as u32),
            Err(err) => {
                log::warn!("command push failed: {err:#}");
                None
            }
        };
        events_tx.send(LinkEvent::CommandLatency(latency)).await;

        match select3(drive_rx.receive(), Timer::after(interval), cancel.wait()).await {
            Either3::First(updated) => intent = updated,
            Either3::Second(()) => {}
            Either3::Third(()) => break,
        }
    }

    log::info!("command link stopped");
}
