//! Telemetry poll loop.

use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Timer};

use super::{LinkEvent, TelemetrySnapshot};
use crate::control::DeviceClient;
use crate::{CancelSignal, LinkEventSender};

/// Polls device telemetry on a fixed cadence.
///
/// Polls are serialized: the cadence wait starts only after the previous
/// request has settled, so a slow device cannot pile up overlapping polls.
/// A failed poll publishes a snapshot with every field absent; the next
/// scheduled poll is the retry.
#[embassy_executor::task]
pub async fn telemetry_task(
    client: DeviceClient,
    interval_ms: u64,
    events_tx: LinkEventSender,
    cancel: &'static CancelSignal,
) {
    log::info!("telemetry link started ({} ms cadence)", interval_ms);
    let interval = Duration::from_millis(interval_ms);

    loop {
        let snapshot = match client.fetch_telemetry() {
            Ok((reading, rtt)) => TelemetrySnapshot::from_reading(reading, rtt),
            Err(err) => {
                log::warn!("telemetry poll failed: {err:#}");
                TelemetrySnapshot::unavailable()
            }
        };
        events_tx.send(LinkEvent::Telemetry(snapshot)).await;

        match select(Timer::after(interval), cancel.wait()).await {
            Either::First(()) => {}
            Either::Second(()) => break,
        }
    }

    log::info!("telemetry link stopped");
}
