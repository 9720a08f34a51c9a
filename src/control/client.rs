//! HTTP client for the device's command and telemetry endpoints.

use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};

use super::{AppConfig, DriveIntent};

/// Telemetry as reported by the device.
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryReading {
    #[serde(rename = "Battery")]
    pub battery: f32,
    #[serde(rename = "State")]
    pub state: String,
}

/// Client for the device's two HTTP endpoints.
///
/// Round trips are measured client-side around the whole request, which is
/// what the connection tile reports.
#[derive(Clone)]
pub struct DeviceClient {
    client: Client,
    base_url: String,
}

impl DeviceClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.device_url.trim_end_matches('/').to_string(),
        })
    }

    /// Push a drive intent to the device.
    ///
    /// Success is any 2xx response; the body is ignored. Returns the round
    /// trip time of the request.
    pub fn send_command(&self, intent: &DriveIntent) -> Result<Duration> {
        let url = format!("{}/command", self.base_url);
        let payload = intent.to_payload();
        log::debug!("sending command to {}: {:?}", url, payload);

        let started = Instant::now();
        let response = self
            .client
            .put(&url)
            .json(&payload)
            .send()
            .context("command request failed")?;
        let rtt = started.elapsed();

        let status = response.status();
        if !status.is_success() {
            bail!("command rejected with status {}", status);
        }
        Ok(rtt)
    }

    /// Fetch a telemetry reading from the device.
    ///
    /// Success is any 2xx response with a parseable JSON body. Returns the
    /// reading together with the round trip time of the request.
    pub fn fetch_telemetry(&self) -> Result<(TelemetryReading, Duration)> {
        let url = format!("{}/telemetry", self.base_url);

        let started = Instant::now();
        let response = self.client.get(&url).send().context("telemetry request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("telemetry rejected with status {}", status);
        }
        let reading: TelemetryReading = response.json().context("invalid telemetry body")?;
        let rtt = started.elapsed();
        log::debug!("received telemetry {:?} in {:?}", reading, rtt);
        Ok((reading, rtt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::{get, put};
    use axum::{Json, Router};
    use std::net::SocketAddr;

    /// Serves the given routes on an ephemeral local port.
    fn spawn_device(router: Router) -> SocketAddr {
        let (addr_tx, addr_rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                addr_tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, router).await.unwrap();
            });
        });
        addr_rx.recv().unwrap()
    }

    fn client_for(addr: SocketAddr) -> DeviceClient {
        let config = AppConfig {
            device_url: format!("http://{}", addr),
            request_timeout_ms: 2000,
            ..AppConfig::default()
        };
        DeviceClient::new(&config).unwrap()
    }

    #[test]
    fn telemetry_round_trip_reports_reading_and_latency() {
        let router = Router::new().route(
            "/telemetry",
            get(|| async { Json(serde_json::json!({ "Battery": 4.1, "State": "Driving" })) }),
        );
        let client = client_for(spawn_device(router));

        let (reading, rtt) = client.fetch_telemetry().unwrap();
        assert_eq!(reading.state, "Driving");
        assert!((reading.battery - 4.1).abs() < 1e-6);
        assert!(rtt.as_millis() < 2000);
    }

    #[test]
    fn command_round_trip_succeeds_on_2xx() {
        let router = Router::new().route(
            "/command",
            put(|Json(body): Json<serde_json::Value>| async move {
                if body == serde_json::json!({ "Throttle": 1, "Steering": 0 }) {
                    StatusCode::OK
                } else {
                    StatusCode::BAD_REQUEST
                }
            }),
        );
        let client = client_for(spawn_device(router));

        let intent = DriveIntent { throttle: 1, steering: 0 };
        assert!(client.send_command(&intent).is_ok());
    }

    #[test]
    fn non_2xx_command_is_an_error() {
        let router = Router::new().route("/command", put(|| async { StatusCode::SERVICE_UNAVAILABLE }));
        let client = client_for(spawn_device(router));

        assert!(client.send_command(&DriveIntent::default()).is_err());
    }

    #[test]
    fn malformed_telemetry_body_is_an_error() {
        let router = Router::new().route("/telemetry", get(|| async { "not json" }));
        let client = client_for(spawn_device(router));

        assert!(client.fetch_telemetry().is_err());
    }

    #[test]
    fn unreachable_device_is_an_error() {
        // bind and immediately drop a listener so the port is closed
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let client = client_for(addr);

        assert!(client.send_command(&DriveIntent::default()).is_err());
        assert!(client.fetch_telemetry().is_err());
    }
}
