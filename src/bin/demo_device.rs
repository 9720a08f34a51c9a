//! Demo device server.
//!
//! Stands in for the vehicle during bench tests: exposes the same two HTTP
//! endpoints the control station talks to, with synthetic telemetry. Commands
//! are validated and logged, telemetry reports a battery voltage between
//! 4.0 V and 5.0 V and a ready state.

use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use env_logger::Builder;
use log::{LevelFilter, info};
use serde::{Deserialize, Serialize};

const DEFAULT_PORT: u16 = 8480;

#[derive(Debug, Deserialize)]
struct Command {
    /// -1: backward, 0: stop, 1: forward
    #[serde(rename = "Throttle")]
    throttle: f32,
    /// -1: left, 0: straight, 1: right
    #[serde(rename = "Steering")]
    steering: f32,
}

#[derive(Debug, Serialize)]
struct Telemetry {
    /// [V]
    #[serde(rename = "Battery")]
    battery: f32,
    #[serde(rename = "State")]
    state: &'static str,
}

async fn put_command(Json(command): Json<Command>) -> StatusCode {
    if !(-1.0..=1.0).contains(&command.throttle) || !(-1.0..=1.0).contains(&command.steering) {
        return StatusCode::BAD_REQUEST;
    }
    log::debug!("received command: {:?}", command);
    StatusCode::OK
}

async fn get_telemetry() -> Json<Telemetry> {
    let telemetry = Telemetry {
        battery: 4.0 + rand::random::<f32>(),
        state: "RDY",
    };
    log::debug!("sending telemetry: {:?}", telemetry);
    Json(telemetry)
}

fn router() -> Router {
    Router::new()
        .route("/command", put(put_command))
        .route("/telemetry", get(get_telemetry))
}

#[tokio::main]
async fn main() {
    Builder::new().filter_level(LevelFilter::Debug).init();

    let port: u16 = match std::env::args().nth(1) {
        Some(arg) => arg.parse().expect("port must be a number"),
        None => DEFAULT_PORT,
    };

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("failed to bind port");
    info!("Demo device listening on port {}", port);
    axum::serve(listener, router()).await.expect("server failed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_out_of_range_commands() {
        let status = put_command(Json(Command {
            throttle: 2.0,
            steering: 0.0,
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn accepts_in_range_commands() {
        let status = put_command(Json(Command {
            throttle: 1.0,
            steering: -1.0,
        }))
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn telemetry_reports_plausible_battery() {
        let Json(telemetry) = get_telemetry().await;
        assert_eq!(telemetry.state, "RDY");
        assert!(telemetry.battery >= 4.0 && telemetry.battery < 5.0);
    }
}
