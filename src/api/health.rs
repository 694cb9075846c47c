//! Health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::broadcast::BroadcastStatsSnapshot;
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub observers: ObserverHealthResponse,
    pub queue: QueueHealthResponse,
    pub broadcast: BroadcastStatsSnapshot,
}

#[derive(Debug, Serialize)]
pub struct ObserverHealthResponse {
    pub connected: usize,
}

#[derive(Debug, Serialize)]
pub struct QueueHealthResponse {
    pub current_number: u32,
    pub waiting_count: usize,
    pub total_items: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = state.queue.status().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        observers: ObserverHealthResponse {
            connected: state.registry.len(),
        },
        queue: QueueHealthResponse {
            current_number: status.current_number,
            waiting_count: status.waiting_count,
            total_items: status.queue_items.len(),
        },
        broadcast: state.broadcaster.stats(),
    })
}
