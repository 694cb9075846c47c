//! Queue command and query handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::queue::{QueueItem, QueueStatus};
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallResponse {
    pub success: bool,
    pub current_number: u32,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub enabled: bool,
}

/// Current queue status snapshot
#[tracing::instrument(name = "http.queue_status", skip(state))]
pub async fn queue_status(State(state): State<AppState>) -> Result<Json<QueueStatus>> {
    Ok(Json(state.queue.status().await))
}

/// Issue a new ticket
#[tracing::instrument(name = "http.new_ticket", skip(state))]
pub async fn new_ticket(State(state): State<AppState>) -> Result<Json<QueueItem>> {
    let item = state.queue.issue_ticket().await?;
    Ok(Json(item))
}

/// Call the next waiting number
#[tracing::instrument(name = "http.call_next", skip(state))]
pub async fn call_next(State(state): State<AppState>) -> Result<Json<CallResponse>> {
    let current_number = state.queue.call_next().await?;
    Ok(Json(CallResponse {
        success: true,
        current_number,
    }))
}

/// Call a specific number
#[tracing::instrument(name = "http.call_number", skip(state))]
pub async fn call_number(
    State(state): State<AppState>,
    Path(number): Path<u32>,
) -> Result<Json<CallResponse>> {
    let current_number = state.queue.call_number(number).await?;
    Ok(Json(CallResponse {
        success: true,
        current_number,
    }))
}

/// Mark a number as completed
#[tracing::instrument(name = "http.complete_number", skip(state))]
pub async fn complete_number(
    State(state): State<AppState>,
    Path(number): Path<u32>,
) -> Result<Json<AckResponse>> {
    state.queue.complete_number(number).await?;
    Ok(Json(AckResponse { success: true }))
}

/// Remove a number from the queue
#[tracing::instrument(name = "http.remove_number", skip(state))]
pub async fn remove_number(
    State(state): State<AppState>,
    Path(number): Path<u32>,
) -> Result<Json<AckResponse>> {
    state.queue.remove_number(number).await?;
    Ok(Json(AckResponse { success: true }))
}

/// Clear the queue and start a new epoch
#[tracing::instrument(name = "http.reset_queue", skip(state))]
pub async fn reset_queue(State(state): State<AppState>) -> Result<Json<AckResponse>> {
    state.queue.reset_queue().await?;
    Ok(Json(AckResponse { success: true }))
}

/// Toggle the call sound on displays
#[tracing::instrument(name = "http.set_sound", skip(state, request), fields(enabled = request.enabled))]
pub async fn set_sound(
    State(state): State<AppState>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<AckResponse>> {
    state.queue.set_sound_enabled(request.enabled).await?;
    Ok(Json(AckResponse { success: true }))
}

/// Toggle visual alerts on displays
#[tracing::instrument(name = "http.set_visual_alerts", skip(state, request), fields(enabled = request.enabled))]
pub async fn set_visual_alerts(
    State(state): State<AppState>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<AckResponse>> {
    state.queue.set_visual_alerts_enabled(request.enabled).await?;
    Ok(Json(AckResponse { success: true }))
}
