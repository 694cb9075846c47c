use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::server::AppState;

use super::handlers::{
    call_next, call_number, complete_number, new_ticket, queue_status, remove_number,
    reset_queue, set_sound, set_visual_alerts,
};
use super::health::health;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health
        .route("/health", get(health))
        // Queue commands & queries
        .nest(
            "/api",
            Router::new()
                .route("/queue/status", get(queue_status))
                .route("/queue/new", post(new_ticket))
                .route("/queue/next", post(call_next))
                .route("/queue/call/{number}", post(call_number))
                .route("/queue/complete/{number}", post(complete_number))
                .route("/queue/item/{number}", delete(remove_number))
                .route("/queue/reset", post(reset_queue))
                // Display settings
                .route("/settings/sound", post(set_sound))
                .route("/settings/visual-alerts", post(set_visual_alerts)),
        )
}
