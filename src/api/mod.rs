//! API layer - HTTP endpoint handlers.

mod handlers;
mod health;
mod routes;

pub use handlers::{
    call_next, call_number, complete_number, new_ticket, queue_status, remove_number,
    reset_queue, set_sound, set_visual_alerts,
};
pub use health::health;
pub use routes::api_routes;
