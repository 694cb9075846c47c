// Infrastructure layer (shared components)
pub mod config;
pub mod error;
pub mod store;

// Domain layer (business logic)
pub mod broadcast;
pub mod queue;

// Application layer
pub mod api;
pub mod server;
pub mod websocket;
