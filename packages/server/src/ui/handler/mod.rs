//! Handler modules for HTTP and WebSocket endpoints.

pub mod auth;
pub mod http;
pub mod message;
pub mod websocket;

// Re-export HTTP handlers
pub use auth::{check, login, logout, signup, update_profile};
pub use http::{health_check, online_users};
pub use message::{get_messages, list_users, send_message};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
