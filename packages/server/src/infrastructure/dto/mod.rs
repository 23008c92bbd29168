//! Data transfer objects for HTTP and WebSocket payloads.

pub mod http;
pub mod websocket;
