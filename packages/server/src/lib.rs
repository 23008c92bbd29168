//! Chat server library.
//!
//! Users authenticate over HTTP, open one WebSocket each, and receive presence
//! updates and direct messages over it. Messages are sent over HTTP and persisted
//! before they are pushed to the recipient's live connection.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerArgs;
pub use ui::run;
