//! Command line / environment configuration.

use clap::Parser;

use crate::infrastructure::repository::inmemory::message::DEFAULT_MESSAGE_CAPACITY;

/// Chat server with live presence and direct messages
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "CHATTY_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(short, long, env = "PORT", default_value_t = 5001)]
    pub port: u16,

    /// Origin allowed by CORS (the web client)
    #[arg(long, env = "CHATTY_CORS_ORIGIN", default_value = "http://localhost:5173")]
    pub cors_origin: String,

    /// Maximum number of messages kept in memory
    #[arg(long, env = "CHATTY_MESSAGE_CAPACITY", default_value_t = DEFAULT_MESSAGE_CAPACITY)]
    pub message_capacity: usize,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl ServerArgs {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
