//! Chat server with live presence and direct messages.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chatty-server -- --port 5001
//! ```

use chatty_server::ServerArgs;
use chatty_shared::logger::setup_logger;
use clap::Parser;

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Run the server
    if let Err(e) = chatty_server::run(args).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
