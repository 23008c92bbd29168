//! Server start-up.

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::ServerArgs;

use super::{error::ServerError, router::build_router, signal::shutdown_signal, state::AppState};

/// Build the in-memory state, bind and serve until Ctrl+C / SIGTERM.
pub async fn run(args: ServerArgs) -> Result<(), ServerError> {
    let state = AppState::in_memory(args.message_capacity);
    let app = build_router(state, &args.cors_origin)?;

    let address = args.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
    tracing::info!(address = %address, cors_origin = %args.cors_origin, "Server listening");

    serve(listener, app, shutdown_signal()).await?;
    tracing::info!("Server stopped");
    Ok(())
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
