//! Route table and middleware.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{error::ServerError, handler, state::AppState};

/// Request bodies carry inline images
const MAX_BODY_BYTES: usize = 100 * 1024 * 1024;

pub fn build_router(state: AppState, cors_origin: &str) -> Result<Router, ServerError> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .map_err(|_| ServerError::InvalidCorsOrigin(cors_origin.to_string()))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true);

    let router = Router::new()
        .route("/api/health", get(handler::health_check))
        .route("/api/presence", get(handler::online_users))
        .route("/api/auth/signup", post(handler::signup))
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/logout", post(handler::logout))
        .route("/api/auth/check", get(handler::check))
        .route("/api/auth/update-profile", put(handler::update_profile))
        .route("/api/messages/users", get(handler::list_users))
        .route("/api/messages/send/{user_id}", post(handler::send_message))
        .route("/api/messages/{user_id}", get(handler::get_messages))
        .route("/ws", get(handler::websocket_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}
