//! Shared application state.

use std::sync::Arc;

use crate::{
    domain::{ConnectionRegistry, MessageRepository, SessionRepository, UserRepository},
    infrastructure::repository::{
        InMemoryConnectionRegistry, InMemoryMessageRepository, InMemorySessionRepository,
        InMemoryUserRepository,
    },
};

/// Query parameters for WebSocket connection
#[derive(Debug, serde::Deserialize)]
pub struct ConnectQuery {
    /// Session token issued by signup / login
    pub token: Option<String>,
}

/// Shared application state
///
/// Handlers build use cases from these collaborators per request.
#[derive(Clone)]
pub struct AppState {
    /// Live connections, one per user
    pub registry: Arc<dyn ConnectionRegistry>,
    pub messages: Arc<dyn MessageRepository>,
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionRepository>,
}

impl AppState {
    /// In-memory state holding at most `message_capacity` messages
    pub fn in_memory(message_capacity: usize) -> Self {
        Self {
            registry: Arc::new(InMemoryConnectionRegistry::new()),
            messages: Arc::new(InMemoryMessageRepository::with_capacity(message_capacity)),
            users: Arc::new(InMemoryUserRepository::new()),
            sessions: Arc::new(InMemorySessionRepository::new()),
        }
    }
}
