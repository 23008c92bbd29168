//! InMemory Session Repository 実装
//!
//! トークン -> ユーザー ID の対応表。HTTP リクエストと WebSocket ハンドシェイクの
//! 両方がここでトークンを検証する。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    RepositoryError, SessionRepository, SessionToken, SessionTokenFactory, UserId,
};

/// インメモリ Session Repository 実装
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<SessionToken, UserId>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn issue(&self, user_id: UserId) -> Result<SessionToken, RepositoryError> {
        let token = SessionTokenFactory::generate();
        let mut sessions = self.sessions.lock().await;
        sessions.insert(token.clone(), user_id);
        Ok(token)
    }

    async fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, RepositoryError> {
        let sessions = self.sessions.lock().await;
        Ok(sessions.get(token).cloned())
    }

    async fn revoke(&self, token: &SessionToken) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.lock().await;
        sessions
            .remove(token)
            .map(|_| ())
            .ok_or(RepositoryError::SessionNotFound)
    }
}
