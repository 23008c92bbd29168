//! Per-connection lifecycle handle.
//!
//! A [`ConnectionSession`] exists from the moment a connection is bound to a user until
//! it reaches `Closed`. Cleanup runs exactly once: through [`ConnectionSession::close`],
//! or from `Drop` if the owning task was cancelled first.

use crate::domain::{Connection, ConnectionState, StateTransitionError, UserId};

use super::disconnect_user::{DisconnectOutcome, DisconnectUserUseCase};

pub struct ConnectionSession {
    user_id: UserId,
    connection: Connection,
    state: ConnectionState,
    disconnect: DisconnectUserUseCase,
}

impl ConnectionSession {
    pub(super) fn new(
        user_id: UserId,
        connection: Connection,
        state: ConnectionState,
        disconnect: DisconnectUserUseCase,
    ) -> Self {
        Self {
            user_id,
            connection,
            state,
            disconnect,
        }
    }

    pub(super) fn mark_open(&mut self) -> Result<(), StateTransitionError> {
        self.state.transition(ConnectionState::Open)
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Drive the connection to `Closed`: guarded unregister, then re-announce.
    pub async fn close(mut self) -> DisconnectOutcome {
        let outcome = self
            .disconnect
            .execute(&self.user_id, &self.connection)
            .await;
        // Only mark closed once cleanup finished, so a cancelled close still
        // falls back to the Drop path.
        self.state = ConnectionState::Closed;
        tracing::debug!(user_id = %self.user_id, connection_id = %self.connection.id(), "Connection closed");
        outcome
    }
}

impl Drop for ConnectionSession {
    fn drop(&mut self) {
        if self.state == ConnectionState::Closed {
            return;
        }
        self.state = ConnectionState::Closed;

        let disconnect = self.disconnect.clone();
        let user_id = self.user_id.clone();
        let connection = self.connection.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::debug!(
                    user_id = %user_id,
                    connection_id = %connection.id(),
                    "Connection dropped without close; scheduling cleanup"
                );
                handle.spawn(async move {
                    disconnect.execute(&user_id, &connection).await;
                });
            }
            Err(_) => {
                tracing::error!(
                    user_id = %user_id,
                    connection_id = %connection.id(),
                    "Connection dropped outside a runtime; registry entry not cleaned up"
                );
            }
        }
    }
}
