//! Domain factories for generating identifiers.
//!
//! Generation is kept apart from the validation logic in the value objects.

use uuid::Uuid;

use super::value_object::{ConnectionId, MessageId, SessionToken, UserId};

/// Factory for generating ConnectionId instances.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(Uuid::new_v4())
    }
}

/// Factory for generating MessageId instances.
pub struct MessageIdFactory;

impl MessageIdFactory {
    /// Generate a new MessageId with a random UUID v4.
    pub fn generate() -> MessageId {
        MessageId::from_uuid(Uuid::new_v4())
    }
}

/// Factory for generating UserId instances for newly created users.
pub struct UserIdFactory;

impl UserIdFactory {
    pub fn generate() -> UserId {
        UserId::from_uuid(Uuid::new_v4())
    }
}

/// Factory for issuing session tokens.
pub struct SessionTokenFactory;

impl SessionTokenFactory {
    /// Two concatenated v4 UUIDs (244 random bits) in simple form.
    pub fn generate() -> SessionToken {
        SessionToken::generated(format!(
            "{}{}",
            Uuid::new_v4().simple(),
            Uuid::new_v4().simple()
        ))
    }
}
