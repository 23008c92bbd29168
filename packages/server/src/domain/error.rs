//! Domain layer error definitions.

use thiserror::Error;

use super::value_object::ConnectionId;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// UserId validation error
    #[error("UserId cannot be empty")]
    UserIdEmpty,

    /// UserId too long error
    #[error("UserId cannot exceed {max} characters (got {actual})")]
    UserIdTooLong { max: usize, actual: usize },

    #[error("MessageId cannot be empty")]
    MessageIdEmpty,

    /// MessageId invalid format error (not a valid UUID format)
    #[error("MessageId must be a valid UUID format (got: {0})")]
    MessageIdInvalidFormat(String),

    #[error("Session token cannot be empty")]
    SessionTokenEmpty,

    /// MessageText too long error
    #[error("Message text cannot exceed {max} characters (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },

    /// Neither text nor image present
    #[error("Message must contain text or an image")]
    MessagePayloadEmpty,

    #[error("Invalid email address: {0}")]
    EmailInvalid(String),

    #[error("Full name cannot be empty")]
    FullNameEmpty,

    #[error("Profile pic is required")]
    ProfilePicEmpty,
}

/// Errors reported by the persistence and authentication collaborators
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Message store capacity exceeded error
    #[error("Message capacity exceeded: maximum {capacity} messages allowed")]
    MessageCapacityExceeded { capacity: usize },

    #[error("User with email '{0}' already exists")]
    UserAlreadyExists(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Session not found")]
    SessionNotFound,

    /// Backend could not be reached or refused the operation
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A frame could not be handed to a connection's writer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Connection {0} is closed")]
    ConnectionClosed(ConnectionId),
}

/// Illegal connection state transition
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid connection state transition: {from:?} -> {to:?}")]
pub struct StateTransitionError {
    pub from: super::connection::ConnectionState,
    pub to: super::connection::ConnectionState,
}
