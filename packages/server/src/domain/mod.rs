//! Domain layer for the chat application.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod connection;
pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use connection::{Connection, ConnectionState, OutboundEvent};
pub use entity::{Message, MessagePayload, NewUser, User};
pub use error::{DeliveryError, RepositoryError, StateTransitionError, ValueObjectError};
pub use factory::{ConnectionIdFactory, MessageIdFactory, SessionTokenFactory, UserIdFactory};
pub use repository::{
    ConnectionRegistry, MessageRepository, Registration, SessionRepository, UserRepository,
};
pub use value_object::{
    ConnectionId, Email, ImageRef, MessageId, MessageText, SessionToken, Timestamp, UserId,
};
