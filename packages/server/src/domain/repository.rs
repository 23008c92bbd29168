//! Repository traits.
//!
//! The domain defines the interfaces; `infrastructure::repository` provides the
//! implementations (dependency inversion). UseCases depend only on these traits.

use async_trait::async_trait;

use super::{
    connection::Connection,
    entity::{Message, MessagePayload, NewUser, User},
    error::RepositoryError,
    value_object::{Email, ImageRef, SessionToken, UserId},
};

/// Outcome of [`ConnectionRegistry::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// No entry existed for the user.
    Inserted,
    /// The same connection was already registered; nothing changed.
    Unchanged,
    /// The entry now points at the new connection; the returned one is stale.
    Superseded(Connection),
}

/// Maps each online user to its single live connection.
///
/// Implementations serialize mutations and reads so that no read observes a
/// partially applied mutation.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Insert or replace the entry for `user_id`.
    async fn register(&self, user_id: UserId, connection: Connection) -> Registration;

    /// Remove the entry for `user_id` only if it still points at `connection`.
    ///
    /// Returns whether an entry was removed.
    async fn unregister(&self, user_id: &UserId, connection: &Connection) -> bool;

    async fn lookup(&self, user_id: &UserId) -> Option<Connection>;

    /// All online users, sorted.
    async fn snapshot(&self) -> Vec<UserId>;

    /// All entries, sorted by user, taken from a single consistent read.
    async fn connections(&self) -> Vec<(UserId, Connection)>;
}

/// Persistence collaborator for chat messages
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Durably store a message and return it with its assigned id and timestamp.
    async fn store_message(
        &self,
        sender: UserId,
        recipient: UserId,
        payload: MessagePayload,
    ) -> Result<Message, RepositoryError>;

    /// Messages exchanged between `a` and `b` in either direction, by creation time.
    async fn list_messages(&self, a: &UserId, b: &UserId) -> Result<Vec<Message>, RepositoryError>;
}

/// User directory collaborator
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError>;

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, RepositoryError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Every user except `excluding`, in creation order.
    async fn list_users(&self, excluding: &UserId) -> Result<Vec<User>, RepositoryError>;

    /// Replace the user's profile picture and return the updated record.
    ///
    /// Fails with `UserNotFound` for an unknown id.
    async fn update_profile_pic(
        &self,
        user_id: &UserId,
        profile_pic: ImageRef,
    ) -> Result<User, RepositoryError>;
}

/// Session store of the authentication collaborator
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn issue(&self, user_id: UserId) -> Result<SessionToken, RepositoryError>;

    /// Resolve a token to its user, or `None` if the token is unknown or revoked.
    async fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, RepositoryError>;

    async fn revoke(&self, token: &SessionToken) -> Result<(), RepositoryError>;
}
