//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod authenticate;
pub mod broadcast_presence;
pub mod connect_user;
pub mod connection_session;
pub mod disconnect_user;
pub mod error;
pub mod get_messages;
pub mod list_users;
pub mod send_message;

pub use authenticate::AuthUseCase;
pub use broadcast_presence::{AnnounceReport, PresenceBroadcaster};
pub use connect_user::ConnectUserUseCase;
pub use connection_session::ConnectionSession;
pub use disconnect_user::{DisconnectOutcome, DisconnectUserUseCase};
pub use error::{AuthError, ConnectError, SendMessageError};
pub use get_messages::GetMessagesUseCase;
pub use list_users::ListUsersUseCase;
pub use send_message::{Delivery, SendMessageUseCase, SentMessage};
