//! HashMap / Vec をインメモリ DB として使う実装群

pub mod connection_registry;
pub mod message;
pub mod session;
pub mod user;

pub use connection_registry::InMemoryConnectionRegistry;
pub use message::InMemoryMessageRepository;
pub use session::InMemorySessionRepository;
pub use user::InMemoryUserRepository;
