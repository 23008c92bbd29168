//! UI 層
//!
//! HTTP / WebSocket のエンドポイント。リクエストを UseCase 呼び出しに変換します。

mod error;
mod extractor;
mod handler;
mod router;
mod runner;
mod signal;
pub mod state;

pub use error::{ApiError, ServerError};
pub use extractor::AuthUser;
pub use router::build_router;
pub use runner::{run, serve};
pub use state::AppState;
