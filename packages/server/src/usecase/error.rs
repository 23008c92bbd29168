//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RepositoryError, StateTransitionError, ValueObjectError};

/// 接続処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// ハンドシェイクから識別子を得られなかった（レジストリは変更されない）
    #[error("Handshake rejected: {0}")]
    HandshakeRejected(String),

    #[error(transparent)]
    InvalidState(#[from] StateTransitionError),
}

/// メッセージ送信のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// 空のメッセージなど。何も保存・配信されない
    #[error("Invalid message: {0}")]
    Validation(#[from] ValueObjectError),

    /// 保存に失敗した。配信は試みない
    #[error("Failed to store message: {0}")]
    Persistence(#[from] RepositoryError),
}

/// 認証処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValueObjectError),

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Invalid credentials")]
    UnknownEmail,

    #[error("Unauthorized - invalid or expired session")]
    InvalidSession,

    #[error("Authentication backend error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for AuthError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::UserAlreadyExists(email) => AuthError::EmailTaken(email),
            RepositoryError::SessionNotFound => AuthError::InvalidSession,
            other => AuthError::Repository(other),
        }
    }
}
