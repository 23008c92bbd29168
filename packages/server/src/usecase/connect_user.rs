//! UseCase: ユーザー接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectUserUseCase::execute() メソッド
//! - ハンドシェイクのトークン検証、レジストリ登録、プレゼンス通知
//!
//! ### なぜこのテストが必要か
//! - クライアントが名乗った ID ではなく、サーバー側で検証したセッションから ID を得ることを保証
//! - 同一ユーザーの新しい接続が古い接続を置き換えることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：有効なトークンでの接続
//! - 異常系：トークンなし・不正なトークン（レジストリは変更されない）
//! - エッジケース：同一ユーザーの再接続

use std::sync::Arc;

use crate::domain::{
    Connection, ConnectionRegistry, ConnectionState, OutboundEvent, Registration,
    SessionRepository, SessionToken, UserId,
};

use super::{
    broadcast_presence::PresenceBroadcaster, connection_session::ConnectionSession,
    disconnect_user::DisconnectUserUseCase, error::ConnectError,
};

/// ユーザー接続のユースケース
pub struct ConnectUserUseCase {
    sessions: Arc<dyn SessionRepository>,
    registry: Arc<dyn ConnectionRegistry>,
}

impl ConnectUserUseCase {
    /// 新しい ConnectUserUseCase を作成
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        registry: Arc<dyn ConnectionRegistry>,
    ) -> Self {
        Self { sessions, registry }
    }

    /// ユーザー接続を実行
    ///
    /// # Arguments
    ///
    /// * `token` - ハンドシェイクで渡されたセッショントークン
    /// * `connection` - 新しい接続
    ///
    /// # Returns
    ///
    /// * `Ok(ConnectionSession)` - 登録済み（Open）の接続
    /// * `Err(ConnectError)` - ハンドシェイク拒否。レジストリは変更されない
    pub async fn execute(
        &self,
        token: Option<&str>,
        connection: Connection,
    ) -> Result<ConnectionSession, ConnectError> {
        let mut state = ConnectionState::Connecting;

        // 1. ハンドシェイクからユーザー ID を得る
        let user_id = self.authenticate(token).await?;
        state.transition(ConnectionState::Bound)?;

        // 2. レジストリに登録（同一ユーザーの古い接続は置き換えられる）
        let registration = self
            .registry
            .register(user_id.clone(), connection.clone())
            .await;

        // 登録以降にこの Future が破棄されても、session の Drop が登録を解除する
        let mut session = ConnectionSession::new(
            user_id,
            connection,
            state,
            DisconnectUserUseCase::new(self.registry.clone()),
        );

        match registration {
            Registration::Superseded(previous) => {
                tracing::info!(
                    user_id = %session.user_id(),
                    previous_connection_id = %previous.id(),
                    connection_id = %session.connection().id(),
                    "New connection supersedes previous one"
                );
                if previous.send(OutboundEvent::Superseded).is_err() {
                    tracing::debug!(connection_id = %previous.id(), "Superseded connection already closed");
                }
            }
            Registration::Inserted | Registration::Unchanged => {
                tracing::info!(
                    user_id = %session.user_id(),
                    connection_id = %session.connection().id(),
                    "User connected and registered"
                );
            }
        }
        session.mark_open()?;

        // 3. 全接続にオンライン一覧を通知
        PresenceBroadcaster::new(self.registry.clone())
            .announce()
            .await;

        Ok(session)
    }

    async fn authenticate(&self, token: Option<&str>) -> Result<UserId, ConnectError> {
        let token = token
            .map(str::to_string)
            .ok_or_else(|| ConnectError::HandshakeRejected("missing session token".to_string()))
            .and_then(|raw| {
                SessionToken::new(raw)
                    .map_err(|e| ConnectError::HandshakeRejected(e.to_string()))
            })?;

        match self.sessions.resolve(&token).await {
            Ok(Some(user_id)) => Ok(user_id),
            Ok(None) => Err(ConnectError::HandshakeRejected(
                "unknown or revoked session token".to_string(),
            )),
            Err(e) => Err(ConnectError::HandshakeRejected(format!(
                "session lookup failed: {e}"
            ))),
        }
    }
}
