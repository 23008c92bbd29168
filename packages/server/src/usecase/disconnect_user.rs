//! UseCase: ユーザー切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectUserUseCase::execute() メソッド
//! - ガード付き登録解除とプレゼンス再通知
//!
//! ### なぜこのテストが必要か
//! - 置き換えられた古い接続の切断が、新しい接続を消さないことを保証
//! - 切断後の一覧が残りの接続にだけ届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：現在の接続の切断と再通知
//! - エッジケース：置き換え済みの接続の切断（no-op、通知なし）

use std::sync::Arc;

use crate::domain::{Connection, ConnectionRegistry, OutboundEvent, UserId};

use super::broadcast_presence::{AnnounceReport, PresenceBroadcaster};

/// 切断処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectOutcome {
    /// エントリを削除し、残りの接続に再通知した
    Removed(AnnounceReport),
    /// エントリは別の接続を指していた（または既に無かった）。何もしていない
    Stale,
}

/// ユーザー切断のユースケース
#[derive(Clone)]
pub struct DisconnectUserUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    broadcaster: PresenceBroadcaster,
}

impl DisconnectUserUseCase {
    /// 新しい DisconnectUserUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self {
            broadcaster: PresenceBroadcaster::new(registry.clone()),
            registry,
        }
    }

    /// ユーザー切断を実行
    ///
    /// # Arguments
    ///
    /// * `user_id` - 接続に束縛されたユーザー ID
    /// * `connection` - 閉じた接続
    pub async fn execute(&self, user_id: &UserId, connection: &Connection) -> DisconnectOutcome {
        if !self.registry.unregister(user_id, connection).await {
            tracing::debug!(
                user_id = %user_id,
                connection_id = %connection.id(),
                "Superseded connection closed; registry unchanged"
            );
            return DisconnectOutcome::Stale;
        }

        tracing::info!(
            user_id = %user_id,
            connection_id = %connection.id(),
            "User disconnected and removed from registry"
        );
        DisconnectOutcome::Removed(self.broadcaster.announce().await)
    }

    /// ユーザーの接続を強制的に終了する（ログアウト時）
    ///
    /// 接続には `SessionEnded` を送り、登録解除と再通知はこの場で行う。
    /// 接続側の後続の終了処理は `Stale` になる。接続がなければ `None`。
    pub async fn end_live_connection(&self, user_id: &UserId) -> Option<DisconnectOutcome> {
        let connection = self.registry.lookup(user_id).await?;
        if connection.send(OutboundEvent::SessionEnded).is_err() {
            tracing::debug!(connection_id = %connection.id(), "Connection already closed");
        }
        Some(self.execute(user_id, &connection).await)
    }
}
