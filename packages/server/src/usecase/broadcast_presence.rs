//! UseCase: プレゼンス通知
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PresenceBroadcaster::announce() メソッド
//! - オンライン一覧が登録中の全接続に同じ内容で届くこと
//!
//! ### なぜこのテストが必要か
//! - 1 つの接続への送信失敗が他の接続への通知を妨げないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：全員に同じ一覧が届く
//! - 異常系：閉じかけの接続が混ざっている
//! - エッジケース：誰も接続していない

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, OutboundEvent, UserId};

/// announce() 1 回分の結果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnnounceReport {
    /// 通知したオンライン一覧（昇順）
    pub online: Vec<UserId>,
    pub delivered: usize,
    pub failed: usize,
}

/// レジストリの内容を全接続に通知する
#[derive(Clone)]
pub struct PresenceBroadcaster {
    registry: Arc<dyn ConnectionRegistry>,
}

impl PresenceBroadcaster {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 現在のオンライン一覧を登録中の全接続に送る
    ///
    /// 一覧と送信先は同じスナップショットから取るため、全員が同じ内容を受け取る。
    /// 送信に失敗した接続はログに残して次へ進む。
    pub async fn announce(&self) -> AnnounceReport {
        let entries = self.registry.connections().await;
        let online: Vec<UserId> = entries.iter().map(|(user_id, _)| user_id.clone()).collect();

        let mut report = AnnounceReport {
            online: online.clone(),
            ..AnnounceReport::default()
        };
        for (user_id, connection) in &entries {
            match connection.send(OutboundEvent::PresenceUpdate(online.clone())) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!(user_id = %user_id, error = %e, "Failed to deliver presence update");
                    report.failed += 1;
                }
            }
        }

        tracing::debug!(
            online = online.len(),
            delivered = report.delivered,
            failed = report.failed,
            "Announced online users"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::Connection, infrastructure::repository::InMemoryConnectionRegistry};
    use tokio::sync::mpsc::UnboundedReceiver;

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    async fn connect(
        registry: &InMemoryConnectionRegistry,
        id: &str,
    ) -> (Connection, UnboundedReceiver<OutboundEvent>) {
        let (conn, rx) = Connection::open();
        registry.register(user(id), conn.clone()).await;
        (conn, rx)
    }

    #[tokio::test]
    async fn test_announce_delivers_same_set_to_everyone() {
        // テスト項目: 全接続に同じオンライン一覧が届く
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let (_bob, mut bob_rx) = connect(&registry, "bob").await;
        let (_alice, mut alice_rx) = connect(&registry, "alice").await;
        let broadcaster = PresenceBroadcaster::new(registry.clone());

        // when (操作):
        let report = broadcaster.announce().await;

        // then (期待する結果):
        let expected = OutboundEvent::PresenceUpdate(vec![user("alice"), user("bob")]);
        assert_eq!(alice_rx.try_recv().unwrap(), expected);
        assert_eq!(bob_rx.try_recv().unwrap(), expected);
        assert_eq!(report.delivered, 2);
        assert_eq!(report.failed, 0);
        assert_eq!(report.online, vec![user("alice"), user("bob")]);
    }

    #[tokio::test]
    async fn test_announce_isolates_failed_delivery() {
        // テスト項目: 閉じた接続への送信失敗は他の接続への通知に影響しない
        // given (前提条件): alice の受信側は既に破棄されている
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let (_alice, alice_rx) = connect(&registry, "alice").await;
        drop(alice_rx);
        let (_bob, mut bob_rx) = connect(&registry, "bob").await;
        let broadcaster = PresenceBroadcaster::new(registry.clone());

        // when (操作):
        let report = broadcaster.announce().await;

        // then (期待する結果):
        assert_eq!(report.delivered, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(
            bob_rx.try_recv().unwrap(),
            OutboundEvent::PresenceUpdate(vec![user("alice"), user("bob")])
        );
    }

    #[tokio::test]
    async fn test_announce_with_no_connections() {
        // テスト項目: 接続がなければ何も送られない
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let broadcaster = PresenceBroadcaster::new(registry);

        let report = broadcaster.announce().await;

        assert_eq!(report, AnnounceReport::default());
    }
}
