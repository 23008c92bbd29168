//! InMemory ConnectionRegistry 実装
//!
//! `HashMap<UserId, Connection>` を 1 つの `tokio::sync::Mutex` で保護する。
//! register / unregister / lookup / snapshot はすべて同じロックを取るため、
//! 読み取りが途中まで適用された変更を観測することはない。
//! ロックを保持したまま await することはない。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Connection, ConnectionRegistry, Registration, UserId};

/// インメモリ接続レジストリ
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    /// ユーザー ID -> 現在の接続
    connections: Mutex<HashMap<UserId, Connection>>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録中のユーザー数
    pub async fn len(&self) -> usize {
        self.connections.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.connections.lock().await.is_empty()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, user_id: UserId, connection: Connection) -> Registration {
        let mut connections = self.connections.lock().await;
        if connections.get(&user_id) == Some(&connection) {
            return Registration::Unchanged;
        }
        match connections.insert(user_id, connection) {
            Some(previous) => Registration::Superseded(previous),
            None => Registration::Inserted,
        }
    }

    async fn unregister(&self, user_id: &UserId, connection: &Connection) -> bool {
        let mut connections = self.connections.lock().await;
        if connections.get(user_id) != Some(connection) {
            return false;
        }
        connections.remove(user_id);
        true
    }

    async fn lookup(&self, user_id: &UserId) -> Option<Connection> {
        let connections = self.connections.lock().await;
        connections.get(user_id).cloned()
    }

    async fn snapshot(&self) -> Vec<UserId> {
        let connections = self.connections.lock().await;
        let mut user_ids: Vec<UserId> = connections.keys().cloned().collect();
        user_ids.sort();
        user_ids
    }

    async fn connections(&self) -> Vec<(UserId, Connection)> {
        let connections = self.connections.lock().await;
        let mut entries: Vec<(UserId, Connection)> = connections
            .iter()
            .map(|(user_id, connection)| (user_id.clone(), connection.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 登録・置き換え・ガード付き削除・参照・スナップショット
    //
    // 【なぜこのテストが必要か】
    // - 「1 ユーザーにつき接続は最大 1 つ」という不変条件はここで守られる
    // - 古い接続の切断が新しい接続を消してしまう事故を防ぐ
    //
    // 【どのようなシナリオをテストするか】
    // 1. 新規登録 / 同一接続の再登録（冪等）
    // 2. 別接続による置き換えと、古い接続の切断が no-op になること
    // 3. 並行した登録・削除の後もスナップショットが整合すること
    // ========================================

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_register_inserts_entry() {
        // テスト項目: 新規登録でエントリが作成され、参照できる
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (conn, _rx) = Connection::open();

        // when (操作):
        let result = registry.register(user("alice"), conn.clone()).await;

        // then (期待する結果):
        assert_eq!(result, Registration::Inserted);
        assert_eq!(registry.lookup(&user("alice")).await, Some(conn));
        assert_eq!(registry.snapshot().await, vec![user("alice")]);
    }

    #[tokio::test]
    async fn test_register_same_connection_is_idempotent() {
        // テスト項目: 同じ接続の再登録は何も変えない
        let registry = InMemoryConnectionRegistry::new();
        let (conn, _rx) = Connection::open();
        registry.register(user("alice"), conn.clone()).await;

        let result = registry.register(user("alice"), conn.clone()).await;

        assert_eq!(result, Registration::Unchanged);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_supersedes_previous_connection() {
        // テスト項目: 同じユーザーの新しい接続が古い接続を置き換える
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (old, _rx1) = Connection::open();
        let (new, _rx2) = Connection::open();
        registry.register(user("alice"), old.clone()).await;

        // when (操作):
        let result = registry.register(user("alice"), new.clone()).await;

        // then (期待する結果):
        assert_eq!(result, Registration::Superseded(old));
        assert_eq!(registry.lookup(&user("alice")).await, Some(new));
    }

    #[tokio::test]
    async fn test_stale_unregister_is_noop() {
        // テスト項目: 置き換えられた古い接続の切断はレジストリに影響しない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (old, _rx1) = Connection::open();
        let (new, _rx2) = Connection::open();
        registry.register(user("alice"), old.clone()).await;
        registry.register(user("alice"), new.clone()).await;

        // when (操作): 古い接続の切断イベントが遅れて届く
        let removed = registry.unregister(&user("alice"), &old).await;

        // then (期待する結果): エントリは新しい接続を指したまま
        assert!(!removed);
        assert_eq!(registry.lookup(&user("alice")).await, Some(new));
        assert_eq!(registry.snapshot().await, vec![user("alice")]);
    }

    #[tokio::test]
    async fn test_unregister_current_connection() {
        // テスト項目: 現在の接続の切断でエントリが削除される
        let registry = InMemoryConnectionRegistry::new();
        let (conn, _rx) = Connection::open();
        registry.register(user("alice"), conn.clone()).await;

        let removed = registry.unregister(&user("alice"), &conn).await;

        assert!(removed);
        assert_eq!(registry.lookup(&user("alice")).await, None);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_unregister_unknown_user_is_noop() {
        // テスト項目: 未登録ユーザーの切断は no-op
        let registry = InMemoryConnectionRegistry::new();
        let (conn, _rx) = Connection::open();

        assert!(!registry.unregister(&user("ghost"), &conn).await);
    }

    #[tokio::test]
    async fn test_snapshot_and_connections_are_sorted() {
        // テスト項目: スナップショットはユーザー ID の昇順で返される
        // given (前提条件): charlie, alice, bob の順に登録
        let registry = InMemoryConnectionRegistry::new();
        let mut receivers = Vec::new();
        for id in ["charlie", "alice", "bob"] {
            let (conn, rx) = Connection::open();
            receivers.push(rx);
            registry.register(user(id), conn).await;
        }

        // when (操作):
        let snapshot = registry.snapshot().await;
        let entries = registry.connections().await;

        // then (期待する結果):
        assert_eq!(snapshot, vec![user("alice"), user("bob"), user("charlie")]);
        let entry_ids: Vec<UserId> = entries.into_iter().map(|(id, _)| id).collect();
        assert_eq!(entry_ids, snapshot);
    }

    #[tokio::test]
    async fn test_concurrent_register_unregister_keeps_invariant() {
        // テスト項目: 並行した登録・削除の後、スナップショットは開いている接続だけを含む
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let mut handles = Vec::new();

        // when (操作): 偶数番のユーザーは登録後に切断、奇数番は登録のみ
        for i in 0..50 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                let user_id = user(&format!("user-{i:02}"));
                let (conn, rx) = Connection::open();
                registry.register(user_id.clone(), conn.clone()).await;
                if i % 2 == 0 {
                    registry.unregister(&user_id, &conn).await;
                    None
                } else {
                    Some(rx)
                }
            }));
        }
        let mut open_receivers = Vec::new();
        for handle in handles {
            if let Some(rx) = handle.await.unwrap() {
                open_receivers.push(rx);
            }
        }

        // then (期待する結果):
        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot.len(), 25);
        assert!(snapshot.iter().all(|id| {
            let n: u32 = id.as_str()["user-".len()..].parse().unwrap();
            n % 2 == 1
        }));
        assert_eq!(open_receivers.len(), 25);
    }
}
