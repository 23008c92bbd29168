//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 検証 → 保存 → 宛先の接続への配信、の順序
//!
//! ### なぜこのテストが必要か
//! - 保存が配信より先に行われ、保存失敗時は配信されないことを保証
//! - オンラインの宛先にはちょうど 1 回だけ配信されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：オンラインの宛先への送信
//! - エッジケース：オフラインの宛先（保存のみ）、閉じかけの接続（配信失敗は無視）
//! - 異常系：空のメッセージ、保存失敗

use std::sync::Arc;

use crate::domain::{
    ConnectionRegistry, Message, MessagePayload, MessageRepository, OutboundEvent, UserId,
};

use super::error::SendMessageError;

/// 配信の結果。いずれの場合も送信自体は成功している
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// 宛先の接続に 1 回渡した
    Delivered,
    /// 宛先は接続していない。履歴取得で受け取る
    RecipientOffline,
    /// 宛先の接続への書き込みに失敗した（再送しない）
    Failed,
}

/// 送信結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub message: Message,
    pub delivery: Delivery,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    messages: Arc<dyn MessageRepository>,
    registry: Arc<dyn ConnectionRegistry>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        registry: Arc<dyn ConnectionRegistry>,
    ) -> Self {
        Self { messages, registry }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - 送信者（認証済み）
    /// * `recipient` - 宛先
    /// * `text` - 本文（空でもよい）
    /// * `image` - 画像参照（空でもよい）
    ///
    /// # Returns
    ///
    /// * `Ok(SentMessage)` - 保存済みメッセージと配信結果
    /// * `Err(SendMessageError)` - 検証または保存の失敗。配信は行われていない
    pub async fn execute(
        &self,
        sender: UserId,
        recipient: UserId,
        text: String,
        image: String,
    ) -> Result<SentMessage, SendMessageError> {
        // 1. 検証
        let payload = MessagePayload::new(text, image)?;

        // 2. 保存（配信より先）
        let message = self
            .messages
            .store_message(sender, recipient.clone(), payload)
            .await?;

        // 3. 宛先がオンラインなら配信
        let delivery = match self.registry.lookup(&recipient).await {
            None => Delivery::RecipientOffline,
            Some(connection) => match connection.send(OutboundEvent::NewMessage(message.clone())) {
                Ok(()) => Delivery::Delivered,
                Err(e) => {
                    tracing::warn!(
                        message_id = %message.id,
                        recipient = %recipient,
                        error = %e,
                        "Failed to deliver message"
                    );
                    Delivery::Failed
                }
            },
        };

        tracing::debug!(
            message_id = %message.id,
            sender = %message.sender,
            recipient = %recipient,
            ?delivery,
            "Message routed"
        );
        Ok(SentMessage { message, delivery })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Connection, RepositoryError, repository::MockMessageRepository},
        infrastructure::repository::{InMemoryConnectionRegistry, InMemoryMessageRepository},
    };

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn create_usecase() -> (
        SendMessageUseCase,
        Arc<InMemoryMessageRepository>,
        Arc<InMemoryConnectionRegistry>,
    ) {
        let messages = Arc::new(InMemoryMessageRepository::new());
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = SendMessageUseCase::new(messages.clone(), registry.clone());
        (usecase, messages, registry)
    }

    #[tokio::test]
    async fn test_send_to_online_recipient() {
        // テスト項目: オンラインの bob に送ると、bob の接続に newMessage がちょうど 1 回届く
        // given (前提条件):
        let (usecase, messages, registry) = create_usecase();
        let (bob_conn, mut bob_rx) = Connection::open();
        registry.register(user("bob"), bob_conn).await;

        // when (操作):
        let sent = usecase
            .execute(user("alice"), user("bob"), "hi".to_string(), String::new())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(sent.delivery, Delivery::Delivered);
        assert!(!sent.message.id.as_str().is_empty());
        match bob_rx.try_recv().unwrap() {
            OutboundEvent::NewMessage(message) => {
                assert_eq!(message.sender, user("alice"));
                assert_eq!(message.text.as_str(), "hi");
                assert_eq!(message, sent.message);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(bob_rx.try_recv().is_err());
        assert_eq!(messages.count().await, 1);
    }

    #[tokio::test]
    async fn test_send_to_offline_recipient() {
        // テスト項目: オフラインの宛先へのメッセージは保存のみされる
        // given (前提条件): alice だけが接続している
        let (usecase, messages, registry) = create_usecase();
        let (alice_conn, mut alice_rx) = Connection::open();
        registry.register(user("alice"), alice_conn).await;

        // when (操作):
        let sent = usecase
            .execute(user("alice"), user("bob"), "hi".to_string(), String::new())
            .await
            .unwrap();

        // then (期待する結果): 送信者の接続にも何も届かない
        assert_eq!(sent.delivery, Delivery::RecipientOffline);
        assert_eq!(messages.count().await, 1);
        assert!(alice_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_send_empty_message_fails_validation() {
        // テスト項目: テキストも画像もないメッセージは保存も配信もされない
        // given (前提条件):
        let (usecase, messages, registry) = create_usecase();
        let (bob_conn, mut bob_rx) = Connection::open();
        registry.register(user("bob"), bob_conn).await;

        // when (操作):
        let result = usecase
            .execute(user("alice"), user("bob"), String::new(), String::new())
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(SendMessageError::Validation(_))));
        assert_eq!(messages.count().await, 0);
        assert!(bob_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_send_image_only_message() {
        // テスト項目: 画像のみのメッセージは送信できる
        let (usecase, _messages, _registry) = create_usecase();

        let sent = usecase
            .execute(
                user("alice"),
                user("bob"),
                String::new(),
                "https://cdn.example/cat.png".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(
            sent.message.image.unwrap().as_str(),
            "https://cdn.example/cat.png"
        );
    }

    #[tokio::test]
    async fn test_persistence_failure_skips_delivery() {
        // テスト項目: 保存に失敗したら配信は行われない
        // given (前提条件):
        let mut messages = MockMessageRepository::new();
        messages
            .expect_store_message()
            .times(1)
            .returning(|_, _, _| Err(RepositoryError::Unavailable("disk full".to_string())));
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let (bob_conn, mut bob_rx) = Connection::open();
        registry.register(user("bob"), bob_conn).await;
        let usecase = SendMessageUseCase::new(Arc::new(messages), registry);

        // when (操作):
        let result = usecase
            .execute(user("alice"), user("bob"), "hi".to_string(), String::new())
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SendMessageError::Persistence(RepositoryError::Unavailable(
                "disk full".to_string()
            )))
        );
        assert!(bob_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_delivery_failure_does_not_fail_send() {
        // テスト項目: 宛先の接続が閉じかけでも送信は成功し、保存もされる
        // given (前提条件): bob は登録済みだが受信側は破棄済み
        let (usecase, messages, registry) = create_usecase();
        let (bob_conn, bob_rx) = Connection::open();
        registry.register(user("bob"), bob_conn).await;
        drop(bob_rx);

        // when (操作):
        let sent = usecase
            .execute(user("alice"), user("bob"), "hi".to_string(), String::new())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(sent.delivery, Delivery::Failed);
        assert_eq!(messages.count().await, 1);
    }
}
