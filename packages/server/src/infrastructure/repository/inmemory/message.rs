//! InMemory Message Repository 実装
//!
//! ドメイン層が定義する MessageRepository trait の具体的な実装。
//! 挿入順の `Vec` をインメモリ DB として使用します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Message, MessageIdFactory, MessagePayload, MessageRepository, RepositoryError, Timestamp,
    UserId,
};

/// Default maximum number of messages kept in memory
pub const DEFAULT_MESSAGE_CAPACITY: usize = 10_000;

/// インメモリ Message Repository 実装
pub struct InMemoryMessageRepository {
    /// 保存済みメッセージ（挿入順 = 作成時刻順）
    messages: Mutex<Vec<Message>>,
    /// 保存できるメッセージの上限
    capacity: usize,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MESSAGE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            capacity,
        }
    }

    /// 保存済みメッセージ数
    pub async fn count(&self) -> usize {
        self.messages.lock().await.len()
    }
}

impl Default for InMemoryMessageRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn store_message(
        &self,
        sender: UserId,
        recipient: UserId,
        payload: MessagePayload,
    ) -> Result<Message, RepositoryError> {
        let mut messages = self.messages.lock().await;
        if messages.len() >= self.capacity {
            return Err(RepositoryError::MessageCapacityExceeded {
                capacity: self.capacity,
            });
        }

        // 壁時計が巻き戻っても作成時刻が挿入順と矛盾しないようにする
        let now = Timestamp::now();
        let created_at = match messages.last() {
            Some(last) if last.created_at > now => last.created_at,
            _ => now,
        };

        let message = Message {
            id: MessageIdFactory::generate(),
            sender,
            recipient,
            text: payload.text,
            image: payload.image,
            created_at,
        };
        messages.push(message.clone());
        Ok(message)
    }

    async fn list_messages(&self, a: &UserId, b: &UserId) -> Result<Vec<Message>, RepositoryError> {
        let messages = self.messages.lock().await;
        Ok(messages
            .iter()
            .filter(|m| m.is_between(a, b))
            .cloned()
            .collect())
    }
}
