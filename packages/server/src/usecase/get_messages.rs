//! UseCase: 会話履歴の取得
//!
//! オフライン中に届いたメッセージはここで受け取る。

use std::sync::Arc;

use crate::domain::{Message, MessageRepository, RepositoryError, UserId};

/// 会話履歴取得のユースケース
pub struct GetMessagesUseCase {
    messages: Arc<dyn MessageRepository>,
}

impl GetMessagesUseCase {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    /// `requester` と `other` の間のメッセージを作成順で返す
    pub async fn execute(
        &self,
        requester: &UserId,
        other: &UserId,
    ) -> Result<Vec<Message>, RepositoryError> {
        self.messages.list_messages(requester, other).await
    }
}
