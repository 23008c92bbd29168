//! UseCase: ユーザー一覧（サイドバー）

use std::sync::Arc;

use crate::domain::{RepositoryError, User, UserId, UserRepository};

/// ユーザー一覧のユースケース
pub struct ListUsersUseCase {
    users: Arc<dyn UserRepository>,
}

impl ListUsersUseCase {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// リクエスト者以外の全ユーザーを作成順で返す
    pub async fn execute(&self, requester: &UserId) -> Result<Vec<User>, RepositoryError> {
        self.users.list_users(requester).await
    }
}
