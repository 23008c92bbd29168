//! InMemory User Repository 実装

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Email, ImageRef, NewUser, RepositoryError, Timestamp, User, UserId, UserIdFactory,
    UserRepository,
};

/// インメモリ User Repository 実装
///
/// 作成順の `Vec` を保持する。ユーザー数は小さい前提で線形探索する。
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().await;
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(RepositoryError::UserAlreadyExists(
                new_user.email.into_string(),
            ));
        }
        let user = User {
            id: UserIdFactory::generate(),
            full_name: new_user.full_name,
            email: new_user.email,
            profile_pic: String::new(),
            created_at: Timestamp::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, RepositoryError> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| &u.id == user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| &u.email == email).cloned())
    }

    async fn list_users(&self, excluding: &UserId) -> Result<Vec<User>, RepositoryError> {
        let users = self.users.lock().await;
        Ok(users
            .iter()
            .filter(|u| &u.id != excluding)
            .cloned()
            .collect())
    }

    async fn update_profile_pic(
        &self,
        user_id: &UserId,
        profile_pic: ImageRef,
    ) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().await;
        let user = users
            .iter_mut()
            .find(|u| &u.id == user_id)
            .ok_or_else(|| RepositoryError::UserNotFound(user_id.to_string()))?;
        user.profile_pic = profile_pic.as_str().to_string();
        Ok(user.clone())
    }
}
