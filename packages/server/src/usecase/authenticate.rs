//! UseCase: 認証（サインアップ / ログイン / ログアウト / セッション確認）
//!
//! パスワードの扱いは対象外。ユーザーはメールアドレスで識別され、
//! ログインするとセッショントークンが発行される。

use std::sync::Arc;

use crate::domain::{
    Email, ImageRef, NewUser, SessionRepository, SessionToken, User, UserId, UserRepository,
    ValueObjectError,
};

use super::error::AuthError;

/// 認証のユースケース
pub struct AuthUseCase {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl AuthUseCase {
    pub fn new(users: Arc<dyn UserRepository>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { users, sessions }
    }

    /// ユーザーを作成し、セッションを発行する
    pub async fn signup(
        &self,
        full_name: String,
        email: String,
    ) -> Result<(User, SessionToken), AuthError> {
        let new_user = NewUser::new(full_name, Email::new(email)?)?;
        let user = self.users.create_user(new_user).await?;
        let token = self.sessions.issue(user.id.clone()).await?;
        tracing::info!(user_id = %user.id, "User signed up");
        Ok((user, token))
    }

    /// 既存ユーザーのセッションを発行する
    pub async fn login(&self, email: String) -> Result<(User, SessionToken), AuthError> {
        let email = Email::new(email)?;
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UnknownEmail)?;
        let token = self.sessions.issue(user.id.clone()).await?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok((user, token))
    }

    pub async fn logout(&self, token: &SessionToken) -> Result<(), AuthError> {
        self.sessions.revoke(token).await?;
        Ok(())
    }

    /// トークンからユーザー ID を得る
    pub async fn resolve(&self, token: &SessionToken) -> Result<UserId, AuthError> {
        self.sessions
            .resolve(token)
            .await?
            .ok_or(AuthError::InvalidSession)
    }

    /// プロフィール画像を更新する
    pub async fn update_profile(
        &self,
        user_id: &UserId,
        profile_pic: String,
    ) -> Result<User, AuthError> {
        let profile_pic =
            ImageRef::parse(profile_pic).ok_or(ValueObjectError::ProfilePicEmpty)?;
        let user = self.users.update_profile_pic(user_id, profile_pic).await?;
        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    /// トークンからユーザー情報を得る
    pub async fn current_user(&self, token: &SessionToken) -> Result<User, AuthError> {
        let user_id = self.resolve(token).await?;
        self.users
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::InvalidSession)
    }
}
