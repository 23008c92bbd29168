//! Bearer-token authentication extractor.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{
    domain::{SessionToken, UserId},
    usecase::AuthUseCase,
};

use super::{error::ApiError, state::AppState};

/// The caller of a protected route, resolved from `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub token: SessionToken,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::Unauthorized("Unauthorized - No Token Provided".to_string()))?;
        let token = SessionToken::new(raw.trim().to_string())
            .map_err(|_| ApiError::Unauthorized("Unauthorized - No Token Provided".to_string()))?;

        let user_id = AuthUseCase::new(state.users.clone(), state.sessions.clone())
            .resolve(&token)
            .await?;

        Ok(Self { user_id, token })
    }
}
