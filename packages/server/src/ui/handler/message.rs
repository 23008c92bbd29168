//! Sidebar, conversation and send endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{RepositoryError, UserId},
    infrastructure::dto::http::{MessageDto, SendMessageRequest, UserDto},
    ui::{error::ApiError, extractor::AuthUser, state::AppState},
    usecase::{GetMessagesUseCase, ListUsersUseCase, SendMessageUseCase},
};

/// Everyone except the caller
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let users = ListUsersUseCase::new(state.users.clone())
        .execute(&auth.user_id)
        .await?;
    Ok(Json(users.iter().map(UserDto::from).collect()))
}

/// Conversation between the caller and `user_id`, oldest first
pub async fn get_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<MessageDto>>, ApiError> {
    let other = UserId::try_from(user_id)?;
    let messages = GetMessagesUseCase::new(state.messages.clone())
        .execute(&auth.user_id, &other)
        .await?;
    Ok(Json(messages.iter().map(MessageDto::from).collect()))
}

pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<MessageDto>), ApiError> {
    let recipient = UserId::try_from(user_id)?;
    if state.users.find_by_id(&recipient).await?.is_none() {
        return Err(RepositoryError::UserNotFound(recipient.into_string()).into());
    }

    let sent = SendMessageUseCase::new(state.messages.clone(), state.registry.clone())
        .execute(
            auth.user_id,
            recipient,
            request.text.unwrap_or_default(),
            request.image.unwrap_or_default(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(MessageDto::from(&sent.message))))
}
