//! Authentication endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    infrastructure::dto::http::{
        AuthResponseDto, LoginRequest, MessageResponseDto, SignupRequest, UpdateProfileRequest,
        UserDto,
    },
    ui::{error::ApiError, extractor::AuthUser, state::AppState},
    usecase::{AuthUseCase, DisconnectUserUseCase},
};

fn auth_usecase(state: &AppState) -> AuthUseCase {
    AuthUseCase::new(state.users.clone(), state.sessions.clone())
}

pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponseDto>), ApiError> {
    let (user, token) = auth_usecase(&state)
        .signup(request.full_name, request.email)
        .await?;
    Ok((StatusCode::CREATED, Json(AuthResponseDto::new(&user, &token))))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponseDto>, ApiError> {
    let (user, token) = auth_usecase(&state).login(request.email).await?;
    Ok(Json(AuthResponseDto::new(&user, &token)))
}

pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MessageResponseDto>, ApiError> {
    auth_usecase(&state).logout(&auth.token).await?;
    // The live connection goes with the session
    DisconnectUserUseCase::new(state.registry.clone())
        .end_live_connection(&auth.user_id)
        .await;
    tracing::info!(user_id = %auth.user_id, "User logged out");
    Ok(Json(MessageResponseDto {
        message: "Logged out successfully".to_string(),
    }))
}

/// The authenticated user's own record
pub async fn check(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserDto>, ApiError> {
    let user = auth_usecase(&state).current_user(&auth.token).await?;
    Ok(Json(UserDto::from(&user)))
}

pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserDto>, ApiError> {
    let user = auth_usecase(&state)
        .update_profile(&auth.user_id, request.profile_pic)
        .await?;
    Ok(Json(UserDto::from(&user)))
}
