//! HTTP API request and response DTOs for the chat application.

use serde::{Deserialize, Serialize};

use chatty_shared::time::millis_to_rfc3339;

use crate::domain::{Message, SessionToken, User};

/// User record as exposed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub profile_pic: String,
    pub created_at: String, // ISO 8601
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.as_str().to_string(),
            full_name: user.full_name.clone(),
            email: user.email.as_str().to_string(),
            profile_pic: user.profile_pic.clone(),
            created_at: millis_to_rfc3339(user.created_at.value()),
        }
    }
}

/// Persisted message as exposed to clients (HTTP responses and `newMessage` frames)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub text: String,
    /// Empty string when the message has no image
    pub image: String,
    pub created_at: String, // ISO 8601
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.as_str().to_string(),
            sender_id: message.sender.as_str().to_string(),
            receiver_id: message.recipient.as_str().to_string(),
            text: message.text.as_str().to_string(),
            image: message
                .image
                .as_ref()
                .map(|image| image.as_str().to_string())
                .unwrap_or_default(),
            created_at: millis_to_rfc3339(message.created_at.value()),
        }
    }
}

/// Response of signup and login: the user record plus a bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponseDto {
    #[serde(flatten)]
    pub user: UserDto,
    pub token: String,
}

impl AuthResponseDto {
    pub fn new(user: &User, token: &SessionToken) -> Self {
        Self {
            user: UserDto::from(user),
            token: token.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

/// Body of `PUT /api/auth/update-profile`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub profile_pic: String,
}

/// Body of `POST /api/messages/send/{user_id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Plain `{ "message": ... }` body used for errors and acknowledgements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponseDto {
    pub message: String,
}

/// Current online set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceDto {
    pub online_users: Vec<String>,
}
