//! WebSocket message DTOs for the chat application.
//!
//! Server-to-client frames only; clients talk to the server over HTTP.

use serde::{Deserialize, Serialize};

use super::http::MessageDto;
use crate::domain::{Message, UserId};

/// Message type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageType {
    GetOnlineUsers,
    NewMessage,
}

/// Presence broadcast: every user currently online
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineUsersMessage {
    pub r#type: MessageType,
    pub user_ids: Vec<String>,
}

impl OnlineUsersMessage {
    pub fn new(user_ids: &[UserId]) -> Self {
        Self {
            r#type: MessageType::GetOnlineUsers,
            user_ids: user_ids.iter().map(|id| id.as_str().to_string()).collect(),
        }
    }
}

/// A message addressed to the receiving client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessageMessage {
    pub r#type: MessageType,
    pub message: MessageDto,
}

impl NewMessageMessage {
    pub fn new(message: &Message) -> Self {
        Self {
            r#type: MessageType::NewMessage,
            message: MessageDto::from(message),
        }
    }
}
