//! Core domain models for the chat application.

use serde::{Deserialize, Serialize};

use super::{
    error::ValueObjectError,
    value_object::{Email, ImageRef, MessageId, MessageText, Timestamp, UserId},
};

/// A registered user as kept by the user directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: Email,
    /// Avatar URL or data URI; empty when unset
    pub profile_pic: String,
    pub created_at: Timestamp,
}

/// Input for creating a user record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub full_name: String,
    pub email: Email,
}

impl NewUser {
    pub fn new(full_name: String, email: Email) -> Result<Self, ValueObjectError> {
        let full_name = full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(ValueObjectError::FullNameEmpty);
        }
        Ok(Self { full_name, email })
    }
}

/// Validated content of a chat message: text, an image, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub text: MessageText,
    pub image: Option<ImageRef>,
}

impl MessagePayload {
    /// Build a payload from raw client input.
    ///
    /// # Errors
    ///
    /// Returns `ValueObjectError::MessagePayloadEmpty` if both text and image are blank,
    /// or `MessageTextTooLong` if the text exceeds the limit.
    pub fn new(text: String, image: String) -> Result<Self, ValueObjectError> {
        let text = MessageText::new(text)?;
        let image = ImageRef::parse(image);
        if text.is_blank() && image.is_none() {
            return Err(ValueObjectError::MessagePayloadEmpty);
        }
        Ok(Self { text, image })
    }
}

/// A persisted chat message. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: UserId,
    pub recipient: UserId,
    pub text: MessageText,
    pub image: Option<ImageRef>,
    pub created_at: Timestamp,
}

impl Message {
    /// Whether this message belongs to the conversation between `a` and `b`
    pub fn is_between(&self, a: &UserId, b: &UserId) -> bool {
        (&self.sender == a && &self.recipient == b) || (&self.sender == b && &self.recipient == a)
    }
}
