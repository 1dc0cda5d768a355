//! Chat message domain model.
//!
//! Messages live inside the chat scope of one rental request and are visible
//! only to the request's renter and the device's owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An immutable chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChatMessage {
    pub id: Uuid,
    pub request_id: Uuid,
    pub sender_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for posting a message. At least one of `message` and
/// `image_url` must be present and non-blank.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PostMessageRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl PostMessageRequest {
    /// True when the payload carries no content at all.
    pub fn is_empty(&self) -> bool {
        let blank_text = self
            .message
            .as_deref()
            .map(|m| m.trim().is_empty())
            .unwrap_or(true);
        let blank_image = self
            .image_url
            .as_deref()
            .map(|u| u.trim().is_empty())
            .unwrap_or(true);
        blank_text && blank_image
    }
}

/// A message as returned to a participant, annotated with whether the caller
/// sent it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ChatMessageResponse {
    pub id: Uuid,
    pub request_id: Uuid,
    pub sender_id: Uuid,
    pub is_sender: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ChatMessageResponse {
    /// Annotates a message for the given caller.
    pub fn for_caller(msg: ChatMessage, caller: Uuid) -> Self {
        Self {
            id: msg.id,
            request_id: msg.request_id,
            sender_id: msg.sender_id,
            is_sender: msg.sender_id == caller,
            message: msg.message,
            image_url: msg.image_url,
            created_at: msg.created_at,
        }
    }
}
