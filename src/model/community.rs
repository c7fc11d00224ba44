use crate::entity::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub bio: String,
    /// Object-store key of the uploaded avatar, if any.
    pub avatar_blob_key: Option<String>,
    pub joined_at: DateTime<Utc>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: String::new(),
            display_name: String::new(),
            email: String::new(),
            bio: String::new(),
            avatar_blob_key: None,
            joined_at: DateTime::UNIX_EPOCH,
        }
    }
}

impl Entity for UserProfile {
    const KIND: &'static str = "user";

    fn storage_key(&self) -> String {
        self.id.clone()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub author: String,
    pub body: String,
    pub posted_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(author: &str, body: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            author: author.to_string(),
            body: body.to_string(),
            posted_at: Utc::now(),
        }
    }
}

/// A public chat board. Appending a message is a plain `mutate`:
///
/// ```ignore
/// boards.mutate("general", |b| b.messages.push(ChatMessage::new("ada", "hi"))).await?;
/// ```
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct ChatBoard {
    pub id: String,
    pub name: String,
    pub topic: String,
    pub messages: Vec<ChatMessage>,
}

impl Entity for ChatBoard {
    const KIND: &'static str = "chatBoard";

    fn storage_key(&self) -> String {
        self.id.clone()
    }

    fn seed_data() -> Vec<Self> {
        vec![
            Self {
                id: "general".to_string(),
                name: "General".to_string(),
                topic: "Anything goes".to_string(),
                messages: Vec::new(),
            },
            Self {
                id: "guestbook".to_string(),
                name: "Guestbook".to_string(),
                topic: "Leave a note".to_string(),
                messages: Vec::new(),
            },
        ]
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SessionToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Credential material for one user, keyed by the user's id. Hashing and
/// token verification happen in the auth layer; this record only persists
/// what that layer hands over.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct AuthRecord {
    pub user_id: String,
    pub password_hash: String,
    pub sessions: Vec<SessionToken>,
}

impl Entity for AuthRecord {
    const KIND: &'static str = "auth";

    fn storage_key(&self) -> String {
        self.user_id.clone()
    }
}
