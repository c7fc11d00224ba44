use crate::entity::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stored email message. The raw MIME payload lives in the object
/// store under `blob_key`; this record carries only the routed metadata.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EmailMessage {
    pub id: String,
    pub thread_key: String,
    pub from_addr: String,
    pub to_addrs: Vec<String>,
    pub subject: String,
    pub blob_key: String,
    pub size_bytes: u64,
    pub received_at: DateTime<Utc>,
    pub read: bool,
}

impl Default for EmailMessage {
    fn default() -> Self {
        Self {
            id: String::new(),
            thread_key: String::new(),
            from_addr: String::new(),
            to_addrs: Vec::new(),
            subject: String::new(),
            blob_key: String::new(),
            size_bytes: 0,
            received_at: DateTime::UNIX_EPOCH,
            read: false,
        }
    }
}

impl Entity for EmailMessage {
    const KIND: &'static str = "email";

    fn storage_key(&self) -> String {
        self.id.clone()
    }
}

/// A conversation grouping of messages that share a derived thread key.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EmailThread {
    pub key: String,
    pub subject: String,
    pub participants: Vec<String>,
    pub email_count: u32,
    pub last_received_at: DateTime<Utc>,
    pub unread: bool,
}

impl Default for EmailThread {
    fn default() -> Self {
        Self {
            key: String::new(),
            subject: String::new(),
            participants: Vec::new(),
            email_count: 0,
            last_received_at: DateTime::UNIX_EPOCH,
            unread: false,
        }
    }
}

impl Entity for EmailThread {
    const KIND: &'static str = "emailThread";

    fn storage_key(&self) -> String {
        self.key.clone()
    }
}
