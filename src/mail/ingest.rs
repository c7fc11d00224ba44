use super::thread_key::derive_thread_key;
use crate::core::{Result, StoreError};
use crate::entity::EntityCollection;
use crate::facade::Store;
use crate::model::{EmailMessage, EmailThread};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// What the MIME pipeline hands over per inbound message. The raw payload
/// stays in the object store; this layer only needs its key and size.
#[derive(Debug, Clone)]
pub struct InboundEmail {
    pub from_addr: String,
    pub to_addrs: Vec<String>,
    pub subject: String,
    /// Message ids from the References/In-Reply-To headers, thread root first.
    pub references: Vec<String>,
    /// Object-store key of the raw MIME payload.
    pub blob_key: String,
    pub size_bytes: u64,
}

/// Persist an inbound message and fold it into its thread.
///
/// The thread step is check-then-branch: if the thread already exists it is
/// mutated in place; if not, a fresh thread is created. The existence check
/// is advisory only (under concurrency both orderings can be stale), so
/// each branch falls back to the other: a `create` that loses the race to
/// another message of the same brand-new thread gets a `Conflict` and
/// merges instead, and a `mutate` that finds the thread deleted re-creates
/// it. Exactly one thread record results either way.
pub async fn ingest(store: &Store, inbound: InboundEmail) -> Result<(EmailMessage, EmailThread)> {
    let thread_key = derive_thread_key(&inbound.subject, &inbound.references);
    let received_at = Utc::now();

    let message = EmailMessage {
        id: Uuid::new_v4().to_string(),
        thread_key: thread_key.clone(),
        from_addr: inbound.from_addr.clone(),
        to_addrs: inbound.to_addrs.clone(),
        subject: inbound.subject.clone(),
        blob_key: inbound.blob_key.clone(),
        size_bytes: inbound.size_bytes,
        received_at,
        read: false,
    };
    let stored = store.collection::<EmailMessage>().create(message).await?;

    let threads = store.collection::<EmailThread>();
    let sender = inbound.from_addr.clone();

    let thread = if threads.exists(&thread_key).await? {
        match threads
            .mutate(&thread_key, |t| fold_message(t, &sender, received_at))
            .await
        {
            Ok(thread) => thread,
            // Deleted between the check and the mutate; start it over.
            Err(StoreError::NotFound { .. }) => {
                create_or_merge(&threads, &inbound, &thread_key, &sender, received_at).await?
            }
            Err(err) => return Err(err),
        }
    } else {
        create_or_merge(&threads, &inbound, &thread_key, &sender, received_at).await?
    };

    log::debug!(
        "ingested email '{}' into thread '{}' ({} messages)",
        stored.id,
        thread.key,
        thread.email_count
    );
    Ok((stored, thread))
}

async fn create_or_merge(
    threads: &EntityCollection<EmailThread>,
    inbound: &InboundEmail,
    thread_key: &str,
    sender: &str,
    received_at: DateTime<Utc>,
) -> Result<EmailThread> {
    let fresh = EmailThread {
        key: thread_key.to_string(),
        subject: inbound.subject.clone(),
        participants: vec![sender.to_string()],
        email_count: 1,
        last_received_at: received_at,
        unread: true,
    };

    match threads.create(fresh).await {
        Ok(thread) => Ok(thread),
        // Another message of the same brand-new thread won the create
        // race; its thread is the thread. Merge into it.
        Err(StoreError::Conflict { .. }) => {
            threads
                .mutate(thread_key, |t| fold_message(t, sender, received_at))
                .await
        }
        Err(err) => Err(err),
    }
}

fn fold_message(thread: &mut EmailThread, sender: &str, received_at: DateTime<Utc>) {
    if !thread.participants.iter().any(|p| p == sender) {
        thread.participants.push(sender.to_string());
    }
    thread.email_count += 1;
    if received_at > thread.last_received_at {
        thread.last_received_at = received_at;
    }
    thread.unread = true;
}

/// Mark every message of a thread read and clear the thread's unread flag.
pub async fn mark_thread_read(store: &Store, thread_key: &str) -> Result<usize> {
    let threads = store.collection::<EmailThread>();
    threads.mutate(thread_key, |t| t.unread = false).await?;

    let emails = store.collection::<EmailMessage>();
    let mut marked = 0usize;
    let mut cursor: Option<String> = None;
    loop {
        let page = emails.list(cursor.as_deref(), None).await?;
        for message in &page.items {
            if message.thread_key == thread_key && !message.read {
                match emails.mutate(&message.id, |m| m.read = true).await {
                    Ok(_) => marked += 1,
                    // Deleted while we were paging; nothing to mark.
                    Err(StoreError::NotFound { .. }) => {}
                    Err(err) => return Err(err),
                }
            }
        }
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }
    Ok(marked)
}
