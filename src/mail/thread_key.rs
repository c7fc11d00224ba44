use uuid::Uuid;

/// Derive the deterministic thread key for an inbound message.
///
/// When the message carries reference headers, the thread root id wins:
/// replies keep threading together even if someone edits the subject line.
/// Otherwise the normalized subject is the basis. Equal basis always yields
/// an equal key, which is what lets two concurrent first-messages of a
/// thread collide on `create` instead of silently forking the thread.
pub fn derive_thread_key(subject: &str, references: &[String]) -> String {
    let basis = references
        .first()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| normalize_subject(subject));

    let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, basis.as_bytes());
    format!("thread-{}", id)
}

/// Strip reply/forward prefixes, collapse whitespace, lowercase.
pub(crate) fn normalize_subject(subject: &str) -> String {
    let mut rest = subject.trim();
    loop {
        let lower = rest.to_ascii_lowercase();
        let stripped = ["re:", "fwd:", "fw:"]
            .iter()
            .find(|prefix| lower.starts_with(*prefix))
            .map(|prefix| rest[prefix.len()..].trim_start());
        match stripped {
            Some(s) => rest = s,
            None => break,
        }
    }
    rest.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
