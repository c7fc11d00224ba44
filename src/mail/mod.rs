//! Email ingestion: turns inbound messages into `EmailMessage` records and
//! keeps their `EmailThread` up to date.

pub mod ingest;
pub mod thread_key;

pub use ingest::{InboundEmail, ingest, mark_thread_read};
pub use thread_key::derive_thread_key;
