//! One-file-per-key durable backend with atomic writes.

use super::DurableBackend;
use crate::core::{Result, StoreError};
use async_trait::async_trait;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const RECORD_EXT: &str = "rec";

/// Directory-backed storage: each key maps to one file whose name is a
/// conservative encoding of the key. Writes go through a temp file in the
/// same directory and are renamed into place, so a crash mid-write leaves
/// either the old value or the new one, never a torn file.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| StoreError::Io(format!("Failed to create data directory: {}", e)))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", encode_key(key), RECORD_EXT))
    }
}

#[async_trait]
impl DurableBackend for FileBackend {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(format!("Failed to read record: {}", e))),
        }
    }

    async fn store(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .map_err(|e| StoreError::Io(format!("Failed to create temp file: {}", e)))?;
        tmp.write_all(&bytes)
            .map_err(|e| StoreError::Io(format!("Failed to write record: {}", e)))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::Io(format!("Failed to sync record: {}", e)))?;
        tmp.persist(self.path_for(key))
            .map_err(|e| StoreError::Io(format!("Failed to persist record: {}", e)))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Io(format!("Failed to remove record: {}", e))),
        }
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.path_for(key).exists())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.dir)
            .map_err(|e| StoreError::Io(format!("Failed to read data directory: {}", e)))?;

        let mut keys = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| StoreError::Io(format!("Failed to read data directory: {}", e)))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(stem) = name.strip_suffix(&format!(".{}", RECORD_EXT)) else {
                continue;
            };
            if let Some(key) = decode_key(stem) {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

/// Encode a record key into a filename-safe form. Alphanumerics and a few
/// punctuation characters pass through; everything else becomes `%xx`.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' => out.push(b as char),
            _ => {
                out.push('%');
                out.push_str(&format!("{:02x}", b));
            }
        }
    }
    out
}

fn decode_key(name: &str) -> Option<String> {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = name.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

#[cfg(test)]
mod tests {
    use super::{decode_key, encode_key};

    #[test]
    fn key_encoding_round_trips() {
        for key in ["plain-key", "_idx:blogPost", "a/b c.d", "почта@example"] {
            let encoded = encode_key(key);
            assert!(
                encoded
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'%')),
                "unsafe byte in {:?}",
                encoded
            );
            assert_eq!(decode_key(&encoded).as_deref(), Some(key));
        }
    }

    #[test]
    fn decode_rejects_truncated_escape() {
        assert_eq!(decode_key("abc%2"), None);
        assert_eq!(decode_key("abc%zz"), None);
    }
}
