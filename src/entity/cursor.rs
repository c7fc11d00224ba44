//! Opaque continuation tokens for paginated listing.
//!
//! A cursor is a version-tagged wire struct encoded to MessagePack and
//! hex-armored. Callers treat the token as opaque; the internal position
//! representation can change behind a version bump without breaking the
//! pagination contract.

use crate::core::{Result, StoreError};
use serde::{Deserialize, Serialize};

const CURSOR_VERSION: u8 = 1;

// Defensive decode bound for untrusted cursor input.
const MAX_CURSOR_TOKEN_HEX_LEN: usize = 128;

#[derive(Serialize, Deserialize)]
struct CursorWire {
    version: u8,
    offset: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Cursor {
    pub offset: usize,
}

impl Cursor {
    pub fn encode(&self) -> Result<String> {
        let wire = CursorWire {
            version: CURSOR_VERSION,
            offset: self.offset as u64,
        };
        let bytes =
            rmp_serde::to_vec(&wire).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(encode_hex(&bytes))
    }

    pub fn decode(token: &str) -> Result<Self> {
        let bytes = decode_hex(token)?;
        let wire: CursorWire = rmp_serde::from_slice(&bytes)
            .map_err(|e| StoreError::InvalidCursor(format!("malformed token: {}", e)))?;

        if wire.version != CURSOR_VERSION {
            return Err(StoreError::InvalidCursor(format!(
                "unsupported cursor version: {}",
                wire.version
            )));
        }

        Ok(Self {
            offset: wire.offset as usize,
        })
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    use std::fmt::Write as _;
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{:02x}", byte);
    }
    out
}

fn decode_hex(token: &str) -> Result<Vec<u8>> {
    let token = token.trim();

    if token.is_empty() {
        return Err(StoreError::InvalidCursor("empty token".to_string()));
    }
    if token.len() > MAX_CURSOR_TOKEN_HEX_LEN {
        return Err(StoreError::InvalidCursor(format!(
            "token exceeds {} hex chars",
            MAX_CURSOR_TOKEN_HEX_LEN
        )));
    }
    if token.len() % 2 != 0 {
        return Err(StoreError::InvalidCursor(
            "token has an odd number of hex characters".to_string(),
        ));
    }

    let bytes = token.as_bytes();
    let mut out = Vec::with_capacity(token.len() / 2);
    for idx in (0..bytes.len()).step_by(2) {
        let hi = hex_nibble(bytes[idx]);
        let lo = hex_nibble(bytes[idx + 1]);
        match (hi, lo) {
            (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
            _ => {
                return Err(StoreError::InvalidCursor(format!(
                    "invalid hex character at position {}",
                    idx + 1
                )));
            }
        }
    }
    Ok(out)
}

const fn hex_nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
