use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Read;
use std::{fs, path::Path};

use crate::payload::shape::PayloadShape;

/// Report-facing metadata about one fetched payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayloadInfo {
    /// Where the bytes came from (URL, path, or `stdin`).
    pub source: String,
    pub size_bytes: u64,
    pub hash: PayloadHash,
    /// Detected wire shape. `None` until the bytes decoded as JSON.
    pub shape: Option<PayloadShape>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayloadHash {
    pub algorithm: String,
    pub value: String,
}

/// Raw bytes of a payload plus a stable fingerprint.
///
/// The fingerprint depends only on the bytes, so two refreshes that
/// return the same body compare equal.
#[derive(Debug, Clone)]
pub struct FetchedPayload {
    pub source: String,
    pub bytes: Vec<u8>,
    pub size_bytes: u64,
    pub hash_alg: String,
    pub hash_hex: String,
}

impl FetchedPayload {
    pub fn from_bytes(source: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hasher.finalize();

        Self {
            source: source.into(),
            size_bytes: bytes.len() as u64,
            bytes,
            hash_alg: "sha256".to_string(),
            hash_hex: hex::encode(digest),
        }
    }

    /// Metadata for the report. Raw bytes are not carried over.
    pub fn info(&self, shape: Option<PayloadShape>) -> PayloadInfo {
        PayloadInfo {
            source: self.source.clone(),
            size_bytes: self.size_bytes,
            hash: PayloadHash {
                algorithm: self.hash_alg.clone(),
                value: self.hash_hex.clone(),
            },
            shape,
        }
    }
}

/// Read a payload file from disk.
pub fn read_payload(path: &Path) -> Result<FetchedPayload> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read payload: {}", path.display()))?;

    Ok(FetchedPayload::from_bytes(path.display().to_string(), bytes))
}

/// Read a payload from standard input until EOF.
pub fn read_stdin() -> Result<FetchedPayload> {
    let mut bytes = Vec::new();
    std::io::stdin()
        .lock()
        .read_to_end(&mut bytes)
        .context("failed to read payload from stdin")?;

    Ok(FetchedPayload::from_bytes("stdin", bytes))
}
