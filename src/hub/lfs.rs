//! Git LFS batch API types and content hashing.
//!
//! Large files are not sent inline in a commit. Their SHA-256 is announced to
//! the LFS batch endpoint, the bytes go to the returned upload URL, and the
//! commit then only references the object id.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::collections::HashMap;

/// Number of leading bytes sent to the preupload endpoint as a sample.
pub const SAMPLE_SIZE: usize = 512;

/// Media type of LFS batch requests and responses.
pub const LFS_MEDIA_TYPE: &str = "application/vnd.git-lfs+json";

/// SHA-256 of `bytes` as a lowercase hexadecimal string (64 characters).
pub fn sha256_hex(bytes: &[u8]) -> String {
    let hash = Sha256::digest(bytes);
    format!("{hash:x}")
}

/// Base64 of the first [`SAMPLE_SIZE`] bytes.
pub fn sample_base64(bytes: &[u8]) -> String {
    let end = bytes.len().min(SAMPLE_SIZE);
    STANDARD.encode(bytes.get(..end).unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LfsObject {
    pub oid: String,
    pub size: u64,
}

impl LfsObject {
    pub fn for_bytes(bytes: &[u8]) -> Self {
        Self {
            oid: sha256_hex(bytes),
            size: bytes.len() as u64,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchRequest<'a> {
    pub operation: &'static str,
    pub transfers: [&'static str; 1],
    pub objects: &'a [LfsObject],
    pub hash_algo: &'static str,
}

impl<'a> BatchRequest<'a> {
    pub fn upload(objects: &'a [LfsObject]) -> Self {
        Self {
            operation: "upload",
            transfers: ["basic"],
            objects,
            hash_algo: "sha256",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchResponse {
    pub objects: Vec<BatchObject>,
}

#[derive(Debug, Deserialize)]
pub struct BatchObject {
    pub oid: String,
    pub size: u64,
    /// Absent when the server already stores the object.
    #[serde(default)]
    pub actions: Option<BatchActions>,
    #[serde(default)]
    pub error: Option<BatchError>,
}

#[derive(Debug, Deserialize)]
pub struct BatchActions {
    pub upload: Option<BatchAction>,
    pub verify: Option<BatchAction>,
}

#[derive(Debug, Deserialize)]
pub struct BatchAction {
    pub href: String,
    #[serde(default)]
    pub header: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct BatchError {
    pub code: u16,
    pub message: String,
}
