//! Commit payloads for the hub's NDJSON commit endpoint.
//!
//! A commit body is one JSON object per line: a header line followed by one
//! line per file operation.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// One file operation in a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOperation {
    /// Small file sent inline.
    Add { path: String, content: Vec<u8> },
    /// File whose bytes were already uploaded through LFS.
    AddLfs { path: String, oid: String, size: u64 },
    Delete { path: String },
}

#[derive(Debug, Serialize)]
#[serde(tag = "key", content = "value", rename_all = "camelCase")]
enum CommitLine<'a> {
    Header {
        summary: &'a str,
        description: &'a str,
    },
    File {
        content: String,
        path: &'a str,
        encoding: &'static str,
    },
    LfsFile {
        path: &'a str,
        algo: &'static str,
        oid: &'a str,
        size: u64,
    },
    DeletedFile {
        path: &'a str,
    },
}

impl<'a> From<&'a CommitOperation> for CommitLine<'a> {
    fn from(op: &'a CommitOperation) -> Self {
        match op {
            CommitOperation::Add { path, content } => Self::File {
                content: STANDARD.encode(content),
                path,
                encoding: "base64",
            },
            CommitOperation::AddLfs { path, oid, size } => Self::LfsFile {
                path,
                algo: "sha256",
                oid,
                size: *size,
            },
            CommitOperation::Delete { path } => Self::DeletedFile { path },
        }
    }
}

/// Serialize a commit into the NDJSON body expected by the hub.
///
/// # Errors
///
/// Returns a JSON error if a line fails to serialize.
pub fn to_ndjson(summary: &str, operations: &[CommitOperation]) -> serde_json::Result<String> {
    let mut body = serde_json::to_string(&CommitLine::Header {
        summary,
        description: "",
    })?;
    for op in operations {
        body.push('\n');
        body.push_str(&serde_json::to_string(&CommitLine::from(op))?);
    }
    body.push('\n');
    Ok(body)
}

/// Response of a successful commit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitInfo {
    #[serde(default)]
    pub commit_oid: Option<String>,
}
