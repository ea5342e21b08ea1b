//! HTTP client for the Hugging Face Hub.
//!
//! A dataset push is a sequence of plain requests:
//!
//! ```text
//! create repo (409 = exists)
//!   -> list existing files under data/
//!   -> preupload (lfs or regular?)
//!   -> [lfs] batch + PUT (+ verify)
//!   -> commit: add new shard, delete every other data file
//! ```
//!
//! There are no retries. Timeouts are reqwest's defaults.

use super::commit::{CommitInfo, CommitOperation, to_ndjson};
use super::lfs::{BatchRequest, BatchResponse, LFS_MEDIA_TYPE, LfsObject, sample_base64};
use super::{DATA_FILE_PATH, DatasetHub, README_PATH};
use crate::config::split_repo_id;
use crate::error::{PublisherError, Result, ResultExt as _};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize;
use serde_json::json;

/// Hub client bound to one endpoint and (optionally) one token.
pub struct HubClient {
    client: reqwest::Client,
    endpoint: String,
    token: Option<SecretString>,
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    #[serde(rename = "type")]
    kind: String,
    path: String,
}

#[derive(Debug, Deserialize)]
struct PreuploadResponse {
    files: Vec<PreuploadFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreuploadFile {
    path: String,
    upload_mode: String,
}

/// Turn a non-success response into a `Publish` error carrying the body.
async fn ensure_success(response: Response, action: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(PublisherError::Publish(format!(
        "{action} failed with status {status}: {}",
        body.trim()
    )))
}

impl HubClient {
    /// Create a client for `endpoint` (e.g. `https://huggingface.co`).
    ///
    /// # Errors
    ///
    /// Returns a `Publish` error if the HTTP client cannot be built.
    pub fn new(endpoint: &str, token: Option<&SecretString>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("qafiyah-publisher/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_owned(),
            token: token.map(|t| SecretString::new(t.expose_secret().into())),
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    fn api_url(&self, repo_id: &str, rest: &str) -> String {
        format!("{}/api/datasets/{repo_id}/{rest}", self.endpoint)
    }

    /// Create the dataset repository. An existing repository is fine.
    ///
    /// # Errors
    ///
    /// Returns a `Publish` error for any status other than success or 409.
    pub async fn create_repo(&self, repo_id: &str) -> Result<()> {
        let (namespace, name) = split_repo_id(repo_id)?;
        let url = format!("{}/api/repos/create", self.endpoint);
        let response = self
            .authorized(self.client.post(&url))
            .json(&json!({
                "type": "dataset",
                "name": name,
                "organization": namespace,
                "private": false,
            }))
            .send()
            .await
            .context("Failed to reach the hub")?;

        if response.status() == StatusCode::CONFLICT {
            tracing::debug!("Repository {repo_id} already exists");
            return Ok(());
        }
        ensure_success(response, "Repository creation").await?;
        tracing::info!("Created dataset repository {repo_id}");
        Ok(())
    }

    /// Paths of the files currently stored under `data/`, subdirectories
    /// included.
    ///
    /// # Errors
    ///
    /// Returns a `Publish` error if the listing fails (404 counts as empty).
    pub async fn list_data_files(&self, repo_id: &str) -> Result<Vec<String>> {
        let response = self
            .authorized(self.client.get(self.api_url(repo_id, "tree/main/data")))
            .query(&[("recursive", "true")])
            .send()
            .await
            .context("Failed to list repository files")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let entries: Vec<TreeEntry> = ensure_success(response, "File listing")
            .await?
            .json()
            .await
            .context("Failed to parse file listing")?;

        Ok(entries
            .into_iter()
            .filter(|e| e.kind == "file")
            .map(|e| e.path)
            .collect())
    }

    /// Ask the hub whether `path` must go through LFS.
    ///
    /// # Errors
    ///
    /// Returns a `Publish` error if the request fails.
    pub async fn requires_lfs(&self, repo_id: &str, path: &str, content: &[u8]) -> Result<bool> {
        let response = self
            .authorized(self.client.post(self.api_url(repo_id, "preupload/main")))
            .json(&json!({
                "files": [{
                    "path": path,
                    "sample": sample_base64(content),
                    "size": content.len(),
                }]
            }))
            .send()
            .await
            .context("Failed to reach preupload endpoint")?;

        let parsed: PreuploadResponse = ensure_success(response, "Preupload")
            .await?
            .json()
            .await
            .context("Failed to parse preupload response")?;

        Ok(parsed
            .files
            .iter()
            .find(|f| f.path == path)
            .is_some_and(|f| f.upload_mode == "lfs"))
    }

    /// Upload `content` as an LFS object and return its descriptor.
    ///
    /// # Errors
    ///
    /// Returns a `Publish` error if the batch request, the upload or the
    /// verification fails.
    pub async fn upload_lfs(&self, repo_id: &str, content: Vec<u8>) -> Result<LfsObject> {
        let object = LfsObject::for_bytes(&content);
        let objects = [object.clone()];
        let url = format!(
            "{}/datasets/{repo_id}.git/info/lfs/objects/batch",
            self.endpoint
        );

        let response = self
            .authorized(self.client.post(&url))
            .header(ACCEPT, LFS_MEDIA_TYPE)
            .header(CONTENT_TYPE, LFS_MEDIA_TYPE)
            .json(&BatchRequest::upload(&objects))
            .send()
            .await
            .context("Failed to reach LFS batch endpoint")?;

        let batch: BatchResponse = ensure_success(response, "LFS batch")
            .await?
            .json()
            .await
            .context("Failed to parse LFS batch response")?;

        let entry = batch
            .objects
            .into_iter()
            .find(|o| o.oid == object.oid)
            .ok_or_else(|| {
                PublisherError::Publish(format!("LFS batch response is missing {}", object.oid))
            })?;

        if let Some(err) = entry.error {
            return Err(PublisherError::Publish(format!(
                "LFS rejected object {} ({}): {}",
                entry.oid, err.code, err.message
            )));
        }

        let Some(actions) = entry.actions else {
            tracing::info!("LFS object {} already stored, skipping upload", object.oid);
            return Ok(object);
        };

        if let Some(upload) = actions.upload {
            tracing::info!("Uploading {} bytes to LFS storage", object.size);
            let mut request = self.client.put(&upload.href);
            for (name, value) in &upload.header {
                request = request.header(name.as_str(), value.as_str());
            }
            let response = request
                .body(content)
                .send()
                .await
                .context("Failed to upload LFS object")?;
            ensure_success(response, "LFS upload").await?;
        }

        if let Some(verify) = actions.verify {
            let mut request = self.authorized(self.client.post(&verify.href));
            for (name, value) in &verify.header {
                request = request.header(name.as_str(), value.as_str());
            }
            let response = request
                .json(&object)
                .send()
                .await
                .context("Failed to verify LFS object")?;
            ensure_success(response, "LFS verification").await?;
        }

        Ok(object)
    }

    /// Create a commit on `main`.
    ///
    /// # Errors
    ///
    /// Returns a `Publish` error if the hub rejects the commit.
    pub async fn commit(
        &self,
        repo_id: &str,
        summary: &str,
        operations: &[CommitOperation],
    ) -> Result<CommitInfo> {
        let body = to_ndjson(summary, operations)
            .map_err(|e| PublisherError::Publish(format!("Failed to encode commit: {e}")))?;

        let response = self
            .authorized(self.client.post(self.api_url(repo_id, "commit/main")))
            .header(CONTENT_TYPE, "application/x-ndjson")
            .body(body)
            .send()
            .await
            .context("Failed to reach commit endpoint")?;

        let info: CommitInfo = ensure_success(response, "Commit")
            .await?
            .json()
            .await
            .context("Failed to parse commit response")?;

        tracing::info!(
            "Committed {} file operation(s) to {repo_id}{}",
            operations.len(),
            info.commit_oid
                .as_deref()
                .map(|oid| format!(" ({oid})"))
                .unwrap_or_default()
        );
        Ok(info)
    }
}

impl DatasetHub for HubClient {
    async fn push_dataset(&self, repo_id: &str, parquet: &[u8]) -> Result<()> {
        self.create_repo(repo_id).await?;
        let existing = self.list_data_files(repo_id).await?;

        let add = if self.requires_lfs(repo_id, DATA_FILE_PATH, parquet).await? {
            let object = self.upload_lfs(repo_id, parquet.to_vec()).await?;
            CommitOperation::AddLfs {
                path: DATA_FILE_PATH.to_owned(),
                oid: object.oid,
                size: object.size,
            }
        } else {
            CommitOperation::Add {
                path: DATA_FILE_PATH.to_owned(),
                content: parquet.to_vec(),
            }
        };

        let mut operations = vec![add];
        operations.extend(
            existing
                .into_iter()
                .filter(|path| path != DATA_FILE_PATH)
                .map(|path| CommitOperation::Delete { path }),
        );

        self.commit(repo_id, "Upload dataset", &operations).await?;
        Ok(())
    }

    async fn upload_card(&self, repo_id: &str, card: &[u8]) -> Result<()> {
        let operations = [CommitOperation::Add {
            path: README_PATH.to_owned(),
            content: card.to_vec(),
        }];
        self.commit(repo_id, "Upload dataset card", &operations)
            .await?;
        Ok(())
    }

    fn dataset_url(&self, repo_id: &str) -> String {
        format!("{}/datasets/{repo_id}", self.endpoint)
    }
}
