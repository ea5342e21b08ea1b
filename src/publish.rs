//! Publisher: the terminal step of a run.
//!
//! ```text
//! PublishTarget::resolve(config)
//!   ├─ Preview ──> PreviewReport            (no hub calls)
//!   └─ Push ─────> push_dataset ──> card present? ──> upload_card
//!                       │                  └─ no ──> done (card skipped)
//!                       └─ error: PublishError (nothing published)
//! ```
//!
//! A failed card upload after a successful dataset push surfaces as
//! [`PublisherError::CardUpload`]: the dataset is live, the run still reports
//! the failure.

pub mod preview;

pub use preview::{PreviewReport, PreviewValue};

use crate::config::{PublisherConfig, split_repo_id};
use crate::dataset::PoemDataset;
use crate::dataset::frame::{to_data_frame, to_parquet};
use crate::error::{PublisherError, Result};
use crate::hub::DatasetHub;
use std::path::{Path, PathBuf};

/// Where the run ends up, decided before any I/O happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishTarget {
    Preview { repo_id: String, card_path: PathBuf },
    Push { repo_id: String, card_path: PathBuf },
}

impl PublishTarget {
    /// Pick the path for this run.
    ///
    /// # Errors
    ///
    /// Returns a `Precondition` error when pushing without a token, and a
    /// `Config` error for a malformed repository id.
    pub fn resolve(config: &PublisherConfig) -> Result<Self> {
        let repo_id = config.repo_id.clone();
        let card_path = config.card_path.clone();

        if config.dry_run {
            return Ok(Self::Preview { repo_id, card_path });
        }
        if config.token().is_none() {
            return Err(PublisherError::missing_token());
        }
        split_repo_id(&repo_id)?;
        Ok(Self::Push { repo_id, card_path })
    }

    pub fn repo_id(&self) -> &str {
        match self {
            Self::Preview { repo_id, .. } | Self::Push { repo_id, .. } => repo_id,
        }
    }

    pub fn is_dry_run(&self) -> bool {
        matches!(self, Self::Preview { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardStatus {
    Uploaded(PathBuf),
    /// No card file at the configured path.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Previewed(PreviewReport),
    Published {
        repo_id: String,
        url: String,
        examples: usize,
        card: CardStatus,
    },
}

fn existing_card(path: &Path) -> Option<PathBuf> {
    path.is_file().then(|| path.to_path_buf())
}

/// Preview or push `dataset` according to `target`.
///
/// # Errors
///
/// - `DataProcessing` if the dataset cannot be converted to Parquet.
/// - `Publish` if the dataset upload fails.
/// - `CardUpload` if the card cannot be read or uploaded after the dataset
///   was published.
pub async fn publish<H: DatasetHub>(
    target: &PublishTarget,
    dataset: &PoemDataset,
    hub: &H,
) -> Result<PublishOutcome> {
    match target {
        PublishTarget::Preview { repo_id, card_path } => Ok(PublishOutcome::Previewed(
            PreviewReport::new(repo_id, dataset, existing_card(card_path)),
        )),
        PublishTarget::Push { repo_id, card_path } => {
            tracing::info!("Preparing dataset for upload...");
            let mut df = to_data_frame(dataset)?;
            let parquet = to_parquet(&mut df)?;

            tracing::info!(
                "Uploading {} examples ({} bytes) to {repo_id}",
                dataset.len(),
                parquet.len()
            );
            hub.push_dataset(repo_id, &parquet).await.map_err(|e| match e {
                PublisherError::Publish(_) => e,
                other => PublisherError::Publish(other.to_string()),
            })?;

            let card = match existing_card(card_path) {
                Some(path) => {
                    tracing::info!("Uploading dataset card...");
                    upload_card(hub, repo_id, &path).await?;
                    CardStatus::Uploaded(path)
                }
                None => {
                    tracing::info!(
                        "No dataset card at {}, skipping README upload",
                        card_path.display()
                    );
                    CardStatus::Skipped
                }
            };

            Ok(PublishOutcome::Published {
                repo_id: repo_id.clone(),
                url: hub.dataset_url(repo_id),
                examples: dataset.len(),
                card,
            })
        }
    }
}

async fn upload_card<H: DatasetHub>(hub: &H, repo_id: &str, path: &Path) -> Result<()> {
    let card_failed = |message: String| PublisherError::CardUpload {
        repo_id: repo_id.to_owned(),
        message,
    };

    let bytes = std::fs::read(path)
        .map_err(|e| card_failed(format!("cannot read {}: {e}", path.display())))?;
    hub.upload_card(repo_id, &bytes)
        .await
        .map_err(|e| card_failed(e.to_string()))
}
