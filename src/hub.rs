//! Dataset hosting service.
//!
//! The publisher talks to the hub only through [`DatasetHub`]. [`HubClient`]
//! implements it against the Hugging Face Hub HTTP API; tests substitute a
//! recording fake.

pub mod client;
pub mod commit;
pub mod lfs;

pub use client::HubClient;

use crate::error::Result;
use std::future::Future;

/// Path of the single Parquet shard inside the dataset repository.
pub const DATA_FILE_PATH: &str = "data/train-00000-of-00001.parquet";

/// Path the dataset card is stored under.
pub const README_PATH: &str = "README.md";

pub trait DatasetHub {
    /// Replace the data files of `repo_id` with `parquet`, creating the
    /// repository if needed. After success the remote dataset is exactly this
    /// data.
    fn push_dataset(&self, repo_id: &str, parquet: &[u8]) -> impl Future<Output = Result<()>>;

    /// Upload `card` byte for byte as the repository README.
    fn upload_card(&self, repo_id: &str, card: &[u8]) -> impl Future<Output = Result<()>>;

    /// Public URL of the dataset page.
    fn dataset_url(&self, repo_id: &str) -> String;
}
