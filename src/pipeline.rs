//! One publisher run, start to finish.
//!
//! ```text
//! resolve target ──> fetch rows ──> build dataset ──> stats ──> publish
//! ```
//!
//! The steps run strictly one after the other; the first error ends the run.
//! The target is resolved first so a missing token is reported before the
//! database or the hub is contacted.

use crate::config::PublisherConfig;
use crate::dataset::{DatasetStats, PoemDataset, build_dataset, compute_stats};
use crate::error::Result;
use crate::hub::DatasetHub;
use crate::publish::{PublishOutcome, PublishTarget, publish};
use crate::source::PoemSource;

/// Output of the extraction half of a run.
#[derive(Debug, Clone)]
pub struct PreparedRun {
    pub target: PublishTarget,
    pub dataset: PoemDataset,
    pub stats: DatasetStats,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub stats: DatasetStats,
    pub outcome: PublishOutcome,
}

/// Resolve the target, query the store and build the dataset.
///
/// # Errors
///
/// `Precondition` or `Config` from target resolution, `DataSource` from the
/// query.
pub async fn prepare<S: PoemSource>(config: &PublisherConfig, source: &S) -> Result<PreparedRun> {
    let target = PublishTarget::resolve(config)?;

    let records = source.fetch_poems().await?;
    let dataset = build_dataset(records);
    let stats = compute_stats(&dataset);
    tracing::info!(
        poems = stats.total_poems,
        poets = stats.total_poets,
        rhymes = stats.total_rhymes,
        "Dataset built"
    );

    Ok(PreparedRun {
        target,
        dataset,
        stats,
    })
}

/// Publish a prepared run.
///
/// # Errors
///
/// See [`publish`].
pub async fn finish<H: DatasetHub>(prepared: &PreparedRun, hub: &H) -> Result<PublishOutcome> {
    publish(&prepared.target, &prepared.dataset, hub).await
}

/// [`prepare`] followed by [`finish`].
///
/// # Errors
///
/// The first error of any step.
pub async fn run<S: PoemSource, H: DatasetHub>(
    config: &PublisherConfig,
    source: &S,
    hub: &H,
) -> Result<RunReport> {
    let prepared = prepare(config, source).await?;
    let outcome = finish(&prepared, hub).await?;
    Ok(RunReport {
        stats: prepared.stats,
        outcome,
    })
}
