//! # Qafiyah Publisher
//!
//! Extracts the Qafiyah classical Arabic poetry corpus from Postgres, turns
//! each poem's raw hemistich text into verses, and publishes the result as a
//! dataset on the Hugging Face Hub.
//!
//! ## Quick Start
//!
//! ```no_run
//! use qafiyah_publisher::config::{ConfigOverrides, FileConfig, PublisherConfig};
//! use qafiyah_publisher::hub::HubClient;
//! use qafiyah_publisher::pipeline;
//! use qafiyah_publisher::source::PgPoemSource;
//!
//! # async fn example() -> qafiyah_publisher::error::Result<()> {
//! let config = PublisherConfig::resolve(
//!     FileConfig::default(),
//!     ConfigOverrides { dry_run: true, ..Default::default() },
//! );
//! let source = PgPoemSource::from_url(&config.database_url)?;
//! let hub = HubClient::new(&config.hub_endpoint, config.token())?;
//!
//! let report = pipeline::run(&config, &source, &hub).await?;
//! println!("{}", report.stats);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`source`]: the single read query and the [`source::PoemSource`] seam
//! - [`dataset`]: verse extraction, dataset building, statistics, Parquet
//! - [`publish`]: dry-run preview or push to the hub
//! - [`hub`]: the [`hub::DatasetHub`] seam and its HTTP client
//! - [`pipeline`]: the run, in order
//! - [`config`], [`error`], [`logging`]: ambient plumbing
//!
//! ## Verses
//!
//! Raw content separates hemistichs with `*`. Two consecutive hemistichs form
//! a verse; a trailing unpaired hemistich is dropped:
//!
//! ```
//! use qafiyah_publisher::dataset::extract_verses;
//!
//! assert_eq!(extract_verses("a * b * c"), vec!["a b"]);
//! ```

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod hub;
pub mod logging;
pub mod pipeline;
pub mod publish;
pub mod source;
pub mod utils;
