//! Record query layer.
//!
//! Reads the denormalized poem rows (poem joined with poet, era, meter, theme
//! and the optional rhyme) from the relational store. The pipeline only sees
//! the [`PoemSource`] trait, so tests can feed rows without a database.

pub mod postgres;
pub mod record;

pub use postgres::{POEMS_QUERY, PgPoemSource};
pub use record::{PoemRecord, RowId};

use crate::error::Result;
use std::future::Future;

/// Anything that can produce the full set of poem rows for one run.
pub trait PoemSource {
    /// Fetch every poem row, in the store's natural order.
    ///
    /// Implementations issue exactly one read and return either all rows or an
    /// error. Partial results are never returned.
    fn fetch_poems(&self) -> impl Future<Output = Result<Vec<PoemRecord>>>;
}
