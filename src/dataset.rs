//! Dataset construction.
//!
//! Turns source rows into [`EnrichedPoem`]s (verses + display text), computes
//! summary statistics and produces the columnar form that gets uploaded.
//!
//! Everything here is a pure function of its input: no I/O, no environment.

pub mod builder;
pub mod frame;
pub mod poem;
pub mod stats;
pub mod verses;

pub use builder::build_dataset;
pub use poem::{COLUMNS, EnrichedPoem, FieldValue, PoemDataset};
pub use stats::{DatasetStats, compute_stats};
pub use verses::{HEMISTICH_SEPARATOR, extract_verses};
