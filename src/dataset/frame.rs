//! Columnar representation of the dataset for upload.
//!
//! The hub stores datasets as Parquet. Every column is text except
//! `verses` (`List(String)`). `poet_bio` and `rhyme_pattern` may hold nulls.

use super::poem::{EnrichedPoem, PoemDataset};
use crate::error::{Result, ResultExt as _};
use polars::prelude::*;

fn text_column(
    name: &str,
    dataset: &PoemDataset,
    field: impl Fn(&EnrichedPoem) -> &str,
) -> Column {
    let values: Vec<&str> = dataset.iter().map(field).collect();
    Column::new(name.into(), values)
}

fn nullable_text_column(
    name: &str,
    dataset: &PoemDataset,
    field: impl Fn(&EnrichedPoem) -> Option<&str>,
) -> Column {
    let values: Vec<Option<&str>> = dataset.iter().map(field).collect();
    Column::new(name.into(), values)
}

fn verses_column(dataset: &PoemDataset) -> Column {
    let total_verses = dataset.iter().map(|p| p.verses.len()).sum();
    let mut builder = ListStringChunkedBuilder::new("verses".into(), dataset.len(), total_verses);
    for poem in dataset {
        builder.append_values_iter(poem.verses.iter().map(String::as_str));
    }
    Column::from(builder.finish().into_series())
}

/// Convert the dataset into a `DataFrame` whose columns follow
/// [`super::COLUMNS`].
///
/// # Errors
///
/// Returns a `DataProcessing` error if polars rejects the columns.
pub fn to_data_frame(dataset: &PoemDataset) -> Result<DataFrame> {
    let columns = vec![
        text_column("poem_id", dataset, |p| p.poem_id.as_str()),
        text_column("poem_slug", dataset, |p| p.poem_slug.as_str()),
        text_column("title", dataset, |p| p.title.as_str()),
        text_column("content", dataset, |p| p.content.as_str()),
        text_column("poet_name", dataset, |p| p.poet_name.as_str()),
        text_column("poet_slug", dataset, |p| p.poet_slug.as_str()),
        nullable_text_column("poet_bio", dataset, |p| p.poet_bio.as_deref()),
        text_column("era_name", dataset, |p| p.era_name.as_str()),
        text_column("era_slug", dataset, |p| p.era_slug.as_str()),
        text_column("meter_name", dataset, |p| p.meter_name.as_str()),
        text_column("meter_slug", dataset, |p| p.meter_slug.as_str()),
        text_column("theme_name", dataset, |p| p.theme_name.as_str()),
        text_column("theme_slug", dataset, |p| p.theme_slug.as_str()),
        nullable_text_column("rhyme_pattern", dataset, |p| p.rhyme_pattern.as_deref()),
        verses_column(dataset),
        text_column("text", dataset, |p| p.text.as_str()),
    ];

    DataFrame::new(columns).context("Failed to assemble dataset frame")
}

/// Serialize a frame into an in-memory Parquet file.
///
/// # Errors
///
/// Returns a `DataProcessing` error if the Parquet writer fails.
pub fn to_parquet(df: &mut DataFrame) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    ParquetWriter::new(&mut buf)
        .finish(df)
        .context("Failed to write Parquet")?;
    Ok(buf)
}
