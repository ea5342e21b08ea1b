use super::poem::{EnrichedPoem, PoemDataset};
use super::verses::extract_verses;
use crate::source::PoemRecord;

impl EnrichedPoem {
    /// Derive `verses` and `text` from a source row and normalize its
    /// identifiers to text.
    pub fn from_record(record: PoemRecord) -> Self {
        let verses = extract_verses(&record.content);
        let text = verses.join("\n");

        Self {
            poem_id: record.poem_id.to_string(),
            poem_slug: record.poem_slug.to_string(),
            title: record.title,
            content: record.content,
            poet_name: record.poet_name,
            poet_slug: record.poet_slug,
            poet_bio: record.poet_bio,
            era_name: record.era_name,
            era_slug: record.era_slug,
            meter_name: record.meter_name,
            meter_slug: record.meter_slug,
            theme_name: record.theme_name,
            theme_slug: record.theme_slug.to_string(),
            rhyme_pattern: record.rhyme_pattern,
            verses,
            text,
        }
    }
}

/// Build the dataset from source rows. One output poem per row, same order.
pub fn build_dataset(records: Vec<PoemRecord>) -> PoemDataset {
    tracing::info!("Processing verses for {} poems...", records.len());
    PoemDataset::new(records.into_iter().map(EnrichedPoem::from_record).collect())
}
