//! Cardinality statistics over a built dataset.
//!
//! Distinct counts ignore missing values: a poem without a rhyme does not add
//! a "no rhyme" bucket to `total_rhymes`.

use super::poem::PoemDataset;
use crate::utils::fmt_count;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DatasetStats {
    pub total_poems: usize,
    pub total_poets: usize,
    pub total_eras: usize,
    pub total_meters: usize,
    pub total_themes: usize,
    /// Distinct non-null rhyme patterns.
    pub total_rhymes: usize,
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.collect::<HashSet<_>>().len()
}

/// Count rows and distinct poet, era, meter, theme and rhyme values.
pub fn compute_stats(dataset: &PoemDataset) -> DatasetStats {
    DatasetStats {
        total_poems: dataset.len(),
        total_poets: distinct(dataset.iter().map(|p| p.poet_name.as_str())),
        total_eras: distinct(dataset.iter().map(|p| p.era_name.as_str())),
        total_meters: distinct(dataset.iter().map(|p| p.meter_name.as_str())),
        total_themes: distinct(dataset.iter().map(|p| p.theme_name.as_str())),
        total_rhymes: distinct(dataset.iter().filter_map(|p| p.rhyme_pattern.as_deref())),
    }
}

impl fmt::Display for DatasetStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset Statistics:")?;
        writeln!(f, "  Poems:   {}", fmt_count(self.total_poems))?;
        writeln!(f, "  Poets:   {}", fmt_count(self.total_poets))?;
        writeln!(f, "  Eras:    {}", fmt_count(self.total_eras))?;
        writeln!(f, "  Meters:  {}", fmt_count(self.total_meters))?;
        writeln!(f, "  Themes:  {}", fmt_count(self.total_themes))?;
        write!(f, "  Rhymes:  {}", fmt_count(self.total_rhymes))
    }
}
