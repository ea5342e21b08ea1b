//! Dry-run preview of what would be published.

use crate::dataset::{FieldValue, PoemDataset};
use crate::utils::fmt_count;
use std::fmt;
use std::path::PathBuf;

/// Text longer than this many characters is cut in the preview.
pub const TEXT_LIMIT: usize = 100;
/// Lists longer than this are cut in the preview.
pub const LIST_LIMIT: usize = 3;
pub const ELLIPSIS: &str = "...";

/// One field of the sample entry, already truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewValue {
    Text(String),
    List(Vec<String>),
    Null,
}

/// Cut `text` to [`TEXT_LIMIT`] characters plus [`ELLIPSIS`] when longer.
pub fn truncate_text(text: &str) -> String {
    if text.chars().count() > TEXT_LIMIT {
        let mut cut: String = text.chars().take(TEXT_LIMIT).collect();
        cut.push_str(ELLIPSIS);
        cut
    } else {
        text.to_owned()
    }
}

/// Keep the first [`LIST_LIMIT`] items plus an [`ELLIPSIS`] item when longer.
pub fn truncate_list(items: &[String]) -> Vec<String> {
    if items.len() > LIST_LIMIT {
        items
            .iter()
            .take(LIST_LIMIT)
            .cloned()
            .chain(std::iter::once(ELLIPSIS.to_owned()))
            .collect()
    } else {
        items.to_vec()
    }
}

impl From<FieldValue<'_>> for PreviewValue {
    fn from(value: FieldValue<'_>) -> Self {
        match value {
            FieldValue::Text(text) => Self::Text(truncate_text(text)),
            FieldValue::List(items) => Self::List(truncate_list(items)),
            FieldValue::Null => Self::Null,
        }
    }
}

impl fmt::Display for PreviewValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{item}'")?;
                }
                f.write_str("]")
            }
            Self::Null => f.write_str("null"),
        }
    }
}

/// Everything the dry run reports. Building it has no side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewReport {
    pub repo_id: String,
    pub example_count: usize,
    /// Card that would be uploaded, if the file exists.
    pub card_path: Option<PathBuf>,
    /// First record, truncated. `None` for an empty dataset.
    pub sample: Option<Vec<(&'static str, PreviewValue)>>,
}

impl PreviewReport {
    pub fn new(repo_id: &str, dataset: &PoemDataset, card_path: Option<PathBuf>) -> Self {
        let sample = dataset.first().map(|poem| {
            poem.fields()
                .into_iter()
                .map(|(name, value)| (name, PreviewValue::from(value)))
                .collect()
        });

        Self {
            repo_id: repo_id.to_owned(),
            example_count: dataset.len(),
            card_path,
            sample,
        }
    }
}

impl fmt::Display for PreviewReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[DRY RUN] Would upload to: {}", self.repo_id)?;
        writeln!(
            f,
            "[DRY RUN] Dataset has {} examples",
            fmt_count(self.example_count)
        )?;
        if let Some(path) = &self.card_path {
            writeln!(
                f,
                "[DRY RUN] Would upload dataset card from: {}",
                path.display()
            )?;
        }

        match &self.sample {
            Some(fields) => {
                write!(f, "\nSample entry:")?;
                for (name, value) in fields {
                    write!(f, "\n  {name}: {value}")?;
                }
                Ok(())
            }
            None => write!(f, "\nNo sample entry: the dataset is empty."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::EnrichedPoem;

    fn poem(content: String, verses: Vec<String>) -> EnrichedPoem {
        EnrichedPoem {
            poem_id: "1".to_owned(),
            poem_slug: "slug".to_owned(),
            title: "العنوان".to_owned(),
            content,
            poet_name: "poet".to_owned(),
            poet_slug: "poet".to_owned(),
            poet_bio: None,
            era_name: "era".to_owned(),
            era_slug: "era".to_owned(),
            meter_name: "meter".to_owned(),
            meter_slug: "meter".to_owned(),
            theme_name: "theme".to_owned(),
            theme_slug: "theme".to_owned(),
            rhyme_pattern: None,
            text: verses.join("\n"),
            verses,
        }
    }

    fn verses(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("verse {i}")).collect()
    }

    #[test]
    fn test_truncate_long_text() {
        let text = "x".repeat(150);
        let cut = truncate_text(&text);
        assert_eq!(cut, format!("{}...", "x".repeat(100)));
    }

    #[test]
    fn test_text_at_limit_unchanged() {
        let text = "x".repeat(100);
        assert_eq!(truncate_text(&text), text);
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "ب".repeat(100);
        assert_eq!(truncate_text(&text), text);

        let long = "ب".repeat(101);
        let cut = truncate_text(&long);
        assert_eq!(cut.chars().count(), 100 + ELLIPSIS.len());
    }

    #[test]
    fn test_truncate_long_list() {
        assert_eq!(
            truncate_list(&verses(5)),
            vec!["verse 1", "verse 2", "verse 3", "..."]
        );
    }

    #[test]
    fn test_list_at_limit_unchanged() {
        assert_eq!(truncate_list(&verses(3)), verses(3));
    }

    #[test]
    fn test_report_for_first_record() {
        let dataset = PoemDataset::new(vec![
            poem("y".repeat(150), verses(5)),
            poem("second".to_owned(), verses(1)),
        ]);
        let report = PreviewReport::new("qafiyah/classical-arabic-poetry", &dataset, None);

        assert_eq!(report.example_count, 2);
        let sample = report.sample.as_ref().unwrap();
        let content = sample.iter().find(|(n, _)| *n == "content").unwrap();
        assert_eq!(
            content.1,
            PreviewValue::Text(format!("{}...", "y".repeat(100)))
        );
        let listed = sample.iter().find(|(n, _)| *n == "verses").unwrap();
        assert_eq!(
            listed.1,
            PreviewValue::List(vec![
                "verse 1".to_owned(),
                "verse 2".to_owned(),
                "verse 3".to_owned(),
                "...".to_owned()
            ])
        );
        let rhyme = sample.iter().find(|(n, _)| *n == "rhyme_pattern").unwrap();
        assert_eq!(rhyme.1, PreviewValue::Null);

        let out = report.to_string();
        assert!(out.contains("[DRY RUN] Would upload to: qafiyah/classical-arabic-poetry"));
        assert!(out.contains("[DRY RUN] Dataset has 2 examples"));
        assert!(out.contains("  title: العنوان"));
        assert!(!out.contains("dataset card"));
    }

    #[test]
    fn test_list_keeps_diacritics_verbatim() {
        let verse = "قِفا نَبكِ مِن ذِكرى".to_owned();
        let content = "قِفا نَبكِ * مِن ذِكرى".to_owned();
        let dataset = PoemDataset::new(vec![poem(content, vec![verse.clone()])]);
        let out = PreviewReport::new("a/b", &dataset, None).to_string();

        assert!(out.contains(&format!("  verses: ['{verse}']")));
        assert!(!out.contains("\\u{"));
    }

    #[test]
    fn test_list_display() {
        let value = PreviewValue::List(truncate_list(&verses(4)));
        assert_eq!(
            value.to_string(),
            "['verse 1', 'verse 2', 'verse 3', '...']"
        );
    }

    #[test]
    fn test_report_for_empty_dataset() {
        let report = PreviewReport::new("a/b", &PoemDataset::default(), None);
        assert_eq!(report.example_count, 0);
        assert!(report.sample.is_none());

        let out = report.to_string();
        assert!(out.contains("Dataset has 0 examples"));
        assert!(out.contains("the dataset is empty"));
    }

    #[test]
    fn test_report_mentions_card() {
        let report = PreviewReport::new(
            "a/b",
            &PoemDataset::default(),
            Some(PathBuf::from("dataset_card.md")),
        );
        assert!(
            report
                .to_string()
                .contains("Would upload dataset card from: dataset_card.md")
        );
    }
}
