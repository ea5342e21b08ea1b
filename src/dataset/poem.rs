/// Column order of the published dataset.
pub const COLUMNS: [&str; 16] = [
    "poem_id",
    "poem_slug",
    "title",
    "content",
    "poet_name",
    "poet_slug",
    "poet_bio",
    "era_name",
    "era_slug",
    "meter_name",
    "meter_slug",
    "theme_name",
    "theme_slug",
    "rhyme_pattern",
    "verses",
    "text",
];

/// A poem row plus its derived `verses` and `text`.
///
/// Identifier fields are plain text here, whatever their type in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedPoem {
    pub poem_id: String,
    pub poem_slug: String,
    pub title: String,
    pub content: String,
    pub poet_name: String,
    pub poet_slug: String,
    pub poet_bio: Option<String>,
    pub era_name: String,
    pub era_slug: String,
    pub meter_name: String,
    pub meter_slug: String,
    pub theme_name: String,
    pub theme_slug: String,
    pub rhyme_pattern: Option<String>,
    pub verses: Vec<String>,
    /// `verses` joined with `\n`.
    pub text: String,
}

/// A borrowed view of one field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    List(&'a [String]),
    Null,
}

impl EnrichedPoem {
    /// All fields in [`COLUMNS`] order.
    pub fn fields(&self) -> [(&'static str, FieldValue<'_>); 16] {
        use FieldValue::{List, Null, Text};
        [
            ("poem_id", Text(&self.poem_id)),
            ("poem_slug", Text(&self.poem_slug)),
            ("title", Text(&self.title)),
            ("content", Text(&self.content)),
            ("poet_name", Text(&self.poet_name)),
            ("poet_slug", Text(&self.poet_slug)),
            ("poet_bio", self.poet_bio.as_deref().map_or(Null, Text)),
            ("era_name", Text(&self.era_name)),
            ("era_slug", Text(&self.era_slug)),
            ("meter_name", Text(&self.meter_name)),
            ("meter_slug", Text(&self.meter_slug)),
            ("theme_name", Text(&self.theme_name)),
            ("theme_slug", Text(&self.theme_slug)),
            (
                "rhyme_pattern",
                self.rhyme_pattern.as_deref().map_or(Null, Text),
            ),
            ("verses", List(&self.verses)),
            ("text", Text(&self.text)),
        ]
    }
}

/// The built dataset: one [`EnrichedPoem`] per source row, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoemDataset {
    poems: Vec<EnrichedPoem>,
}

impl PoemDataset {
    pub fn new(poems: Vec<EnrichedPoem>) -> Self {
        Self { poems }
    }

    pub fn len(&self) -> usize {
        self.poems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poems.is_empty()
    }

    pub fn first(&self) -> Option<&EnrichedPoem> {
        self.poems.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EnrichedPoem> {
        self.poems.iter()
    }

    pub fn as_slice(&self) -> &[EnrichedPoem] {
        &self.poems
    }
}

impl<'a> IntoIterator for &'a PoemDataset {
    type Item = &'a EnrichedPoem;
    type IntoIter = std::slice::Iter<'a, EnrichedPoem>;

    fn into_iter(self) -> Self::IntoIter {
        self.poems.iter()
    }
}
