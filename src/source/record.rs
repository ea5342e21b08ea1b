//! One denormalized poem row as read from the store.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row as _};
use std::fmt;
use uuid::Uuid;

/// A database-native identifier value.
///
/// The store uses UUIDs for some slug columns and integers or text for others.
/// The value is kept in its native type until the dataset builder turns it
/// into text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowId {
    Uuid(Uuid),
    Int(i64),
    Text(String),
}

impl RowId {
    /// Decode `column` from `row`, trying UUID, then integer, then text.
    ///
    /// # Errors
    ///
    /// Returns the text decode error if none of the types match (for example
    /// when the column is NULL).
    pub fn decode(row: &PgRow, column: &str) -> Result<Self, sqlx::Error> {
        if let Ok(id) = row.try_get::<Uuid, _>(column) {
            return Ok(Self::Uuid(id));
        }
        if let Ok(id) = row.try_get::<i64, _>(column) {
            return Ok(Self::Int(id));
        }
        if let Ok(id) = row.try_get::<i32, _>(column) {
            return Ok(Self::Int(i64::from(id)));
        }
        row.try_get::<String, _>(column).map(Self::Text)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uuid(id) => write!(f, "{}", id.hyphenated()),
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Uuid> for RowId {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<i64> for RowId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// One poem with its poet, era, meter, theme and (optional) rhyme metadata.
///
/// Poet, era, meter and theme come from inner joins and are always present.
/// The rhyme comes from a left join, hence `Option`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoemRecord {
    pub poem_id: RowId,
    pub poem_slug: RowId,
    pub title: String,
    /// Raw text, hemistichs separated by `*`.
    pub content: String,
    pub poet_name: String,
    pub poet_slug: String,
    /// NULL when the poet has no biography.
    pub poet_bio: Option<String>,
    pub era_name: String,
    pub era_slug: String,
    pub meter_name: String,
    pub meter_slug: String,
    pub theme_name: String,
    pub theme_slug: RowId,
    pub rhyme_pattern: Option<String>,
}

impl<'r> FromRow<'r, PgRow> for PoemRecord {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            poem_id: RowId::decode(row, "poem_id")?,
            poem_slug: RowId::decode(row, "poem_slug")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            poet_name: row.try_get("poet_name")?,
            poet_slug: row.try_get("poet_slug")?,
            poet_bio: row.try_get("poet_bio")?,
            era_name: row.try_get("era_name")?,
            era_slug: row.try_get("era_slug")?,
            meter_name: row.try_get("meter_name")?,
            meter_slug: row.try_get("meter_slug")?,
            theme_name: row.try_get("theme_name")?,
            theme_slug: RowId::decode(row, "theme_slug")?,
            rhyme_pattern: row.try_get("rhyme_pattern")?,
        })
    }
}
