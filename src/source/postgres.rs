use super::{PoemRecord, PoemSource};
use crate::error::{PublisherError, Result, ResultExt as _};
use sqlx::Connection as _;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use std::str::FromStr as _;

/// The single read issued per run.
///
/// Poet, era, meter and theme are inner joins. Rhyme is a left join, so
/// `rhyme_pattern` may be NULL.
pub const POEMS_QUERY: &str = r"
SELECT
    p.id AS poem_id,
    p.slug AS poem_slug,
    p.title,
    p.content,
    po.name AS poet_name,
    po.slug AS poet_slug,
    po.bio AS poet_bio,
    e.name AS era_name,
    e.slug AS era_slug,
    m.name AS meter_name,
    m.slug AS meter_slug,
    th.name AS theme_name,
    th.slug AS theme_slug,
    r.pattern AS rhyme_pattern
FROM poems p
JOIN poets po ON p.poet_id = po.id
JOIN eras e ON po.era_id = e.id
JOIN meters m ON p.meter_id = m.id
JOIN themes th ON p.theme_id = th.id
LEFT JOIN rhymes r ON p.rhyme_id = r.id
";

/// Postgres-backed [`PoemSource`].
pub struct PgPoemSource {
    options: PgConnectOptions,
}

impl PgPoemSource {
    pub fn new(options: PgConnectOptions) -> Self {
        Self { options }
    }

    /// Build a source from a `postgres://` connection string.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the URL cannot be parsed.
    pub fn from_url(database_url: &str) -> Result<Self> {
        let options = PgConnectOptions::from_str(database_url)
            .map_err(|e| PublisherError::Config(format!("Invalid database URL: {e}")))?;
        Ok(Self::new(options))
    }
}

impl PoemSource for PgPoemSource {
    async fn fetch_poems(&self) -> Result<Vec<PoemRecord>> {
        tracing::info!("Connecting to database...");
        let mut conn = PgConnection::connect_with(&self.options)
            .await
            .context("Failed to connect to PostgreSQL")?;

        tracing::info!("Fetching poems from database...");
        let poems = sqlx::query_as::<_, PoemRecord>(POEMS_QUERY)
            .fetch_all(&mut conn)
            .await
            .context("Failed to fetch poems")?;
        tracing::info!("Found {} poems", poems.len());

        if let Err(e) = conn.close().await {
            tracing::warn!("Failed to close database connection cleanly: {e}");
        }

        Ok(poems)
    }
}
