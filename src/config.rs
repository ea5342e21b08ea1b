//! Run configuration.
//!
//! All environment-derived settings are collected once into a
//! [`PublisherConfig`] at process start and passed down explicitly. The
//! transformation code never looks at the environment itself.
//!
//! Precedence, lowest first: built-in defaults, the optional JSON file at
//! `<config_dir>/qafiyah/publisher.json`, then environment variables and
//! command-line flags (merged by the binary through [`ConfigOverrides`]).

use crate::error::{PublisherError, Result, ResultExt as _};
use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_REPO: &str = "qafiyah/classical-arabic-poetry";
/// Local database over the default Unix socket.
pub const DEFAULT_DATABASE_URL: &str = "postgres:///qafiyah";
pub const DEFAULT_HUB_ENDPOINT: &str = "https://huggingface.co";
pub const DEFAULT_CARD_PATH: &str = "dataset_card.md";

/// Settings for one publisher run.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Target dataset repository, `namespace/name`.
    pub repo_id: String,
    pub database_url: String,
    /// Base URL of the dataset hub (no trailing slash).
    pub hub_endpoint: String,
    /// Access token for the hub. Required unless `dry_run` is set.
    pub hf_token: Option<SecretString>,
    /// Local dataset card uploaded as the repository README when present.
    pub card_path: PathBuf,
    pub dry_run: bool,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            repo_id: DEFAULT_REPO.to_owned(),
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            hub_endpoint: DEFAULT_HUB_ENDPOINT.to_owned(),
            hf_token: None,
            card_path: PathBuf::from(DEFAULT_CARD_PATH),
            dry_run: false,
        }
    }
}

/// Optional on-disk configuration. Every key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub repo_id: Option<String>,
    pub database_url: Option<String>,
    pub hub_endpoint: Option<String>,
    pub card_path: Option<PathBuf>,
}

impl FileConfig {
    /// Default location of the config file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("qafiyah").join("publisher.json"))
    }

    /// Load configuration from `path`. A missing file yields the empty config.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the file exists but is not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Values coming from the command line or the environment. `None` means
/// "not given", so lower layers stay in effect.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub repo_id: Option<String>,
    pub database_url: Option<String>,
    pub hub_endpoint: Option<String>,
    pub hf_token: Option<String>,
    pub card_path: Option<PathBuf>,
    pub dry_run: bool,
}

impl PublisherConfig {
    /// Merge the layers into the final configuration.
    pub fn resolve(file: FileConfig, overrides: ConfigOverrides) -> Self {
        let defaults = Self::default();

        let hf_token = overrides
            .hf_token
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .map(|t| SecretString::new(t.into()));

        let hub_endpoint = overrides
            .hub_endpoint
            .or(file.hub_endpoint)
            .unwrap_or(defaults.hub_endpoint)
            .trim_end_matches('/')
            .to_owned();

        Self {
            repo_id: overrides
                .repo_id
                .or(file.repo_id)
                .unwrap_or(defaults.repo_id),
            database_url: overrides
                .database_url
                .or(file.database_url)
                .unwrap_or(defaults.database_url),
            hub_endpoint,
            hf_token,
            card_path: overrides
                .card_path
                .or(file.card_path)
                .unwrap_or(defaults.card_path),
            dry_run: overrides.dry_run,
        }
    }

    /// The token, if one was supplied and is not blank.
    pub fn token(&self) -> Option<&SecretString> {
        self.hf_token
            .as_ref()
            .filter(|t| !t.expose_secret().trim().is_empty())
    }
}

/// Split a `namespace/name` repository identifier.
///
/// # Errors
///
/// Returns a `Config` error for identifiers without exactly one `/`.
pub fn split_repo_id(repo_id: &str) -> Result<(&str, &str)> {
    match repo_id.split_once('/') {
        Some((ns, name)) if !ns.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((ns, name))
        }
        _ => Err(PublisherError::Config(format!(
            "Repository id must look like 'namespace/name', got '{repo_id}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = PublisherConfig::resolve(FileConfig::default(), ConfigOverrides::default());
        assert_eq!(config.repo_id, DEFAULT_REPO);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.card_path, PathBuf::from(DEFAULT_CARD_PATH));
        assert!(config.token().is_none());
        assert!(!config.dry_run);
    }

    #[test]
    fn test_overrides_beat_file() {
        let file = FileConfig {
            repo_id: Some("file/repo".to_owned()),
            database_url: Some("postgres://file/db".to_owned()),
            hub_endpoint: Some("http://file-hub/".to_owned()),
            card_path: None,
        };
        let overrides = ConfigOverrides {
            repo_id: Some("cli/repo".to_owned()),
            ..Default::default()
        };

        let config = PublisherConfig::resolve(file, overrides);
        assert_eq!(config.repo_id, "cli/repo");
        assert_eq!(config.database_url, "postgres://file/db");
        assert_eq!(config.hub_endpoint, "http://file-hub");
    }

    #[test]
    fn test_blank_token_is_absent() {
        let overrides = ConfigOverrides {
            hf_token: Some("   ".to_owned()),
            ..Default::default()
        };
        let config = PublisherConfig::resolve(FileConfig::default(), overrides);
        assert!(config.token().is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let config = FileConfig::load(Path::new("/nonexistent/publisher.json")).unwrap();
        assert!(config.repo_id.is_none());
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"repo_id": "someone/poems"}"#).unwrap();
        file.flush().unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.repo_id.as_deref(), Some("someone/poems"));
        assert!(config.hub_endpoint.is_none());
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        file.flush().unwrap();

        let err = FileConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, PublisherError::Config(_)));
    }

    #[test]
    fn test_split_repo_id() {
        assert_eq!(
            split_repo_id("qafiyah/classical-arabic-poetry").unwrap(),
            ("qafiyah", "classical-arabic-poetry")
        );
        assert!(split_repo_id("no-namespace").is_err());
        assert!(split_repo_id("a/b/c").is_err());
        assert!(split_repo_id("/name").is_err());
    }
}
