use anyhow::Result;
use clap::Parser;
use qafiyah_publisher::config::{ConfigOverrides, FileConfig, PublisherConfig};
use qafiyah_publisher::hub::HubClient;
use qafiyah_publisher::pipeline;
use qafiyah_publisher::publish::{CardStatus, PublishOutcome};
use qafiyah_publisher::source::PgPoemSource;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "qafiyah-publisher",
    about = "Publish the Qafiyah dataset to Hugging Face Hub"
)]
pub struct Cli {
    /// Target Hugging Face repository (default: qafiyah/classical-arabic-poetry)
    #[arg(long)]
    pub repo: Option<String>,

    /// Preview the dataset without uploading
    #[arg(long)]
    pub dry_run: bool,

    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Dataset card uploaded as README.md when the file exists (default: dataset_card.md)
    #[arg(long)]
    pub card: Option<PathBuf>,

    /// Hub base URL
    #[arg(long, env = "HF_ENDPOINT")]
    pub hub_endpoint: Option<String>,

    /// Hugging Face token with write access
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    pub hf_token: Option<String>,

    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    fn load_config(self) -> Result<PublisherConfig> {
        let config_path = self.config.clone().or_else(FileConfig::default_path);
        let file = match config_path {
            Some(path) => FileConfig::load(&path)?,
            None => FileConfig::default(),
        };

        let overrides = ConfigOverrides {
            repo_id: self.repo,
            database_url: self.database_url,
            hub_endpoint: self.hub_endpoint,
            hf_token: self.hf_token,
            card_path: self.card,
            dry_run: self.dry_run,
        };
        Ok(PublisherConfig::resolve(file, overrides))
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.load_config()?;
    tracing::debug!(
        repo = %config.repo_id,
        hub = %config.hub_endpoint,
        dry_run = config.dry_run,
        "Configuration loaded"
    );

    let source = PgPoemSource::from_url(&config.database_url)?;
    let hub = HubClient::new(&config.hub_endpoint, config.token())?;

    let prepared = pipeline::prepare(&config, &source).await?;
    println!("\n{}", prepared.stats);

    match pipeline::finish(&prepared, &hub).await? {
        PublishOutcome::Previewed(report) => println!("\n{report}"),
        PublishOutcome::Published { url, card, .. } => {
            if let CardStatus::Uploaded(path) = card {
                println!("Dataset card uploaded from {}", path.display());
            }
            println!("\nSuccess! Dataset published to: {url}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_dry_run_flags() {
        let cli = Cli::try_parse_from([
            "qafiyah-publisher",
            "--dry-run",
            "--repo",
            "someone/poems",
            "--database-url",
            "postgres://db/qafiyah",
            "--config",
            "/nonexistent/publisher.json",
        ])
        .unwrap();
        assert!(cli.dry_run);

        let config = cli.load_config().unwrap();
        assert_eq!(config.repo_id, "someone/poems");
        assert_eq!(config.database_url, "postgres://db/qafiyah");
        assert!(config.dry_run);
    }
}
