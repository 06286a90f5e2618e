use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    app::{load_config, load_config_file, Config},
    cli::{handle_command, Cli, Commands},
    models::AiGateway,
    session::Session,
};

use super::non_interactive::NonInteractiveRunner;
use super::repl::run_repl;

/// Main runtime orchestrator
pub struct Orchestrator {
    cli: Cli,
    config: Config,
}

impl Orchestrator {
    /// Create a new orchestrator from CLI args
    pub fn new(cli: Cli) -> Result<Self> {
        let mut config = if let Some(config_path) = &cli.config {
            load_config_file(config_path)?
        } else {
            match load_config() {
                Ok(cfg) => cfg,
                Err(e) => {
                    warn!("Failed to load config: {:#}. Using defaults.", e);
                    Config::default()
                }
            }
        };

        apply_overrides(&mut config, &cli);
        config.validate()?;

        Ok(Self { cli, config })
    }

    /// Run the orchestrator
    pub async fn run(self) -> Result<()> {
        if let Some(command) = &self.cli.command {
            if handle_command(command).await? {
                return Ok(());
            }
        }

        if self.config.api.credential().is_none() {
            warn!("No API key configured; replies will be a configuration notice");
        }

        let gateway = AiGateway::from_config(&self.config)
            .context("Failed to initialize the AI gateway")?;
        let session = Session::new(&self.config, Arc::new(gateway));
        info!(
            "Session ready (endpoint: {}, max history: {})",
            self.config.api.url, self.config.history.max_history
        );

        let question = match (&self.cli.command, &self.cli.prompt) {
            (Some(Commands::Assess(args)), _) => {
                let profile = args.to_profile();
                profile.validate()?;
                Some(profile.to_question())
            }
            (_, Some(prompt)) => Some(prompt.clone()),
            _ => None,
        };

        match question {
            Some(question) => {
                let runner = NonInteractiveRunner::new(session);
                let result = runner.execute(question).await;
                println!("{}", runner.format_result(&result, self.cli.output_format));

                if !result.is_success() {
                    std::process::exit(1);
                }
                Ok(())
            }
            None => run_repl(session).await,
        }
    }
}

/// Command-line values win over every config source
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(key) = &cli.api_key {
        config.api.key = Some(key.clone());
    }
    if let Some(url) = &cli.api_url {
        config.api.url = url.clone();
    }
    if let Some(max_history) = cli.max_history {
        config.history.max_history = max_history;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from([
            "immigo",
            "--api-key",
            "sk-cli",
            "--api-url",
            "http://localhost:9999/v1/chat/completions",
            "--max-history",
            "6",
        ])
        .unwrap();

        let mut config = Config::default();
        config.api.key = Some("sk-file".to_string());
        apply_overrides(&mut config, &cli);

        assert_eq!(config.api.key.as_deref(), Some("sk-cli"));
        assert_eq!(config.api.url, "http://localhost:9999/v1/chat/completions");
        assert_eq!(config.history.max_history, 6);
    }

    #[test]
    fn test_config_file_and_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("immigo.toml");
        std::fs::write(&path, "[history]\nmax_history = 0\n").unwrap();

        let cli = Cli::try_parse_from(["immigo", "--config", path.to_str().unwrap()]).unwrap();
        assert!(Orchestrator::new(cli).is_err());

        let cli = Cli::try_parse_from([
            "immigo",
            "--config",
            path.to_str().unwrap(),
            "--max-history",
            "4",
        ])
        .unwrap();
        let orchestrator = Orchestrator::new(cli).unwrap();
        assert_eq!(orchestrator.config.history.max_history, 4);
    }
}
