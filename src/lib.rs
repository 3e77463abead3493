//! Host for the GERD coach client core: configuration, logging, wiring and
//! the command-line front end.

pub mod bootstrap;
pub mod commands;

use std::path::PathBuf;

use clap::Parser;
use gc_core::config::AppConfig;

use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "gerd-coach", version, about = "Headless client for the GERD coaching app")]
pub struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Load config, initialise logging, wire dependencies and run one command.
pub async fn run(cli: Cli) -> anyhow::Result<String> {
    let config_path = cli.config.unwrap_or_else(bootstrap::default_config_path);
    let config = bootstrap::load_config_or_empty(&config_path)?;

    let log_dir = bootstrap::wiring::resolve_log_dir(&config);
    bootstrap::init_tracing_subscriber(log_dir.as_deref())?;
    tracing::debug!(path = %config_path.display(), "configuration loaded");

    execute(&config, cli.command).await
}

/// Wire dependencies for `config` and run `command`.
pub async fn execute(config: &AppConfig, command: Command) -> anyhow::Result<String> {
    let deps = bootstrap::wire_dependencies(config)?;
    commands::run(command, deps).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_login() {
        let cli = Cli::try_parse_from([
            "gerd-coach",
            "--config",
            "/tmp/gc.toml",
            "login",
            "--username",
            "ana",
            "--password",
            "secret",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/gc.toml")));
        assert!(matches!(
            cli.command,
            Command::Login { ref username, .. } if username == "ana"
        ));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["gerd-coach"]).is_err());
    }
}
