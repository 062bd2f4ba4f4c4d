//! bigip-pkg - Manage extension packages on BIG-IP devices.
//!
//! Downloads component RPMs from the metadata catalog, uploads them to the
//! device in chunks, and drives the device's package-management tasks.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use bigip_pkg::config::{config_file_path, ConfigFile};
use bigip_pkg::logging::init_logging;

use commands::config::ConfigCommands;
use commands::packages::PackageCommands;
use error::CliError;

#[derive(Parser)]
#[command(name = "bigip-pkg")]
#[command(version = bigip_pkg::VERSION)]
#[command(about = "Install, remove and query extension packages on BIG-IP devices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Device management address (overrides config.ini)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Device user (overrides config.ini)
    #[arg(long, global = true)]
    user: Option<String>,

    /// Device password
    #[arg(long, global = true, env = "BIGIP_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Pre-issued auth token; takes precedence over the password
    #[arg(long, global = true, env = "BIGIP_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Configuration file (default: ~/.bigip-pkg/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Metadata catalog to use instead of the bundled one
    #[arg(long, global = true)]
    metadata: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Packages(PackageCommands),

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Cli {
    /// Apply command-line overrides on top of the loaded file.
    fn apply_overrides(&self, config: &mut ConfigFile) {
        if let Some(host) = &self.host {
            config.device.host = Some(host.clone());
        }
        if let Some(user) = &self.user {
            config.device.username = user.clone();
        }
        if let Some(password) = &self.password {
            config.device.password = Some(password.clone());
        }
        if let Some(token) = &self.token {
            config.device.token = Some(token.clone());
        }
        if let Some(metadata) = &self.metadata {
            config.packages.metadata_file = Some(metadata.clone());
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.clone().unwrap_or_else(config_file_path);
    let mut config = ConfigFile::load_from(&config_path)?;
    cli.apply_overrides(&mut config);

    let _logging_guard = init_logging(
        &config.logging.directory,
        &config.logging.file,
        cli.verbose,
    )
    .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    info!("bigip-pkg v{}", bigip_pkg::VERSION);

    match cli.command {
        Commands::Packages(command) => commands::packages::run(command, &config),
        Commands::Config { command } => commands::config::run(command, &config, &config_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let cli = Cli::parse_from([
            "bigip-pkg",
            "--host",
            "10.1.1.4",
            "--user",
            "operator",
            "--token",
            "abc",
            "status",
            "as3",
        ]);
        let mut config = ConfigFile::default();
        config.device.host = Some("old".to_string());

        cli.apply_overrides(&mut config);

        assert_eq!(config.device.host.as_deref(), Some("10.1.1.4"));
        assert_eq!(config.device.username, "operator");
        assert_eq!(config.device.token.as_deref(), Some("abc"));
        assert!(matches!(
            cli.command,
            Commands::Packages(PackageCommands::Status { .. })
        ));
    }

    #[test]
    fn test_config_subcommand_parses() {
        let cli = Cli::parse_from(["bigip-pkg", "config", "path"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Path
            }
        ));
    }
}
