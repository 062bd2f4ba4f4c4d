//! Configuration CLI commands.
//!
//! Provides `config show` and `config path` for inspecting the effective
//! settings after flags and environment variables have been applied.

use std::path::Path;

use clap::Subcommand;
use bigip_pkg::config::{format_size, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, config: &ConfigFile, path: &Path) -> Result<(), CliError> {
    match command {
        ConfigCommands::Show => {
            for line in render(config, path) {
                println!("{}", line);
            }
            Ok(())
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn or_unset(value: Option<&str>) -> &str {
    value.unwrap_or("(not set)")
}

fn masked(secret: Option<&String>) -> &'static str {
    match secret {
        Some(_) => "********",
        None => "(not set)",
    }
}

/// Effective settings, one line per value. Secrets are masked.
fn render(config: &ConfigFile, path: &Path) -> Vec<String> {
    let device = &config.device;
    let packages = &config.packages;
    let tasks = &config.tasks;
    let logging = &config.logging;

    let metadata = packages
        .metadata_file
        .as_ref()
        .map(|p| p.display().to_string());

    vec![
        format!("# {}", path.display()),
        String::new(),
        "[device]".to_string(),
        format!("  host = {}", or_unset(device.host.as_deref())),
        format!("  username = {}", device.username),
        format!("  password = {}", masked(device.password.as_ref())),
        format!("  token = {}", masked(device.token.as_ref())),
        format!("  verify_tls = {}", device.verify_tls),
        format!("  timeout_secs = {}", device.timeout_secs),
        String::new(),
        "[packages]".to_string(),
        format!(
            "  metadata_file = {}",
            metadata.as_deref().unwrap_or("(bundled)")
        ),
        format!("  temp_dir = {}", packages.temp_dir.display()),
        format!("  chunk_size = {}", format_size(packages.chunk_size)),
        format!("  keep_downloads = {}", packages.keep_downloads),
        format!("  remote_download_dir = {}", packages.remote_download_dir),
        String::new(),
        "[tasks]".to_string(),
        format!("  poll_interval_secs = {}", tasks.poll_interval_secs),
        format!("  max_polls = {}", tasks.max_polls),
        String::new(),
        "[logging]".to_string(),
        format!("  directory = {}", logging.directory.display()),
        format!("  file = {}", logging.file),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_masks_secrets() {
        let mut config = ConfigFile::default();
        config.device.host = Some("10.0.0.1".to_string());
        config.device.password = Some("hunter2".to_string());

        let lines = render(&config, Path::new("/tmp/config.ini"));
        let text = lines.join("\n");

        assert!(text.contains("host = 10.0.0.1"));
        assert!(text.contains("password = ********"));
        assert!(text.contains("token = (not set)"));
        assert!(!text.contains("hunter2"));
    }

    #[test]
    fn test_render_defaults() {
        let lines = render(&ConfigFile::default(), Path::new("config.ini"));

        assert!(lines.contains(&"  host = (not set)".to_string()));
        assert!(lines.contains(&"  metadata_file = (bundled)".to_string()));
        assert!(lines.contains(&"[logging]".to_string()));
    }
}
