//! Package commands: install, uninstall, status and list.
//!
//! This module implements the Command Pattern with trait-based dependency
//! injection:
//!
//! - `traits`: Core interfaces (`Output`, `PackageService`, `CommandHandler`)
//! - `services`: Concrete implementations of the traits
//! - `args`: CLI argument types and parsing (clap-derived)
//! - `handlers`: Command handlers implementing business logic

mod args;
mod handlers;
mod services;
mod traits;


pub use args::PackageCommands;

use args::{version_spec, InstallArgs, ListArgs, StatusArgs, UninstallArgs};
use bigip_pkg::config::ConfigFile;
use handlers::{InstallHandler, ListHandler, StatusHandler, UninstallHandler};
use services::{ConsoleInteraction, ConsoleOutput, DefaultPackageService};
use traits::{CommandContext, CommandHandler};

use crate::error::CliError;

/// Run a package subcommand.
///
/// Creates the production context and dispatches to the appropriate handler.
/// Only `list` works without a device connection.
pub fn run(command: PackageCommands, config: &ConfigFile) -> Result<(), CliError> {
    let packages = match command {
        PackageCommands::List => DefaultPackageService::catalog_only(config)?,
        _ => DefaultPackageService::connect(config)?,
    };
    let output = ConsoleOutput::new();
    let interaction = ConsoleInteraction::new();
    let ctx = CommandContext::new(&output, &packages, &interaction);

    match command {
        PackageCommands::Install { component, version } => InstallHandler::execute(
            InstallArgs {
                component,
                version: version_spec(version),
            },
            &ctx,
        ),
        PackageCommands::Uninstall {
            component,
            version,
            force,
        } => UninstallHandler::execute(
            UninstallArgs {
                component,
                version: version_spec(version),
                force,
            },
            &ctx,
        ),
        PackageCommands::Status { component, json } => {
            StatusHandler::execute(StatusArgs { component, json }, &ctx)
        }
        PackageCommands::List => ListHandler::execute(ListArgs, &ctx),
    }
}
