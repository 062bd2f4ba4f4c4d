//! Command handlers for package commands.
//!
//! Each handler implements the `CommandHandler` trait and contains the
//! business logic for its respective command.

use super::args::{InstallArgs, ListArgs, StatusArgs, UninstallArgs};
use super::traits::{CommandContext, CommandHandler};
use crate::error::CliError;

// ============================================================================
// Install Handler
// ============================================================================

/// Handler for the `install` command.
pub struct InstallHandler;

impl CommandHandler for InstallHandler {
    type Args = InstallArgs;

    fn execute(args: Self::Args, ctx: &CommandContext<'_>) -> Result<(), CliError> {
        ctx.output.println(&format!(
            "Installing {} ({})...",
            args.component, args.version
        ));

        let progress = ctx.output.create_progress_callback();
        let result = ctx
            .packages
            .install(&args.component, &args.version, Some(progress));
        ctx.output.progress_done();

        let result = result?;
        ctx.output.success(&format!(
            "Installed {} {}",
            result.component, result.version
        ));

        Ok(())
    }
}

// ============================================================================
// Uninstall Handler
// ============================================================================

/// Handler for the `uninstall` command.
pub struct UninstallHandler;

impl CommandHandler for UninstallHandler {
    type Args = UninstallArgs;

    fn execute(args: Self::Args, ctx: &CommandContext<'_>) -> Result<(), CliError> {
        // Confirm unless --force
        if !args.force
            && !ctx.interaction.confirm(&format!(
                "Uninstall {} ({}) from the device?",
                args.component, args.version
            ))
        {
            ctx.output.println("Cancelled.");
            return Ok(());
        }

        let result = ctx.packages.uninstall(&args.component, &args.version)?;
        ctx.output.success(&format!(
            "Uninstalled {} {}",
            result.component, result.version
        ));

        if !result.warnings.is_empty() {
            ctx.output.newline();
            for warning in &result.warnings {
                ctx.output.warning(&format!(
                    "{} depends on {} {} and may stop working",
                    warning.dependent, result.component, result.version
                ));
                ctx.output
                    .indented(&format!("See: {}", warning.documentation));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Status Handler
// ============================================================================

/// Handler for the `status` command.
pub struct StatusHandler;

impl CommandHandler for StatusHandler {
    type Args = StatusArgs;

    fn execute(args: Self::Args, ctx: &CommandContext<'_>) -> Result<(), CliError> {
        let status = ctx.packages.status(&args.component)?;

        if args.json {
            let json = serde_json::to_string_pretty(&status)
                .map_err(|e| CliError::Output(e.to_string()))?;
            ctx.output.println(&json);
            return Ok(());
        }

        match &status.installed_version {
            Some(installed) if status.is_outdated() => {
                ctx.output.println(&format!(
                    "{}: installed {} (latest {} available)",
                    status.component, installed, status.latest_version
                ));
            }
            Some(installed) => {
                ctx.output.println(&format!(
                    "{}: installed {} (up to date)",
                    status.component, installed
                ));
            }
            None => {
                ctx.output.println(&format!(
                    "{}: not installed (latest {})",
                    status.component, status.latest_version
                ));
            }
        }

        Ok(())
    }
}

// ============================================================================
// List Handler
// ============================================================================

/// Handler for the `list` command.
pub struct ListHandler;

impl CommandHandler for ListHandler {
    type Args = ListArgs;

    fn execute(_args: Self::Args, ctx: &CommandContext<'_>) -> Result<(), CliError> {
        let components = ctx.packages.components();

        if components.is_empty() {
            ctx.output.println("No components in the metadata catalog.");
            return Ok(());
        }

        ctx.output
            .header(&format!("Available Components ({})", components.len()));
        ctx.output.newline();

        for component in &components {
            let latest = component.latest.as_deref().unwrap_or("?");
            ctx.output.println(&format!(
                "  {:<6} {:<28} latest {}",
                component.name, component.package_name, latest
            ));
            ctx.output
                .indented(&format!("  versions: {}", component.versions.join(", ")));
        }

        Ok(())
    }
}
