//! Core traits for the package command handler pattern.
//!
//! Handlers depend only on these interfaces, so each one can be exercised
//! with mocks instead of a live device.

use bigip_pkg::manager::{InstallProgressCallback, InstallStatus, OperationResult, UninstallResult};
use bigip_pkg::metadata::{ComponentInfo, VersionSpec};

use crate::error::CliError;

// ============================================================================
// Output Trait - Abstracts console output
// ============================================================================

/// Trait for outputting messages to the user.
pub trait Output: Send + Sync {
    /// Print a line of text.
    fn println(&self, message: &str);

    /// Print an empty line.
    fn newline(&self) {
        self.println("");
    }

    /// Print a section header.
    fn header(&self, title: &str) {
        self.println(title);
        self.println(&"=".repeat(title.len()));
    }

    /// Print an indented line.
    fn indented(&self, message: &str) {
        self.println(&format!("  {}", message));
    }

    /// Print a warning message.
    fn warning(&self, message: &str) {
        self.println(&format!("Warning: {}", message));
    }

    /// Print a success message.
    fn success(&self, message: &str) {
        self.println(&format!("Success: {}", message));
    }

    /// Start showing install progress; the callback updates the display.
    fn create_progress_callback(&self) -> InstallProgressCallback;

    /// Stop showing install progress.
    fn progress_done(&self);
}

// ============================================================================
// Package Service Trait
// ============================================================================

/// Trait for package operations against the configured device.
pub trait PackageService: Send + Sync {
    /// Install a component version.
    fn install(
        &self,
        component: &str,
        version: &VersionSpec,
        on_progress: Option<InstallProgressCallback>,
    ) -> Result<OperationResult, CliError>;

    /// Uninstall a component version.
    fn uninstall(&self, component: &str, version: &VersionSpec)
        -> Result<UninstallResult, CliError>;

    /// Installed state of a component.
    fn status(&self, component: &str) -> Result<InstallStatus, CliError>;

    /// Components known to the metadata catalog.
    fn components(&self) -> Vec<ComponentInfo>;
}

// ============================================================================
// User Interaction Trait
// ============================================================================

/// Trait for user interaction (prompts, confirmation).
pub trait UserInteraction: Send + Sync {
    /// Prompt for yes/no confirmation.
    fn confirm(&self, message: &str) -> bool;
}

// ============================================================================
// Command Context - Bundles dependencies for handlers
// ============================================================================

/// Context providing dependencies to command handlers.
pub struct CommandContext<'a> {
    /// Output interface for user messages.
    pub output: &'a dyn Output,

    /// Package operations.
    pub packages: &'a dyn PackageService,

    /// User interaction for prompts.
    pub interaction: &'a dyn UserInteraction,
}

impl<'a> CommandContext<'a> {
    /// Create a new command context.
    pub fn new(
        output: &'a dyn Output,
        packages: &'a dyn PackageService,
        interaction: &'a dyn UserInteraction,
    ) -> Self {
        Self {
            output,
            packages,
            interaction,
        }
    }
}

// ============================================================================
// Command Handler Trait
// ============================================================================

/// Trait for command handlers.
///
/// Each package subcommand has a handler that implements this trait.
pub trait CommandHandler {
    /// The arguments type for this handler.
    type Args;

    /// Execute the command with the given arguments and context.
    fn execute(args: Self::Args, ctx: &CommandContext<'_>) -> Result<(), CliError>;
}
