//! Argument types and CLI definitions for package commands.

use clap::Subcommand;

use bigip_pkg::metadata::VersionSpec;

/// Package subcommands.
#[derive(Debug, Subcommand)]
pub enum PackageCommands {
    /// Download a component RPM and install it on the device
    Install {
        /// Component name (e.g., "as3", "do", "ts")
        component: String,

        /// Version to install (default: latest)
        #[arg(long)]
        version: Option<String>,
    },

    /// Uninstall a component from the device
    Uninstall {
        /// Component name
        component: String,

        /// Version to uninstall (default: latest)
        #[arg(long)]
        version: Option<String>,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Show whether a component is installed and at which version
    Status {
        /// Component name
        component: String,

        /// Print the status as JSON
        #[arg(long)]
        json: bool,
    },

    /// List components in the metadata catalog
    List,
}

/// Parse an optional `--version` value; absent means latest.
pub fn version_spec(version: Option<String>) -> VersionSpec {
    match version.map(|v| v.parse::<VersionSpec>()) {
        Some(Ok(spec)) => spec,
        Some(Err(never)) => match never {},
        None => VersionSpec::Latest,
    }
}

// ============================================================================
// Handler argument types
// ============================================================================

/// Arguments for the install command.
#[derive(Debug, Clone)]
pub struct InstallArgs {
    pub component: String,
    pub version: VersionSpec,
}

/// Arguments for the uninstall command.
#[derive(Debug, Clone)]
pub struct UninstallArgs {
    pub component: String,
    pub version: VersionSpec,
    pub force: bool,
}

/// Arguments for the status command.
#[derive(Debug, Clone)]
pub struct StatusArgs {
    pub component: String,
    pub json: bool,
}

/// Arguments for the list command.
#[derive(Debug, Clone, Default)]
pub struct ListArgs;
