//! CLI structure and command definitions
//!
//! Two API surfaces are exposed, each mirroring the resource hierarchy of its
//! service:
//! 1. `container node-pools ...` for Kubernetes Engine node pools
//! 2. `network-connectivity spokes ...` for Network Connectivity Center spokes

use clap::{Parser, Subcommand};
use gcpctl_core::ApiTrack;

pub mod container;
pub mod network_connectivity;

pub use container::*;
pub use network_connectivity::*;

/// Google Cloud CLI for node pool upgrade info and spoke lifecycle
#[derive(Parser, Debug)]
#[command(name = "gcpctl")]
#[command(
    version,
    about = "Google Cloud CLI for node pool upgrade info and spoke lifecycle"
)]
#[command(long_about = "
Google Cloud CLI for node pool upgrade info and spoke lifecycle

Resources are addressed by short name plus scope flags, or by their full
relative name:
    gcpctl container node-pools get-upgrade-info pool-1 --cluster prod --zone us-central1-a
    gcpctl network-connectivity spokes deactivate projects/p/locations/us-central1/spokes/s1

EXAMPLES:
    # Deactivate a spoke and wait for the operation to finish
    gcpctl network-connectivity spokes deactivate myspoke --region us-central1

    # Return as soon as the request is accepted
    gcpctl network-connectivity spokes deactivate myspoke --region us-central1 --async

    # Only show the suggested minor version
    gcpctl container node-pools get-upgrade-info pool-1 --cluster prod --location us-central1 -q minorTargetVersion

For more help on a specific command, run:
    gcpctl <command> --help
")]
pub struct Cli {
    /// Profile to use for this command
    #[arg(long, short, global = true, env = "GCPCTL_PROFILE")]
    pub profile: Option<String>,

    /// Path to alternate configuration file
    #[arg(long, global = true, env = "GCPCTL_CONFIG_FILE")]
    pub config_file: Option<String>,

    /// Project to operate on, overriding the profile
    #[arg(long, global = true, env = "GCPCTL_PROJECT")]
    pub project: Option<String>,

    /// Release track selecting API versions, overriding the profile
    #[arg(long, global = true, value_enum)]
    pub api_track: Option<ApiTrack>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "auto")]
    pub output: OutputFormat,

    /// JMESPath query to filter output
    #[arg(long, short = 'q', global = true)]
    pub query: Option<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Automatically choose format based on command and context
    Auto,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Human-readable table format
    Table,
}

impl OutputFormat {
    /// Concrete renderer for this choice; results default to JSON
    pub fn resolve(self) -> crate::output::OutputFormat {
        match self {
            OutputFormat::Auto | OutputFormat::Json => crate::output::OutputFormat::Json,
            OutputFormat::Yaml => crate::output::OutputFormat::Yaml,
            OutputFormat::Table => crate::output::OutputFormat::Table,
        }
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Kubernetes Engine commands
    #[command(subcommand)]
    Container(ContainerCommands),

    /// Network Connectivity Center commands
    #[command(subcommand, name = "network-connectivity")]
    NetworkConnectivity(NetworkConnectivityCommands),

    /// Show version information
    #[command(visible_alias = "ver")]
    Version,

    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    # Bash
    gcpctl completions bash > ~/.local/share/bash-completion/completions/gcpctl

    # Zsh
    gcpctl completions zsh > ~/.zfunc/_gcpctl
")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bourne Again Shell
    Bash,
    /// Z Shell
    Zsh,
    /// Friendly Interactive Shell
    Fish,
    /// PowerShell
    #[value(name = "powershell", alias = "power-shell")]
    PowerShell,
    /// Elvish
    Elvish,
}
