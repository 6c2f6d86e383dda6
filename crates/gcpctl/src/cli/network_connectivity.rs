//! Network Connectivity Center command definitions

use clap::{Args, Subcommand};
use gcpctl_core::RegionFlags;

use crate::commands::async_utils::AsyncOperationArgs;

/// Network Connectivity Center commands
#[derive(Subcommand, Debug)]
pub enum NetworkConnectivityCommands {
    /// Spoke operations
    #[command(subcommand)]
    Spokes(SpokeCommands),
}

/// Spoke commands
#[derive(Subcommand, Debug)]
pub enum SpokeCommands {
    /// Deactivate a spoke
    #[command(after_help = "EXAMPLES:
    # Deactivate and wait for completion
    gcpctl network-connectivity spokes deactivate myspoke --region us-central1

    # Return the pending operation immediately
    gcpctl network-connectivity spokes deactivate myspoke --region us-central1 --async

    # Retry-safe request with an explicit id
    gcpctl network-connectivity spokes deactivate myspoke --region us-central1 --request-id 4f7c2a0e-1b2d-4e57-9c0b-3d7f1a6e9b21
")]
    Deactivate {
        /// Spoke name or full resource name
        name: String,

        #[command(flatten)]
        region: RegionArgs,

        /// Idempotency id; a retried request with the same id is ignored by the server
        #[arg(long)]
        request_id: Option<String>,

        #[command(flatten)]
        wait: AsyncOperationArgs,
    },
}

/// Spoke location flags
#[derive(Args, Debug, Clone, Default)]
#[group(multiple = false)]
pub struct RegionArgs {
    /// Region of the spoke (defaults to the profile's region)
    #[arg(long)]
    pub region: Option<String>,

    /// Address a global spoke
    #[arg(long, hide = true)]
    pub global: bool,
}

impl From<&RegionArgs> for RegionFlags {
    fn from(args: &RegionArgs) -> Self {
        RegionFlags {
            region: args.region.clone(),
            global: args.global,
        }
    }
}
