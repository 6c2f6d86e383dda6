//! Kubernetes Engine command definitions

use clap::{Args, Subcommand};
use gcpctl_core::LocationFlags;

/// Kubernetes Engine commands
#[derive(Subcommand, Debug)]
pub enum ContainerCommands {
    /// Node pool operations
    #[command(subcommand, name = "node-pools", visible_alias = "np")]
    NodePools(NodePoolCommands),
}

/// Node pool commands
#[derive(Subcommand, Debug)]
pub enum NodePoolCommands {
    /// Get upgrade information for a node pool
    #[command(after_help = "EXAMPLES:
    # Upgrade info for a zonal cluster's node pool
    gcpctl container node-pools get-upgrade-info node-pool-1 --cluster sample-cluster --zone us-central1-a

    # Evaluate against a specific target version
    gcpctl container node-pools get-upgrade-info node-pool-1 --cluster sample-cluster --location us-central1 --version 1.31.1-gke.1146000

    # Full resource name, no scope flags needed
    gcpctl container node-pools get-upgrade-info projects/p/locations/us-central1/clusters/c/nodePools/node-pool-1
")]
    GetUpgradeInfo {
        /// Node pool name or full resource name
        name: String,

        /// Cluster containing the node pool (defaults to the profile's cluster)
        #[arg(long)]
        cluster: Option<String>,

        #[command(flatten)]
        location: LocationArgs,

        /// Target version to evaluate the upgrade against
        #[arg(long)]
        version: Option<String>,
    },
}

/// Mutually exclusive cluster location flags
#[derive(Args, Debug, Clone, Default)]
#[group(multiple = false)]
pub struct LocationArgs {
    /// Compute zone or region of the cluster
    #[arg(long)]
    pub location: Option<String>,

    /// Compute zone of the cluster
    #[arg(long)]
    pub zone: Option<String>,

    /// Compute region of the cluster
    #[arg(long)]
    pub region: Option<String>,
}

impl From<&LocationArgs> for LocationFlags {
    fn from(args: &LocationArgs) -> Self {
        LocationFlags {
            location: args.location.clone(),
            zone: args.zone.clone(),
            region: args.region.clone(),
        }
    }
}
