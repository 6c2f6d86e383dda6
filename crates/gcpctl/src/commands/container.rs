//! Kubernetes Engine command handlers

use gcpctl_core::container::{UpgradeInfoRequest, get_node_pool_upgrade_info};
use tracing::debug;

use crate::cli::{Cli, ContainerCommands, NodePoolCommands};
use crate::commands::print_invocation;
use crate::connection::ConnectionManager;
use crate::error::Result as CliResult;

pub async fn handle_container_command(
    cli: &Cli,
    conn_mgr: &ConnectionManager,
    command: &ContainerCommands,
) -> CliResult<()> {
    match command {
        ContainerCommands::NodePools(node_pool_cmd) => {
            handle_node_pool_command(cli, conn_mgr, node_pool_cmd).await
        }
    }
}

async fn handle_node_pool_command(
    cli: &Cli,
    conn_mgr: &ConnectionManager,
    command: &NodePoolCommands,
) -> CliResult<()> {
    match command {
        NodePoolCommands::GetUpgradeInfo {
            name,
            cluster,
            location,
            version,
        } => {
            let session =
                conn_mgr.session(cli.profile.as_deref(), cli.project.clone(), cli.api_track)?;
            let client = session.container_client();

            let request = UpgradeInfoRequest {
                name: name.clone(),
                cluster: cluster.clone(),
                location: location.into(),
                version: version.clone(),
            };
            debug!("Upgrade info request: {:?}", request);

            let result = get_node_pool_upgrade_info(&client, &session.resolver, &request).await?;
            print_invocation(&result, cli.output, cli.query.as_deref())
        }
    }
}
