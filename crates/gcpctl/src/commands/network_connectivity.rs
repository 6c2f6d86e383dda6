//! Network Connectivity Center command handlers

use gcpctl_core::connectivity::{DeactivateSpokeRequest, deactivate_spoke};
use tracing::debug;

use crate::cli::{Cli, NetworkConnectivityCommands, SpokeCommands};
use crate::commands::async_utils::operation_progress;
use crate::commands::print_invocation;
use crate::connection::ConnectionManager;
use crate::error::Result as CliResult;

pub async fn handle_network_connectivity_command(
    cli: &Cli,
    conn_mgr: &ConnectionManager,
    command: &NetworkConnectivityCommands,
) -> CliResult<()> {
    match command {
        NetworkConnectivityCommands::Spokes(spoke_cmd) => {
            handle_spoke_command(cli, conn_mgr, spoke_cmd).await
        }
    }
}

async fn handle_spoke_command(
    cli: &Cli,
    conn_mgr: &ConnectionManager,
    command: &SpokeCommands,
) -> CliResult<()> {
    match command {
        SpokeCommands::Deactivate {
            name,
            region,
            request_id,
            wait,
        } => {
            let session =
                conn_mgr.session(cli.profile.as_deref(), cli.project.clone(), cli.api_track)?;
            let client = session.connectivity_client();

            let request = DeactivateSpokeRequest {
                name: name.clone(),
                region: region.into(),
                request_id: request_id.clone(),
            };
            let options = wait.completion_options(&session.poll);
            debug!(
                "Deactivate request: {:?} (async: {})",
                request, options.run_async
            );

            let result = deactivate_spoke(
                &client,
                &session.resolver,
                &request,
                &options,
                Some(operation_progress()),
            )
            .await?;
            print_invocation(&result, cli.output, cli.query.as_deref())
        }
    }
}
