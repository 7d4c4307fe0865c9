//! Deployment command handlers

use crate::cli::{Cli, ProjectScopedArgs};
use crate::output::output_deployments;
use crate::theta::ThetaClient;
use crate::ui::{create_spinner, finish_spinner};

/// Run the 'get deploy' command
pub async fn run_deploy_command(
    client: &ThetaClient,
    args: &ProjectScopedArgs,
    cli: &Cli,
) -> Result<(), Box<dyn std::error::Error>> {
    let project_id = client.resolve_project_id(args.project.as_deref())?;

    let spinner = create_spinner(
        &format!("Fetching deployments of {}...", project_id),
        cli.batch,
    );
    let result = match &args.id {
        Some(id) => client.get_deployment(&project_id, id).await.map(|d| vec![d]),
        None => client.list_deployments(&project_id).await,
    };
    finish_spinner(spinner);

    output_deployments(&result?, args.output, cli.no_header);
    Ok(())
}
