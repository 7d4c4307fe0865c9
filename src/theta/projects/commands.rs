//! Project command handlers

use log::debug;

use crate::cli::{Cli, PrjArgs};
use crate::output::output_projects;
use crate::theta::ThetaClient;
use crate::ui::{create_spinner, finish_spinner};

/// Run the 'get prj' command
pub async fn run_prj_command(
    client: &ThetaClient,
    args: &PrjArgs,
    cli: &Cli,
) -> Result<(), Box<dyn std::error::Error>> {
    let org_id = client.resolve_organization_id(args.org.as_deref())?;
    debug!("Listing projects of organization '{}'", org_id);

    let spinner = create_spinner(&format!("Fetching projects of {}...", org_id), cli.batch);
    let result = match &args.id {
        Some(id) => client.get_project(&org_id, id).await.map(|p| vec![p]),
        None => client.list_projects(&org_id).await,
    };
    finish_spinner(spinner);

    output_projects(&result?, args.output, cli.no_header);
    Ok(())
}
