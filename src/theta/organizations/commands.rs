//! Organization command handlers

use log::debug;

use crate::cli::{Cli, OrgArgs};
use crate::output::output_organizations;
use crate::theta::ThetaClient;
use crate::ui::{create_spinner, finish_spinner};

/// Run the 'get org' command
pub async fn run_org_command(
    client: &ThetaClient,
    args: &OrgArgs,
    cli: &Cli,
) -> Result<(), Box<dyn std::error::Error>> {
    let spinner = create_spinner("Fetching organizations...", cli.batch);

    let result = match &args.id {
        Some(id) => client.get_organization(id).await.map(|org| vec![org]),
        None => client.list_organizations().await,
    };
    finish_spinner(spinner);
    let orgs = result?;

    debug!("Printing {} organizations as {}", orgs.len(), args.output);
    output_organizations(&orgs, args.output, cli.no_header);
    Ok(())
}
