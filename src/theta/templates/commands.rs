//! Template command handlers

use crate::cli::{Cli, ProjectScopedArgs};
use crate::output::output_templates;
use crate::theta::lifecycle::{DataSource, TemplatesData};
use crate::theta::ThetaClient;
use crate::ui::{create_spinner, finish_spinner};

/// Run the 'get tpl' command
pub async fn run_tpl_command(
    client: &ThetaClient,
    args: &ProjectScopedArgs,
    cli: &Cli,
) -> Result<(), Box<dyn std::error::Error>> {
    let project_id = client.resolve_project_id(args.project.as_deref())?;

    let spinner = create_spinner(
        &format!("Fetching templates of {}...", project_id),
        cli.batch,
    );
    let result = match &args.id {
        Some(id) => client.get_template(&project_id, id).await.map(|t| vec![t]),
        None => TemplatesData.read(client, &project_id).await,
    };
    finish_spinner(spinner);

    output_templates(&result?, args.output, cli.no_header);
    Ok(())
}
