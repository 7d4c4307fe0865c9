//! Login and write command handlers
//!
//! These drive the [`ManagedResource`] lifecycle the same way a host
//! framework would: one create, update or delete per invocation.

use std::path::Path;

use log::{debug, info};
use serde::de::DeserializeOwned;

use crate::cli::{Cli, CreateArgs, DeleteArgs, OutputFormat, ResourceKind, UpdateArgs};
use crate::error::{Result, ThetaError};
use crate::output::{
    describe_deployment, output_deployments, output_projects, output_templates, print_json,
};
use crate::theta::lifecycle::{
    refresh, DeploymentResource, EndpointResource, ManagedResource, ProjectResource, ReadOutcome,
    TemplateResource, UpdateStrategy,
};
use crate::theta::{Deployment, Endpoint, Project, Template, ThetaClient};
use crate::ui::{confirm_delete, create_spinner, finish_spinner, finish_spinner_with_message};

type CommandResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// Read a resource document; `.json` files are parsed as JSON, anything else as YAML
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ThetaError::Config(format!("cannot read {}: {}", path.display(), e)))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&text)
            .map_err(|e| ThetaError::Config(format!("invalid JSON in {}: {}", path.display(), e)))
    } else {
        serde_yml::from_str(&text)
            .map_err(|e| ThetaError::Config(format!("invalid YAML in {}: {}", path.display(), e)))
    }
}

/// Run the 'login' command; prints identifiers, never the token
pub async fn run_login_command(client: &ThetaClient, cli: &Cli) -> CommandResult {
    let session = client
        .session()
        .ok_or_else(|| ThetaError::Auth("no session after login".to_string()))?;

    let account = session.account_id();
    let project = session.default_project_id().unwrap_or("-");
    let org = session.organization_id().unwrap_or("-");

    if cli.batch {
        print_json(&serde_json::json!({
            "account_id": account,
            "default_project_id": session.default_project_id(),
            "organization_id": session.organization_id(),
        }));
    } else {
        println!("Logged in as {}", account);
        println!("  Default project: {}", project);
        println!("  Organization:    {}", org);
    }
    Ok(())
}

/// Create through a resource's lifecycle, showing a spinner while it runs
async fn create_with<R: ManagedResource>(
    resource: &R,
    client: &ThetaClient,
    plan: &R::Model,
    message: &str,
    batch: bool,
) -> Result<R::Model> {
    let spinner = create_spinner(message, batch);
    let result = resource.create(client, plan).await;
    match &result {
        Ok(_) => finish_spinner_with_message(spinner, "Created"),
        Err(_) => finish_spinner(spinner),
    }
    result
}

/// Refresh the prior state, then apply the plan with the kind's strategy
pub async fn update_with<R: ManagedResource>(
    resource: &R,
    client: &ThetaClient,
    id: &str,
    prior: &R::Model,
    plan: &R::Model,
) -> Result<R::Model> {
    let current = match refresh(resource, client, prior).await? {
        ReadOutcome::Present(model) => model,
        ReadOutcome::Gone => return Err(ThetaError::not_found(R::TYPE_NAME, id)),
    };

    if R::UPDATE_STRATEGY == UpdateStrategy::Replace {
        info!(
            "{} cannot be changed in place; '{}' will be deleted and recreated",
            R::TYPE_NAME,
            id
        );
    }
    resource.update(client, &current, plan).await
}

fn wait_message(client: &ThetaClient, kind: &str, name: &str) -> String {
    let budget = client.config().readiness.budget();
    format!(
        "Creating {} '{}' and waiting for it to serve (up to {}s)...",
        kind,
        name,
        budget.as_secs()
    )
}

/// Run the 'create' command
pub async fn run_create_command(
    client: &ThetaClient,
    args: &CreateArgs,
    cli: &Cli,
) -> CommandResult {
    debug!("Creating {} from {}", args.kind, args.file.display());

    match args.kind {
        ResourceKind::Deploy => {
            let plan: Deployment = load_document(&args.file)?;
            let created = if args.no_wait {
                let plan = Deployment {
                    project_id: client.resolve_project_id(Some(&plan.project_id))?,
                    ..plan
                };
                client.submit_deployment(&plan).await?
            } else {
                let message = wait_message(client, "deployment", &plan.name);
                create_with(&DeploymentResource, client, &plan, &message, cli.batch).await?
            };
            print_deployment(&created, args.output, cli);
        }
        ResourceKind::Endpoint => {
            let plan: Endpoint = load_document(&args.file)?;
            let created = if args.no_wait {
                let mut plan = Deployment::from(&plan);
                plan.project_id = client.resolve_project_id(Some(&plan.project_id))?;
                Endpoint::from(client.submit_deployment(&plan).await?)
            } else {
                let message = wait_message(client, "endpoint", &plan.name);
                create_with(&EndpointResource, client, &plan, &message, cli.batch).await?
            };
            print_deployment(&Deployment::from(&created), args.output, cli);
        }
        ResourceKind::Tpl => {
            let plan: Template = load_document(&args.file)?;
            let message = format!("Creating template '{}'...", plan.name);
            let created = create_with(&TemplateResource, client, &plan, &message, cli.batch).await?;
            output_templates(&[created], args.output, cli.no_header);
        }
        ResourceKind::Prj => {
            let plan: Project = load_document(&args.file)?;
            let message = format!("Creating project '{}'...", plan.name);
            let created = create_with(&ProjectResource, client, &plan, &message, cli.batch).await?;
            output_projects(&[created], args.output, cli.no_header);
        }
    }
    Ok(())
}

fn print_deployment(dep: &Deployment, format: OutputFormat, cli: &Cli) {
    match format {
        OutputFormat::Table if !cli.batch => println!("{}", describe_deployment(dep)),
        _ => output_deployments(std::slice::from_ref(dep), format, cli.no_header),
    }
}

/// Run the 'update' command
pub async fn run_update_command(
    client: &ThetaClient,
    args: &UpdateArgs,
    cli: &Cli,
) -> CommandResult {
    let id = args.id.as_str();
    debug!("Updating {} '{}' from {}", args.kind, id, args.file.display());

    match args.kind {
        ResourceKind::Deploy => {
            let plan: Deployment = load_document(&args.file)?;
            let project_id = project_for(client, args.project.as_deref(), &plan.project_id)?;
            let prior = Deployment {
                id: id.to_string(),
                suffix: id.to_string(),
                project_id: project_id.clone(),
                ..Default::default()
            };
            let plan = Deployment { project_id, ..plan };
            let message = wait_message(client, "deployment", &plan.name);
            let spinner = create_spinner(&message, cli.batch);
            let result = update_with(&DeploymentResource, client, id, &prior, &plan).await;
            finish_spinner(spinner);
            print_deployment(&result?, args.output, cli);
        }
        ResourceKind::Endpoint => {
            let plan: Endpoint = load_document(&args.file)?;
            let project_id = project_for(client, args.project.as_deref(), &plan.project_id)?;
            let prior = Endpoint {
                id: id.to_string(),
                suffix: id.to_string(),
                project_id: project_id.clone(),
                ..Default::default()
            };
            let plan = Endpoint { project_id, ..plan };
            let updated = update_with(&EndpointResource, client, id, &prior, &plan).await?;
            print_deployment(&Deployment::from(&updated), args.output, cli);
        }
        ResourceKind::Tpl => {
            let plan: Template = load_document(&args.file)?;
            let project_id = project_for(client, args.project.as_deref(), &plan.project_id)?;
            let prior = Template {
                id: id.to_string(),
                project_id: project_id.clone(),
                ..Default::default()
            };
            let plan = Template { project_id, ..plan };
            let updated = update_with(&TemplateResource, client, id, &prior, &plan).await?;
            output_templates(&[updated], args.output, cli.no_header);
        }
        ResourceKind::Prj => {
            let plan: Project = load_document(&args.file)?;
            let org_id = client.resolve_organization_id(
                args.org.as_deref().or(Some(plan.org_id.as_str())),
            )?;
            let prior = Project {
                id: id.to_string(),
                org_id: org_id.clone(),
                ..Default::default()
            };
            let plan = Project { org_id, ..plan };
            let updated = update_with(&ProjectResource, client, id, &prior, &plan).await?;
            output_projects(&[updated], args.output, cli.no_header);
        }
    }
    Ok(())
}

/// `--project` flag, else the document's project, else the session default
fn project_for(client: &ThetaClient, flag: Option<&str>, document: &str) -> Result<String> {
    match flag.filter(|p| !p.is_empty()) {
        Some(project) => Ok(project.to_string()),
        None => client.resolve_project_id(Some(document)),
    }
}

/// Delete one resource through its lifecycle; a missing resource counts as deleted
pub async fn delete_resource(
    client: &ThetaClient,
    kind: ResourceKind,
    id: &str,
    project: Option<&str>,
) -> Result<()> {
    let project_id = if kind.needs_project() {
        client.resolve_project_id(project)?
    } else {
        String::new()
    };

    match kind {
        ResourceKind::Deploy => {
            let prior = Deployment {
                id: id.to_string(),
                suffix: id.to_string(),
                project_id,
                ..Default::default()
            };
            DeploymentResource.delete(client, &prior).await
        }
        ResourceKind::Endpoint => {
            let prior = Endpoint {
                id: id.to_string(),
                suffix: id.to_string(),
                project_id,
                ..Default::default()
            };
            EndpointResource.delete(client, &prior).await
        }
        ResourceKind::Tpl => {
            let prior = Template {
                id: id.to_string(),
                project_id,
                ..Default::default()
            };
            TemplateResource.delete(client, &prior).await
        }
        ResourceKind::Prj => {
            let prior = Project {
                id: id.to_string(),
                ..Default::default()
            };
            ProjectResource.delete(client, &prior).await
        }
    }
}

/// Run the 'delete' command
pub async fn run_delete_command(
    client: &ThetaClient,
    args: &DeleteArgs,
    cli: &Cli,
) -> CommandResult {
    let kind = args.kind.to_string();
    if !confirm_delete(&kind, &args.id, args.yes, cli.batch) {
        println!("Aborted.");
        return Ok(());
    }

    let spinner = create_spinner(&format!("Deleting {} '{}'...", kind, args.id), cli.batch);
    let result = delete_resource(client, args.kind, &args.id, args.project.as_deref()).await;
    finish_spinner(spinner);
    result?;

    println!("Deleted {} '{}'", kind, args.id);
    Ok(())
}
