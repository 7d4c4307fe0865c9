//! Get command resource definitions and arguments

use clap::{Parser, Subcommand};

use super::common::OutputFormat;

/// Resource types for the 'get' command
#[derive(Subcommand, Debug)]
pub enum GetResource {
    /// Get organizations of the logged-in user
    #[command(
        visible_alias = "orgs",
        visible_alias = "organization",
        visible_alias = "organizations"
    )]
    Org(OrgArgs),

    /// Get projects of an organization
    #[command(
        visible_alias = "prjs",
        visible_alias = "project",
        visible_alias = "projects"
    )]
    Prj(PrjArgs),

    /// Get custom deployment templates of a project
    #[command(
        visible_alias = "tpls",
        visible_alias = "template",
        visible_alias = "templates"
    )]
    Tpl(ProjectScopedArgs),

    /// Get deployments of a project
    #[command(
        visible_alias = "deploys",
        visible_alias = "deployment",
        visible_alias = "deployments"
    )]
    Deploy(ProjectScopedArgs),
}

/// Arguments for 'get org' subcommand
#[derive(Parser, Debug)]
pub struct OrgArgs {
    /// Organization ID (if specified, shows only that organization)
    pub id: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Arguments for 'get prj' subcommand
#[derive(Parser, Debug)]
pub struct PrjArgs {
    /// Project ID (if specified, shows only that project)
    pub id: Option<String>,

    /// Organization ID (defaults to the organization of the login session)
    #[arg(long = "org")]
    pub org: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Arguments for project-scoped listings ('get tpl', 'get deploy')
#[derive(Parser, Debug)]
pub struct ProjectScopedArgs {
    /// Resource ID (if specified, shows only that resource)
    pub id: Option<String>,

    /// Project ID (defaults to the project of the login session)
    #[arg(short = 'p', long = "project")]
    pub project: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}
