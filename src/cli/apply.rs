//! Create and update command arguments

use std::path::PathBuf;

use clap::Parser;

use super::common::OutputFormat;
use super::enums::ResourceKind;

/// Arguments for the 'create' command
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Kind of resource to create
    #[arg(value_enum)]
    pub kind: ResourceKind,

    /// Resource document (JSON or YAML)
    #[arg(short = 'f', long = "file")]
    pub file: PathBuf,

    /// Do not wait for a new deployment or endpoint to serve traffic
    #[arg(long, default_value_t = false)]
    pub no_wait: bool,

    /// Output format for the created resource
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Arguments for the 'update' command
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Kind of resource to update
    #[arg(value_enum)]
    pub kind: ResourceKind,

    /// ID of the resource to update
    pub id: String,

    /// Resource document with the new configuration (JSON or YAML)
    #[arg(short = 'f', long = "file")]
    pub file: PathBuf,

    /// Project ID (defaults to the document's project, then the login session)
    #[arg(short = 'p', long = "project")]
    pub project: Option<String>,

    /// Organization ID for projects (defaults to the login session)
    #[arg(long = "org")]
    pub org: Option<String>,

    /// Output format for the updated resource
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}
