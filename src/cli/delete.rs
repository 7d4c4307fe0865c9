//! Delete command arguments

use clap::Parser;

use super::enums::ResourceKind;

/// Arguments for the 'delete' command
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Kind of resource to delete
    #[arg(value_enum)]
    pub kind: ResourceKind,

    /// ID of the resource to delete
    pub id: String,

    /// Project ID (defaults to the project of the login session)
    #[arg(short = 'p', long = "project")]
    pub project: Option<String>,

    /// Skip confirmation prompt
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}
