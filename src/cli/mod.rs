//! CLI argument parsing

mod apply;
mod common;
mod delete;
mod enums;
mod get;

use clap::{Parser, Subcommand};

use crate::config::{api, defaults};
use crate::theta::CredentialArgs;

pub use apply::{CreateArgs, UpdateArgs};
pub use common::OutputFormat;
pub use delete::DeleteArgs;
pub use enums::ResourceKind;
pub use get::{GetResource, OrgArgs, PrjArgs, ProjectScopedArgs};

/// Theta EdgeCloud provider client
#[derive(Parser, Debug)]
#[command(name = "theta-provider")]
#[command(version)]
#[command(
    about = "Manage Theta EdgeCloud deployments, templates and projects",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Account API base URL
    #[arg(long, global = true, env = "THETA_API_URL", default_value = api::API_URL)]
    pub api_url: String,

    /// Controller base URL (deployments and templates)
    #[arg(long, global = true, env = "THETA_CONTROLLER_URL", default_value = api::CONTROLLER_URL)]
    pub controller_url: String,

    /// Account email (overrides env vars and credentials file)
    #[arg(long, global = true)]
    pub email: Option<String>,

    /// Account password
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// API key (used when no email/password is given)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// API secret
    #[arg(long, global = true)]
    pub api_secret: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Batch mode: no spinners, no prompts
    #[arg(short = 'b', long, global = true, default_value_t = false)]
    pub batch: bool,

    /// Omit table headers and totals
    #[arg(long, global = true, default_value_t = false)]
    pub no_header: bool,
}

impl Cli {
    /// Credential flags as given on the command line
    pub fn credential_args(&self) -> CredentialArgs {
        CredentialArgs {
            email: self.email.clone(),
            password: self.password.clone(),
            api_key: self.api_key.clone(),
            api_secret: self.api_secret.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and show the session's account, project and organization
    Login,

    /// Get resources
    Get {
        #[command(subcommand)]
        resource: GetResource,
    },

    /// Create a resource from a JSON or YAML document
    Create(CreateArgs),

    /// Update a resource from a JSON or YAML document
    Update(UpdateArgs),

    /// Delete a resource
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),
}
