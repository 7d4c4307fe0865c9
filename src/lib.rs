//! Theta Provider - authenticated API client for Theta EdgeCloud
//!
//! The client and CRUD lifecycle a Terraform provider binds to, plus a
//! small CLI harness that drives the same lifecycle from a terminal.
//!
//! # Features
//!
//! - Email/password or API key login, one session per client
//! - Deployments, endpoints, deployment templates, projects and organizations
//! - Tolerant decoding of enveloped, compressed and inconsistently-cased replies
//! - Best-effort readiness polling after a deployment is created
//!
//! # Example
//!
//! ```bash
//! # Show the account behind the configured credentials
//! theta-provider login
//!
//! # List deployments of the default project
//! theta-provider get deploy
//!
//! # Create a deployment and wait until it serves traffic
//! theta-provider create deploy -f llama.yaml
//!
//! # Delete a template without prompting
//! theta-provider delete tpl img_123 -y
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod theta;
pub mod ui;

pub use cli::{Cli, Command, GetResource, OutputFormat, ResourceKind};
pub use error::{Result, ThetaError};
pub use theta::{
    ClientConfig, CredentialResolver, Credentials, Deployment, Endpoint, ManagedResource,
    Organization, Project, Provider, Readiness, ReadinessConfig, Template, ThetaClient,
};
