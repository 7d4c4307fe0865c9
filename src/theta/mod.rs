//! Theta EdgeCloud API client module
//!
//! This module provides the authenticated client and the per-kind resource
//! operations (deployments, endpoints, templates, projects, organizations),
//! plus the command handlers the binary dispatches to.

mod client;
pub mod commands;
pub mod credentials;
pub mod deployments;
pub mod encoding;
pub mod endpoints;
pub mod envelope;
pub mod lifecycle;
pub mod organizations;
pub mod projects;
pub mod readiness;
pub mod session;
pub mod templates;
pub mod traits;

pub use client::{ClientConfig, ThetaClient};
pub use commands::{
    delete_resource, load_document, run_create_command, run_delete_command, run_login_command,
    run_update_command, update_with,
};
pub use credentials::{CredentialArgs, CredentialResolver};
pub use deployments::{extract_access_url, extract_deployment_id, run_deploy_command, Deployment};
pub use endpoints::Endpoint;
pub use lifecycle::{
    refresh, DataSource, DeploymentResource, EndpointResource, ManagedResource,
    OrganizationsData, ProjectResource, Provider, ReadOutcome, TemplateResource, TemplatesData,
    UpdateStrategy,
};
pub use organizations::{run_org_command, Organization};
pub use projects::{run_prj_command, Project};
pub use readiness::{Readiness, ReadinessConfig, ReadinessPoller};
pub use session::{Credentials, Secret, Session};
pub use templates::{run_tpl_command, Template, TemplatePage};
pub use traits::ThetaResource;
