//! Deployment module

mod access;
mod api;
mod commands;
mod models;

pub use access::{extract_access_url, extract_deployment_id};
pub use api::Submitted;
pub use commands::run_deploy_command;
pub use models::Deployment;
