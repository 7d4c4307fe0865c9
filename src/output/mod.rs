//! Output formatting module
//!
//! Renders API models as tables (comfy-table), JSON or YAML.

mod common;
mod deployments;
mod organizations;
mod projects;
mod templates;

pub use common::{print_json, print_yaml};
pub use deployments::{describe_deployment, output_deployments};
pub use organizations::output_organizations;
pub use projects::output_projects;
pub use templates::output_templates;
