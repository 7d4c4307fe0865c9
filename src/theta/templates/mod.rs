//! Deployment template module

mod api;
mod commands;
mod models;

pub use api::TemplatePage;
pub use commands::run_tpl_command;
pub use models::Template;
