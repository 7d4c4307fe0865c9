//! Endpoint module
//!
//! An endpoint is a deployment managed through the direct
//! `/deployment/1/{id}` endpoint, which supports in-place updates.

mod api;
mod models;

pub use models::Endpoint;
