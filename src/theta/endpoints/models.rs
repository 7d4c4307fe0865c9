//! Endpoint data models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::theta::deployments::Deployment;
use crate::theta::traits::ThetaResource;

/// A deployment addressed by its host-derived suffix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub deployment_image_id: String,
    pub container_image: String,
    pub min_replicas: i64,
    pub max_replicas: i64,
    pub vm_id: String,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    #[serde(default)]
    pub env_vars: BTreeMap<String, String>,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub url: String,
}

impl ThetaResource for Endpoint {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl From<Deployment> for Endpoint {
    fn from(d: Deployment) -> Self {
        Self {
            id: d.id,
            name: d.name,
            project_id: d.project_id,
            deployment_image_id: d.deployment_image_id,
            container_image: d.container_image,
            min_replicas: d.min_replicas,
            max_replicas: d.max_replicas,
            vm_id: d.vm_id,
            annotations: d.annotations,
            env_vars: d.env_vars,
            suffix: d.suffix,
            url: d.url,
        }
    }
}

impl From<&Endpoint> for Deployment {
    fn from(e: &Endpoint) -> Self {
        Deployment {
            id: e.id.clone(),
            name: e.name.clone(),
            project_id: e.project_id.clone(),
            deployment_image_id: e.deployment_image_id.clone(),
            container_image: e.container_image.clone(),
            min_replicas: e.min_replicas,
            max_replicas: e.max_replicas,
            vm_id: e.vm_id.clone(),
            annotations: e.annotations.clone(),
            env_vars: e.env_vars.clone(),
            auth_username: None,
            auth_password: None,
            suffix: e.suffix.clone(),
            url: e.url.clone(),
        }
    }
}

impl Endpoint {
    pub(crate) fn request_body(&self) -> Value {
        Deployment::from(self).request_body()
    }

    /// Same identity as `prior`, with the planned configuration
    pub(crate) fn with_identity_of(&self, prior: &Endpoint) -> Self {
        Self {
            id: prior.id.clone(),
            suffix: prior.suffix.clone(),
            url: prior.url.clone(),
            ..self.clone()
        }
    }

    /// Carry over what the direct endpoint does not echo back
    pub fn preserve_unechoed(mut self, prior: &Endpoint) -> Self {
        self.deployment_image_id = prior.deployment_image_id.clone();
        if self.project_id.is_empty() {
            self.project_id = prior.project_id.clone();
        }
        if self.url.is_empty() {
            self.url = prior.url.clone();
        }
        self
    }
}
