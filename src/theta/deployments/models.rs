//! Deployment data models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::Result;
use crate::theta::envelope::Fields;
use crate::theta::session::Secret;
use crate::theta::traits::ThetaResource;

/// A deployment running a container image
///
/// `id` and `suffix` hold the same host-derived identifier. The backend never
/// echoes `deployment_image_id` or the basic-auth credentials, so reads keep
/// them from the previous local copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub deployment_image_id: String,
    pub container_image: String,
    #[serde(default = "one")]
    pub min_replicas: i64,
    #[serde(default = "one")]
    pub max_replicas: i64,
    #[serde(default)]
    pub vm_id: String,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    #[serde(default)]
    pub env_vars: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_username: Option<String>,
    #[serde(default, skip_serializing)]
    pub auth_password: Option<Secret>,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub url: String,
}

fn one() -> i64 {
    1
}

impl ThetaResource for Deployment {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Deployment {
    /// JSON document posted to create (or replace) a deployment
    pub(crate) fn request_body(&self) -> Value {
        let mut body = json!({
            "name": self.name,
            "project_id": self.project_id,
            "deployment_image_id": self.deployment_image_id,
            "container_image": self.container_image,
            "min_replicas": self.min_replicas,
            "max_replicas": self.max_replicas,
            "vm_id": self.vm_id,
            "annotations": self.annotations,
            "env_vars": self.env_vars,
        });

        if let Some(map) = body.as_object_mut() {
            if let Some(user) = &self.auth_username {
                map.insert("auth_username".to_string(), json!(user));
            }
            if let Some(password) = &self.auth_password {
                map.insert("auth_password".to_string(), json!(password.expose()));
            }
        }
        body
    }

    /// Decode a record from the list or direct-get endpoints
    ///
    /// List records use lowercase keys; the direct endpoint uses capitalised
    /// ones (`Suffix`, `ImageURL`, `Replicas`, `MachineType`).
    pub fn from_record(record: &Value) -> Result<Self> {
        let f = Fields::of(record, "deployment record")?;

        let suffix = f.str_or_default(&["suffix", "Suffix"]);
        let replicas = f.int(&["replicas", "Replicas"]);

        Ok(Self {
            id: if suffix.is_empty() {
                f.str_or_default(&["id", "ID"])
            } else {
                suffix.clone()
            },
            name: f.str_or_default(&["name", "Name"]),
            project_id: f.str_or_default(&["project_id", "ProjectID"]),
            deployment_image_id: f.str_or_default(&["deployment_image_id"]),
            container_image: f.str_or_default(&["container_image", "image_url", "ImageURL"]),
            min_replicas: f
                .int(&["min_replicas", "MinReplicas"])
                .or(replicas)
                .unwrap_or_default(),
            max_replicas: f
                .int(&["max_replicas", "MaxReplicas"])
                .or(replicas)
                .unwrap_or_default(),
            vm_id: f.str_or_default(&["vm_id", "machine_type", "MachineType"]),
            annotations: f
                .string_map(&["annotations", "Annotations"])
                .unwrap_or_default(),
            env_vars: f
                .string_map(&["env_vars", "EnvVars"])
                .unwrap_or_default(),
            auth_username: None,
            auth_password: None,
            suffix,
            url: f.str_or_default(&["url", "URL", "endpoint", "Endpoint"]),
        })
    }

    /// Carry over what the server does not echo back
    pub fn preserve_unechoed(mut self, prior: &Deployment) -> Self {
        self.deployment_image_id = prior.deployment_image_id.clone();
        self.auth_username = prior.auth_username.clone();
        self.auth_password = prior.auth_password.clone();
        if self.project_id.is_empty() {
            self.project_id = prior.project_id.clone();
        }
        if self.url.is_empty() {
            self.url = prior.url.clone();
        }
        self
    }
}
