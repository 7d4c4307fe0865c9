//! Project data models

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::Result;
use crate::theta::envelope::Fields;
use crate::theta::traits::ThetaResource;

/// Project within an organization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub org_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tva_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default)]
    pub user_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_role: String,
    #[serde(default)]
    pub disabled: bool,
}

impl ThetaResource for Project {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Project {
    pub(crate) fn request_body(&self) -> Value {
        json!({ "name": self.name, "org_id": self.org_id })
    }

    pub fn from_record(record: &Value) -> Result<Self> {
        let f = Fields::of(record, "project")?;
        Ok(Self {
            id: f.str_or_default(&["id", "ID"]),
            name: f.str_or_default(&["name", "Name"]),
            org_id: f.str_or_default(&["org_id", "OrgID"]),
            tva_id: f.str_or_default(&["tva_id"]),
            create_time: f.str(&["create_time"]),
            user_ids: f.string_list(&["user_ids"]).unwrap_or_default(),
            user_role: f.str_or_default(&["user_role"]),
            disabled: f.bool(&["disabled"]).unwrap_or_default(),
        })
    }
}
