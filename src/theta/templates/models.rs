//! Deployment template data models

use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::Result;
use crate::theta::envelope::{as_int, as_string_map, Fields};
use crate::theta::traits::ThetaResource;

/// A custom deployment template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub description: String,
    pub container_image: String,
    #[serde(default, deserialize_with = "int_or_text")]
    pub container_port: i64,
    #[serde(default)]
    pub container_args: String,
    /// Accepts a map or JSON text such as `{"MODEL":"7b"}`
    #[serde(default, deserialize_with = "map_or_json_text")]
    pub env_vars: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub icon_url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub require_env_vars: bool,
    #[serde(default)]
    pub rank: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
}

fn int_or_text<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(0);
    }
    as_int(&value).ok_or_else(|| de::Error::custom(format!("expected an integer, got {}", value)))
}

fn map_or_json_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(BTreeMap::new());
    }
    as_string_map(&value)
        .ok_or_else(|| de::Error::custom(format!("expected a map or JSON object text, got {}", value)))
}

impl ThetaResource for Template {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Template {
    pub(crate) fn request_body(&self) -> Value {
        json!({
            "name": self.name,
            "project_id": self.project_id,
            "description": self.description,
            "container_image": self.container_image,
            "container_port": self.container_port,
            "container_args": self.container_args,
            "env_vars": self.env_vars,
            "tags": self.tags,
            "icon_url": self.icon_url,
        })
    }

    /// Decode a template record from a create/update reply or a list page
    pub fn from_record(record: &Value) -> Result<Self> {
        let f = Fields::of(record, "deployment template")?;

        let container_image = f.str(&["container_image"]).or_else(|| {
            f.string_list(&["container_images"])
                .and_then(|images| images.into_iter().next())
        });
        let container_args = f
            .str(&["container_args"])
            .or_else(|| f.string_list(&["container_args"]).map(|args| args.join(" ")));

        Ok(Self {
            id: f.str_or_default(&["id", "ID"]),
            name: f.str_or_default(&["name", "Name"]),
            project_id: f.str_or_default(&["project_id", "ProjectID"]),
            description: f.str_or_default(&["description"]),
            container_image: container_image.unwrap_or_default(),
            container_port: f.int(&["container_port"]).unwrap_or_default(),
            container_args: container_args.unwrap_or_default(),
            env_vars: f.string_map(&["env_vars"]).unwrap_or_default(),
            tags: f.string_list(&["tags"]).unwrap_or_default(),
            icon_url: f.str_or_default(&["icon_url"]),
            category: f.str_or_default(&["category"]),
            require_env_vars: f.bool(&["require_env_vars"]).unwrap_or_default(),
            rank: f.int(&["rank"]).unwrap_or_default(),
            create_time: f.str(&["create_time"]),
        })
    }

    /// Fill fields the reply left empty from what was sent
    pub fn fill_missing(mut self, sent: &Template) -> Self {
        fn keep(field: &mut String, sent: &str) {
            if field.is_empty() {
                *field = sent.to_string();
            }
        }

        keep(&mut self.name, &sent.name);
        keep(&mut self.project_id, &sent.project_id);
        keep(&mut self.description, &sent.description);
        keep(&mut self.container_image, &sent.container_image);
        keep(&mut self.container_args, &sent.container_args);
        keep(&mut self.icon_url, &sent.icon_url);
        if self.container_port == 0 {
            self.container_port = sent.container_port;
        }
        if self.env_vars.is_empty() {
            self.env_vars = sent.env_vars.clone();
        }
        if self.tags.is_empty() {
            self.tags = sent.tags.clone();
        }
        self
    }
}
