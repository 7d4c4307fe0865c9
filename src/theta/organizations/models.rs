//! Organization data models

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::theta::envelope::Fields;
use crate::theta::traits::ThetaResource;

/// Organization the authenticated user belongs to (read-only)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    pub create_time: Option<String>,
    pub user_join_time: Option<String>,
    pub user_role: String,
    pub disabled: bool,
    pub suspended: bool,
    pub email: String,
}

impl ThetaResource for Organization {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Organization {
    pub fn from_record(record: &Value) -> Result<Self> {
        let f = Fields::of(record, "organization")?;
        Ok(Self {
            id: f.str_or_default(&["id", "ID"]),
            name: f.str_or_default(&["name", "Name"]),
            logo_url: f.str_or_default(&["logo_url"]),
            create_time: f.str(&["create_time"]),
            user_join_time: f.str(&["user_join_time"]),
            user_role: f.str_or_default(&["user_role"]),
            disabled: f.bool(&["disabled"]).unwrap_or_default(),
            suspended: f.bool(&["suspended"]).unwrap_or_default(),
            email: f.str_or_default(&["email"]),
        })
    }
}
