//! Project API operations

use log::{debug, info};
use reqwest::Method;

use crate::config::api;
use crate::error::{Result, ThetaError};
use crate::theta::envelope::{expect_deleted, expect_success, records};
use crate::theta::traits::find_by_id;
use crate::theta::ThetaClient;

use super::models::Project;

impl ThetaClient {
    fn project_url(&self, id: &str) -> String {
        self.api_url(&format!("{}/{}", api::PROJECT, urlencoding::encode(id)))
    }

    /// Get all projects of an organization the user belongs to
    pub async fn list_projects(&self, org_id: &str) -> Result<Vec<Project>> {
        let user_id = self.require_session()?.account_id().to_string();
        let url = self.api_url(&format!(
            "{}/{}/{}/{}/{}?expand=user_ids",
            api::USER,
            urlencoding::encode(&user_id),
            api::ORGANIZATION,
            urlencoding::encode(org_id),
            api::PROJECTS
        ));
        let context = format!("listing projects of organization '{}'", org_id);

        let response = self.send_json(Method::GET, &url, None, &context).await?;
        let body = expect_success(response, &context)?;
        if body.is_null() {
            return Ok(Vec::new());
        }

        let items = records(&body, &["projects"]).ok_or_else(|| {
            ThetaError::decode(&context, format!("no project list in body {}", body))
        })?;
        let projects = items
            .iter()
            .filter(|item| item.is_object())
            .map(Project::from_record)
            .collect::<Result<Vec<_>>>()?;

        debug!("Found {} projects in org '{}'", projects.len(), org_id);
        Ok(projects)
    }

    /// Find a project by scanning the organization's projects
    pub async fn get_project(&self, org_id: &str, id: &str) -> Result<Project> {
        let projects = self.list_projects(org_id).await?;
        find_by_id(projects, id).ok_or_else(|| ThetaError::not_found("project", id))
    }

    pub async fn create_project(&self, plan: &Project) -> Result<Project> {
        let url = self.api_url(api::PROJECT);
        info!("Creating project '{}' in org '{}'", plan.name, plan.org_id);

        let response = self
            .send_json(Method::POST, &url, Some(&plan.request_body()), "creating project")
            .await?;
        let body = expect_success(response, "creating project")?;

        let created = Project::from_record(&body)?;
        if created.id.is_empty() {
            return Err(ThetaError::decode(
                "create project response",
                "reply carried no project id",
            ));
        }
        Ok(Project {
            org_id: if created.org_id.is_empty() {
                plan.org_id.clone()
            } else {
                created.org_id.clone()
            },
            ..created
        })
    }

    /// Rename a project
    pub async fn update_project(&self, id: &str, plan: &Project) -> Result<Project> {
        let url = self.project_url(id);
        let context = format!("updating project '{}'", id);
        info!("Updating project '{}'", id);

        let response = self
            .send_json(Method::PUT, &url, Some(&plan.request_body()), &context)
            .await
            .map_err(|e| e.or_not_found("project", id))?;
        let body = expect_success(response, &context)?;

        if !body.is_object() {
            return Ok(Project {
                id: id.to_string(),
                ..plan.clone()
            });
        }
        let mut updated = Project::from_record(&body)?;
        updated.id = id.to_string();
        if updated.org_id.is_empty() {
            updated.org_id = plan.org_id.clone();
        }
        Ok(updated)
    }

    pub async fn delete_project(&self, id: &str) -> Result<()> {
        let url = self.project_url(id);
        let context = format!("deleting project '{}'", id);
        info!("Deleting project '{}'", id);

        let response = self
            .send_json(Method::DELETE, &url, None, &context)
            .await
            .map_err(|e| e.or_not_found("project", id))?;
        expect_deleted(response, &context)
    }
}
