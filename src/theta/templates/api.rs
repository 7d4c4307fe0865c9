//! Deployment template API operations

use log::{debug, info, warn};
use reqwest::Method;
use serde_json::Value;

use crate::config::api;
use crate::error::{Result, ThetaError};
use crate::theta::envelope::{
    expect_deleted, expect_success, records, unwrap_optional_envelope, Fields,
};
use crate::theta::traits::find_by_id;
use crate::theta::ThetaClient;

use super::models::Template;

/// One page of the custom template listing
#[derive(Debug, Clone, Default)]
pub struct TemplatePage {
    pub templates: Vec<Template>,
    /// Total number of templates across all pages, when reported
    pub total_count: Option<u64>,
}

impl ThetaClient {
    fn template_url(&self, suffix: &str) -> String {
        self.controller_url(&format!("{}{}", api::DEPLOYMENT_TEMPLATE, suffix))
    }

    /// Fetch a single page of custom templates
    pub async fn list_templates_page(
        &self,
        project_id: &str,
        page: u32,
        number: u32,
    ) -> Result<TemplatePage> {
        let url = self.template_url(&format!(
            "/{}?project_id={}&page={}&number={}",
            api::LIST_CUSTOM_TEMPLATES,
            urlencoding::encode(project_id),
            page,
            number
        ));
        let context = format!("listing templates of project '{}'", project_id);

        let response = self.send_json(Method::GET, &url, None, &context).await?;
        let body = expect_success(response, &context)?;
        if body.is_null() {
            return Ok(TemplatePage::default());
        }

        let total_count = body
            .as_object()
            .map(Fields::new)
            .and_then(|f| f.int(&["total_count", "totalCount"]))
            .and_then(|n| u64::try_from(n).ok());

        let templates = match records(&body, &["templates"]) {
            Some(items) => items
                .iter()
                .filter(|item| item.is_object())
                .map(Template::from_record)
                .collect::<Result<Vec<_>>>()?,
            None => {
                return Err(ThetaError::decode(
                    &context,
                    format!("no template list in body {}", body),
                ))
            }
        };

        Ok(TemplatePage {
            templates,
            total_count,
        })
    }

    /// List every custom template of a project, following pages
    ///
    /// Stops once `total_count` templates have been collected, at the
    /// first empty or short page, or when a page repeats the previous one.
    /// At most `MAX_TEMPLATE_PAGES` pages are requested.
    pub async fn list_templates(&self, project_id: &str) -> Result<Vec<Template>> {
        let number = api::TEMPLATE_PAGE_SIZE;
        let mut all: Vec<Template> = Vec::new();
        let mut previous_ids: Vec<String> = Vec::new();
        let mut page = 0;

        loop {
            let batch = self.list_templates_page(project_id, page, number).await?;
            let fetched = batch.templates.len();
            debug!(
                "Template page {} returned {} items (total {:?})",
                page, fetched, batch.total_count
            );

            let ids: Vec<String> = batch.templates.iter().map(|t| t.id.clone()).collect();
            if fetched > 0 && ids == previous_ids {
                warn!(
                    "Template page {} repeats page {}, stopping pagination",
                    page,
                    page - 1
                );
                break;
            }
            all.extend(batch.templates);

            let done = match batch.total_count {
                _ if fetched == 0 => true,
                Some(total) => all.len() as u64 >= total,
                None => fetched < number as usize,
            };
            if done {
                break;
            }
            if page + 1 >= api::MAX_TEMPLATE_PAGES {
                warn!(
                    "Stopped listing templates of project '{}' after {} pages",
                    project_id,
                    api::MAX_TEMPLATE_PAGES
                );
                break;
            }
            previous_ids = ids;
            page += 1;
        }

        Ok(all)
    }

    /// Find a template by scanning the project's templates
    pub async fn get_template(&self, project_id: &str, id: &str) -> Result<Template> {
        let templates = self.list_templates(project_id).await?;
        find_by_id(templates, id).ok_or_else(|| ThetaError::not_found("deployment template", id))
    }

    /// Create a custom template
    pub async fn create_template(&self, plan: &Template) -> Result<Template> {
        let url = self.template_url("");
        info!(
            "Creating template '{}' in project '{}'",
            plan.name, plan.project_id
        );

        let response = self
            .send_json(Method::POST, &url, Some(&plan.request_body()), "creating template")
            .await?;
        let created = template_from_reply(response, plan, "creating template")?;

        if created.id.is_empty() {
            return Err(ThetaError::decode(
                "create template response",
                "reply carried no template id",
            ));
        }
        Ok(created)
    }

    /// Update a template in place
    pub async fn update_template(&self, id: &str, plan: &Template) -> Result<Template> {
        let url = self.template_url(&format!("/{}", urlencoding::encode(id)));
        let context = format!("updating template '{}'", id);
        info!("Updating template '{}'", id);

        let response = self
            .send_json(Method::PUT, &url, Some(&plan.request_body()), &context)
            .await
            .map_err(|e| e.or_not_found("deployment template", id))?;
        let mut updated = template_from_reply(response, plan, &context)?;
        updated.id = id.to_string();
        Ok(updated)
    }

    /// Delete a template
    pub async fn delete_template(&self, project_id: &str, id: &str) -> Result<()> {
        let url = self.template_url(&format!(
            "/{}?project_id={}",
            urlencoding::encode(id),
            urlencoding::encode(project_id)
        ));
        let context = format!("deleting template '{}'", id);
        info!("Deleting template '{}' from project '{}'", id, project_id);

        let response = self
            .send_json(Method::DELETE, &url, None, &context)
            .await
            .map_err(|e| e.or_not_found("deployment template", id))?;
        expect_deleted(response, &context)
    }
}

/// Reply is an envelope, a bare record, or empty
fn template_from_reply(response: Value, sent: &Template, context: &str) -> Result<Template> {
    let body = unwrap_optional_envelope(response, context)?;
    if !body.is_object() {
        return Ok(sent.clone());
    }
    Ok(Template::from_record(&body)?.fill_missing(sent))
}
