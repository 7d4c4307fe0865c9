//! Deployment API operations

use log::{debug, info, warn};
use reqwest::Method;
use serde_json::Value;

use crate::config::api;
use crate::error::{Result, ThetaError};
use crate::theta::envelope::{expect_deleted, expect_success, records};
use crate::theta::readiness::{Readiness, ReadinessPoller};
use crate::theta::traits::find_by_id;
use crate::theta::ThetaClient;

use super::access::{extract_access_url, extract_deployment_id};
use super::models::Deployment;

/// Result of a create call: where the deployment lives and its derived id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub url: String,
    pub id: String,
}

impl ThetaClient {
    /// URL addressing one deployment on the controller
    pub(crate) fn deployment_url(&self, project_id: &str, id: &str) -> String {
        self.controller_url(&format!(
            "{}/{}/{}?project_id={}",
            api::DEPLOYMENT,
            api::DEPLOYMENT_SHARD,
            urlencoding::encode(id),
            urlencoding::encode(project_id)
        ))
    }

    /// POST a deployment document and parse the access URL out of the reply
    pub(crate) async fn submit_deployment_body(&self, body: &Value) -> Result<Submitted> {
        let url = self.controller_url(api::DEPLOYMENT);
        let response = self
            .send_json(Method::POST, &url, Some(body), "creating deployment")
            .await?;
        let body = expect_success(response, "creating deployment")?;

        let sentence = body.as_str().ok_or_else(|| {
            ThetaError::decode(
                "create deployment response",
                format!("expected a text body, got {}", body),
            )
        })?;

        let access_url = extract_access_url(sentence)?;
        let id = extract_deployment_id(&access_url)?;
        debug!("Deployment created at {} (id {})", access_url, id);

        Ok(Submitted {
            url: access_url,
            id,
        })
    }

    /// Create a deployment without waiting for it to serve traffic
    pub async fn submit_deployment(&self, plan: &Deployment) -> Result<Deployment> {
        info!(
            "Creating deployment '{}' in project '{}'",
            plan.name, plan.project_id
        );
        let submitted = self.submit_deployment_body(&plan.request_body()).await?;

        Ok(Deployment {
            id: submitted.id.clone(),
            suffix: submitted.id,
            url: submitted.url,
            ..plan.clone()
        })
    }

    /// Create a deployment and wait (best effort) until its URL answers
    ///
    /// The create succeeds even when readiness is never confirmed.
    pub async fn create_deployment(&self, plan: &Deployment) -> Result<Deployment> {
        let created = self.submit_deployment(plan).await?;
        self.wait_until_serving(&created.url).await;
        Ok(created)
    }

    /// Poll an access URL with the client's readiness settings
    pub async fn wait_until_serving(&self, url: &str) -> Readiness {
        let outcome = ReadinessPoller::new(self.config().readiness)
            .await_ready(url)
            .await;
        if let Readiness::TimedOut { attempts } = outcome {
            warn!(
                "Deployment at {} is not serving yet after {} checks; it may still be provisioning",
                url, attempts
            );
        }
        outcome
    }

    /// List all deployments of a project
    pub async fn list_deployments(&self, project_id: &str) -> Result<Vec<Deployment>> {
        let url = self.controller_url(&format!(
            "{}?project_id={}",
            api::DEPLOYMENTS_LIST,
            urlencoding::encode(project_id)
        ));
        let context = format!("listing deployments of project '{}'", project_id);

        let response = self.send_json(Method::GET, &url, None, &context).await?;
        let body = expect_success(response, &context)?;

        if body.is_null() {
            return Ok(Vec::new());
        }

        let items = records(&body, &["deployments", "Deployments", "items"]).ok_or_else(|| {
            ThetaError::decode(&context, format!("no deployment list in body {}", body))
        })?;

        let deployments: Vec<Deployment> = items
            .iter()
            .filter(|item| item.is_object())
            .map(Deployment::from_record)
            .collect::<Result<_>>()?;

        debug!(
            "Found {} deployments in project '{}'",
            deployments.len(),
            project_id
        );
        Ok(deployments)
    }

    /// Get a deployment by scanning the project's deployment list
    pub async fn get_deployment(&self, project_id: &str, id: &str) -> Result<Deployment> {
        let deployments = self.list_deployments(project_id).await?;
        find_by_id(deployments, id).ok_or_else(|| ThetaError::not_found("deployment", id))
    }

    /// Get a deployment through the direct endpoint
    pub async fn get_deployment_by_suffix(
        &self,
        project_id: &str,
        suffix: &str,
    ) -> Result<Deployment> {
        let url = self.deployment_url(project_id, suffix);
        let context = format!("reading deployment '{}'", suffix);

        let response = self
            .send_json(Method::GET, &url, None, &context)
            .await
            .map_err(|e| e.or_not_found("deployment", suffix))?;
        let body = expect_success(response, &context)?;

        if body.is_null() {
            return Err(ThetaError::not_found("deployment", suffix));
        }
        Deployment::from_record(&body)
    }

    /// Delete a deployment; a 404 is reported as `NotFound`
    pub async fn delete_deployment(&self, project_id: &str, id: &str) -> Result<()> {
        let url = self.deployment_url(project_id, id);
        let context = format!("deleting deployment '{}'", id);
        info!("Deleting deployment '{}' from project '{}'", id, project_id);

        let response = self
            .send_json(Method::DELETE, &url, None, &context)
            .await
            .map_err(|e| e.or_not_found("deployment", id))?;
        expect_deleted(response, &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn plan() -> Deployment {
        Deployment {
            name: "llama".to_string(),
            project_id: "prj_1".to_string(),
            deployment_image_id: "img_1".to_string(),
            container_image: "repo/llama:latest".to_string(),
            min_replicas: 1,
            max_replicas: 2,
            vm_id: "vm_c1".to_string(),
            annotations: [("team".to_string(), "ml".to_string())].into(),
            ..Default::default()
        }
    }

    fn created_sentence(host: &str) -> serde_json::Value {
        json!({
            "status": "success",
            "body": format!("Custom deployment initiated. Access it at: https://{}\n", host)
        })
    }

    async fn mount_create(server: &MockServer, host: &str) {
        Mock::given(method("POST"))
            .and(path("/deployment"))
            .and(header("X-Auth-Token", "test-token"))
            .and(body_partial_json(json!({"name": "llama", "project_id": "prj_1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(created_sentence(host)))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_create_deployment_extracts_url_and_id() {
        let mock_server = MockServer::start().await;
        mount_create(&mock_server, "llama-abcd123.edge.example.com").await;

        let client = ThetaClient::test_client(&mock_server.uri());
        let created = client.create_deployment(&plan()).await.unwrap();

        assert_eq!(created.id, "abcd123");
        assert_eq!(created.suffix, "abcd123");
        assert_eq!(created.url, "https://llama-abcd123.edge.example.com");
        assert_eq!(created.container_image, "repo/llama:latest");
    }

    #[tokio::test]
    async fn test_create_deployment_unexpected_url_format() {
        let mock_server = MockServer::start().await;
        mount_create(&mock_server, "nohyphenhost.example.com").await;

        let client = ThetaClient::test_client(&mock_server.uri());
        let err = client.create_deployment(&plan()).await.unwrap_err();
        assert!(matches!(err, ThetaError::UnexpectedFormat(_)));
    }

    #[tokio::test]
    async fn test_create_deployment_error_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/deployment"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "error",
                "body": "quota exceeded"
            })))
            .mount(&mock_server)
            .await;

        let client = ThetaClient::test_client(&mock_server.uri());
        let err = client.create_deployment(&plan()).await.unwrap_err();
        match err {
            ThetaError::Api { status, .. } => assert_eq!(status, "error"),
            other => panic!("Expected ThetaError::Api, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_then_read_round_trip() {
        let mock_server = MockServer::start().await;
        mount_create(&mock_server, "llama-abcd123.edge.example.com").await;

        Mock::given(method("GET"))
            .and(path("/deployments/list"))
            .and(query_param("project_id", "prj_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "body": {
                    "deployments": [
                        {"Suffix": "other99", "Name": "other"},
                        {
                            "Suffix": "abcd123",
                            "Name": "llama",
                            "ProjectID": "prj_1",
                            "ImageURL": "repo/llama:latest",
                            "MinReplicas": "1",
                            "MaxReplicas": "2",
                            "MachineType": "vm_c1",
                            "Annotations": {"team": "ml"},
                            "Endpoint": "https://llama-abcd123.edge.example.com"
                        }
                    ],
                    "total_count": "2"
                }
            })))
            .mount(&mock_server)
            .await;

        let client = ThetaClient::test_client(&mock_server.uri());
        let created = client.create_deployment(&plan()).await.unwrap();
        let read = client
            .get_deployment("prj_1", &created.id)
            .await
            .unwrap()
            .preserve_unechoed(&created);

        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn test_get_deployment_missing_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/deployments/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "body": {"deployments": [{"suffix": "zzz"}]}
            })))
            .mount(&mock_server)
            .await;

        let client = ThetaClient::test_client(&mock_server.uri());
        let err = client.get_deployment("prj_1", "abcd123").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_deployment_empty_list_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/deployments/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "body": null
            })))
            .mount(&mock_server)
            .await;

        let client = ThetaClient::test_client(&mock_server.uri());
        let err = client.get_deployment("prj_1", "abcd123").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_deployment_by_suffix() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/deployment/1/abcd123"))
            .and(query_param("project_id", "prj_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "body": {"Suffix": "abcd123", "Name": "llama", "Replicas": 2}
            })))
            .mount(&mock_server)
            .await;

        let client = ThetaClient::test_client(&mock_server.uri());
        let d = client
            .get_deployment_by_suffix("prj_1", "abcd123")
            .await
            .unwrap();
        assert_eq!(d.name, "llama");
        assert_eq!(d.max_replicas, 2);
    }

    #[tokio::test]
    async fn test_get_deployment_by_suffix_404_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/deployment/1/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = ThetaClient::test_client(&mock_server.uri());
        let err = client
            .get_deployment_by_suffix("prj_1", "gone")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_deployment_empty_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/deployment/1/abcd123"))
            .and(query_param("project_id", "prj_1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ThetaClient::test_client(&mock_server.uri());
        assert!(client.delete_deployment("prj_1", "abcd123").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_deployment_success_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/deployment/1/abcd123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "body": true
            })))
            .mount(&mock_server)
            .await;

        let client = ThetaClient::test_client(&mock_server.uri());
        assert!(client.delete_deployment("prj_1", "abcd123").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_deployment_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/deployment/1/abcd123"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let client = ThetaClient::test_client(&mock_server.uri());
        let err = client
            .delete_deployment("prj_1", "abcd123")
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), Some(500));
        assert!(!err.is_not_found());
    }
}
