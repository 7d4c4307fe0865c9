//! Endpoint API operations

use log::info;
use reqwest::Method;

use crate::error::{Result, ThetaError};
use crate::theta::deployments::Deployment;
use crate::theta::envelope::unwrap_optional_envelope;
use crate::theta::ThetaClient;

use super::models::Endpoint;

impl ThetaClient {
    /// Create an endpoint and wait (best effort) until it serves traffic
    pub async fn create_endpoint(&self, plan: &Endpoint) -> Result<Endpoint> {
        info!(
            "Creating endpoint '{}' in project '{}'",
            plan.name, plan.project_id
        );
        let submitted = self.submit_deployment_body(&plan.request_body()).await?;
        self.wait_until_serving(&submitted.url).await;

        Ok(Endpoint {
            id: submitted.id.clone(),
            suffix: submitted.id,
            url: submitted.url,
            ..plan.clone()
        })
    }

    /// Read an endpoint through the direct deployment endpoint
    pub async fn get_endpoint(&self, project_id: &str, id: &str) -> Result<Endpoint> {
        self.get_deployment_by_suffix(project_id, id)
            .await
            .map(Endpoint::from)
    }

    /// Update an endpoint in place
    ///
    /// The reply may be empty, an envelope or the bare record; when it
    /// carries a record that record wins, otherwise the plan is returned.
    pub async fn update_endpoint(&self, prior: &Endpoint, plan: &Endpoint) -> Result<Endpoint> {
        let url = self.deployment_url(&prior.project_id, &prior.id);
        let context = format!("updating endpoint '{}'", prior.id);
        info!("Updating endpoint '{}'", prior.id);

        let response = self
            .send_json(Method::PUT, &url, Some(&plan.request_body()), &context)
            .await
            .map_err(|e| e.or_not_found("endpoint", &prior.id))?;
        let body = unwrap_optional_envelope(response, &context)?;

        let planned = plan.with_identity_of(prior);
        if !body.is_object() {
            return Ok(planned);
        }

        let echoed = Endpoint::from(Deployment::from_record(&body)?);
        if echoed.name.is_empty() {
            return Ok(planned);
        }
        Ok(echoed.with_identity_of(&planned).preserve_unechoed(&planned))
    }

    /// Delete an endpoint
    pub async fn delete_endpoint(&self, project_id: &str, id: &str) -> Result<()> {
        self.delete_deployment(project_id, id)
            .await
            .map_err(|e| match e {
                ThetaError::NotFound { id, .. } => ThetaError::not_found("endpoint", &id),
                other => other,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn existing() -> Endpoint {
        Endpoint {
            id: "s1".to_string(),
            suffix: "s1".to_string(),
            url: "https://api-s1.example.com".to_string(),
            name: "api".to_string(),
            project_id: "prj_1".to_string(),
            container_image: "repo/api:1".to_string(),
            min_replicas: 1,
            max_replicas: 1,
            vm_id: "vm_c1".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_endpoint() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/deployment"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "body": "Custom deployment initiated. Access it at: https://api-s1.example.com"
            })))
            .mount(&mock_server)
            .await;

        let client = ThetaClient::test_client(&mock_server.uri());
        let plan = Endpoint {
            id: String::new(),
            suffix: String::new(),
            url: String::new(),
            ..existing()
        };
        let created = client.create_endpoint(&plan).await.unwrap();
        assert_eq!(created, existing());
    }

    #[tokio::test]
    async fn test_update_endpoint_puts_in_place() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/deployment/1/s1"))
            .and(query_param("project_id", "prj_1"))
            .and(body_partial_json(json!({"max_replicas": 3})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "body": {"Suffix": "s1", "Name": "api", "Replicas": 3, "ImageURL": "repo/api:1", "MachineType": "vm_c1"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ThetaClient::test_client(&mock_server.uri());
        let plan = Endpoint {
            max_replicas: 3,
            min_replicas: 3,
            ..existing()
        };
        let updated = client.update_endpoint(&existing(), &plan).await.unwrap();

        assert_eq!(updated.id, "s1");
        assert_eq!(updated.max_replicas, 3);
        assert_eq!(updated.project_id, "prj_1");
        assert_eq!(updated.url, "https://api-s1.example.com");
    }

    #[tokio::test]
    async fn test_update_endpoint_empty_reply_returns_plan() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/deployment/1/s1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = ThetaClient::test_client(&mock_server.uri());
        let plan = Endpoint {
            name: "renamed".to_string(),
            id: String::new(),
            ..existing()
        };
        let updated = client.update_endpoint(&existing(), &plan).await.unwrap();
        assert_eq!(updated.name, "renamed");
        assert_eq!(updated.id, "s1");
    }

    #[tokio::test]
    async fn test_get_endpoint_missing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/deployment/1/s1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = ThetaClient::test_client(&mock_server.uri());
        assert!(client.get_endpoint("prj_1", "s1").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_endpoint_missing_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/deployment/1/s1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = ThetaClient::test_client(&mock_server.uri());
        let err = client.delete_endpoint("prj_1", "s1").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("endpoint"));
    }
}
