//! Organization API operations

use log::debug;
use reqwest::Method;

use crate::config::api;
use crate::error::{Result, ThetaError};
use crate::theta::envelope::{expect_success, records};
use crate::theta::traits::find_by_id;
use crate::theta::ThetaClient;

use super::models::Organization;

impl ThetaClient {
    /// Get all organizations of the authenticated user
    pub async fn list_organizations(&self) -> Result<Vec<Organization>> {
        let user_id = self.require_session()?.account_id().to_string();
        let url = self.api_url(&format!(
            "{}/{}/{}",
            api::USER,
            urlencoding::encode(&user_id),
            api::ORGS
        ));
        let context = "listing organizations";

        let response = self.send_json(Method::GET, &url, None, context).await?;
        let body = expect_success(response, context)?;
        if body.is_null() {
            return Ok(Vec::new());
        }

        let items = records(&body, &["organizations", "orgs"]).ok_or_else(|| {
            ThetaError::decode(context, format!("no organization list in body {}", body))
        })?;
        let orgs = items
            .iter()
            .filter(|item| item.is_object())
            .map(Organization::from_record)
            .collect::<Result<Vec<_>>>()?;

        debug!("Found {} organizations for user '{}'", orgs.len(), user_id);
        Ok(orgs)
    }

    /// Find an organization by ID
    pub async fn get_organization(&self, id: &str) -> Result<Organization> {
        let orgs = self.list_organizations().await?;
        find_by_id(orgs, id).ok_or_else(|| ThetaError::not_found("organization", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theta::encoding::test_support::zlib;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn orgs_body() -> serde_json::Value {
        json!({
            "status": "success",
            "body": {
                "organizations": [
                    {"id": "org_1", "name": "Acme", "user_role": "admin", "disabled": false},
                    {"id": "org_2", "name": "Other", "suspended": "true"}
                ]
            }
        })
    }

    #[tokio::test]
    async fn test_list_organizations() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/usr_test/orgs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(orgs_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ThetaClient::test_client(&mock_server.uri());
        let orgs = client.list_organizations().await.unwrap();
        assert_eq!(orgs.len(), 2);
        assert_eq!(orgs[0].user_role, "admin");
        assert!(orgs[1].suspended);
    }

    #[tokio::test]
    async fn test_list_organizations_deflate_body() {
        let mock_server = MockServer::start().await;
        let payload = serde_json::to_vec(&orgs_body()).unwrap();

        Mock::given(method("GET"))
            .and(path("/user/usr_test/orgs"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Encoding", "deflate")
                    .set_body_bytes(zlib(&payload)),
            )
            .mount(&mock_server)
            .await;

        let client = ThetaClient::test_client(&mock_server.uri());
        let org = client.get_organization("org_2").await.unwrap();
        assert_eq!(org.name, "Other");
    }

    #[tokio::test]
    async fn test_get_organization_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/usr_test/orgs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(orgs_body()))
            .mount(&mock_server)
            .await;

        let client = ThetaClient::test_client(&mock_server.uri());
        let err = client.get_organization("org_404").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_organizations_malformed_body_is_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/usr_test/orgs"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
            .mount(&mock_server)
            .await;

        let client = ThetaClient::test_client(&mock_server.uri());
        let err = client.list_organizations().await.unwrap_err();
        assert!(matches!(err, ThetaError::Decode { .. }));
    }
}
