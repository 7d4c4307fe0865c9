//! Theta HTTP client and transport

use log::debug;
use reqwest::header::{ACCEPT_ENCODING, AUTHORIZATION, CONTENT_ENCODING, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use std::time::Duration;

use crate::config::{api, headers};
use crate::error::{Result, ThetaError};
use crate::theta::encoding::decode_body;
use crate::theta::envelope::{parse_json, redact, redacted_text};
use crate::theta::readiness::ReadinessConfig;
use crate::theta::session::Session;

/// Endpoints, headers and timeouts the client is built with
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Account API base URL (login, organizations, projects)
    pub api_url: String,
    /// Controller base URL (deployments, templates)
    pub controller_url: String,
    /// Login path on the account API
    pub login_path: String,
    /// Value of the login `expand` query parameter
    pub login_expand: String,
    /// Overall per-request timeout
    pub request_timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Browser-impersonation headers sent with every request
    pub browser_headers: Vec<(String, String)>,
    /// Readiness polling after deployment creation
    pub readiness: ReadinessConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: api::API_URL.to_string(),
            controller_url: api::CONTROLLER_URL.to_string(),
            login_path: api::LOGIN_PATH.to_string(),
            login_expand: api::LOGIN_EXPAND.to_string(),
            request_timeout: Duration::from_secs(api::REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(api::CONNECT_TIMEOUT_SECS),
            browser_headers: headers::BROWSER
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            readiness: ReadinessConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Default configuration pointed at custom hosts
    pub fn with_urls(api_url: &str, controller_url: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            controller_url: controller_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Full login URL including the expand parameter
    pub fn login_url(&self) -> String {
        format!(
            "{}{}?expand={}",
            self.api_url,
            self.login_path,
            urlencoding::encode(&self.login_expand)
        )
    }
}

/// Theta API client
///
/// Holds one [`Session`] for its whole lifetime. Every request other than the
/// login itself requires that session.
pub struct ThetaClient {
    client: Client,
    config: ClientConfig,
    session: Option<Session>,
}

impl ThetaClient {
    /// Create an unauthenticated client
    pub fn new(config: ClientConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The active session, if login succeeded
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub(crate) fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    /// Session or an auth error for calls made before login
    pub(crate) fn require_session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| ThetaError::Auth("client is not authenticated; login first".to_string()))
    }

    /// Build a URL on the account API host
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url, path.trim_start_matches('/'))
    }

    /// Build a URL on the controller host
    pub(crate) fn controller_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.controller_url,
            path.trim_start_matches('/')
        )
    }

    /// Request builder with content-type, encoding and browser headers
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT_ENCODING, headers::ACCEPT_ENCODING);

        for (name, value) in &self.config.browser_headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }

    /// Add every auth header scheme the backend accepts
    fn with_auth(&self, builder: RequestBuilder, session: &Session) -> RequestBuilder {
        builder
            .header(AUTHORIZATION, format!("Bearer {}", session.bearer_token()))
            .header("X-Auth-Id", session.account_id())
            .header("X-Auth-Token", session.bearer_token())
    }

    /// Send an authenticated request and return the decoded body
    ///
    /// Any non-2xx status is a transport error carrying the status line and
    /// the decoded body. No retries happen here.
    pub async fn send(&self, method: Method, url: &str, body: Option<&Value>) -> Result<Vec<u8>> {
        let session = self.require_session()?;
        let builder = self.with_auth(self.request(method.clone(), url), session);
        self.execute(builder, method, url, body).await
    }

    /// Send a request without session headers (login)
    pub(crate) async fn send_anonymous(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Vec<u8>> {
        let builder = self.request(method.clone(), url);
        self.execute(builder, method, url, body).await
    }

    /// Send an authenticated request and parse the body as JSON
    ///
    /// An empty body parses as `Value::Null`.
    pub async fn send_json(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        context: &str,
    ) -> Result<Value> {
        let bytes = self.send(method, url, body).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        parse_json(&bytes, context)
    }

    async fn execute(
        &self,
        builder: RequestBuilder,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Vec<u8>> {
        debug!("Sending {} request to {}", method, url);

        let builder = match body {
            Some(json) => {
                debug!("Request body: {}", redact(json));
                builder.json(json)
            }
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ThetaError::transport(url, e.to_string()))?;

        let status = response.status();
        let encoding = response
            .headers()
            .get(CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let raw = response
            .bytes()
            .await
            .map_err(|e| ThetaError::transport(url, format!("failed to read body: {}", e)))?;

        let decoded = decode_body(encoding.as_deref(), &raw).map_err(|e| ThetaError::Transport {
            url: url.to_string(),
            status: Some(status.as_u16()),
            message: format!("failed to decode {:?} body: {}", encoding, e),
            body: String::new(),
        })?;

        debug!(
            "Response status: {}, {} bytes ({} on the wire)",
            status,
            decoded.len(),
            raw.len()
        );

        if !status.is_success() {
            return Err(ThetaError::Transport {
                url: url.to_string(),
                status: Some(status.as_u16()),
                message: status.to_string(),
                body: redacted_text(&decoded),
            });
        }

        Ok(decoded)
    }
}

#[cfg(test)]
impl ThetaClient {
    /// Authenticated client pointed at a mock server
    pub fn test_client(base_url: &str) -> Self {
        let mut config = ClientConfig::with_urls(base_url, base_url);
        config.readiness = ReadinessConfig::disabled();
        let mut client = Self::new(config);
        client.set_session(Session::new(
            "test-token".to_string(),
            "usr_test".to_string(),
            Some("prj_default".to_string()),
            Some("org_default".to_string()),
        ));
        client
    }
}
