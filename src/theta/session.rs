//! Login and session state

use std::fmt;

use log::{debug, info};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{Result, ThetaError};
use crate::theta::envelope::{envelope_status, parse_json, Fields};
use crate::theta::ThetaClient;

/// Login credentials
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Interactive account login
    EmailPassword { email: String, password: String },
    /// Programmatic API key login
    ApiKey { api_key: String, api_secret: String },
}

impl Credentials {
    pub fn email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::EmailPassword {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn api_key(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Credentials::ApiKey {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// JSON body posted to the login endpoint
    pub(crate) fn login_payload(&self) -> Value {
        match self {
            Credentials::EmailPassword { email, password } => {
                json!({ "email": email, "password": password })
            }
            Credentials::ApiKey {
                api_key,
                api_secret,
            } => json!({ "api_key": api_key, "api_secret": api_secret }),
        }
    }

    /// Who is logging in, safe to print
    pub fn principal(&self) -> &str {
        match self {
            Credentials::EmailPassword { email, .. } => email,
            Credentials::ApiKey { api_key, .. } => api_key,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::EmailPassword { email, .. } => f
                .debug_struct("EmailPassword")
                .field("email", email)
                .field("password", &"***")
                .finish(),
            Credentials::ApiKey { api_key, .. } => f
                .debug_struct("ApiKey")
                .field("api_key", api_key)
                .field("api_secret", &"***")
                .finish(),
        }
    }
}

/// Secret string that never shows up in `Debug` output
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Secret(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Secret::new(value)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"***\"")
    }
}

/// Authenticated identity attached to every request
///
/// Lives as long as the client; there is no refresh or expiry handling.
#[derive(Clone)]
pub struct Session {
    bearer_token: String,
    account_id: String,
    default_project_id: Option<String>,
    organization_id: Option<String>,
}

impl Session {
    pub(crate) fn new(
        bearer_token: String,
        account_id: String,
        default_project_id: Option<String>,
        organization_id: Option<String>,
    ) -> Self {
        Self {
            bearer_token,
            account_id,
            default_project_id,
            organization_id,
        }
    }

    pub fn bearer_token(&self) -> &str {
        &self.bearer_token
    }

    /// User id sent as `X-Auth-Id`
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn default_project_id(&self) -> Option<&str> {
        self.default_project_id.as_deref()
    }

    pub fn organization_id(&self) -> Option<&str> {
        self.organization_id.as_deref()
    }

    /// Build a session from the login response body
    ///
    /// The API returns at most one primary identity per login, so the first
    /// user and the first project/organization are used.
    fn from_login_body(body: &Value) -> Result<Self> {
        let body = Fields::of(body, "login response body")
            .map_err(|e| ThetaError::Auth(e.to_string()))?;

        let users = first_record(&body, &["users"]);
        let user = users.ok_or_else(|| ThetaError::Auth("login response contained no users".to_string()))?;
        let user = Fields::of(user, "login user").map_err(|e| ThetaError::Auth(e.to_string()))?;

        let bearer_token = user.str_or_default(&["auth_token", "authToken", "token"]);
        if bearer_token.is_empty() {
            return Err(ThetaError::Auth(
                "login response contained an empty auth token".to_string(),
            ));
        }

        let account_id = user.str_or_default(&["id", "ID", "user_id"]);
        if account_id.is_empty() {
            return Err(ThetaError::Auth(
                "login response contained no user id".to_string(),
            ));
        }

        let project = first_record(&body, &["projects"]).and_then(Value::as_object).map(Fields::new);
        let organization = first_record(&body, &["organizations", "orgs"])
            .and_then(Value::as_object)
            .map(Fields::new);
        if project.is_none() && organization.is_none() {
            return Err(ThetaError::Auth(
                "login response contained no projects or organizations".to_string(),
            ));
        }

        let default_project_id = user
            .str(&["redirect_project_id"])
            .filter(|s| !s.is_empty())
            .or_else(|| project.and_then(|p| p.str(&["id"])));

        let organization_id = project
            .and_then(|p| p.str(&["org_id"]))
            .or_else(|| organization.and_then(|o| o.str(&["id"])))
            .filter(|s| !s.is_empty());

        Ok(Self::new(
            bearer_token,
            account_id,
            default_project_id,
            organization_id,
        ))
    }
}

fn first_record<'a>(body: &Fields<'a>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|k| body.array(k))
        .and_then(|items| items.first())
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("bearer_token", &"***")
            .field("account_id", &self.account_id)
            .field("default_project_id", &self.default_project_id)
            .field("organization_id", &self.organization_id)
            .finish()
    }
}

impl ThetaClient {
    /// Exchange credentials for a session and keep it on the client
    ///
    /// Every failure mode (transport, decode, non-success envelope, missing
    /// user, empty token) is reported as `ThetaError::Auth`.
    pub async fn authenticate(&mut self, credentials: &Credentials) -> Result<&Session> {
        let url = self.config().login_url();
        info!("Logging in to Theta API as {}", credentials.principal());

        let bytes = self
            .send_anonymous(Method::POST, &url, Some(&credentials.login_payload()))
            .await
            .map_err(|e| ThetaError::Auth(e.to_string()))?;

        let response =
            parse_json(&bytes, "login response").map_err(|e| ThetaError::Auth(e.to_string()))?;

        match envelope_status(&response) {
            Some(crate::config::api::STATUS_SUCCESS) => {}
            Some(status) => {
                return Err(ThetaError::Auth(format!(
                    "login returned status '{}'",
                    status
                )))
            }
            None => {
                return Err(ThetaError::Auth(
                    "login response is not a {status, body} envelope".to_string(),
                ))
            }
        }

        let session = Session::from_login_body(&response["body"])?;
        debug!(
            "Authenticated as account {} (project {:?}, org {:?})",
            session.account_id(),
            session.default_project_id(),
            session.organization_id()
        );

        self.set_session(session);
        self.require_session()
    }

    /// Explicit project id, else the session's default project
    pub fn resolve_project_id(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(id) = explicit.filter(|id| !id.is_empty()) {
            return Ok(id.to_string());
        }
        self.require_session()?
            .default_project_id()
            .map(str::to_string)
            .ok_or_else(|| {
                ThetaError::Config("no project id given and the account has no default project".to_string())
            })
    }

    /// Explicit organization id, else the session's organization
    pub fn resolve_organization_id(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(id) = explicit.filter(|id| !id.is_empty()) {
            return Ok(id.to_string());
        }
        self.require_session()?
            .organization_id()
            .map(str::to_string)
            .ok_or_else(|| {
                ThetaError::Config("no organization id given and the account has none".to_string())
            })
    }
}
