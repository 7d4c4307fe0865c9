//! Credential resolution from multiple sources

use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::credentials;
use crate::error::{Result, ThetaError};
use crate::theta::session::Credentials;

/// Credentials passed on the command line
#[derive(Debug, Default, Clone)]
pub struct CredentialArgs {
    pub email: Option<String>,
    pub password: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

/// Credentials file structure; either pair may be present
#[derive(Deserialize, Default)]
struct CredentialsFile {
    email: Option<String>,
    password: Option<String>,
    api_key: Option<String>,
    api_secret: Option<String>,
}

/// Credential resolution with fallback logic
pub struct CredentialResolver {
    file_path: Option<PathBuf>,
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialResolver {
    /// Resolver using the default credentials file location
    pub fn new() -> Self {
        Self {
            file_path: dirs::home_dir().map(|p| p.join(credentials::FILE_PATH)),
        }
    }

    /// Resolver reading a specific credentials file
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: Some(path.into()),
        }
    }

    /// Resolve credentials from multiple sources with fallback:
    /// 1. CLI arguments
    /// 2. Environment variables (THETA_EMAIL/THETA_PASSWORD, then THETA_API_KEY/THETA_API_SECRET)
    /// 3. Credentials file (~/.theta/credentials.json)
    pub fn resolve(&self, cli: &CredentialArgs) -> Result<Credentials> {
        self.resolve_with_env(cli, |name| std::env::var(name).ok())
    }

    fn resolve_with_env<F>(&self, cli: &CredentialArgs, env: F) -> Result<Credentials>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 1. CLI arguments take precedence
        if let Some(creds) = pair(
            cli.email.clone(),
            cli.password.clone(),
            cli.api_key.clone(),
            cli.api_secret.clone(),
        ) {
            debug!("Using credentials from CLI arguments");
            return Ok(creds);
        }

        // 2. Environment variables
        if let Some(creds) = pair(
            env(credentials::EMAIL_ENV_VAR),
            env(credentials::PASSWORD_ENV_VAR),
            env(credentials::API_KEY_ENV_VAR),
            env(credentials::API_SECRET_ENV_VAR),
        ) {
            debug!("Using credentials from environment variables");
            return Ok(creds);
        }

        // 3. Credentials file
        debug!("No credentials in CLI arguments or environment, trying credentials file");
        self.read_from_credentials_file()
    }

    fn read_from_credentials_file(&self) -> Result<Credentials> {
        let path = self
            .file_path
            .as_deref()
            .ok_or_else(|| ThetaError::Credentials(not_found_message(None)))?;

        debug!("Looking for credentials file at: {}", path.display());

        let Ok(content) = fs::read_to_string(path) else {
            return Err(ThetaError::Credentials(not_found_message(Some(path))));
        };

        let file: CredentialsFile = serde_json::from_str(&content).map_err(|e| {
            ThetaError::Credentials(format!(
                "Could not parse credentials file {}: {}",
                path.display(),
                e
            ))
        })?;

        pair(file.email, file.password, file.api_key, file.api_secret)
            .inspect(|_| debug!("Using credentials from file {}", path.display()))
            .ok_or_else(|| ThetaError::Credentials(not_found_message(Some(path))))
    }
}

/// Pick the first complete pair; email/password wins over an API key
fn pair(
    email: Option<String>,
    password: Option<String>,
    api_key: Option<String>,
    api_secret: Option<String>,
) -> Option<Credentials> {
    let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());

    if present(&email) && present(&password) {
        return Some(Credentials::email(email?, password?));
    }
    if present(&api_key) && present(&api_secret) {
        return Some(Credentials::api_key(api_key?, api_secret?));
    }
    None
}

fn not_found_message(path: Option<&Path>) -> String {
    let file_info = path
        .map(|p| format!(" or in credentials file {}", p.display()))
        .unwrap_or_default();

    format!(
        "No Theta credentials found. Please provide them using one of:\n\
         \n\
         1. CLI arguments:     theta-provider --email <EMAIL> --password <PASSWORD>\n\
         \x20                     (or --api-key <KEY> --api-secret <SECRET>)\n\
         2. Environment vars:  export {}=<EMAIL> {}=<PASSWORD>\n\
         \x20                     (or {} and {})\n\
         3. Credentials file:  ~/{} with {{\"email\", \"password\"}} or {{\"api_key\", \"api_secret\"}}\n\
         \n\
         Checked: CLI arguments, environment{}",
        credentials::EMAIL_ENV_VAR,
        credentials::PASSWORD_ENV_VAR,
        credentials::API_KEY_ENV_VAR,
        credentials::API_SECRET_ENV_VAR,
        credentials::FILE_PATH,
        file_info
    )
}
