/// Configuration constants for the Theta EdgeCloud API
pub mod api {
    /// Account API host (login, organizations, projects)
    pub const API_URL: &str = "https://api.thetaedgecloud.com";

    /// Controller host (deployments, deployment templates)
    pub const CONTROLLER_URL: &str = "https://controller.thetaedgecloud.com";

    /// Login endpoint path
    pub const LOGIN_PATH: &str = "/user/login";

    /// Relationships expanded in the login response
    pub const LOGIN_EXPAND: &str = "redirect_project_id.org_id";

    /// Deployment endpoint (create)
    pub const DEPLOYMENT: &str = "deployment";

    /// Deployment endpoint shard segment used for get/update/delete
    pub const DEPLOYMENT_SHARD: &str = "1";

    /// Deployment list endpoint
    pub const DEPLOYMENTS_LIST: &str = "deployments/list";

    /// Deployment template endpoint
    pub const DEPLOYMENT_TEMPLATE: &str = "deployment_template";

    /// Custom template list endpoint (relative to DEPLOYMENT_TEMPLATE)
    pub const LIST_CUSTOM_TEMPLATES: &str = "list_custom_templates";

    /// Project endpoint
    pub const PROJECT: &str = "project";

    /// Users endpoint (organizations and projects are scoped under the user)
    pub const USER: &str = "user";

    /// Organization segment under a user
    pub const ORGANIZATION: &str = "organization";

    /// Organizations of a user
    pub const ORGS: &str = "orgs";

    /// Projects of an organization
    pub const PROJECTS: &str = "projects";

    /// Envelope status value reported on success
    pub const STATUS_SUCCESS: &str = "success";

    /// Page size for template listing
    pub const TEMPLATE_PAGE_SIZE: u32 = 100;

    /// Upper bound on template pages fetched by one listing
    pub const MAX_TEMPLATE_PAGES: u32 = 50;

    /// Request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Headers the backend's bot filter expects on every authenticated request
pub mod headers {
    /// Encodings advertised to the server (all of which we can decode)
    pub const ACCEPT_ENCODING: &str = "gzip, deflate, br";

    /// Browser-impersonation headers, sent verbatim
    pub const BROWSER: &[(&str, &str)] = &[
        ("Accept", "*/*"),
        ("Accept-Language", "en-GB,en;q=0.8"),
        ("Origin", "https://www.thetaedgecloud.com"),
        ("Referer", "https://www.thetaedgecloud.com/"),
        (
            "Sec-Ch-Ua",
            "\"Brave\";v=\"123\", \"Not:A-Brand\";v=\"8\", \"Chromium\";v=\"123\"",
        ),
        ("Sec-Ch-Ua-Mobile", "?0"),
        ("Sec-Ch-Ua-Platform", "\"macOS\""),
        ("Sec-Fetch-Dest", "empty"),
        ("Sec-Fetch-Mode", "cors"),
        ("Sec-Fetch-Site", "same-site"),
        ("Sec-Gpc", "1"),
        (
            "User-Agent",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
        ),
        ("X-Platform", "web"),
    ];

    /// JSON keys whose values must never reach logs or error messages
    pub const SENSITIVE_KEYS: &[&str] = &["password", "api_secret", "auth_password", "auth_token"];
}

/// Configuration constants for credentials
pub mod credentials {
    /// Environment variables for email/password login
    pub const EMAIL_ENV_VAR: &str = "THETA_EMAIL";
    pub const PASSWORD_ENV_VAR: &str = "THETA_PASSWORD";

    /// Environment variables for API key login
    pub const API_KEY_ENV_VAR: &str = "THETA_API_KEY";
    pub const API_SECRET_ENV_VAR: &str = "THETA_API_SECRET";

    /// Credentials file path (relative to HOME)
    pub const FILE_PATH: &str = ".theta/credentials.json";
}

/// Readiness polling defaults
pub mod readiness {
    /// Maximum number of probes before giving up
    pub const MAX_ATTEMPTS: u32 = 60;

    /// Seconds between probes
    pub const INTERVAL_SECS: u64 = 10;

    /// Per-probe request timeout in seconds
    pub const PROBE_TIMEOUT_SECS: u64 = 10;
}

/// Default values for CLI
pub mod defaults {
    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}
