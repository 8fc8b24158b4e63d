use std::time::Duration;

use crate::sheets::SheetsSettings;

/// Default identity header set by the identity-aware proxy
pub const DEFAULT_IDENTITY_HEADER: &str = "x-goog-authenticated-user-email";

pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";

/// Where tabs are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Google Sheets API v4
    Google,
    /// In-process tabs, lost on restart
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Google => "google",
            StoreBackend::Memory => "memory",
        }
    }
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 8080 | listen port |
/// | ENVIRONMENT | development | development / production |
/// | STORE_BACKEND | google (memory in development without SPREADSHEET_ID) | `google` or `memory` |
/// | SPREADSHEET_ID | - | target spreadsheet |
/// | SHEETS_API_BASE | https://sheets.googleapis.com/v4 | API base URL |
/// | SHEETS_ACCESS_TOKEN | - | static bearer token (metadata server when absent) |
/// | IDENTITY_HEADER | x-goog-authenticated-user-email | session identity header |
/// | ADMIN_EMAILS | - | comma separated admin emails |
/// | REQUEST_TIMEOUT_MS | 30000 | outbound API timeout |
/// | LOG_LEVEL | info | log level |
/// | LOG_DIR | - | daily rolling log directory |
///
/// # Example
///
/// ```ignore
/// SPREADSHEET_ID=1AbC... ADMIN_EMAILS=owner@example.com cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    /// development | production
    pub environment: String,
    pub store_backend: StoreBackend,
    pub spreadsheet_id: Option<String>,
    pub sheets_api_base: String,
    pub sheets_access_token: Option<String>,
    /// Header carrying the caller's email
    pub identity_header: String,
    pub admin_emails: Vec<String>,
    /// Outbound spreadsheet request timeout (ms)
    pub request_timeout_ms: u64,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to the defaults above
    pub fn from_env() -> Self {
        let environment = env_or("ENVIRONMENT", "development");
        let spreadsheet_id = env_opt("SPREADSHEET_ID");
        let store_backend = match env_opt("STORE_BACKEND").as_deref() {
            Some("memory") => StoreBackend::Memory,
            Some("google") => StoreBackend::Google,
            Some(other) => {
                tracing::warn!(backend = %other, "Unknown STORE_BACKEND, using google");
                StoreBackend::Google
            }
            None if environment == "development" && spreadsheet_id.is_none() => {
                StoreBackend::Memory
            }
            None => StoreBackend::Google,
        };

        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment,
            store_backend,
            spreadsheet_id,
            sheets_api_base: env_or("SHEETS_API_BASE", DEFAULT_SHEETS_API_BASE),
            sheets_access_token: env_opt("SHEETS_ACCESS_TOKEN"),
            identity_header: env_or("IDENTITY_HEADER", DEFAULT_IDENTITY_HEADER).to_lowercase(),
            admin_emails: env_opt("ADMIN_EMAILS")
                .map(|v| parse_email_list(&v))
                .unwrap_or_default(),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            log_level: env_or("LOG_LEVEL", "info"),
            log_dir: env_opt("LOG_DIR"),
        }
    }

    /// In-memory configuration, used by tests and local runs
    pub fn in_memory(admin_emails: &[&str]) -> Self {
        Self {
            http_port: 8080,
            environment: "development".into(),
            store_backend: StoreBackend::Memory,
            spreadsheet_id: None,
            sheets_api_base: DEFAULT_SHEETS_API_BASE.into(),
            sheets_access_token: None,
            identity_header: DEFAULT_IDENTITY_HEADER.into(),
            admin_emails: admin_emails.iter().map(|e| e.to_string()).collect(),
            request_timeout_ms: 30000,
            log_level: "info".into(),
            log_dir: None,
        }
    }

    /// Settings for the Google backend; `None` without a spreadsheet id
    pub fn sheets_settings(&self) -> Option<SheetsSettings> {
        Some(SheetsSettings {
            spreadsheet_id: self.spreadsheet_id.clone()?,
            api_base: self.sheets_api_base.clone(),
            access_token: self.sheets_access_token.clone(),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

/// Split a comma separated list, dropping blanks
pub fn parse_email_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}
