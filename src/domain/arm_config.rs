//! Azure endpoint configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

pub const RESOURCE_MANAGER_URL_ENV: &str = "AZURE_RESOURCE_MANAGER_URL";
pub const AUTHORITY_HOST_ENV: &str = "AZURE_AUTHORITY_HOST";

/// Endpoints, API versions, and probe command used for one run.
///
/// Every field has a default, so an absent config file yields a working
/// configuration against the public Azure cloud.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArmConfig {
    /// Azure Resource Manager base URL.
    #[serde(default = "default_resource_manager_url")]
    pub resource_manager_url: Url,
    /// Entra ID authority used by the client-secret credential.
    #[serde(default = "default_authority_host")]
    pub authority_host: Url,
    /// OAuth scope requested for ARM tokens.
    #[serde(default = "default_token_scope")]
    pub token_scope: String,
    /// `api-version` for workspace lookups.
    #[serde(default = "default_workspace_api_version")]
    pub workspace_api_version: String,
    /// `api-version` for role assignment and role definition calls.
    #[serde(default = "default_authorization_api_version")]
    pub authorization_api_version: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Program and arguments printing the caller's object ID on stdout.
    #[serde(default = "default_identity_command")]
    pub identity_command: Vec<String>,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            resource_manager_url: default_resource_manager_url(),
            authority_host: default_authority_host(),
            token_scope: default_token_scope(),
            workspace_api_version: default_workspace_api_version(),
            authorization_api_version: default_authorization_api_version(),
            timeout_secs: default_timeout(),
            identity_command: default_identity_command(),
        }
    }
}

impl ArmConfig {
    /// Load from an optional TOML file, then apply environment overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Err(AppError::config_error(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(content)?)
    }

    /// Override endpoints from the environment variables the Azure SDKs honor.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(RESOURCE_MANAGER_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.resource_manager_url = parse_url(RESOURCE_MANAGER_URL_ENV, &value)?;
        }
        if let Some(value) = lookup(AUTHORITY_HOST_ENV).filter(|v| !v.trim().is_empty()) {
            self.authority_host = parse_url(AUTHORITY_HOST_ENV, &value)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        if self.token_scope.trim().is_empty() {
            return Err(AppError::InvalidConfig("token_scope must not be empty".to_string()));
        }
        if self.workspace_api_version.trim().is_empty()
            || self.authorization_api_version.trim().is_empty()
        {
            return Err(AppError::InvalidConfig("api versions must not be empty".to_string()));
        }
        match self.identity_command.first() {
            Some(program) if !program.trim().is_empty() => Ok(()),
            _ => Err(AppError::InvalidConfig(
                "identity_command must name a program".to_string(),
            )),
        }
    }
}

fn parse_url(key: &str, value: &str) -> Result<Url, AppError> {
    Url::parse(value.trim())
        .map_err(|e| AppError::InvalidConfig(format!("{} is not a valid URL: {}", key, e)))
}

fn default_resource_manager_url() -> Url {
    Url::parse("https://management.azure.com/").expect("Default ARM URL must be valid")
}

fn default_authority_host() -> Url {
    Url::parse("https://login.microsoftonline.com/").expect("Default authority must be valid")
}

fn default_token_scope() -> String {
    "https://management.azure.com/.default".to_string()
}

fn default_workspace_api_version() -> String {
    "2024-04-01".to_string()
}

fn default_authorization_api_version() -> String {
    "2022-04-01".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_identity_command() -> Vec<String> {
    vec![
        "powershell".to_string(),
        "-Command".to_string(),
        "(Get-AzAccessToken -ResourceUrl 'https://graph.microsoft.com').UserId".to_string(),
    ]
}
