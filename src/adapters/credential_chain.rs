//! Ambient Azure credentials: service principal from the environment, then the Azure CLI.

use std::process::Command;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use reqwest::blocking::Client;
use serde::Deserialize;
use url::Url;

use crate::domain::{AccessToken, AppError, ArmConfig};
use crate::ports::TokenCredential;

pub const TENANT_ID_ENV: &str = "AZURE_TENANT_ID";
pub const CLIENT_ID_ENV: &str = "AZURE_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "AZURE_CLIENT_SECRET";

/// Tries each source in order and returns the first token obtained.
pub struct ChainedTokenCredential {
    sources: Vec<Box<dyn TokenCredential>>,
}

impl ChainedTokenCredential {
    pub fn new(sources: Vec<Box<dyn TokenCredential>>) -> Self {
        Self { sources }
    }

    /// Environment service principal, then Azure CLI.
    pub fn ambient(config: &ArmConfig) -> Result<Self, AppError> {
        let environment =
            EnvironmentCredential::from_lookup(config, |key| std::env::var(key).ok())?;
        Ok(Self::new(vec![Box::new(environment), Box::new(AzureCliCredential)]))
    }
}

impl TokenCredential for ChainedTokenCredential {
    fn name(&self) -> &str {
        "credential chain"
    }

    fn get_token(&self, scope: &str) -> Result<AccessToken, AppError> {
        let mut attempts = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            match source.get_token(scope) {
                Ok(token) => {
                    tracing::debug!(credential = source.name(), "credential source succeeded");
                    return Ok(token);
                }
                Err(err) => {
                    tracing::debug!(credential = source.name(), error = %err, "credential source failed");
                    attempts.push(err.to_string());
                }
            }
        }
        Err(AppError::CredentialUnavailable { attempts })
    }
}

struct ClientSecret {
    tenant_id: String,
    client_id: String,
    client_secret: String,
}

/// Client-credentials grant using `AZURE_TENANT_ID` / `AZURE_CLIENT_ID` / `AZURE_CLIENT_SECRET`.
pub struct EnvironmentCredential {
    secret: Option<ClientSecret>,
    authority_host: Url,
    client: Client,
}

impl EnvironmentCredential {
    pub fn from_lookup<F>(config: &ArmConfig, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let secret = match (value(TENANT_ID_ENV), value(CLIENT_ID_ENV), value(CLIENT_SECRET_ENV)) {
            (Some(tenant_id), Some(client_id), Some(client_secret)) => {
                Some(ClientSecret { tenant_id, client_id, client_secret })
            }
            _ => None,
        };
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { secret, authority_host: config.authority_host.clone(), client })
    }

    fn failed(&self, reason: impl Into<String>) -> AppError {
        AppError::CredentialFailed { source_name: self.name().to_string(), reason: reason.into() }
    }

    fn token_url(&self, tenant_id: &str) -> Result<Url, AppError> {
        let raw = format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority_host.as_str().trim_end_matches('/'),
            tenant_id
        );
        Url::parse(&raw).map_err(|e| self.failed(format!("invalid token URL {}: {}", raw, e)))
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

impl TokenCredential for EnvironmentCredential {
    fn name(&self) -> &str {
        "environment"
    }

    fn get_token(&self, scope: &str) -> Result<AccessToken, AppError> {
        let Some(secret) = &self.secret else {
            return Err(self.failed(format!(
                "{}, {} and {} are not all set",
                TENANT_ID_ENV, CLIENT_ID_ENV, CLIENT_SECRET_ENV
            )));
        };

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", secret.client_id.as_str()),
            ("client_secret", secret.client_secret.as_str()),
            ("scope", scope),
        ];
        let response = self
            .client
            .post(self.token_url(&secret.tenant_id)?)
            .form(&form)
            .send()
            .map_err(|e| self.failed(format!("token request failed: {}", e)))?;

        let status = response.status();
        let body = response.text().unwrap_or_default();
        if !status.is_success() {
            let reason = serde_json::from_str::<TokenErrorResponse>(&body)
                .map(|e| match e.error_description {
                    Some(description) => format!("{}: {}", e.error, description),
                    None => e.error,
                })
                .unwrap_or_else(|_| format!("token endpoint returned {}", status.as_u16()));
            return Err(self.failed(reason));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| self.failed(format!("failed to parse token response: {}", e)))?;
        let expires_on = Utc::now() + chrono::Duration::seconds(token.expires_in);
        Ok(AccessToken::new(token.access_token, expires_on))
    }
}

/// Token from `az account get-access-token`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AzureCliCredential;

impl AzureCliCredential {
    fn command(scope: &str) -> Command {
        let args = ["account", "get-access-token", "--scope", scope, "--output", "json"];
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg("az").args(args);
            cmd
        } else {
            let mut cmd = Command::new("az");
            cmd.args(args);
            cmd
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CliTokenResponse {
    access_token: String,
    #[serde(default)]
    expires_on: Option<String>,
    #[serde(default, rename = "expires_on")]
    expires_on_epoch: Option<i64>,
}

/// Parse the JSON printed by `az account get-access-token`.
pub fn parse_cli_token(stdout: &str) -> Result<AccessToken, AppError> {
    let parsed: CliTokenResponse = serde_json::from_str(stdout).map_err(|e| {
        AppError::ParseError { what: "az access token".into(), details: e.to_string() }
    })?;

    let expires_on = match (parsed.expires_on_epoch, parsed.expires_on.as_deref()) {
        (Some(epoch), _) => DateTime::<Utc>::from_timestamp(epoch, 0),
        (None, Some(local)) => NaiveDateTime::parse_from_str(local, "%Y-%m-%d %H:%M:%S%.f")
            .ok()
            .and_then(|naive| Local.from_local_datetime(&naive).single())
            .map(|dt| dt.with_timezone(&Utc)),
        (None, None) => None,
    }
    .ok_or_else(|| AppError::ParseError {
        what: "az access token".into(),
        details: "missing or invalid expiry".into(),
    })?;

    Ok(AccessToken::new(parsed.access_token, expires_on))
}

impl TokenCredential for AzureCliCredential {
    fn name(&self) -> &str {
        "azure cli"
    }

    fn get_token(&self, scope: &str) -> Result<AccessToken, AppError> {
        let failed = |reason: String| AppError::CredentialFailed {
            source_name: self.name().to_string(),
            reason,
        };

        let output = Self::command(scope)
            .output()
            .map_err(|e| failed(format!("failed to execute az: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(failed(if stderr.is_empty() {
                "az account get-access-token failed; run 'az login'".to_string()
            } else {
                stderr
            }));
        }

        parse_cli_token(&String::from_utf8_lossy(&output.stdout)).map_err(|e| failed(e.to_string()))
    }
}
