use std::io;

use thiserror::Error;

/// Library-wide error type for foundry-role operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Configuration file content is invalid.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// User-supplied value failed validation.
    #[error("{0}")]
    Validation(String),

    /// No credential source in the chain produced a token.
    #[error("No Azure credential available:\n{}", join_lines(.attempts))]
    CredentialUnavailable { attempts: Vec<String> },

    /// A single credential source failed.
    #[error("{source_name}: {reason}")]
    CredentialFailed { source_name: String, reason: String },

    /// Azure Resource Manager returned an error response.
    #[error("{}", format_arm_error(.status, .code, .message))]
    ArmApi { status: Option<u16>, code: Option<String>, message: String },

    /// External tool execution failed.
    #[error("{tool} failed: {error}")]
    ExternalToolError { tool: String, error: String },

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    pub fn arm<S: Into<String>>(message: S, status: Option<u16>) -> Self {
        AppError::ArmApi { status, code: None, message: message.into() }
    }

    /// HTTP status of an ARM failure, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::ArmApi { status, .. } => *status,
            _ => None,
        }
    }
}

fn join_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("  - {}", line)).collect::<Vec<_>>().join("\n")
}

fn format_arm_error(status: &Option<u16>, code: &Option<String>, message: &str) -> String {
    match (status, code) {
        (Some(status), Some(code)) => format!("({}) {}: {}", status, code, message),
        (Some(status), None) => format!("({}) {}", status, message),
        (None, Some(code)) => format!("{}: {}", code, message),
        (None, None) => message.to_string(),
    }
}
