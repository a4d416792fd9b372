//! AI Foundry project identifiers and the workspace lookup result.

use serde::Deserialize;

use crate::domain::AppError;

/// The three user-supplied coordinates that locate a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    pub subscription_id: String,
    pub resource_group: String,
    pub project_name: String,
}

impl ProjectRef {
    /// Build a reference, rejecting blank values.
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group: impl Into<String>,
        project_name: impl Into<String>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            subscription_id: require_non_empty("subscription ID", subscription_id.into())?,
            resource_group: require_non_empty("resource group", resource_group.into())?,
            project_name: require_non_empty("project name", project_name.into())?,
        })
    }
}

/// Trim `value` and fail if nothing remains.
pub fn require_non_empty(what: &str, value: String) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{} must not be empty", what)));
    }
    Ok(trimmed.to_string())
}

/// A `Microsoft.MachineLearningServices/workspaces` resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Workspace {
    /// Full ARM resource ID; used as the role assignment scope.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
}
