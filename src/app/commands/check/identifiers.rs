//! Project coordinates and caller identity.

use crate::domain::{AppError, ProjectRef, require_non_empty};
use crate::ports::{IdentityProbe, Terminal};

use super::CheckOptions;

const SUBSCRIPTION_PROMPT: &str = "Enter your Azure subscription ID";
const RESOURCE_GROUP_PROMPT: &str = "Enter your resource group name (e.g., rg-foundryhub)";
const PROJECT_NAME_PROMPT: &str = "Enter your AI Foundry project name (e.g., proj-default)";
const USER_ID_PROMPT: &str = "Enter your user object ID (from Azure Portal > Entra ID > Users)";

/// Take each coordinate from `options` or prompt for it.
///
/// Returns `Ok(None)` if any prompt is interrupted.
pub fn resolve_project<T: Terminal>(
    terminal: &T,
    options: &CheckOptions,
) -> Result<Option<ProjectRef>, AppError> {
    let Some(subscription_id) =
        value_or_prompt(terminal, options.subscription_id.as_deref(), SUBSCRIPTION_PROMPT)?
    else {
        return Ok(None);
    };
    let Some(resource_group) =
        value_or_prompt(terminal, options.resource_group.as_deref(), RESOURCE_GROUP_PROMPT)?
    else {
        return Ok(None);
    };
    let Some(project_name) =
        value_or_prompt(terminal, options.project_name.as_deref(), PROJECT_NAME_PROMPT)?
    else {
        return Ok(None);
    };

    ProjectRef::new(subscription_id, resource_group, project_name).map(Some)
}

/// Explicit ID, else the probe, else a prompt.
///
/// Probe failures are never fatal.
pub fn resolve_user_id<I: IdentityProbe, T: Terminal>(
    probe: &I,
    terminal: &T,
    explicit: Option<&str>,
) -> Result<Option<String>, AppError> {
    if let Some(user_id) = explicit {
        return require_non_empty("user ID", user_id.to_string()).map(Some);
    }

    match probe.current_user_id() {
        Ok(user_id) => {
            terminal.say(&format!("\n✓ Your user ID: {}", user_id));
            Ok(Some(user_id))
        }
        Err(err) => {
            tracing::debug!(error = %err, "identity probe failed; asking for user ID");
            terminal.say("");
            match terminal.ask(USER_ID_PROMPT)? {
                Some(user_id) => require_non_empty("user ID", user_id).map(Some),
                None => Ok(None),
            }
        }
    }
}

fn value_or_prompt<T: Terminal>(
    terminal: &T,
    value: Option<&str>,
    prompt: &str,
) -> Result<Option<String>, AppError> {
    match value {
        Some(value) => Ok(Some(value.to_string())),
        None => terminal.ask(prompt),
    }
}
