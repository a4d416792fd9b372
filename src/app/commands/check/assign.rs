//! Role assignment creation and manual fallback instructions.

use crate::domain::{AppError, NewRoleAssignment, RoleAssignment};
use crate::ports::{AuthorizationClient, Terminal};

/// Result of an assignment attempt once the user has opted in.
#[derive(Debug)]
pub enum AssignmentResult {
    DefinitionNotFound,
    Created(RoleAssignment),
    /// The create call failed; the error is reported, not propagated.
    Failed(AppError),
}

/// Look up `role_name` at `scope` and bind it to `principal_id` as a user.
///
/// Only the definition lookup propagates errors.
pub fn assign_role<C: AuthorizationClient>(
    client: &C,
    scope: &str,
    principal_id: &str,
    role_name: &str,
) -> Result<AssignmentResult, AppError> {
    let definitions = client.find_role_definitions(scope, role_name)?;
    let Some(definition) = definitions.into_iter().next() else {
        return Ok(AssignmentResult::DefinitionNotFound);
    };

    let request = NewRoleAssignment::for_user(scope, definition.id, principal_id);
    tracing::debug!(assignment = %request.name, role = role_name, "creating role assignment");

    Ok(match client.create_role_assignment(&request) {
        Ok(created) => AssignmentResult::Created(created),
        Err(err) => {
            tracing::warn!(error = %err, "role assignment creation failed");
            AssignmentResult::Failed(err)
        }
    })
}

pub fn print_manual_steps<T: Terminal>(terminal: &T, project_name: &str, role_name: &str) {
    terminal.say("\nPlease assign via Azure Portal:");
    terminal.say("1. Go to https://ai.azure.com");
    terminal.say(&format!("2. Select project: {}", project_name));
    terminal.say("3. Settings → Permissions → Add member");
    terminal.say(&format!("4. Select role: {}", role_name));
}
