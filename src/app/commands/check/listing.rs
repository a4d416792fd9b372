//! Role assignments held by the caller at the project scope.

use crate::domain::{AppError, RoleAssignment};
use crate::ports::AuthorizationClient;

/// An assignment paired with its resolved role name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedAssignment {
    pub assignment: RoleAssignment,
    pub role_name: String,
}

/// List `principal_id`'s assignments at `scope`, resolving each role name.
///
/// A failed definition lookup aborts the listing.
pub fn list_assignments<C: AuthorizationClient>(
    client: &C,
    scope: &str,
    principal_id: &str,
) -> Result<Vec<ListedAssignment>, AppError> {
    let assignments = client.list_role_assignments(scope, principal_id)?;
    tracing::debug!(count = assignments.len(), scope, "listed role assignments");

    assignments
        .into_iter()
        .map(|assignment| {
            let definition = client.get_role_definition(&assignment.role_definition_id)?;
            Ok(ListedAssignment { assignment, role_name: definition.role_name })
        })
        .collect()
}
