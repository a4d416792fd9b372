use crate::domain::{AppError, NewRoleAssignment, RoleAssignment, RoleDefinition};

/// Port for the `Microsoft.Authorization` management API.
pub trait AuthorizationClient {
    /// List role assignments at `scope` whose principal is `principal_id`.
    fn list_role_assignments(
        &self,
        scope: &str,
        principal_id: &str,
    ) -> Result<Vec<RoleAssignment>, AppError>;

    /// Resolve a role definition from its fully qualified ID.
    fn get_role_definition(&self, role_definition_id: &str) -> Result<RoleDefinition, AppError>;

    /// List role definitions visible at `scope` whose name equals `role_name`.
    fn find_role_definitions(
        &self,
        scope: &str,
        role_name: &str,
    ) -> Result<Vec<RoleDefinition>, AppError>;

    /// Create a role assignment.
    fn create_role_assignment(
        &self,
        assignment: &NewRoleAssignment,
    ) -> Result<RoleAssignment, AppError>;
}
