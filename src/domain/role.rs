//! Role assignment and role definition models.

use std::fmt;

use uuid::Uuid;

/// Role granted when the caller does not already hold it.
pub const TARGET_ROLE_NAME: &str = "Azure AI Developer";

/// Kind of security principal a role assignment binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrincipalType {
    #[default]
    User,
    Group,
    ServicePrincipal,
    ForeignGroup,
    Device,
}

impl PrincipalType {
    /// ARM wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalType::User => "User",
            PrincipalType::Group => "Group",
            PrincipalType::ServicePrincipal => "ServicePrincipal",
            PrincipalType::ForeignGroup => "ForeignGroup",
            PrincipalType::Device => "Device",
        }
    }

    /// Parse an ARM wire value; unknown kinds yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "User" => Some(PrincipalType::User),
            "Group" => Some(PrincipalType::Group),
            "ServicePrincipal" => Some(PrincipalType::ServicePrincipal),
            "ForeignGroup" => Some(PrincipalType::ForeignGroup),
            "Device" => Some(PrincipalType::Device),
            _ => None,
        }
    }
}

impl fmt::Display for PrincipalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An existing binding of principal → role definition at a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    pub id: String,
    pub name: String,
    pub scope: String,
    pub role_definition_id: String,
    pub principal_id: String,
    pub principal_type: Option<PrincipalType>,
}

/// A named set of permitted actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDefinition {
    pub id: String,
    pub role_name: String,
}

/// Parameters for creating a role assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoleAssignment {
    /// Unique assignment name (a GUID).
    pub name: String,
    pub scope: String,
    pub role_definition_id: String,
    pub principal_id: String,
    pub principal_type: PrincipalType,
}

impl NewRoleAssignment {
    /// Bind `principal_id` as a user to `role_definition_id` under a fresh GUID name.
    pub fn for_user(
        scope: impl Into<String>,
        role_definition_id: impl Into<String>,
        principal_id: impl Into<String>,
    ) -> Self {
        Self {
            name: Uuid::new_v4().to_string(),
            scope: scope.into(),
            role_definition_id: role_definition_id.into(),
            principal_id: principal_id.into(),
            principal_type: PrincipalType::User,
        }
    }
}

/// True iff any role name contains `target` (case-sensitive).
pub fn has_role<S: AsRef<str>>(role_names: &[S], target: &str) -> bool {
    role_names.iter().any(|name| name.as_ref().contains(target))
}
