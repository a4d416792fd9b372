pub mod access_token;
pub mod arm_config;
pub mod error;
pub mod project;
pub mod role;

pub use access_token::AccessToken;
pub use arm_config::ArmConfig;
pub use error::AppError;
pub use project::{ProjectRef, Workspace, require_non_empty};
pub use role::{
    NewRoleAssignment, PrincipalType, RoleAssignment, RoleDefinition, TARGET_ROLE_NAME, has_role,
};
