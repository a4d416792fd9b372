use crate::domain::{AppError, ProjectRef, Workspace};

/// Port for the machine learning workspace management API.
pub trait WorkspaceClient {
    /// Fetch the workspace backing an AI Foundry project.
    fn get_workspace(&self, project: &ProjectRef) -> Result<Workspace, AppError>;
}
