use crate::domain::AppError;
use crate::ports::IdentityProbe;

/// Probe that either returns a fixed ID or fails like a missing command.
pub struct FakeIdentityProbe {
    user_id: Option<String>,
}

impl FakeIdentityProbe {
    pub fn returning(user_id: impl Into<String>) -> Self {
        Self { user_id: Some(user_id.into()) }
    }

    pub fn failing() -> Self {
        Self { user_id: None }
    }
}

impl IdentityProbe for FakeIdentityProbe {
    fn current_user_id(&self) -> Result<String, AppError> {
        self.user_id.clone().ok_or_else(|| AppError::ExternalToolError {
            tool: "powershell".into(),
            error: "exited with exit status: 1".into(),
        })
    }
}
