use crate::domain::AppError;

/// Port for discovering the signed-in user's directory object ID.
pub trait IdentityProbe {
    fn current_user_id(&self) -> Result<String, AppError>;
}
