use crate::domain::{AccessToken, AppError};

/// Source of bearer tokens for Azure Resource Manager.
pub trait TokenCredential {
    /// Short label used in diagnostics and aggregated failures.
    fn name(&self) -> &str;

    /// Acquire a token for `scope` (e.g. `https://management.azure.com/.default`).
    fn get_token(&self, scope: &str) -> Result<AccessToken, AppError>;
}
