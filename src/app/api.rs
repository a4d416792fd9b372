//! API Facade for the application.
//!
//! Glues together configuration, real adapters, and command execution.

use std::path::Path;

use crate::adapters::arm_http::HttpArmClient;
use crate::adapters::credential_chain::ChainedTokenCredential;
use crate::adapters::dialoguer_terminal::DialoguerTerminal;
use crate::adapters::identity_command::CommandIdentityProbe;
use crate::app::AppContext;
use crate::app::commands::check;
use crate::domain::ArmConfig;

pub use crate::app::commands::check::{AssignDecision, CheckOptions, CheckOutcome};
pub use crate::domain::AppError;

/// Create an `AppContext` wired to Azure and the interactive console.
fn create_context(
    config: &ArmConfig,
) -> Result<AppContext<HttpArmClient, CommandIdentityProbe, DialoguerTerminal>, AppError> {
    let credential = ChainedTokenCredential::ambient(config)?;
    let arm = HttpArmClient::new(config, Box::new(credential))?;
    let identity = CommandIdentityProbe::new(&config.identity_command)?;
    Ok(AppContext::new(arm, identity, DialoguerTerminal))
}

/// Check the caller's roles on a project and optionally grant the target role.
pub fn check(options: &CheckOptions, config_path: Option<&Path>) -> Result<CheckOutcome, AppError> {
    let config = ArmConfig::load(config_path)?;
    tracing::debug!(
        resource_manager = %config.resource_manager_url,
        authority = %config.authority_host,
        "loaded configuration"
    );
    let ctx = create_context(&config)?;
    check::execute(&ctx, options)
}
