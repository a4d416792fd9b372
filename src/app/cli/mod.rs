//! CLI Adapter.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::api::{self, AssignDecision, CheckOptions, CheckOutcome};
use crate::domain::{AppError, TARGET_ROLE_NAME};

#[derive(Parser)]
#[command(name = "foundry-role")]
#[command(version)]
#[command(
    about = "Check for and grant the Azure AI Developer role on an AI Foundry project",
    long_about = None
)]
struct Cli {
    /// Azure subscription ID (prompted if omitted)
    #[arg(short = 's', long, env = "AZURE_SUBSCRIPTION_ID")]
    subscription_id: Option<String>,
    /// Resource group containing the project (prompted if omitted)
    #[arg(short = 'g', long, env = "AZURE_RESOURCE_GROUP")]
    resource_group: Option<String>,
    /// AI Foundry project name (prompted if omitted)
    #[arg(short = 'p', long, env = "AZURE_AI_PROJECT_NAME")]
    project_name: Option<String>,
    /// Entra ID object ID of the user (skips identity discovery)
    #[arg(short = 'u', long)]
    user_id: Option<String>,
    /// Role to check for and assign
    #[arg(long, default_value = TARGET_ROLE_NAME)]
    role: String,
    /// Assign the role without asking
    #[arg(short = 'y', long, conflicts_with = "no_assign")]
    yes: bool,
    /// Only report; never assign
    #[arg(long, conflicts_with = "yes")]
    no_assign: bool,
    /// Project endpoint, shown for reference only
    #[arg(long, env = "AZURE_AI_PROJECT_ENDPOINT", hide_env_values = true)]
    project_endpoint: Option<String>,
    /// Path to a TOML config file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
    /// Enable debug logging on stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> CheckOptions {
        let assign = if self.yes {
            AssignDecision::Yes
        } else if self.no_assign {
            AssignDecision::No
        } else {
            AssignDecision::Ask
        };

        CheckOptions {
            subscription_id: self.subscription_id.clone(),
            resource_group: self.resource_group.clone(),
            project_name: self.project_name.clone(),
            user_id: self.user_id.clone(),
            role_name: self.role.clone(),
            assign,
            project_endpoint: self.project_endpoint.clone(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "foundry_role=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point for the CLI.
pub fn run() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<CheckOutcome, AppError> = api::check(&cli.options(), cli.config.as_deref());

    match result {
        Ok(outcome) => tracing::debug!(?outcome, "finished"),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
