//! Check for the target role on an AI Foundry project and optionally grant it.

mod assign;
mod identifiers;
mod listing;

use crate::app::AppContext;
use crate::domain::{AppError, TARGET_ROLE_NAME, has_role};
use crate::ports::{AuthorizationClient, IdentityProbe, Terminal, WorkspaceClient};

pub use assign::AssignmentResult;
pub use identifiers::{resolve_project, resolve_user_id};
pub use listing::{ListedAssignment, list_assignments};

/// How to answer "assign it now?" when the role is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignDecision {
    /// Ask interactively.
    #[default]
    Ask,
    Yes,
    No,
}

/// Inputs for a check run; `None` values are prompted for.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub subscription_id: Option<String>,
    pub resource_group: Option<String>,
    pub project_name: Option<String>,
    pub user_id: Option<String>,
    pub role_name: String,
    pub assign: AssignDecision,
    /// Display-only project endpoint.
    pub project_endpoint: Option<String>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            subscription_id: None,
            resource_group: None,
            project_name: None,
            user_id: None,
            role_name: TARGET_ROLE_NAME.to_string(),
            assign: AssignDecision::Ask,
            project_endpoint: None,
        }
    }
}

/// Terminal state of a check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The principal already holds the role at the project scope.
    AlreadyAssigned,
    /// A new assignment was created.
    Assigned { assignment_name: String },
    /// The user chose not to assign.
    Declined,
    /// No role definition with the target name exists at the scope.
    RoleDefinitionNotFound,
    /// The create call failed; remediation was printed.
    AssignmentFailed { message: String },
    /// A prompt was interrupted.
    Cancelled,
}

pub fn execute<A, I, T>(ctx: &AppContext<A, I, T>, options: &CheckOptions) -> Result<CheckOutcome, AppError>
where
    A: WorkspaceClient + AuthorizationClient,
    I: IdentityProbe,
    T: Terminal,
{
    let terminal = ctx.terminal();
    terminal.say(&format!(
        "Project endpoint: {}",
        options.project_endpoint.as_deref().unwrap_or("(not set)")
    ));

    let Some(project) = resolve_project(terminal, options)? else {
        return Ok(CheckOutcome::Cancelled);
    };

    let workspace = ctx.arm().get_workspace(&project)?;
    terminal.say(&format!("\n✓ Found project: {}", project.project_name));
    terminal.say(&format!("  Resource ID: {}", workspace.id));

    let Some(user_id) = resolve_user_id(ctx.identity(), terminal, options.user_id.as_deref())?
    else {
        return Ok(CheckOutcome::Cancelled);
    };

    terminal.say("\n📋 Current role assignments on project:");
    let assignments = list_assignments(ctx.arm(), &workspace.id, &user_id)?;
    if assignments.is_empty() {
        terminal.say("  (No role assignments found)");
    }
    for listed in &assignments {
        terminal.say(&format!("  - {}", listed.role_name));
    }

    let role_names: Vec<&str> = assignments.iter().map(|a| a.role_name.as_str()).collect();
    if has_role(&role_names, &options.role_name) {
        terminal.say(&format!(
            "\n✅ You already have '{}' role on this project!",
            options.role_name
        ));
        return Ok(CheckOutcome::AlreadyAssigned);
    }

    terminal.say(&format!("\n⚠️  '{}' role not found.", options.role_name));
    let confirmed = match options.assign {
        AssignDecision::Yes => true,
        AssignDecision::No => false,
        AssignDecision::Ask => match terminal.ask("Do you want to assign it now? (y/n)")? {
            Some(answer) => answer.trim().eq_ignore_ascii_case("y"),
            None => return Ok(CheckOutcome::Cancelled),
        },
    };
    if !confirmed {
        return Ok(CheckOutcome::Declined);
    }

    let result = assign::assign_role(
        ctx.arm(),
        &workspace.id,
        &user_id,
        &options.role_name,
    )?;

    Ok(match result {
        AssignmentResult::DefinitionNotFound => {
            terminal.say(&format!("❌ Role definition not found for '{}'", options.role_name));
            CheckOutcome::RoleDefinitionNotFound
        }
        AssignmentResult::Created(assignment) => {
            terminal.say(&format!("\n✅ Successfully assigned '{}' role!", options.role_name));
            terminal.say("   Wait 5-10 minutes for the role to propagate, then retry your workload.");
            CheckOutcome::Assigned { assignment_name: assignment.name }
        }
        AssignmentResult::Failed(err) => {
            let message = err.to_string();
            terminal.say(&format!("\n❌ Failed to assign role: {}", message));
            assign::print_manual_steps(terminal, &project.project_name, &options.role_name);
            CheckOutcome::AssignmentFailed { message }
        }
    })
}
