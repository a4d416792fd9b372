use std::process::Command;

use crate::domain::AppError;
use crate::ports::IdentityProbe;

/// Runs an external command whose trimmed stdout is the caller's object ID.
#[derive(Debug, Clone)]
pub struct CommandIdentityProbe {
    program: String,
    args: Vec<String>,
}

impl CommandIdentityProbe {
    /// `command[0]` is the program, the rest are its arguments.
    pub fn new(command: &[String]) -> Result<Self, AppError> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| AppError::InvalidConfig("identity_command is empty".into()))?;
        Ok(Self { program: program.clone(), args: args.to_vec() })
    }
}

impl IdentityProbe for CommandIdentityProbe {
    fn current_user_id(&self) -> Result<String, AppError> {
        let output = Command::new(&self.program).args(&self.args).output().map_err(|e| {
            AppError::ExternalToolError {
                tool: self.program.clone(),
                error: format!("Failed to execute: {}", e),
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::ExternalToolError {
                tool: self.program.clone(),
                error: format!("exited with {}: {}", output.status, stderr.trim()),
            });
        }

        let user_id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if user_id.is_empty() {
            return Err(AppError::ExternalToolError {
                tool: self.program.clone(),
                error: "printed no user ID".into(),
            });
        }
        Ok(user_id)
    }
}
