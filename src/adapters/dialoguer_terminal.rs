use std::io::{BufRead, ErrorKind, IsTerminal, Write};

use dialoguer::{Error as DialoguerError, Input};

use crate::domain::AppError;
use crate::ports::Terminal;

/// Stdout output and `dialoguer` prompts.
///
/// Falls back to plain line reads when stdin or stdout is not a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerTerminal;

impl Terminal for DialoguerTerminal {
    fn say(&self, line: &str) {
        println!("{}", line);
    }

    fn ask(&self, prompt: &str) -> Result<Option<String>, AppError> {
        if std::io::stdin().is_terminal() && std::io::stdout().is_terminal() {
            return match Input::<String>::new().with_prompt(prompt).allow_empty(true).interact_text()
            {
                Ok(value) => Ok(Some(value)),
                Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
                Err(err) => Err(AppError::config_error(format!("Failed to read input: {}", err))),
            };
        }

        // Non-interactive: echo the prompt and read from stdin
        let mut stdout = std::io::stdout();
        print!("{}: ", prompt);
        stdout
            .flush()
            .map_err(|e| AppError::config_error(format!("Failed to read input: {}", e)))?;

        let answer = read_answer(&mut std::io::stdin().lock())?;
        println!();
        Ok(answer)
    }
}

/// Read one trimmed line; `None` at end of input.
fn read_answer<R: BufRead>(reader: &mut R) -> Result<Option<String>, AppError> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => Ok(None),
        Ok(_) => Ok(Some(input.trim().to_string())),
        Err(err) => Err(AppError::config_error(format!("Failed to read input: {}", err))),
    }
}
