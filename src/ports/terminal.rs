use crate::domain::AppError;

/// Port for user-facing console text and interactive questions.
pub trait Terminal {
    /// Print one line of output.
    fn say(&self, line: &str);

    /// Ask for a line of text, returned trimmed and possibly empty.
    ///
    /// Returns `Ok(None)` when the user interrupts the prompt.
    fn ask(&self, prompt: &str) -> Result<Option<String>, AppError>;
}
