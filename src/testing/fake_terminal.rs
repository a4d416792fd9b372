use std::cell::RefCell;
use std::collections::VecDeque;

use crate::domain::AppError;
use crate::ports::Terminal;

/// Terminal with scripted answers that records every line and prompt.
#[derive(Default)]
pub struct FakeTerminal {
    answers: RefCell<VecDeque<Option<String>>>,
    pub lines: RefCell<Vec<String>>,
    pub prompts: RefCell<Vec<String>>,
}

impl FakeTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue answers returned by successive `ask` calls.
    pub fn with_answers(answers: &[&str]) -> Self {
        let terminal = Self::new();
        terminal.answers.borrow_mut().extend(answers.iter().map(|a| Some(a.to_string())));
        terminal
    }

    /// Queue an interrupted prompt.
    pub fn push_interrupt(&self) {
        self.answers.borrow_mut().push_back(None);
    }

    pub fn output(&self) -> String {
        self.lines.borrow().join("\n")
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Terminal for FakeTerminal {
    fn say(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }

    fn ask(&self, prompt: &str) -> Result<Option<String>, AppError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| AppError::Validation(format!("unexpected prompt: {}", prompt)))
    }
}
