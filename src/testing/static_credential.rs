use std::cell::Cell;
use std::rc::Rc;

use chrono::{Duration, Utc};

use crate::domain::{AccessToken, AppError};
use crate::ports::TokenCredential;

/// Credential returning a fixed token valid for an hour.
pub struct StaticCredential {
    secret: String,
    calls: Rc<Cell<usize>>,
}

impl StaticCredential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into(), calls: Rc::new(Cell::new(0)) }
    }

    /// Shared counter of `get_token` calls.
    pub fn calls(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.calls)
    }
}

impl TokenCredential for StaticCredential {
    fn name(&self) -> &str {
        "static"
    }

    fn get_token(&self, _scope: &str) -> Result<AccessToken, AppError> {
        self.calls.set(self.calls.get() + 1);
        Ok(AccessToken::new(self.secret.clone(), Utc::now() + Duration::hours(1)))
    }
}
