use std::fmt;

use chrono::{DateTime, Duration, Utc};

/// Bearer token for Azure Resource Manager.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub secret: String,
    pub expires_on: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(secret: impl Into<String>, expires_on: DateTime<Utc>) -> Self {
        Self { secret: secret.into(), expires_on }
    }

    /// True once fewer than five minutes of validity remain at `now`.
    pub fn is_expiring(&self, now: DateTime<Utc>) -> bool {
        self.expires_on - now < Duration::minutes(5)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"[REDACTED]")
            .field("expires_on", &self.expires_on)
            .finish()
    }
}
