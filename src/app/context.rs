use crate::ports::{AuthorizationClient, IdentityProbe, Terminal, WorkspaceClient};

/// Application context holding dependencies for command execution.
pub struct AppContext<A, I, T>
where
    A: WorkspaceClient + AuthorizationClient,
    I: IdentityProbe,
    T: Terminal,
{
    arm: A,
    identity: I,
    terminal: T,
}

impl<A, I, T> AppContext<A, I, T>
where
    A: WorkspaceClient + AuthorizationClient,
    I: IdentityProbe,
    T: Terminal,
{
    /// Create a new application context.
    pub fn new(arm: A, identity: I, terminal: T) -> Self {
        Self { arm, identity, terminal }
    }

    /// Resource Manager client for workspace and authorization calls.
    pub fn arm(&self) -> &A {
        &self.arm
    }

    /// Probe for the signed-in user's object ID.
    pub fn identity(&self) -> &I {
        &self.identity
    }

    /// Console used for output and prompts.
    pub fn terminal(&self) -> &T {
        &self.terminal
    }
}
