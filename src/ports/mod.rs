mod authorization_client;
mod credential;
mod identity_probe;
mod terminal;
mod workspace_client;

pub use authorization_client::AuthorizationClient;
pub use credential::TokenCredential;
pub use identity_probe::IdentityProbe;
pub use terminal::Terminal;
pub use workspace_client::WorkspaceClient;
