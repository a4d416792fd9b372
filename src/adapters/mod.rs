pub mod arm_http;
pub mod credential_chain;
pub mod dialoguer_terminal;
pub mod identity_command;
