//! foundry-role: check for and grant the Azure AI Developer role on an AI Foundry project.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;


pub use app::api::{AssignDecision, CheckOptions, CheckOutcome, check};
pub use domain::AppError;
