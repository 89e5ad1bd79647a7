pub mod admin;
pub mod api_client;
pub mod runner;

pub use admin::{promote_to_admin, PromoteOutcome};
pub use api_client::{ApiClient, ApiResponse, Payload};
pub use runner::{fresh_phone, RunContext};
