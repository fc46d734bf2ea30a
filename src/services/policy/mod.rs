pub mod client;
pub mod opa;
pub mod query;

pub use client::{PolicyClient, PolicyError, PolicyOutcome};
pub use opa::OpaPolicyClient;
pub use query::AuthorizationQuery;
