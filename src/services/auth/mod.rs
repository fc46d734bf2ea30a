pub mod context;
pub mod credentials;

pub use context::extract;
pub use credentials::{BearerLengthStub, CredentialVerifier};
