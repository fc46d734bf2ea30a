pub mod audit;
pub mod auth;
pub mod events;
pub mod gate;
pub mod policy;
pub mod secrets;
