//! Policy-gated user API.
//!
//! Every protected route runs through the authorization gate: the caller's
//! credential and scopes become an [`AuthCtx`](api::extractors::AuthCtx), an
//! external policy engine is asked for an allow/deny decision, the decision is
//! audited, and only then does the handler run. Any failure to get a decision
//! is a deny.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod services;
pub mod state;
