/*
 * Responsibility
 * - shared context attached to the Router (AppState)
 *   - gate: policy client + audit sink + credential verifier, built once at startup
 *   - secrets: secret lookup for collaborator handlers
 * - cheap to Clone (everything behind Arc)
 */
use std::sync::Arc;

use crate::services::{gate::Gate, secrets::SecretProvider};

#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<Gate>,
    pub secrets: Arc<dyn SecretProvider>,
}

impl AppState {
    pub fn new(gate: Arc<Gate>, secrets: Arc<dyn SecretProvider>) -> Self {
        Self { gate, secrets }
    }
}
