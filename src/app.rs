/*
 * Responsibility
 * - load Config -> build dependencies (policy client, audit sink, gate) -> assemble Router
 * - apply middleware (security headers, request id / tracing / limits)
 * - start with axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;

use crate::config::Config;
use crate::services::{
    audit::LogAuditSink, auth::BearerLengthStub, gate::Gate, policy::OpaPolicyClient,
    secrets::EnvSecretProvider,
};
use crate::state::AppState;
use crate::{api, logging, middleware};

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Surface panics via tracing so they don't get lost when stderr is hidden.
        tracing::error!(?info, "panic");

        // Development: fail fast. Production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    let config = Config::from_env()?;
    logging::init(&config);
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        env = ?config.app_env,
        addr = %config.addr,
        policy_url = %config.policy.decision_url(),
        policy_timeout_ms = config.policy.timeout.as_millis() as u64,
        "starting API"
    );

    let state = build_state(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Process-level services, built once and shared read-only by every request.
pub fn build_state(config: &Config) -> Result<AppState> {
    let policy = OpaPolicyClient::new(&config.policy)?;
    let gate = Gate::new(
        Arc::new(policy),
        Arc::new(LogAuditSink),
        Arc::new(BearerLengthStub),
    );

    Ok(AppState::new(Arc::new(gate), Arc::new(EnvSecretProvider)))
}

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .merge(api::routes(state.clone()))
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    middleware::http::apply(router)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
