//! OPA-compatible policy client (`POST {base}/v1/data/{path}`).
use async_trait::async_trait;
use reqwest::Client;

use crate::config::PolicySettings;
use crate::services::policy::client::{PolicyClient, PolicyError, PolicyOutcome};
use crate::services::policy::query::{AuthorizationQuery, PolicyRequest, parse_decision};

/// HTTP policy client. Connect and total request time are both bounded by
/// `PolicySettings::timeout`; cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct OpaPolicyClient {
    decision_url: String,
    client: Client,
}

impl OpaPolicyClient {
    pub fn new(settings: &PolicySettings) -> Result<Self, PolicyError> {
        let client = Client::builder()
            .connect_timeout(settings.timeout)
            .timeout(settings.timeout)
            .build()
            .map_err(|err| PolicyError::Transport(err.to_string()))?;

        Ok(Self {
            decision_url: settings.decision_url(),
            client,
        })
    }

    pub fn decision_url(&self) -> &str {
        &self.decision_url
    }

    async fn request(&self, query: &AuthorizationQuery) -> Result<bool, PolicyError> {
        let response = self
            .client
            .post(&self.decision_url)
            .json(&PolicyRequest { input: query })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PolicyError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(transport_error)?;
        parse_decision(&body)
    }
}

fn transport_error(err: reqwest::Error) -> PolicyError {
    if err.is_timeout() {
        PolicyError::Timeout
    } else {
        PolicyError::Transport(err.to_string())
    }
}

#[async_trait]
impl PolicyClient for OpaPolicyClient {
    async fn evaluate(&self, query: &AuthorizationQuery) -> PolicyOutcome {
        match self.request(query).await {
            Ok(allowed) => PolicyOutcome::Decision(allowed),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    url = %self.decision_url,
                    "policy query failed, denying"
                );
                PolicyOutcome::Unavailable(err)
            }
        }
    }
}
