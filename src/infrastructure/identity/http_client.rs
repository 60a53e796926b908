//! Identity resolution against the external user service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::AUTHORIZATION};
use serde::Deserialize;
use thiserror::Error;

use crate::application::{
    ApplicationResult, error::ApplicationError, ports::identity::IdentityResolver,
};
use crate::domain::user::UserId;

#[derive(Debug, Error)]
enum IdentityClientError {
    #[error("identity request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("identity request timed out")]
    Timeout,
    #[error("credential rejected by identity service ({0})")]
    Rejected(StatusCode),
    #[error("unexpected identity service status {0}")]
    Status(StatusCode),
    #[error("malformed identity response: {0}")]
    Parse(String),
}

impl From<IdentityClientError> for ApplicationError {
    fn from(err: IdentityClientError) -> Self {
        ApplicationError::unauthenticated(err.to_string())
    }
}

/// The user service may encode ids as strings or numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawUserId {
    Text(String),
    Number(i64),
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: RawUserId,
}

/// Forwards only the caller's `authorization` value to the user service and
/// reads the resolved id from its JSON body.
pub struct HttpIdentityResolver {
    client: Client,
    endpoint: String,
}

impl HttpIdentityResolver {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    async fn fetch(&self, authorization: &str) -> Result<UserId, IdentityClientError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    IdentityClientError::Timeout
                } else {
                    IdentityClientError::Http(e)
                }
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(IdentityClientError::Rejected(status));
        }
        if !status.is_success() {
            return Err(IdentityClientError::Status(status));
        }

        let body: UserResponse = response
            .json()
            .await
            .map_err(|e| IdentityClientError::Parse(e.to_string()))?;

        let raw = match body.id {
            RawUserId::Text(id) => id,
            RawUserId::Number(id) => id.to_string(),
        };
        UserId::new(raw).map_err(|e| IdentityClientError::Parse(e.to_string()))
    }
}

#[async_trait]
impl IdentityResolver for HttpIdentityResolver {
    async fn resolve(&self, authorization: &str) -> ApplicationResult<UserId> {
        self.fetch(authorization).await.map_err(|err| {
            tracing::debug!(error = %err, "identity resolution failed");
            ApplicationError::from(err)
        })
    }
}
