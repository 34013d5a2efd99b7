//! GraphQL request executor with retry and exponential backoff.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, ORIGIN};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use super::error::{GENERIC_GRAPHQL_ERROR, RequestError, TerminalError};
use super::params::QueryVariables;
use super::query::QueryDocument;
use super::rate_limiter::SharedRateLimiter;

/// Default number of dispatch attempts per logical request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay before the second attempt (doubles each retry).
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Maximum number of body bytes kept in diagnostic logs.
const BODY_PREVIEW_LEN: usize = 500;

/// Retry behavior of the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total dispatch attempts (at least 1).
    max_attempts: u32,
    /// Delay before the second attempt.
    base_delay: Duration,
    /// Whether GraphQL `errors` responses are retried like transport faults.
    retry_upstream_errors: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
            retry_upstream_errors: true,
        }
    }
}

impl RetryPolicy {
    /// Sets the total number of attempts. Zero is treated as one.
    #[must_use]
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Sets the delay before the second attempt.
    #[must_use]
    pub const fn base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Chooses whether application-level errors are retried.
    #[must_use]
    pub const fn retry_upstream_errors(mut self, retry: bool) -> Self {
        self.retry_upstream_errors = retry;
        self
    }

    /// Returns the configured number of attempts.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay to wait after the failed 1-based `attempt`.
    ///
    /// `base_delay * 2^(attempt - 1)`: 1s, 2s, 4s, ... with the defaults.
    #[must_use]
    pub const fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }

    /// Returns `true` if the failed attempt should be retried.
    const fn should_retry(&self, attempt: u32, error: &RequestError) -> bool {
        if attempt >= self.max_attempts {
            return false;
        }
        self.retry_upstream_errors || !error.is_upstream()
    }
}

/// JSON body of a GraphQL request.
#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    /// Query document.
    query: &'a str,
    /// Substituted variables.
    variables: &'a QueryVariables,
}

/// Dispatches GraphQL documents through the rate limiter with retries.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    /// HTTP client.
    http_client: Client,
    /// GraphQL endpoint.
    endpoint: Url,
    /// Optional `Origin` header override for proxied setups.
    origin: Option<String>,
    /// Rate limiter shared with other executors.
    rate_limiter: SharedRateLimiter,
    /// Retry behavior.
    policy: RetryPolicy,
}

impl RequestExecutor {
    /// Creates a new executor.
    pub(crate) const fn new(
        http_client: Client,
        endpoint: Url,
        origin: Option<String>,
        rate_limiter: SharedRateLimiter,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            http_client,
            endpoint,
            origin,
            rate_limiter,
            policy,
        }
    }

    /// Returns the GraphQL endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Runs `document` with `variables`, retrying failed attempts.
    ///
    /// Returns the parsed JSON payload of the first successful attempt.
    ///
    /// # Errors
    ///
    /// Returns a [`TerminalError`] carrying the last attempt's failure once
    /// all attempts are exhausted.
    #[instrument(skip_all, fields(operation = document.name()))]
    pub async fn execute(
        &self,
        document: QueryDocument,
        variables: &QueryVariables,
    ) -> Result<Value, TerminalError> {
        let body = GraphQlRequest {
            query: document.as_str(),
            variables,
        };

        let mut attempt = 0u32;
        loop {
            attempt = attempt.saturating_add(1);

            let error = match self.dispatch(&body).await {
                Ok(payload) => return Ok(payload),
                Err(e) => e,
            };

            tracing::warn!(
                attempt,
                max_attempts = self.policy.max_attempts,
                error = %error,
                "API call attempt failed"
            );

            if !self.policy.should_retry(attempt, &error) {
                return Err(TerminalError {
                    attempts: attempt,
                    last: error,
                });
            }

            tokio::time::sleep(self.policy.backoff(attempt)).await;
        }
    }

    /// Performs one rate-limited dispatch and validates the response.
    async fn dispatch(&self, body: &GraphQlRequest<'_>) -> Result<Value, RequestError> {
        self.rate_limiter.lock().await.wait().await;

        let mut request = self
            .http_client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(body);
        if let Some(ref origin) = self.origin {
            request = request.header(ORIGIN, origin.as_str());
        }

        tracing::debug!(url = %self.endpoint, variables = ?body.variables, "AniList API request");

        let response = request
            .send()
            .await
            .map_err(|e| RequestError::network(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            let preview = text
                .get(..text.floor_char_boundary(BODY_PREVIEW_LEN))
                .unwrap_or_default();
            tracing::debug!(
                %status,
                body_preview = preview,
                variables = ?body.variables,
                "HTTP error response"
            );
            return Err(RequestError::status(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| RequestError::network(format!("failed to read response body: {e}")))?;
        tracing::debug!(body_len = text.len(), "Response body received");

        let payload: Value = serde_json::from_str(&text)
            .map_err(|e| RequestError::network(format!("failed to decode JSON response: {e}")))?;

        if let Some(message) = upstream_error_message(&payload) {
            let errors = payload
                .get("errors")
                .map(ToString::to_string)
                .unwrap_or_default();
            tracing::debug!(
                %errors,
                variables = ?body.variables,
                "GraphQL errors in response"
            );
            return Err(RequestError::upstream(message));
        }

        Ok(payload)
    }
}

/// Returns the upstream error message when the payload reports `errors`.
///
/// An absent, `null`, or empty-array `errors` field means success. A non-empty
/// array yields its first `message`; any other truthy value (an object, a
/// string, ...) yields the generic message.
fn upstream_error_message(payload: &Value) -> Option<String> {
    let errors = payload.get("errors")?;
    let reported = match errors {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_i64() != Some(0),
        Value::Array(list) => !list.is_empty(),
        Value::Bool(true) | Value::Object(_) => true,
    };
    if !reported {
        return None;
    }

    let message = errors
        .as_array()
        .and_then(|list| list.first())
        .and_then(|first| first.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(GENERIC_GRAPHQL_ERROR);
    Some(String::from(message))
}
