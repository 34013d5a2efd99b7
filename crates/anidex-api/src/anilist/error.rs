//! Request failure taxonomy.

use std::fmt;

/// Fallback message when an upstream error carries no `message`.
pub const GENERIC_GRAPHQL_ERROR: &str = "GraphQL error";

/// Failure of a single dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum RequestError {
    /// Non-success HTTP status, network failure, or unreadable body.
    Transport {
        /// HTTP status code, `None` when no response was received.
        status: Option<u16>,
        /// Diagnostic message.
        message: String,
    },
    /// HTTP success but the payload carried a GraphQL `errors` array.
    Upstream {
        /// Message of the first reported error.
        message: String,
    },
}

impl RequestError {
    /// Builds a transport error for a non-success HTTP status.
    #[must_use]
    pub fn status(status: u16) -> Self {
        Self::Transport {
            status: Some(status),
            message: format!("HTTP error! status: {status}"),
        }
    }

    /// Builds a transport error without a status (network or decode failure).
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Builds an upstream (GraphQL application-level) error.
    #[must_use]
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Returns the diagnostic message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message, .. } | Self::Upstream { message } => message,
        }
    }

    /// Returns `true` for application-level errors.
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for RequestError {}

/// Failure surfaced to the caller once all attempts are exhausted.
///
/// Displays exactly the last attempt's message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct TerminalError {
    /// Number of dispatch attempts made.
    pub attempts: u32,
    /// Error of the final attempt.
    pub last: RequestError,
}

impl TerminalError {
    /// Returns the HTTP status of the final attempt, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match &self.last {
            RequestError::Transport { status, .. } => *status,
            RequestError::Upstream { .. } => None,
        }
    }
}

impl fmt::Display for TerminalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.last, f)
    }
}

/// The final attempt's error is exposed as `last` rather than as a source.
impl std::error::Error for TerminalError {}
