// Core error taxonomy
//
// Consumers never see reqwest errors or HTML details directly; the
// `From<keeplink_api::Error>` impl translates transport-layer failures
// into the two classes that matter to a caller: "fix your credentials"
// and "retry later".

use thiserror::Error;

/// Unified error type for the core crate.
///
/// `Clone` so that a refresh outcome can be shared with callers that
/// coalesced onto an in-flight sync cycle.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// The device rejected the session cookie. Not retryable without new
    /// credentials.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// Transport-level failure or unexpected page structure. Retryable
    /// on the next cycle.
    #[error("Communication failure: {reason}")]
    CommunicationFailure { reason: String },

    /// The sync cycle exceeded its overall deadline. Retryable.
    #[error("Sync cycle timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Invalid configuration (bad host, etc.)
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` if retrying on the next poll cycle could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::CommunicationFailure { .. } | Self::Timeout { .. }
        )
    }
}

impl From<keeplink_api::Error> for CoreError {
    fn from(err: keeplink_api::Error) -> Self {
        match err {
            keeplink_api::Error::Authentication { message } => {
                Self::AuthenticationFailed { message }
            }
            keeplink_api::Error::Transport(e) => Self::CommunicationFailure {
                reason: e.to_string(),
            },
            keeplink_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("invalid device URL: {e}"),
            },
            keeplink_api::Error::Structure { page, reason } => Self::CommunicationFailure {
                reason: format!("unexpected {page} page structure: {reason}"),
            },
        }
    }
}
