use thiserror::Error;

/// Top-level error type for the `keeplink-api` crate.
///
/// Covers every failure mode of talking to the device: rejected auth
/// cookies, transport problems, and page layouts that no longer match
/// the expected structure. `keeplink-core` maps these into its own
/// domain-level taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The device redirected a request to its login page, which means
    /// the `admin` cookie was rejected. Not retryable without new
    /// credentials.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, reset, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error (bad host in configuration).
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Page structure ──────────────────────────────────────────────
    /// The response was not the page we expected — the tables a parser
    /// relies on are entirely absent, or the device answered with an
    /// unexpected status or redirect. Usually a firmware layout change.
    #[error("Unexpected structure on {page}: {reason}")]
    Structure {
        page: &'static str,
        reason: String,
    },
}

impl Error {
    /// Returns `true` if this error means the auth cookie was rejected
    /// and retrying without new credentials is pointless.
    pub fn is_auth_failed(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying on
    /// the next poll cycle.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Structure { .. } => true,
            _ => false,
        }
    }
}
