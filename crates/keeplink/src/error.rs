//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use keeplink_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("No switch host configured")]
    #[diagnostic(
        code(keeplink::no_host),
        help(
            "Pass --host (-H), set KEEPLINK_HOST, or add host = \"...\"\n\
             to the config file at: {path}"
        )
    )]
    MissingHost { path: String },

    #[error("No password configured")]
    #[diagnostic(
        code(keeplink::no_password),
        help(
            "Set KEEPLINK_PASSWORD, pass --password, or add password = \"...\"\n\
             to the config file at: {path}"
        )
    )]
    MissingPassword { path: String },

    #[error(transparent)]
    #[diagnostic(code(keeplink::config))]
    Config(Box<figment::Error>),

    // ── Device ───────────────────────────────────────────────────────
    #[error("Authentication rejected by {host}")]
    #[diagnostic(
        code(keeplink::auth_failed),
        help(
            "The switch redirected to its login page. Verify the username\n\
             and password against the device's web interface."
        )
    )]
    AuthFailed { host: String },

    #[error("Could not sync with switch at {host}: {reason}")]
    #[diagnostic(
        code(keeplink::connection_failed),
        help("Check that the switch is powered and reachable over HTTP.")
    )]
    Connection { host: String, reason: String },

    #[error("Sync cycle timed out after {seconds}s")]
    #[diagnostic(
        code(keeplink::timeout),
        help("Increase --cycle-timeout or check switch responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Usage ────────────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(keeplink::validation))]
    Validation { field: String, reason: String },

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(keeplink::confirmation_required),
        help("Pass --yes (-y) to confirm.")
    )]
    ConfirmationRequired { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Connection { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::MissingHost { .. }
            | Self::MissingPassword { .. }
            | Self::Validation { .. }
            | Self::ConfirmationRequired { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the device host to a core error for display.
    pub fn from_core(err: CoreError, host: &str) -> Self {
        match err {
            CoreError::AuthenticationFailed { .. } => Self::AuthFailed { host: host.into() },
            CoreError::CommunicationFailure { reason } => Self::Connection {
                host: host.into(),
                reason,
            },
            CoreError::Timeout { timeout_secs } => Self::Timeout {
                seconds: timeout_secs,
            },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}
