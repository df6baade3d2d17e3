// Per-device configuration.

use secrecy::SecretString;

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_CYCLE_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Configuration for one switch coordinator.
#[derive(Debug, Clone)]
pub struct SwitchConfig {
    /// Device host: bare IP/hostname, or `host:port` for non-standard
    /// setups. Plain HTTP is implied.
    pub host: String,
    pub username: String,
    pub password: SecretString,
    /// Background poll interval. `0` disables background polling.
    pub poll_interval_secs: u64,
    /// Overall deadline for one full sync cycle.
    pub cycle_timeout_secs: u64,
    /// Per-request HTTP timeout.
    pub request_timeout_secs: u64,
}

impl SwitchConfig {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            cycle_timeout_secs: DEFAULT_CYCLE_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
