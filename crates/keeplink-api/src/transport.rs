// Transport configuration for building reqwest::Client instances.
//
// The embedded web server speaks plain HTTP on port 80, so there is no
// TLS surface here at all. Redirects are NOT followed: a redirect to the
// login page is the device's only way of signalling a rejected cookie,
// and the client needs to observe it.

use std::time::Duration;

use crate::error::Error;

/// Fixed user-agent string sent with every request.
pub const USER_AGENT: &str = "keeplink/0.1";

/// Per-request transport settings.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout. The sync cycle applies its own overall
    /// deadline on top of this.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: USER_AGENT.to_owned(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.clone())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(Error::Transport)
    }
}
