// Device HTTP client
//
// Wraps `reqwest::Client` with the device's request conventions: the
// derived `admin` cookie, a `Referer` header (the device rejects requests
// without one), and login-redirect detection. Page parsing lives in
// `pages`; this module only moves bytes.

use reqwest::StatusCode;
use reqwest::header;
use tracing::debug;
use url::Url;

use crate::auth::Session;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::transport::TransportConfig;

/// HTTP client for one switch.
///
/// All fetches and commands for a device go through one `SwitchClient`,
/// sharing the same session cookie and connection pool.
pub struct SwitchClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl SwitchClient {
    /// Create a client for the device at `host` (bare IP or `host:port`).
    pub fn new(
        host: &str,
        username: &str,
        password: &str,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("http://{host}/")).map_err(Error::InvalidUrl)?;
        Ok(Self {
            http: transport.build_client()?,
            base_url,
            session: Session::new(username, password),
        })
    }

    /// The device base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch a management page and return its raw HTML.
    ///
    /// A redirect to `login.cgi` means the device rejected the session
    /// cookie and surfaces as [`Error::Authentication`]. Any other
    /// redirect or non-success status is a structural failure.
    pub async fn get_page(&self, endpoint: Endpoint) -> Result<String, Error> {
        let url = endpoint.url(&self.base_url);
        debug!("GET {url}");

        // The device expects a Referer on every request; reads use the
        // login page, matching what a browser session would send.
        let referer = self
            .base_url
            .join("login.cgi")
            .expect("static login path")
            .to_string();

        let resp = self
            .http
            .get(url)
            .header(header::COOKIE, self.session.cookie())
            .header(header::REFERER, referer)
            .send()
            .await
            .map_err(Error::Transport)?;

        self.check_response(endpoint, resp.status(), resp.headers())?;
        resp.text().await.map_err(Error::Transport)
    }

    /// POST a form-encoded payload to a command endpoint.
    ///
    /// Writes send the target page itself as `Referer`, matching the form
    /// submission the device's own UI performs. The response body is
    /// discarded — commands are observed through the next sync cycle.
    pub async fn post_form(
        &self,
        endpoint: Endpoint,
        form: &[(&str, String)],
    ) -> Result<(), Error> {
        let url = endpoint.url(&self.base_url);
        debug!("POST {url}");

        let resp = self
            .http
            .post(url.clone())
            .header(header::COOKIE, self.session.cookie())
            .header(header::REFERER, url.to_string())
            .form(form)
            .send()
            .await
            .map_err(Error::Transport)?;

        self.check_response(endpoint, resp.status(), resp.headers())
    }

    /// Map redirects and error statuses to the crate error taxonomy.
    fn check_response(
        &self,
        endpoint: Endpoint,
        status: StatusCode,
        headers: &header::HeaderMap,
    ) -> Result<(), Error> {
        if status.is_redirection() {
            let location = headers
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            if location.contains("login.cgi") {
                return Err(Error::Authentication {
                    message: "device redirected to login page".into(),
                });
            }
            return Err(Error::Structure {
                page: endpoint.name(),
                reason: format!("unexpected redirect to {location:?}"),
            });
        }

        if !status.is_success() {
            return Err(Error::Structure {
                page: endpoint.name(),
                reason: format!("HTTP {status}"),
            });
        }

        Ok(())
    }
}
