// Session token derivation
//
// The device has no interactive login handshake: it validates an `admin`
// cookie whose value is the hex md5 of username and password concatenated.
// The token is derived once per session and reused on every request;
// it only changes when credentials change.

use md5::{Digest, Md5};

/// Derive the session token the device expects in its `admin` cookie.
///
/// Deterministic and stable: the same credentials always yield the same
/// token, so it can be computed once at construction time.
pub fn derive_token(username: &str, password: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(username.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Per-device session credential, rendered as a cookie on every request.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            token: derive_token(username, password),
        }
    }

    /// Value for the `Cookie` request header.
    pub fn cookie(&self) -> String {
        format!("admin={}", self.token)
    }
}
