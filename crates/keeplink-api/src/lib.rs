// keeplink-api: HTTP transport and HTML page codecs for Keeplink-family
// web-managed switches.
//
// The device exposes no machine-readable API. Every read is a GET against
// one of its management pages followed by structural HTML parsing; every
// write is a form-encoded POST mimicking the page's own submit button.

pub mod auth;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod pages;
pub mod transport;

pub use client::SwitchClient;
pub use endpoint::Endpoint;
pub use error::Error;
pub use transport::TransportConfig;
