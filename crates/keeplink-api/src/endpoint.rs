// Management page endpoints
//
// One CGI page per concern. `PortSettings` and `PortStats` share a path
// and differ only in a query parameter, matching the device's web UI.

use url::Url;

/// A management page on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Device identity (model, firmware, MAC, addressing).
    Info,
    /// PoE system summary (total power draw).
    PseSystem,
    /// Per-port PoE status; also the POST target for PoE toggles.
    PsePort,
    /// Per-port link configuration; also the POST target for settings.
    PortSettings,
    /// Per-port traffic counters; also the POST target for clearing them.
    PortStats,
    /// POST-only reboot endpoint.
    Reboot,
}

impl Endpoint {
    /// CGI path relative to the device root.
    pub fn path(self) -> &'static str {
        match self {
            Self::Info => "info.cgi",
            Self::PseSystem => "pse_system.cgi",
            Self::PsePort => "pse_port.cgi",
            Self::PortSettings | Self::PortStats => "port.cgi",
            Self::Reboot => "reboot.cgi",
        }
    }

    fn query(self) -> Option<&'static str> {
        match self {
            Self::PortStats => Some("page=stats"),
            _ => None,
        }
    }

    /// Short name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::PseSystem => "pse_system",
            Self::PsePort => "pse_port",
            Self::PortSettings => "port_settings",
            Self::PortStats => "port_stats",
            Self::Reboot => "reboot",
        }
    }

    /// Full URL for this endpoint under the given device base URL.
    ///
    /// The base URL is validated at client construction, and every path
    /// here is a static relative CGI name, so the join cannot fail.
    pub fn url(self, base: &Url) -> Url {
        let mut url = base.join(self.path()).expect("static endpoint path");
        url.set_query(self.query());
        url
    }
}
