// Command engine
//
// Each operation is one form-encoded POST mimicking the device UI's
// submit button, followed by a fresh sync so consumers observe the true
// device state rather than an assumed one. Commands are best-effort:
// a transport error is logged and swallowed, never raised past the
// operation boundary.
//
// `set_port_settings` is a read-modify-write against the cached
// snapshot: omitted fields are completed from the last synced values,
// which may be stale if something else reconfigured the port since.
// Known limitation, accepted for the partial-update surface it buys.

use tracing::{info, warn};

use keeplink_api::Endpoint;

use crate::coordinator::Coordinator;
use crate::model::{LinkConfig, speed_code};

impl Coordinator {
    /// Enable or disable PoE power delivery on one port.
    pub async fn set_poe_state(&self, port: u16, on: bool) {
        let payload = poe_payload(port, on);
        match self.client().post_form(Endpoint::PsePort, &payload).await {
            Ok(()) => self.request_refresh().await,
            Err(err) => warn!(port, error = %err, "failed to set PoE state"),
        }
    }

    /// Change a port's link settings.
    ///
    /// `None` parameters keep the port's current configuration, resolved
    /// from the last synced snapshot. `speed` is the device's form code
    /// (see [`crate::model::SPEED_CODES`]).
    pub async fn set_port_settings(
        &self,
        port: u16,
        state: Option<bool>,
        speed: Option<u8>,
        flow: Option<bool>,
    ) {
        let snapshot = self.snapshot();
        let current = snapshot.ports.get(&port).and_then(|p| p.link.as_ref());
        let payload = port_settings_payload(port, state, speed, flow, current);
        match self
            .client()
            .post_form(Endpoint::PortSettings, &payload)
            .await
        {
            Ok(()) => self.request_refresh().await,
            Err(err) => warn!(port, error = %err, "failed to set port settings"),
        }
    }

    /// Clear all port traffic counters.
    ///
    /// Resyncs immediately so counters visibly drop to zero instead of
    /// waiting for the next scheduled poll.
    pub async fn clear_port_stats(&self) {
        let payload = clear_stats_payload();
        match self.client().post_form(Endpoint::PortStats, &payload).await {
            Ok(()) => self.request_refresh().await,
            Err(err) => warn!(error = %err, "failed to clear port statistics"),
        }
    }

    /// Reboot the device.
    ///
    /// Deliberately does NOT trigger a resync — the device is going
    /// offline, and a sync would only manufacture a transport failure.
    pub async fn reboot(&self) {
        let payload = reboot_payload();
        match self.client().post_form(Endpoint::Reboot, &payload).await {
            Ok(()) => info!(host = %self.config().host, "reboot command sent"),
            Err(err) => warn!(error = %err, "failed to send reboot command"),
        }
    }
}

// ── Payload builders ────────────────────────────────────────────────
//
// The device is 0-indexed internally, so every `portid` is `port - 1`.
// The odd space-padded submit values are what the device's own forms
// send; the firmware matches on them verbatim.

fn poe_payload(port: u16, on: bool) -> Vec<(&'static str, String)> {
    vec![
        ("portid", port.saturating_sub(1).to_string()),
        ("state", flag(on)),
        ("submit", "Apply".to_owned()),
        ("cmd", "poe".to_owned()),
    ]
}

fn port_settings_payload(
    port: u16,
    state: Option<bool>,
    speed: Option<u8>,
    flow: Option<bool>,
    current: Option<&LinkConfig>,
) -> Vec<(&'static str, String)> {
    let admin = state.unwrap_or_else(|| current.is_none_or(|c| c.admin_state));
    let flow = flow.unwrap_or_else(|| current.is_some_and(|c| c.config_flow));
    let speed = match speed {
        Some(code) => code.to_string(),
        None => speed_code(current.map_or("Auto", |c| c.config_speed.as_str())).to_string(),
    };

    vec![
        ("portid", port.saturating_sub(1).to_string()),
        ("state", flag(admin)),
        ("speed_duplex", speed),
        ("flow", flag(flow)),
        ("submit", "   Apply   ".to_owned()),
        ("cmd", "port".to_owned()),
    ]
}

fn clear_stats_payload() -> Vec<(&'static str, String)> {
    vec![
        ("submit", "   Clear   ".to_owned()),
        ("cmd", "stats".to_owned()),
    ]
}

fn reboot_payload() -> Vec<(&'static str, String)> {
    vec![("cmd", "reboot".to_owned())]
}

fn flag(on: bool) -> String {
    if on { "1" } else { "0" }.to_owned()
}
