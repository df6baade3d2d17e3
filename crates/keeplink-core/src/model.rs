// Domain model
//
// `Snapshot` is the authoritative device state as of the last successful
// sync cycle. Per-port state is merged from three independent page
// sources, so `PortState` keeps one optional group per source: a group
// stays `None` when its page never mentioned the port, which for PoE
// means "not supported", not "zero".

use std::collections::BTreeMap;

use serde::Serialize;

/// Fixed manufacturer string for device identity.
pub const MANUFACTURER: &str = "Keeplink";

/// Full merged device state from one sync cycle.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub model: Option<String>,
    pub firmware: Option<String>,
    pub firmware_date: Option<String>,
    pub hardware: Option<String>,
    pub mac: Option<String>,
    pub ip_address: Option<String>,
    pub netmask: Option<String>,
    pub gateway: Option<String>,
    /// Total PoE power draw in watts, when the device reports it.
    pub poe_total_power: Option<f64>,
    /// Per-port state keyed by 1-based port number.
    pub ports: BTreeMap<u16, PortState>,
}

/// One port's merged state.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct PortState {
    /// PoE delivery state; `None` on ports without PoE capability.
    pub poe: Option<PoeStatus>,
    /// Link configuration from the settings page.
    pub link: Option<LinkConfig>,
    /// Traffic counters from the stats page.
    pub traffic: Option<TrafficStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoeStatus {
    pub enabled: bool,
    /// Delivered power in watts.
    pub power: f64,
    /// Output voltage in volts.
    pub voltage: f64,
    /// Output current in milliamps.
    pub current: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkConfig {
    /// Administratively enabled, independent of link status.
    pub admin_state: bool,
    pub config_speed: String,
    /// Negotiated speed, or `"Link Down"`.
    pub speed: String,
    pub config_flow: bool,
    pub flow_control: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficStats {
    pub is_link_up: bool,
    pub tx_packets: u64,
    pub rx_packets: u64,
    pub tx_errors: u32,
    pub rx_errors: u32,
}

/// Device identity metadata for display consumers, derived from the
/// snapshot once the MAC address is known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceIdentity {
    pub manufacturer: &'static str,
    pub model: String,
    pub sw_version: String,
    pub hw_version: String,
    /// Stable identifier: the device MAC address.
    pub mac: String,
}

impl Snapshot {
    /// Device identity, available once a sync has learned the MAC.
    pub fn identity(&self) -> Option<DeviceIdentity> {
        let mac = self.mac.clone()?;
        Some(DeviceIdentity {
            manufacturer: MANUFACTURER,
            model: self.model.clone().unwrap_or_else(|| "Unknown Model".into()),
            sw_version: self.firmware.clone().unwrap_or_else(|| "Unknown".into()),
            hw_version: self.hardware.clone().unwrap_or_else(|| "Unknown".into()),
            mac,
        })
    }
}

/// Speed/duplex labels and the small integer codes the settings form
/// expects. Firmware renders either the `1000M`/`2500M` or `1G`/`2.5G`
/// spelling depending on revision; both map to the same code. Code 7
/// (5G) has not been observed on any supported model.
pub const SPEED_CODES: &[(&str, u8)] = &[
    ("Auto", 0),
    ("10M Half", 1),
    ("10M Full", 2),
    ("100M Half", 3),
    ("100M Full", 4),
    ("1000M Full", 5),
    ("1G Full", 5),
    ("2500M Full", 6),
    ("2.5G Full", 6),
    ("10G Full", 8),
];

/// Look up the form code for a speed label. Unrecognized labels fall
/// back to `0` (Auto), matching how the device's own UI behaves.
pub fn speed_code(label: &str) -> u8 {
    SPEED_CODES
        .iter()
        .find(|(l, _)| *l == label)
        .map_or(0, |(_, code)| *code)
}
