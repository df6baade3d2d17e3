//! Port table: merged link, config, and traffic state per port.

use serde::Serialize;
use tabled::Tabled;

use keeplink_core::{Coordinator, PortState, Snapshot};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Views ───────────────────────────────────────────────────────────

/// One port plus its number, for structured output.
#[derive(Serialize)]
pub(crate) struct PortView {
    pub port: u16,
    #[serde(flatten)]
    pub state: PortState,
}

pub(crate) fn views(snapshot: &Snapshot) -> Vec<PortView> {
    snapshot
        .ports
        .iter()
        .map(|(&port, state)| PortView {
            port,
            state: state.clone(),
        })
        .collect()
}

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct PortRow {
    #[tabled(rename = "Port")]
    port: u16,
    #[tabled(rename = "Link")]
    link: String,
    #[tabled(rename = "Admin")]
    admin: String,
    #[tabled(rename = "Speed")]
    speed: String,
    #[tabled(rename = "Config")]
    config: String,
    #[tabled(rename = "Flow")]
    flow: String,
    #[tabled(rename = "PoE (W)")]
    poe: String,
    #[tabled(rename = "Tx pkts")]
    tx_packets: String,
    #[tabled(rename = "Rx pkts")]
    rx_packets: String,
    #[tabled(rename = "Errors")]
    errors: String,
}

impl From<&PortView> for PortRow {
    fn from(v: &PortView) -> Self {
        let link = v.state.link.as_ref();
        let traffic = v.state.traffic.as_ref();
        Self {
            port: v.port,
            link: traffic.map_or(String::new(), |t| {
                if t.is_link_up { "Up" } else { "Down" }.into()
            }),
            admin: link.map_or(String::new(), |l| {
                if l.admin_state { "Enabled" } else { "Disabled" }.into()
            }),
            speed: link.map_or(String::new(), |l| l.speed.clone()),
            config: link.map_or(String::new(), |l| l.config_speed.clone()),
            flow: link.map_or(String::new(), |l| l.flow_control.clone()),
            poe: v
                .state
                .poe
                .as_ref()
                .map_or(String::new(), |p| format!("{:.1}", p.power)),
            tx_packets: traffic.map_or(String::new(), |t| t.tx_packets.to_string()),
            rx_packets: traffic.map_or(String::new(), |t| t.rx_packets.to_string()),
            errors: traffic.map_or(String::new(), |t| (t.tx_errors + t.rx_errors).to_string()),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(coordinator: &Coordinator, global: &GlobalOpts) -> Result<(), CliError> {
    super::sync(coordinator).await?;

    let snapshot = coordinator.snapshot();
    let views = views(&snapshot);
    let out = output::render_list(
        &global.output,
        &views,
        |v| PortRow::from(v),
        |v| v.port.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
