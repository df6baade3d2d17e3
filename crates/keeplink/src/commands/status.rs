//! Device status: identity, addressing, and system-wide PoE state.

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;

use keeplink_core::Coordinator;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Serializable status view assembled from one fresh snapshot.
#[derive(Serialize)]
struct StatusView {
    manufacturer: &'static str,
    model: String,
    firmware: String,
    firmware_date: Option<String>,
    hardware: String,
    mac: String,
    ip_address: Option<String>,
    netmask: Option<String>,
    gateway: Option<String>,
    poe_total_power: Option<f64>,
    ports: usize,
    last_refresh: Option<DateTime<Utc>>,
}

pub async fn handle(coordinator: &Coordinator, global: &GlobalOpts) -> Result<(), CliError> {
    super::sync(coordinator).await?;

    let snapshot = coordinator.snapshot();
    let identity = coordinator
        .identity()
        .ok_or_else(|| CliError::Connection {
            host: coordinator.config().host.clone(),
            reason: "device info page carried no MAC address".into(),
        })?;

    let view = StatusView {
        manufacturer: identity.manufacturer,
        model: identity.model,
        firmware: identity.sw_version,
        firmware_date: snapshot.firmware_date.clone(),
        hardware: identity.hw_version,
        mac: identity.mac,
        ip_address: snapshot.ip_address.clone(),
        netmask: snapshot.netmask.clone(),
        gateway: snapshot.gateway.clone(),
        poe_total_power: snapshot.poe_total_power,
        ports: snapshot.ports.len(),
        last_refresh: *coordinator.last_refresh().borrow(),
    };

    let colored = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &view,
        |v| detail(v, colored),
        |v| v.mac.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

fn detail(view: &StatusView, colored: bool) -> String {
    let mut lines = Vec::new();
    let field = |label: &str, value: &str| {
        // Pad before styling so escape codes don't skew the column.
        let label = format!("{label:<14}");
        if colored {
            format!("{} {}", label.bold(), value)
        } else {
            format!("{label} {value}")
        }
    };

    lines.push(field("Model", &view.model));
    lines.push(field("Manufacturer", view.manufacturer));
    lines.push(field("Firmware", &view.firmware));
    if let Some(ref date) = view.firmware_date {
        lines.push(field("Built", date));
    }
    lines.push(field("Hardware", &view.hardware));
    lines.push(field("MAC", &view.mac));
    if let Some(ref ip) = view.ip_address {
        lines.push(field("IP address", ip));
    }
    if let Some(ref mask) = view.netmask {
        lines.push(field("Netmask", mask));
    }
    if let Some(ref gw) = view.gateway {
        lines.push(field("Gateway", gw));
    }
    if let Some(watts) = view.poe_total_power {
        lines.push(field("PoE draw", &format!("{watts:.1} W")));
    }
    lines.push(field("Ports", &view.ports.to_string()));
    if let Some(ts) = view.last_refresh {
        lines.push(field("Synced", &ts.to_rfc3339()));
    }
    lines.join("\n")
}
