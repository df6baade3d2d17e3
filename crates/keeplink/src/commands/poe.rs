//! PoE command handlers.

use serde::Serialize;
use tabled::Tabled;

use keeplink_core::Coordinator;

use crate::cli::{GlobalOpts, PoeArgs, PoeCommand};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct PoeView {
    port: u16,
    enabled: bool,
    power: f64,
    voltage: f64,
    current: f64,
}

#[derive(Tabled)]
struct PoeRow {
    #[tabled(rename = "Port")]
    port: u16,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Power (W)")]
    power: String,
    #[tabled(rename = "Voltage (V)")]
    voltage: String,
    #[tabled(rename = "Current (mA)")]
    current: String,
}

impl From<&PoeView> for PoeRow {
    fn from(v: &PoeView) -> Self {
        Self {
            port: v.port,
            state: if v.enabled { "Enabled" } else { "Disabled" }.into(),
            power: format!("{:.1}", v.power),
            voltage: format!("{:.1}", v.voltage),
            current: format!("{:.1}", v.current),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    coordinator: &Coordinator,
    args: PoeArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PoeCommand::Show => {
            super::sync(coordinator).await?;

            // Only PoE-capable ports appear on the PoE page.
            let snapshot = coordinator.snapshot();
            let views: Vec<PoeView> = snapshot
                .ports
                .iter()
                .filter_map(|(&port, state)| {
                    state.poe.as_ref().map(|p| PoeView {
                        port,
                        enabled: p.enabled,
                        power: p.power,
                        voltage: p.voltage,
                        current: p.current,
                    })
                })
                .collect();
            let out = output::render_list(
                &global.output,
                &views,
                |v| PoeRow::from(v),
                |v| v.port.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PoeCommand::On { port } => {
            coordinator.set_poe_state(port, true).await;
            super::notice(&format!("PoE enabled on port {port}"), global);
            Ok(())
        }

        PoeCommand::Off { port } => {
            coordinator.set_poe_state(port, false).await;
            super::notice(&format!("PoE disabled on port {port}"), global);
            Ok(())
        }
    }
}
