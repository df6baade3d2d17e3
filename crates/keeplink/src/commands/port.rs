//! Port settings handlers.
//!
//! Partial updates resolve their omitted fields from the device's
//! current configuration, so every mutation here syncs first: issuing a
//! settings write from an empty snapshot would silently reset the
//! port's other fields to defaults.

use keeplink_core::Coordinator;
use keeplink_core::model::SPEED_CODES;

use crate::cli::{FlowState, GlobalOpts, PortArgs, PortCommand};
use crate::error::CliError;

pub async fn handle(
    coordinator: &Coordinator,
    args: PortArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // Validate everything local before the first network round-trip.
    let code = match &args.command {
        PortCommand::Speed { speed, .. } => Some(resolve_speed_code(speed)?),
        _ => None,
    };
    super::sync(coordinator).await?;

    match args.command {
        PortCommand::Enable { port } => {
            coordinator.set_port_settings(port, Some(true), None, None).await;
            super::notice(&format!("Port {port} enabled"), global);
        }

        PortCommand::Disable { port } => {
            coordinator.set_port_settings(port, Some(false), None, None).await;
            super::notice(&format!("Port {port} disabled"), global);
        }

        PortCommand::Speed { port, speed } => {
            coordinator.set_port_settings(port, None, code, None).await;
            super::notice(&format!("Port {port} speed set to {speed}"), global);
        }

        PortCommand::Flow { port, state } => {
            let on = matches!(state, FlowState::On);
            coordinator.set_port_settings(port, None, None, Some(on)).await;
            super::notice(
                &format!(
                    "Port {port} flow control {}",
                    if on { "enabled" } else { "disabled" }
                ),
                global,
            );
        }
    }
    Ok(())
}

/// Accept either a speed label ("1000M Full") or a raw form code.
fn resolve_speed_code(input: &str) -> Result<u8, CliError> {
    if let Ok(code) = input.parse::<u8>() {
        if SPEED_CODES.iter().any(|(_, c)| *c == code) {
            return Ok(code);
        }
        return Err(CliError::Validation {
            field: "speed".into(),
            reason: format!("unknown speed code {code}"),
        });
    }

    SPEED_CODES
        .iter()
        .find(|(label, _)| label.eq_ignore_ascii_case(input))
        .map(|(_, code)| *code)
        .ok_or_else(|| CliError::Validation {
            field: "speed".into(),
            reason: format!(
                "unknown speed '{input}' (expected one of: {})",
                SPEED_CODES
                    .iter()
                    .map(|(label, _)| *label)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        })
}
