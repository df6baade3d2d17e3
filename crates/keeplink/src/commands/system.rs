//! System operations: counter reset and reboot.

use keeplink_core::Coordinator;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub async fn clear_stats(coordinator: &Coordinator, global: &GlobalOpts) -> Result<(), CliError> {
    coordinator.clear_port_stats().await;
    super::notice("Port counters cleared", global);
    Ok(())
}

pub async fn reboot(coordinator: &Coordinator, global: &GlobalOpts) -> Result<(), CliError> {
    if !global.yes {
        return Err(CliError::ConfirmationRequired {
            action: "reboot".into(),
        });
    }
    coordinator.reboot().await;
    super::notice(
        &format!(
            "Reboot command sent to {}; the switch will be unreachable while it restarts",
            coordinator.config().host
        ),
        global,
    );
    Ok(())
}
