//! Command dispatch: bridges CLI args -> coordinator calls -> output.

pub mod poe;
pub mod port;
pub mod ports;
pub mod status;
pub mod system;
pub mod watch;

use keeplink_core::Coordinator;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a device-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    coordinator: &Coordinator,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Status => status::handle(coordinator, global).await,
        Command::Ports => ports::handle(coordinator, global).await,
        Command::Poe(args) => poe::handle(coordinator, args, global).await,
        Command::Port(args) => port::handle(coordinator, args, global).await,
        Command::ClearStats => system::clear_stats(coordinator, global).await,
        Command::Reboot => system::reboot(coordinator, global).await,
        Command::Watch(args) => watch::handle(coordinator, args, global).await,
        // Completions are handled before dispatch
        Command::Completions(_) => unreachable!(),
    }
}

/// Run one sync cycle, translating failures for display.
pub(crate) async fn sync(coordinator: &Coordinator) -> Result<(), CliError> {
    coordinator
        .refresh()
        .await
        .map_err(|err| CliError::from_core(err, &coordinator.config().host))
}

/// Print a post-command status line on stderr, respecting quiet mode.
pub(crate) fn notice(message: &str, global: &GlobalOpts) {
    if !global.quiet {
        eprintln!("{message}");
    }
}
