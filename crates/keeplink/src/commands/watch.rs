//! Live port table: resync and redraw on an interval until Ctrl-C.

use std::time::Duration;

use owo_colors::OwoColorize;

use keeplink_core::Coordinator;

use crate::cli::{GlobalOpts, WatchArgs};
use crate::error::CliError;
use crate::output;

use super::ports;

pub async fn handle(
    coordinator: &Coordinator,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let interval = Duration::from_secs(args.interval.max(1));
    let colored = output::should_color(&global.color);

    loop {
        // Retryable failures keep the loop alive; auth failures never
        // heal on their own, so those abort.
        match super::sync(coordinator).await {
            Ok(()) => draw(coordinator, global, colored),
            Err(err @ CliError::AuthFailed { .. }) => return Err(err),
            Err(err) => {
                if !global.quiet {
                    eprintln!("sync failed: {err}");
                }
            }
        }

        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            () = tokio::time::sleep(interval) => {}
        }
    }
    Ok(())
}

fn draw(coordinator: &Coordinator, global: &GlobalOpts, colored: bool) {
    let snapshot = coordinator.snapshot();
    let views = ports::views(&snapshot);

    let mut header = format!(
        "{} -- {} ports",
        coordinator.config().host,
        snapshot.ports.len()
    );
    if let Some(watts) = snapshot.poe_total_power {
        header.push_str(&format!(", {watts:.1} W PoE"));
    }
    if let Some(ts) = *coordinator.last_refresh().borrow() {
        header.push_str(&format!(" ({})", ts.format("%H:%M:%S")));
    }
    if !global.quiet {
        if colored {
            println!("{}", header.dimmed());
        } else {
            println!("{header}");
        }
    }

    let rows: Vec<ports::PortRow> = views.iter().map(ports::PortRow::from).collect();
    output::print_output(&output::render_table(&rows), global.quiet);
}
