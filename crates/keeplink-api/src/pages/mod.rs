// Page codecs
//
// One parser per read endpoint, each producing a typed fragment of
// device state. Parsing is structural and deliberately tolerant: tables
// are located by ordinal position, cells by fixed index (`columns`),
// labels by substring match. A row that does not match the expected
// shape is skipped silently; a parser fails only when the tables it
// depends on are entirely absent, which means the response was not the
// page we asked for.

pub(crate) mod columns;
mod info;
mod poe;
mod ports;

pub use info::{InfoFragment, parse_info};
pub use poe::{PoePortFragment, PoePortRow, PoeSystemFragment, parse_poe_ports, parse_poe_system};
pub use ports::{
    PortSettingsFragment, PortSettingsRow, PortStatsFragment, PortStatsRow, decode_split_counter,
    parse_port_settings, parse_port_stats,
};

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").expect("selector"));
static TR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("selector"));
static TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("selector"));
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th, td").expect("selector"));

/// Concatenated, whitespace-trimmed text of one cell.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_owned()
}

/// Parse a `Port N` first-cell label into a port number.
///
/// Rows whose first cell is not a port label are headers or subheaders,
/// and their absence of a number is how they get skipped.
fn port_label(text: &str) -> Option<u16> {
    text.strip_prefix("Port")?.trim().parse().ok()
}
