// port.cgi — link settings and traffic counters
//
// One physical page, two views: the bare path renders the settings form
// and the `page=stats` query renders counters. They get separate parsers
// because they address different tables with different shapes.

use std::collections::BTreeMap;

use scraper::Html;

use super::columns::{settings, stats};
use super::{TABLE, TD, TR, cell_text, port_label};
use crate::error::Error;

/// One port's link configuration from `port.cgi`.
#[derive(Debug, Clone, PartialEq)]
pub struct PortSettingsRow {
    pub admin_state: bool,
    /// Configured speed/duplex label, e.g. `"Auto"` or `"1000M Full"`.
    pub config_speed: String,
    /// Negotiated speed, or `"Link Down"`.
    pub speed: String,
    pub config_flow: bool,
    /// Actual flow-control state as rendered (`"On"`/`"Off"`).
    pub flow_control: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PortSettingsFragment {
    pub ports: BTreeMap<u16, PortSettingsRow>,
}

/// Parse `port.cgi`.
///
/// The settings rows live in the last table on the page; everything
/// before it is the edit form. Header and subheader rows carry no
/// `Port N` label and are skipped by that test.
pub fn parse_port_settings(html: &str) -> Result<PortSettingsFragment, Error> {
    let doc = Html::parse_document(html);
    let Some(table) = doc.select(&TABLE).last() else {
        return Err(Error::Structure {
            page: "port_settings",
            reason: "no tables in response".into(),
        });
    };

    let mut frag = PortSettingsFragment::default();
    for row in table.select(&TR) {
        let cells: Vec<_> = row.select(&TD).collect();
        if cells.len() < settings::MIN_CELLS {
            continue;
        }
        let first = cell_text(cells[settings::PORT]);
        if !first.contains("Port") {
            continue;
        }
        let Some(port) = port_label(&first) else {
            continue;
        };
        frag.ports.insert(
            port,
            PortSettingsRow {
                admin_state: cell_text(cells[settings::ADMIN_STATE]) == "Enable",
                config_speed: cell_text(cells[settings::CONFIG_SPEED]),
                speed: cell_text(cells[settings::SPEED]),
                config_flow: cell_text(cells[settings::CONFIG_FLOW]) == "On",
                flow_control: cell_text(cells[settings::FLOW]),
            },
        );
    }
    Ok(frag)
}

/// One port's traffic counters from `port.cgi?page=stats`.
#[derive(Debug, Clone, PartialEq)]
pub struct PortStatsRow {
    pub is_link_up: bool,
    pub tx_packets: u64,
    pub rx_packets: u64,
    pub tx_errors: u32,
    pub rx_errors: u32,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PortStatsFragment {
    pub ports: BTreeMap<u16, PortStatsRow>,
}

/// Parse `port.cgi?page=stats`. Counter rows live in the first table.
pub fn parse_port_stats(html: &str) -> Result<PortStatsFragment, Error> {
    let doc = Html::parse_document(html);
    let Some(table) = doc.select(&TABLE).next() else {
        return Err(Error::Structure {
            page: "port_stats",
            reason: "no tables in response".into(),
        });
    };

    let mut frag = PortStatsFragment::default();
    for row in table.select(&TR) {
        let cells: Vec<_> = row.select(&TD).collect();
        if cells.len() < stats::MIN_CELLS {
            continue;
        }
        let first = cell_text(cells[stats::PORT]);
        if !first.contains("Port") {
            continue;
        }
        let Some(port) = port_label(&first) else {
            continue;
        };
        let (Ok(tx_errors), Ok(rx_errors)) = (
            cell_text(cells[stats::TX_ERRORS]).parse(),
            cell_text(cells[stats::RX_ERRORS]).parse(),
        ) else {
            continue;
        };
        frag.ports.insert(
            port,
            PortStatsRow {
                is_link_up: cell_text(cells[stats::LINK]).contains("Link Up"),
                tx_packets: decode_split_counter(&cell_text(cells[stats::TX_PACKETS])),
                rx_packets: decode_split_counter(&cell_text(cells[stats::RX_PACKETS])),
                tx_errors,
                rx_errors,
            },
        );
    }
    Ok(frag)
}

/// Decode the vendor's split 64-bit counter encoding.
///
/// Packet counters render as `"<high>-<low>"`: two decimal halves around
/// exactly one dash, decoding to `high * 2^32 + low`. Any other shape
/// decodes to 0 — a plain decimal with no dash, non-numeric halves, or
/// halves so large the combined value would not fit in 64 bits.
pub fn decode_split_counter(text: &str) -> u64 {
    let mut parts = text.split('-');
    let (Some(high), Some(low), None) = (parts.next(), parts.next(), parts.next()) else {
        return 0;
    };
    let (Ok(high), Ok(low)) = (high.trim().parse::<u64>(), low.trim().parse::<u64>()) else {
        return 0;
    };
    high.checked_mul(1 << 32)
        .and_then(|shifted| shifted.checked_add(low))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS_PAGE: &str = r#"<html><body>
        <table><tr><td><select name="portid"></select></td></tr></table>
        <table>
        <tr><th rowspan="2">Port</th><th rowspan="2">State</th>
            <th colspan="2">Speed/Duplex</th><th colspan="2">Flow Control</th></tr>
        <tr><th>Config</th><th>Actual</th><th>Config</th><th>Actual</th></tr>
        <tr><td>Port 1</td><td>Enable</td><td>Auto</td><td>1000M Full</td>
            <td>Off</td><td>Off</td></tr>
        <tr><td>Port 2</td><td>Disable</td><td>100M Full</td><td>Link Down</td>
            <td>On</td><td>Off</td></tr>
        </table></body></html>"#;

    #[test]
    fn settings_rows_parse_from_last_table() {
        let frag = parse_port_settings(SETTINGS_PAGE).expect("parse");
        assert_eq!(frag.ports.len(), 2);

        let p1 = &frag.ports[&1];
        assert!(p1.admin_state);
        assert_eq!(p1.config_speed, "Auto");
        assert_eq!(p1.speed, "1000M Full");
        assert!(!p1.config_flow);

        let p2 = &frag.ports[&2];
        assert!(!p2.admin_state);
        assert_eq!(p2.speed, "Link Down");
        assert!(p2.config_flow);
        assert_eq!(p2.flow_control, "Off");
    }

    #[test]
    fn rows_without_port_marker_are_excluded() {
        let html = r#"<table>
        <tr><td>Totals</td><td>-</td><td>-</td><td>-</td><td>-</td><td>-</td></tr>
        <tr><td>Port 7</td><td>Enable</td><td>Auto</td><td>Auto</td><td>Off</td><td>Off</td></tr>
        </table>"#;
        let frag = parse_port_settings(html).expect("parse");
        assert_eq!(frag.ports.keys().copied().collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn stats_rows_decode_counters_and_link_state() {
        let html = r#"<table>
        <tr><th>Port</th><th>State</th><th>Link Status</th>
            <th>TxGoodPkt</th><th>TxBadPkt</th><th>RxGoodPkt</th><th>RxBadPkt</th></tr>
        <tr><td>Port 1</td><td>Enable</td><td>Link Up</td>
            <td>1-1705032704</td><td>0</td><td>0-2680059921</td><td>3</td></tr>
        <tr><td>Port 2</td><td>Enable</td><td>Link Down</td>
            <td>0-0</td><td>0</td><td>0-0</td><td>0</td></tr>
        </table>"#;
        let frag = parse_port_stats(html).expect("parse");

        let p1 = &frag.ports[&1];
        assert!(p1.is_link_up);
        assert_eq!(p1.tx_packets, 6_000_000_000);
        assert_eq!(p1.rx_packets, 2_680_059_921);
        assert_eq!(p1.tx_errors, 0);
        assert_eq!(p1.rx_errors, 3);

        let p2 = &frag.ports[&2];
        assert!(!p2.is_link_up);
        assert_eq!(p2.tx_packets, 0);
    }

    #[test]
    fn tableless_pages_are_structural_failures() {
        assert!(parse_port_settings("<p>login</p>").is_err());
        assert!(parse_port_stats("<p>login</p>").is_err());
    }

    #[test]
    fn split_counter_decoding() {
        assert_eq!(decode_split_counter("0-0"), 0);
        assert_eq!(decode_split_counter("0-42"), 42);
        assert_eq!(decode_split_counter("1-0"), 1 << 32);
        assert_eq!(decode_split_counter("1-1705032704"), 6_000_000_000);
        // Exactly one dash is required.
        assert_eq!(decode_split_counter("12345"), 0);
        assert_eq!(decode_split_counter("1-2-3"), 0);
        assert_eq!(decode_split_counter(""), 0);
        assert_eq!(decode_split_counter("a-b"), 0);
        assert_eq!(decode_split_counter("-5"), 0);
    }

    #[test]
    fn oversized_counter_halves_decode_to_zero() {
        // Halves that parse but overflow the combined 64-bit value must
        // decode to 0 like every other malformed shape, never panic.
        assert_eq!(decode_split_counter("1-18446744073709551615"), 0);
        assert_eq!(decode_split_counter("4294967296-0"), 0);
        assert_eq!(decode_split_counter("18446744073709551615-1"), 0);
        // The largest representable split value still decodes.
        assert_eq!(decode_split_counter("4294967295-4294967295"), u64::MAX);
    }
}
