// pse_system.cgi / pse_port.cgi — PoE state

use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::columns::pse_port as col;
use super::{TABLE, TD, TR, cell_text, port_label};
use crate::error::Error;

static PSE_CON_PWR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"input[name="pse_con_pwr"]"#).expect("selector"));

/// Total PoE power draw from `pse_system.cgi`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PoeSystemFragment {
    pub total_power: Option<f64>,
}

/// Parse `pse_system.cgi`.
///
/// The total draw lives in the value attribute of a disabled form input.
/// A missing or malformed value leaves the field unset — non-PoE models
/// simply never render it, and that is not an error.
pub fn parse_poe_system(html: &str) -> PoeSystemFragment {
    let doc = Html::parse_document(html);
    let total_power = doc
        .select(&PSE_CON_PWR)
        .next()
        .and_then(|input| input.value().attr("value"))
        .and_then(|v| v.trim().parse().ok());
    PoeSystemFragment { total_power }
}

/// One port's PoE state from `pse_port.cgi`.
#[derive(Debug, Clone, PartialEq)]
pub struct PoePortRow {
    pub enabled: bool,
    /// Delivered power in watts.
    pub power: f64,
    /// Output voltage in volts.
    pub voltage: f64,
    /// Output current in milliamps.
    pub current: f64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PoePortFragment {
    pub ports: BTreeMap<u16, PoePortRow>,
}

/// Parse `pse_port.cgi`.
///
/// The second table holds the per-port rows (the first is the config
/// form). The header row is skipped, and each data row needs at least
/// seven cells. A port without a powered device renders its
/// electrical cells as `"-"`, which decodes to `0.0`.
pub fn parse_poe_ports(html: &str) -> Result<PoePortFragment, Error> {
    let doc = Html::parse_document(html);
    let tables: Vec<_> = doc.select(&TABLE).collect();
    let Some(table) = tables.get(1) else {
        return Err(Error::Structure {
            page: "pse_port",
            reason: format!("expected 2 tables, found {}", tables.len()),
        });
    };

    let mut frag = PoePortFragment::default();
    for row in table.select(&TR).skip(1) {
        let cells: Vec<_> = row.select(&TD).collect();
        if cells.len() < col::MIN_CELLS {
            continue;
        }
        let Some(port) = port_label(&cell_text(cells[col::PORT])) else {
            continue;
        };
        let (Some(power), Some(voltage), Some(current)) = (
            electrical_value(&cell_text(cells[col::POWER])),
            electrical_value(&cell_text(cells[col::VOLTAGE])),
            electrical_value(&cell_text(cells[col::CURRENT])),
        ) else {
            continue;
        };
        frag.ports.insert(
            port,
            PoePortRow {
                enabled: cell_text(cells[col::STATE]).contains("Enable"),
                power,
                voltage,
                current,
            },
        );
    }
    Ok(frag)
}

/// Decode an electrical reading cell. `None` marks a malformed cell and
/// skips the row it came from.
fn electrical_value(text: &str) -> Option<f64> {
    if text == "-" {
        Some(0.0)
    } else {
        text.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <table><tr><td>PoE Port Setting</td></tr></table>
        <table>
        <tr><th>Port</th><th>State</th><th>Priority</th><th>Class</th>
            <th>Power(W)</th><th>Voltage(V)</th><th>Current(mA)</th></tr>
        <tr><td>Port 1</td><td>Enable</td><td>Low</td><td>4</td>
            <td>6.5</td><td>53.9</td><td>120.6</td></tr>
        <tr><td>Port 2</td><td>Disable</td><td>Low</td><td>-</td>
            <td>-</td><td>-</td><td>-</td></tr>
        </table></body></html>"#;

    #[test]
    fn per_port_rows_parse_with_dash_as_zero() {
        let frag = parse_poe_ports(PAGE).expect("parse");
        assert_eq!(frag.ports.len(), 2);

        let p1 = &frag.ports[&1];
        assert!(p1.enabled);
        assert_eq!(p1.power, 6.5);
        assert_eq!(p1.voltage, 53.9);
        assert_eq!(p1.current, 120.6);

        let p2 = &frag.ports[&2];
        assert!(!p2.enabled);
        assert_eq!(p2.power, 0.0);
        assert_eq!(p2.voltage, 0.0);
        assert_eq!(p2.current, 0.0);
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let html = r#"
        <table></table>
        <table>
        <tr><th>Port</th></tr>
        <tr><td>Port X</td><td>Enable</td><td>Low</td><td>0</td>
            <td>1.0</td><td>2.0</td><td>3.0</td></tr>
        <tr><td>Port 3</td><td>Enable</td><td>Low</td><td>0</td>
            <td>bogus</td><td>2.0</td><td>3.0</td></tr>
        <tr><td>Port 4</td><td>Enable</td><td>Low</td><td>0</td>
            <td>1.5</td><td>53.0</td><td>28.0</td></tr>
        </table>"#;
        let frag = parse_poe_ports(html).expect("parse");
        assert_eq!(frag.ports.keys().copied().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn missing_data_table_is_structural() {
        let err = parse_poe_ports("<table><tr><td>only one</td></tr></table>").unwrap_err();
        assert!(matches!(err, Error::Structure { page: "pse_port", .. }));
    }

    #[test]
    fn system_page_total_power() {
        let html = r#"<form action="pse_system.cgi">
            <input type="text" name="pse_con_pwr" value="26.8" disabled>
            </form>"#;
        assert_eq!(parse_poe_system(html).total_power, Some(26.8));
    }

    #[test]
    fn system_page_without_input_leaves_power_unset() {
        assert_eq!(parse_poe_system("<html><body></body></html>").total_power, None);
        let malformed = r#"<input name="pse_con_pwr" value="n/a">"#;
        assert_eq!(parse_poe_system(malformed).total_power, None);
    }
}
