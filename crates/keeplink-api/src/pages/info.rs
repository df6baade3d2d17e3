// info.cgi — device identity
//
// The page is a sequence of two-cell label/value rows. Known labels map
// to fragment fields through a static table; unknown labels are ignored
// so firmware that adds rows keeps parsing.

use scraper::Html;

use super::{CELL, TABLE, TR, cell_text};
use crate::error::Error;

/// Identity fields scraped from `info.cgi`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct InfoFragment {
    pub model: Option<String>,
    pub firmware: Option<String>,
    pub firmware_date: Option<String>,
    pub hardware: Option<String>,
    pub mac: Option<String>,
    pub ip_address: Option<String>,
    pub netmask: Option<String>,
    pub gateway: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Model,
    Firmware,
    FirmwareDate,
    Hardware,
    Mac,
    IpAddress,
    Netmask,
    Gateway,
}

/// Label substring → field. First match wins; checked in listed order.
const LABELS: &[(&str, Field)] = &[
    ("Device Model", Field::Model),
    ("Firmware Version", Field::Firmware),
    ("Firmware Date", Field::FirmwareDate),
    ("Hardware Version", Field::Hardware),
    ("MAC Address", Field::Mac),
    ("IP Address", Field::IpAddress),
    ("Netmask", Field::Netmask),
    ("Gateway", Field::Gateway),
];

fn slot(frag: &mut InfoFragment, field: Field) -> &mut Option<String> {
    match field {
        Field::Model => &mut frag.model,
        Field::Firmware => &mut frag.firmware,
        Field::FirmwareDate => &mut frag.firmware_date,
        Field::Hardware => &mut frag.hardware,
        Field::Mac => &mut frag.mac,
        Field::IpAddress => &mut frag.ip_address,
        Field::Netmask => &mut frag.netmask,
        Field::Gateway => &mut frag.gateway,
    }
}

/// Parse `info.cgi`. Fails only when the page has no table at all.
pub fn parse_info(html: &str) -> Result<InfoFragment, Error> {
    let doc = Html::parse_document(html);
    if doc.select(&TABLE).next().is_none() {
        return Err(Error::Structure {
            page: "info",
            reason: "no tables in response".into(),
        });
    }

    let mut frag = InfoFragment::default();
    for row in doc.select(&TR) {
        let cells: Vec<_> = row.select(&CELL).collect();
        if cells.len() != 2 {
            continue;
        }
        let label = cell_text(cells[0]);
        if let Some((_, field)) = LABELS.iter().find(|(marker, _)| label.contains(*marker)) {
            *slot(&mut frag, *field) = Some(cell_text(cells[1]));
        }
    }
    Ok(frag)
}
