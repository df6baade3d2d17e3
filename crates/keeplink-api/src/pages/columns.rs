// Per-page column indices
//
// The web UI renders fixed-order tables with no stable identifiers, so
// every parser addresses cells by position. Firmware revisions have been
// observed to reorder PoE columns; keeping all indices here, per page,
// gives one place to branch when a new layout shows up. Current values
// match the V1.x web UI.

/// `pse_port.cgi`, second table. Unaddressed cells 2/3 are priority and
/// PoE class.
pub(crate) mod pse_port {
    pub const PORT: usize = 0;
    pub const STATE: usize = 1;
    pub const POWER: usize = 4;
    pub const VOLTAGE: usize = 5;
    pub const CURRENT: usize = 6;
    pub const MIN_CELLS: usize = 7;
}

/// `port.cgi`, last table.
pub(crate) mod settings {
    pub const PORT: usize = 0;
    pub const ADMIN_STATE: usize = 1;
    pub const CONFIG_SPEED: usize = 2;
    pub const SPEED: usize = 3;
    pub const CONFIG_FLOW: usize = 4;
    pub const FLOW: usize = 5;
    pub const MIN_CELLS: usize = 6;
}

/// `port.cgi?page=stats`, first table. Cell 1 is the admin state, which
/// the settings page already covers.
pub(crate) mod stats {
    pub const PORT: usize = 0;
    pub const LINK: usize = 2;
    pub const TX_PACKETS: usize = 3;
    pub const TX_ERRORS: usize = 4;
    pub const RX_PACKETS: usize = 5;
    pub const RX_ERRORS: usize = 6;
    pub const MIN_CELLS: usize = 7;
}
