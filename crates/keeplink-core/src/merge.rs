// Fragment merge
//
// Applies parsed page fragments onto a snapshot. The rules that keep
// partial sources coherent:
//   - identity fields are only overwritten when the fragment actually
//     supplies them;
//   - a port record is created on first mention and then merged group by
//     group, never replaced wholesale, so PoE data written early in the
//     cycle survives the settings and stats merges that follow.

use keeplink_api::pages::{
    InfoFragment, PoePortFragment, PoeSystemFragment, PortSettingsFragment, PortStatsFragment,
};

use crate::model::{LinkConfig, PoeStatus, Snapshot, TrafficStats};

impl Snapshot {
    /// Merge identity fields from `info.cgi`.
    pub fn apply_info(&mut self, frag: InfoFragment) {
        merge_field(&mut self.model, frag.model);
        merge_field(&mut self.firmware, frag.firmware);
        merge_field(&mut self.firmware_date, frag.firmware_date);
        merge_field(&mut self.hardware, frag.hardware);
        merge_field(&mut self.mac, frag.mac);
        merge_field(&mut self.ip_address, frag.ip_address);
        merge_field(&mut self.netmask, frag.netmask);
        merge_field(&mut self.gateway, frag.gateway);
    }

    /// Merge the PoE budget reading from `pse_system.cgi`.
    pub fn apply_poe_system(&mut self, frag: PoeSystemFragment) {
        merge_field(&mut self.poe_total_power, frag.total_power);
    }

    /// Merge per-port PoE state from `pse_port.cgi`.
    pub fn apply_poe_ports(&mut self, frag: PoePortFragment) {
        for (port, row) in frag.ports {
            self.ports.entry(port).or_default().poe = Some(PoeStatus {
                enabled: row.enabled,
                power: row.power,
                voltage: row.voltage,
                current: row.current,
            });
        }
    }

    /// Merge per-port link configuration from `port.cgi`.
    pub fn apply_port_settings(&mut self, frag: PortSettingsFragment) {
        for (port, row) in frag.ports {
            self.ports.entry(port).or_default().link = Some(LinkConfig {
                admin_state: row.admin_state,
                config_speed: row.config_speed,
                speed: row.speed,
                config_flow: row.config_flow,
                flow_control: row.flow_control,
            });
        }
    }

    /// Merge per-port traffic counters from `port.cgi?page=stats`.
    pub fn apply_port_stats(&mut self, frag: PortStatsFragment) {
        for (port, row) in frag.ports {
            self.ports.entry(port).or_default().traffic = Some(TrafficStats {
                is_link_up: row.is_link_up,
                tx_packets: row.tx_packets,
                rx_packets: row.rx_packets,
                tx_errors: row.tx_errors,
                rx_errors: row.rx_errors,
            });
        }
    }
}

/// Last-fetched-wins per field: `None` in a fragment leaves the prior
/// value untouched.
fn merge_field<T>(slot: &mut Option<T>, incoming: Option<T>) {
    if incoming.is_some() {
        *slot = incoming;
    }
}

#[cfg(test)]
mod tests {
    use keeplink_api::pages::{PoePortRow, PortSettingsRow, PortStatsRow};

    use super::*;

    fn populated_snapshot() -> Snapshot {
        let mut snapshot = Snapshot::default();
        snapshot.apply_info(InfoFragment {
            model: Some("KP-0801".into()),
            mac: Some("1C:2A:8B:10:20:30".into()),
            ..InfoFragment::default()
        });
        snapshot.apply_poe_system(PoeSystemFragment {
            total_power: Some(26.8),
        });
        let mut poe = PoePortFragment::default();
        poe.ports.insert(
            1,
            PoePortRow {
                enabled: true,
                power: 6.5,
                voltage: 53.9,
                current: 120.6,
            },
        );
        snapshot.apply_poe_ports(poe);
        snapshot
    }

    #[test]
    fn empty_fragments_leave_the_snapshot_unchanged() {
        let mut snapshot = populated_snapshot();
        let before = snapshot.clone();

        snapshot.apply_info(InfoFragment::default());
        snapshot.apply_poe_system(PoeSystemFragment::default());
        snapshot.apply_poe_ports(PoePortFragment::default());
        snapshot.apply_port_settings(PortSettingsFragment::default());
        snapshot.apply_port_stats(PortStatsFragment::default());

        assert_eq!(snapshot, before);
    }

    #[test]
    fn poe_group_survives_later_settings_and_stats_merges() {
        let mut snapshot = populated_snapshot();

        let mut settings = PortSettingsFragment::default();
        settings.ports.insert(
            1,
            PortSettingsRow {
                admin_state: true,
                config_speed: "Auto".into(),
                speed: "1000M Full".into(),
                config_flow: false,
                flow_control: "Off".into(),
            },
        );
        snapshot.apply_port_settings(settings);

        let mut stats = PortStatsFragment::default();
        stats.ports.insert(
            1,
            PortStatsRow {
                is_link_up: true,
                tx_packets: 10,
                rx_packets: 20,
                tx_errors: 0,
                rx_errors: 0,
            },
        );
        snapshot.apply_port_stats(stats);

        let port = &snapshot.ports[&1];
        let poe = port.poe.as_ref().expect("poe group retained");
        assert_eq!(poe.power, 6.5);
        assert!(port.link.is_some());
        assert!(port.traffic.is_some());
    }

    #[test]
    fn ports_without_poe_capability_never_gain_a_poe_group() {
        let mut snapshot = Snapshot::default();
        let mut settings = PortSettingsFragment::default();
        settings.ports.insert(
            9,
            PortSettingsRow {
                admin_state: true,
                config_speed: "Auto".into(),
                speed: "10G Full".into(),
                config_flow: false,
                flow_control: "Off".into(),
            },
        );
        snapshot.apply_port_settings(settings);

        assert!(snapshot.ports[&9].poe.is_none());
    }

    #[test]
    fn identity_fields_only_overwrite_when_supplied() {
        let mut snapshot = populated_snapshot();
        snapshot.apply_info(InfoFragment {
            firmware: Some("V1.9.21".into()),
            ..InfoFragment::default()
        });

        assert_eq!(snapshot.model.as_deref(), Some("KP-0801"));
        assert_eq!(snapshot.firmware.as_deref(), Some("V1.9.21"));
    }
}
