//! Rendering boundary.
//!
//! Collectors never talk to widgets directly: snapshots are published
//! through [`StatusSink`], one `set_text`/`set_signal` call per displayed
//! field. A sink that does not carry a field answers `has_field` with
//! `false` and the publisher skips it; a missing widget is a silent no-op,
//! never a failed refresh.

use crate::config::Sentinels;
use crate::fmt;
use crate::model::{HostSnapshot, ModemSnapshot, NetworkSnapshot};

/// Displayed fields addressable through a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Hostname,
    OsVersion,
    BuildId,
    Kernel,
    LoadAvg,
    Memory,
    Uptime,
    LocalTime,
    WanAddr,
    LanAddr,
    ModemAddr,
    ActiveConnections,
    ArpReachable,
    ModemRevision,
    ModemTemperature,
    ModemVoltage,
    ModemConnect,
    ModemSim,
    ModemIsp,
    ModemCqi,
    ModemAmbr,
    ModemNetworkMode,
}

impl Field {
    /// Human-readable label for text sinks and panel rows.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Hostname => "Hostname",
            Field::OsVersion => "System",
            Field::BuildId => "Build",
            Field::Kernel => "Kernel",
            Field::LoadAvg => "Load",
            Field::Memory => "Memory",
            Field::Uptime => "Uptime",
            Field::LocalTime => "Time",
            Field::WanAddr => "WAN IP",
            Field::LanAddr => "LAN IP",
            Field::ModemAddr => "Modem IP",
            Field::ActiveConnections => "Connections",
            Field::ArpReachable => "ARP peers",
            Field::ModemRevision => "Revision",
            Field::ModemTemperature => "Temperature",
            Field::ModemVoltage => "Voltage",
            Field::ModemConnect => "Connect",
            Field::ModemSim => "SIM",
            Field::ModemIsp => "ISP",
            Field::ModemCqi => "CQI",
            Field::ModemAmbr => "AMBR",
            Field::ModemNetworkMode => "Network",
        }
    }
}

/// One signal gauge update. Sentinels are already applied to the text
/// parts; the numeric range drives a bounded gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalReading<'a> {
    pub name: &'a str,
    pub unit: &'a str,
    pub value: i32,
    pub min: i32,
    pub max: i32,
}

/// Consumer side of the rendering boundary.
pub trait StatusSink {
    /// Whether the sink carries a widget for this field. Publishing skips
    /// fields the sink does not carry.
    fn has_field(&self, _field: Field) -> bool {
        true
    }

    fn set_text(&mut self, field: Field, value: &str);

    /// Updates one of the three signal gauge slots.
    fn set_signal(&mut self, slot: usize, reading: &SignalReading<'_>);
}

fn set_or(sink: &mut dyn StatusSink, field: Field, value: Option<String>, sentinel: &str) {
    if !sink.has_field(field) {
        return;
    }
    match value {
        Some(value) => sink.set_text(field, &value),
        None => sink.set_text(field, sentinel),
    }
}

/// Publishes a host snapshot, substituting the unknown sentinel for fields
/// that failed to collect.
pub fn publish_host(sink: &mut dyn StatusSink, snap: &HostSnapshot, sentinels: &Sentinels) {
    let unknown = sentinels.unknown.as_str();
    set_or(sink, Field::Hostname, snap.hostname.clone(), unknown);
    set_or(sink, Field::OsVersion, snap.pretty_name.clone(), unknown);
    set_or(sink, Field::BuildId, snap.build_id.clone(), unknown);
    set_or(sink, Field::Kernel, snap.kernel_release.clone(), unknown);
    set_or(
        sink,
        Field::LoadAvg,
        snap.load_avg.as_ref().map(fmt::format_load_avg),
        unknown,
    );
    set_or(
        sink,
        Field::Memory,
        snap.memory.as_ref().map(fmt::format_memory_usage),
        unknown,
    );
    set_or(
        sink,
        Field::Uptime,
        snap.uptime.as_ref().map(fmt::format_uptime),
        unknown,
    );
    set_or(sink, Field::LocalTime, Some(snap.local_time.clone()), unknown);
}

/// Publishes a network snapshot. Addresses fall back to the no-address
/// sentinel, counters to the unknown sentinel.
pub fn publish_network(sink: &mut dyn StatusSink, snap: &NetworkSnapshot, sentinels: &Sentinels) {
    let no_address = sentinels.no_address.as_str();
    set_or(
        sink,
        Field::WanAddr,
        snap.wan_addr.map(|a| a.to_string()),
        no_address,
    );
    set_or(
        sink,
        Field::LanAddr,
        snap.lan_addr.map(|a| a.to_string()),
        no_address,
    );
    set_or(
        sink,
        Field::ModemAddr,
        snap.wwan_addr.map(|a| a.to_string()),
        no_address,
    );
    set_or(
        sink,
        Field::ActiveConnections,
        snap.conntrack_count.map(|c| c.to_string()),
        &sentinels.unknown,
    );
    set_or(
        sink,
        Field::ArpReachable,
        snap.arp_reachable.map(|c| c.to_string()),
        &sentinels.unknown,
    );
}

/// Publishes a modem snapshot: nine text fields and the three signal
/// gauges. Gauge slots are always published, defaulted or not.
pub fn publish_modem(sink: &mut dyn StatusSink, snap: &ModemSnapshot, sentinels: &Sentinels) {
    let unknown = sentinels.unknown.as_str();
    set_or(sink, Field::ModemRevision, snap.revision.clone(), unknown);
    set_or(sink, Field::ModemTemperature, snap.temperature.clone(), unknown);
    set_or(sink, Field::ModemVoltage, snap.voltage.clone(), unknown);
    set_or(sink, Field::ModemConnect, snap.connect.clone(), unknown);
    set_or(sink, Field::ModemSim, snap.sim.clone(), unknown);
    set_or(sink, Field::ModemIsp, snap.isp.clone(), unknown);
    set_or(sink, Field::ModemCqi, snap.cqi.clone(), unknown);
    set_or(sink, Field::ModemAmbr, snap.ambr.clone(), unknown);
    set_or(sink, Field::ModemNetworkMode, snap.network_mode.clone(), unknown);

    for (slot, signal) in snap.signals.iter().enumerate() {
        let reading = SignalReading {
            name: signal.name.as_deref().unwrap_or(unknown),
            unit: signal.unit.as_deref().unwrap_or(unknown),
            value: signal.value,
            min: signal.min,
            max: signal.max,
        };
        sink.set_signal(slot, &reading);
    }
}

/// Sink collecting plain `label: value` lines, used by `--once` mode.
#[derive(Debug, Default)]
pub struct TextSink {
    lines: Vec<String>,
}

impl TextSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl StatusSink for TextSink {
    fn set_text(&mut self, field: Field, value: &str) {
        self.lines.push(format!("{}: {}", field.label(), value));
    }

    fn set_signal(&mut self, slot: usize, reading: &SignalReading<'_>) {
        self.lines.push(format!(
            "Signal {} ({}): {} {} [{}..{}]",
            slot, reading.name, reading.value, reading.unit, reading.min, reading.max
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MemoryUsage, SignalMetric};
    use std::collections::HashMap;

    /// Sink recording calls, optionally refusing some fields.
    #[derive(Default)]
    struct RecordingSink {
        missing: Vec<Field>,
        texts: HashMap<Field, String>,
        signals: Vec<(usize, String, i32)>,
    }

    impl StatusSink for RecordingSink {
        fn has_field(&self, field: Field) -> bool {
            !self.missing.contains(&field)
        }

        fn set_text(&mut self, field: Field, value: &str) {
            self.texts.insert(field, value.to_string());
        }

        fn set_signal(&mut self, slot: usize, reading: &SignalReading<'_>) {
            self.signals.push((slot, reading.name.to_string(), reading.value));
        }
    }

    #[test]
    fn test_publish_host_applies_unknown_sentinel() {
        let snap = HostSnapshot {
            hostname: Some("router".to_string()),
            memory: Some(MemoryUsage {
                used_bytes: 1024 * 1024 * 1024,
                total_bytes: 4 * 1024 * 1024 * 1024,
            }),
            local_time: "2025-06-01 12:00:00".to_string(),
            ..Default::default()
        };
        let mut sink = RecordingSink::default();
        publish_host(&mut sink, &snap, &Sentinels::default());

        assert_eq!(sink.texts[&Field::Hostname], "router");
        assert_eq!(sink.texts[&Field::Memory], "1.00G / 4.00G (25%)");
        assert_eq!(sink.texts[&Field::Kernel], "unknown");
        assert_eq!(sink.texts[&Field::LoadAvg], "unknown");
        assert_eq!(sink.texts[&Field::LocalTime], "2025-06-01 12:00:00");
    }

    #[test]
    fn test_publish_skips_missing_widgets() {
        let mut sink = RecordingSink {
            missing: vec![Field::BuildId, Field::Uptime],
            ..Default::default()
        };
        publish_host(&mut sink, &HostSnapshot::default(), &Sentinels::default());

        assert!(!sink.texts.contains_key(&Field::BuildId));
        assert!(!sink.texts.contains_key(&Field::Uptime));
        // siblings still publish
        assert!(sink.texts.contains_key(&Field::Hostname));
    }

    #[test]
    fn test_publish_network_distinguishes_sentinels() {
        let mut sink = RecordingSink::default();
        publish_network(&mut sink, &NetworkSnapshot::default(), &Sentinels::default());

        // address fields use the no-address marker, counters the unknown one
        assert_eq!(sink.texts[&Field::WanAddr], "no address");
        assert_eq!(sink.texts[&Field::ModemAddr], "no address");
        assert_eq!(sink.texts[&Field::ActiveConnections], "unknown");
    }

    #[test]
    fn test_publish_network_formats_addresses() {
        let snap = NetworkSnapshot {
            lan_addr: Some("192.168.1.1".parse().unwrap()),
            conntrack_count: Some(7),
            ..Default::default()
        };
        let mut sink = RecordingSink::default();
        publish_network(&mut sink, &snap, &Sentinels::default());

        assert_eq!(sink.texts[&Field::LanAddr], "192.168.1.1");
        assert_eq!(sink.texts[&Field::ActiveConnections], "7");
    }

    #[test]
    fn test_publish_modem_always_fills_three_gauges() {
        let mut snap = ModemSnapshot::default();
        snap.signals[1] = SignalMetric {
            name: Some("RSRQ".to_string()),
            unit: Some("dB".to_string()),
            value: -10,
            min: -20,
            max: 0,
        };
        let mut sink = RecordingSink::default();
        publish_modem(&mut sink, &snap, &Sentinels::default());

        assert_eq!(sink.signals.len(), 3);
        assert_eq!(sink.signals[0], (0, "unknown".to_string(), 0));
        assert_eq!(sink.signals[1], (1, "RSRQ".to_string(), -10));
        assert_eq!(sink.texts[&Field::ModemRevision], "unknown");
    }

    #[test]
    fn test_text_sink_lines() {
        let mut sink = TextSink::new();
        publish_network(&mut sink, &NetworkSnapshot::default(), &Sentinels::default());
        let lines = sink.into_lines();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "WAN IP: no address");
    }
}
