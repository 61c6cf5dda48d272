//! Typed telemetry snapshots.
//!
//! Every snapshot is an immutable value produced by one collection cycle and
//! replaced wholesale on the next. `None` is the typed "unknown" marker for
//! a field that was queried and could not be resolved; the configured
//! sentinel strings are applied only at the rendering boundary.

use std::net::Ipv4Addr;

use serde::Serialize;

/// 1/5/15-minute load averages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoadAvg {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

/// Physical memory usage in bytes.
///
/// `total_bytes` is detected once at startup and never changes; `used_bytes`
/// is recomputed every cycle. Invariant: `used_bytes <= total_bytes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryUsage {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

impl MemoryUsage {
    /// Usage percentage rounded to an integer for display.
    pub fn percent(&self) -> u32 {
        if self.total_bytes == 0 {
            return 0;
        }
        (self.used_bytes as f64 / self.total_bytes as f64 * 100.0).round() as u32
    }
}

/// Uptime decomposed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Uptime {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Uptime {
    /// Decomposes a seconds count by successive division by 86400/3600/60.
    pub fn from_secs(total: u64) -> Self {
        let days = total / 86_400;
        let rest = total % 86_400;
        let hours = rest / 3_600;
        let rest = rest % 3_600;
        Self {
            days,
            hours,
            minutes: rest / 60,
            seconds: rest % 60,
        }
    }
}

/// Host telemetry collected on the fast cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HostSnapshot {
    pub hostname: Option<String>,
    pub pretty_name: Option<String>,
    pub build_id: Option<String>,
    pub kernel_release: Option<String>,
    pub load_avg: Option<LoadAvg>,
    pub memory: Option<MemoryUsage>,
    pub uptime: Option<Uptime>,
    /// Local wall-clock time, `YYYY-MM-DD HH:MM:SS`.
    pub local_time: String,
}

/// Network telemetry collected on the fast cycle.
///
/// `None` addresses mean "no address bound or interface absent", rendered
/// with the dedicated no-address sentinel. `None` counts mean the backing
/// table was unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NetworkSnapshot {
    pub wan_addr: Option<Ipv4Addr>,
    pub lan_addr: Option<Ipv4Addr>,
    pub wwan_addr: Option<Ipv4Addr>,
    pub conntrack_count: Option<u32>,
    pub arp_reachable: Option<u32>,
}

/// Number of signal gauges on the modem panel. Always exactly three; the
/// rendering boundary depends on the fixed count.
pub const SIGNAL_SLOTS: usize = 3;

/// One bounded signal gauge reported by the modem helper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignalMetric {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub value: i32,
    pub min: i32,
    pub max: i32,
}

/// Modem telemetry collected on the slow cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModemSnapshot {
    pub revision: Option<String>,
    pub temperature: Option<String>,
    pub voltage: Option<String>,
    pub connect: Option<String>,
    pub sim: Option<String>,
    pub isp: Option<String>,
    pub cqi: Option<String>,
    pub ambr: Option<String>,
    pub network_mode: Option<String>,
    pub signals: [SignalMetric; SIGNAL_SLOTS],
}
