//! Runtime configuration for the collectors and the rendering boundary.

use std::time::Duration;

/// Replacement strings for values that could not be collected.
///
/// Two distinct markers: `unknown` for text fields that failed to resolve,
/// `no_address` for interfaces that exist without an address (or do not
/// exist at all). Both are configurable from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentinels {
    pub unknown: String,
    pub no_address: String,
}

impl Default for Sentinels {
    fn default() -> Self {
        Self {
            unknown: "unknown".to_string(),
            no_address: "no address".to_string(),
        }
    }
}

/// Collector configuration.
///
/// Everything the collectors treat as an external constant lives here:
/// paths, interface names, the modem helper command line, periods, and the
/// sentinel strings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base path of the proc filesystem.
    pub proc_path: String,
    /// Path to the OS identity file (`PRETTY_NAME`, `BUILD_ID`).
    pub os_release_path: String,
    /// WAN interface name.
    pub wan_interface: String,
    /// LAN bridge interface name.
    pub lan_interface: String,
    /// Modem interfaces are discovered by this name prefix, not a fixed name.
    pub wwan_prefix: String,
    /// Connection tracking table consumed via `wc -l`.
    pub conntrack_path: String,
    /// ARP table consumed via `cat`.
    pub arp_path: String,
    /// Modem helper command line (program followed by arguments).
    pub modem_helper: Vec<String>,
    /// Deadline for every external command invocation.
    pub exec_timeout: Duration,
    /// Scheduler ticks per fast (host/network) cycle.
    pub fast_period: u32,
    /// Fast cycles per slow (modem) cycle.
    pub slow_period: u32,
    pub sentinels: Sentinels,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proc_path: "/proc".to_string(),
            os_release_path: "/etc/os-release".to_string(),
            wan_interface: "eth1".to_string(),
            lan_interface: "br-lan".to_string(),
            wwan_prefix: "wwan".to_string(),
            conntrack_path: "/proc/net/nf_conntrack".to_string(),
            arp_path: "/proc/net/arp".to_string(),
            modem_helper: vec!["modem-info".to_string()],
            exec_timeout: Duration::from_secs(5),
            fast_period: 200,
            slow_period: 30,
            sentinels: Sentinels::default(),
        }
    }
}
