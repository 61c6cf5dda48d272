//! Telemetry collectors.
//!
//! Each collector produces one typed snapshot per call and shares nothing
//! with its siblings beyond the OS itself. The facade [`Collector`] wires
//! them to a [`Config`] and groups the calls by refresh cycle: host and
//! network on the fast cycle, modem on the slow one.

pub mod exec;
pub mod mock;
pub mod modem;
pub mod net;
pub mod procfs;
pub mod traits;

pub use exec::{CommandOutput, CommandRunner, ExecError, RealRunner};
pub use modem::{ModemCollector, ModemState};
#[cfg(target_os = "linux")]
pub use net::RealNet;
pub use net::{ConnectionCounters, NetError, NetQuery, NetworkCollector};
pub use procfs::HostCollector;
pub use traits::{FileSystem, RealFs};

use crate::config::Config;
use crate::model::{HostSnapshot, ModemSnapshot, NetworkSnapshot};

/// Facade bundling the three collectors behind one configuration.
pub struct Collector<F: FileSystem, N: NetQuery, R: CommandRunner + Clone> {
    host: HostCollector<F>,
    network: NetworkCollector<N, R>,
    modem: ModemCollector<R>,
}

impl<F: FileSystem, N: NetQuery, R: CommandRunner + Clone> Collector<F, N, R> {
    pub fn new(fs: F, net: N, runner: R, config: &Config) -> Self {
        let counters = ConnectionCounters::new(
            runner.clone(),
            &config.conntrack_path,
            &config.arp_path,
            config.exec_timeout,
        );
        Self {
            host: HostCollector::new(fs, &config.proc_path, &config.os_release_path),
            network: NetworkCollector::new(
                net,
                counters,
                &config.wan_interface,
                &config.lan_interface,
                &config.wwan_prefix,
            ),
            modem: ModemCollector::new(runner, config.modem_helper.clone(), config.exec_timeout),
        }
    }

    /// Overrides the detected physical memory size (tests, non-Linux).
    pub fn with_total_memory(mut self, bytes: u64) -> Self {
        self.host = self.host.with_total_memory(bytes);
        self
    }

    /// Fast cycle: host metrics.
    pub fn collect_host(&self) -> HostSnapshot {
        self.host.collect()
    }

    /// Fast cycle: interface addresses and counters.
    pub fn collect_network(&self) -> NetworkSnapshot {
        self.network.collect()
    }

    /// Slow cycle: re-run the modem helper.
    pub fn collect_modem(&mut self) -> ModemSnapshot {
        self.modem.collect()
    }

    /// Last modem snapshot, kept between slow cycles.
    pub fn last_modem(&self) -> &ModemSnapshot {
        self.modem.last()
    }
}
