//! Connection and neighbor counters.
//!
//! Both counts come from OS table snapshots taken through external
//! commands: a line count over the connection-tracking table and a dump of
//! the ARP table. An absent table degrades the count to `None`.

use std::time::Duration;

use tracing::debug;

use crate::collector::exec::CommandRunner;
use crate::collector::procfs::parser::{parse_arp_reachable, parse_wc_count};

/// Counts active connections and reachable ARP neighbors.
pub struct ConnectionCounters<R: CommandRunner> {
    runner: R,
    conntrack_path: String,
    arp_path: String,
    timeout: Duration,
}

impl<R: CommandRunner> ConnectionCounters<R> {
    pub fn new(
        runner: R,
        conntrack_path: impl Into<String>,
        arp_path: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            runner,
            conntrack_path: conntrack_path.into(),
            arp_path: arp_path.into(),
            timeout,
        }
    }

    /// Line count of the connection-tracking table.
    ///
    /// When the table path is absent the count command produces no output
    /// and the result is `None`.
    pub fn conntrack_count(&self) -> Option<u32> {
        let args = ["-l".to_string(), self.conntrack_path.clone()];
        match self.runner.run("wc", &args, self.timeout) {
            Ok(output) => parse_wc_count(&output.stdout),
            Err(e) => {
                debug!("conntrack count failed: {}", e);
                None
            }
        }
    }

    /// Number of ARP entries in the reachable state.
    pub fn arp_reachable(&self) -> Option<u32> {
        let args = [self.arp_path.clone()];
        match self.runner.run("cat", &args, self.timeout) {
            Ok(output) if output.success => Some(parse_arp_reachable(&output.stdout)),
            Ok(_) => None,
            Err(e) => {
                debug!("ARP dump failed: {}", e);
                None
            }
        }
    }
}
