//! Network interface address resolution.
//!
//! `NetQuery` is the seam over the host's IPv4 socket-control facility. On
//! Linux the real implementation issues a `SIOCGIFADDR` request on a
//! throwaway datagram socket and enumerates live interfaces via
//! `if_nameindex`; tests and other platforms use an in-memory mock.

pub mod counters;

use std::io;
use std::net::Ipv4Addr;

use crate::collector::exec::CommandRunner;
use crate::model::NetworkSnapshot;

pub use counters::ConnectionCounters;

/// Error type for interface address lookups.
#[derive(Debug)]
pub enum NetError {
    /// The interface does not exist or has no IPv4 address bound.
    /// This is the expected case for an absent cellular modem.
    NotFound,
    /// The control socket could not be created or queried.
    Socket(io::Error),
}

impl std::fmt::Display for NetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetError::NotFound => write!(f, "interface not found or no address bound"),
            NetError::Socket(e) => write!(f, "socket error: {}", e),
        }
    }
}

impl std::error::Error for NetError {}

impl From<io::Error> for NetError {
    fn from(e: io::Error) -> Self {
        NetError::Socket(e)
    }
}

/// Abstraction over interface address queries.
pub trait NetQuery {
    /// Resolves the IPv4 address bound to the named interface.
    fn ipv4_of(&self, iface: &str) -> Result<Ipv4Addr, NetError>;

    /// Lists live interface names in the order the OS reports them.
    /// The order is not guaranteed stable across runs.
    fn interface_names(&self) -> Result<Vec<String>, NetError>;
}

/// Returns the address of the first interface whose name starts with
/// `prefix` and that resolves successfully.
///
/// Enumeration order is whatever the OS interface table reports, so with
/// several matching interfaces the winner can change after interface churn.
pub fn first_ipv4_with_prefix<N: NetQuery + ?Sized>(net: &N, prefix: &str) -> Option<Ipv4Addr> {
    let names = match net.interface_names() {
        Ok(names) => names,
        Err(e) => {
            tracing::debug!("interface enumeration failed: {}", e);
            return None;
        }
    };

    names
        .iter()
        .filter(|name| name.starts_with(prefix))
        .find_map(|name| net.ipv4_of(name).ok())
}

/// Collects the network snapshot: per-interface addresses plus the
/// connection and neighbor counters.
pub struct NetworkCollector<N: NetQuery, R: CommandRunner> {
    net: N,
    counters: ConnectionCounters<R>,
    wan_interface: String,
    lan_interface: String,
    wwan_prefix: String,
}

impl<N: NetQuery, R: CommandRunner> NetworkCollector<N, R> {
    pub fn new(
        net: N,
        counters: ConnectionCounters<R>,
        wan_interface: impl Into<String>,
        lan_interface: impl Into<String>,
        wwan_prefix: impl Into<String>,
    ) -> Self {
        Self {
            net,
            counters,
            wan_interface: wan_interface.into(),
            lan_interface: lan_interface.into(),
            wwan_prefix: wwan_prefix.into(),
        }
    }

    pub fn collect(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            wan_addr: self.resolve(&self.wan_interface),
            lan_addr: self.resolve(&self.lan_interface),
            wwan_addr: first_ipv4_with_prefix(&self.net, &self.wwan_prefix),
            conntrack_count: self.counters.conntrack_count(),
            arp_reachable: self.counters.arp_reachable(),
        }
    }

    fn resolve(&self, iface: &str) -> Option<Ipv4Addr> {
        match self.net.ipv4_of(iface) {
            Ok(addr) => Some(addr),
            Err(NetError::NotFound) => None,
            Err(e) => {
                tracing::debug!("address lookup for {} failed: {}", iface, e);
                None
            }
        }
    }
}

/// Real implementation backed by the IPv4 socket-control facility.
#[cfg(target_os = "linux")]
#[derive(Debug, Default, Clone, Copy)]
pub struct RealNet;

#[cfg(target_os = "linux")]
impl RealNet {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "linux")]
impl NetQuery for RealNet {
    fn ipv4_of(&self, iface: &str) -> Result<Ipv4Addr, NetError> {
        use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

        let name = iface.as_bytes();
        let mut ifr: libc::ifreq = unsafe { std::mem::zeroed() };
        if name.is_empty() || name.len() >= ifr.ifr_name.len() {
            return Err(NetError::NotFound);
        }
        for (dst, src) in ifr.ifr_name.iter_mut().zip(name) {
            *dst = *src as libc::c_char;
        }

        let raw = unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM, 0) };
        if raw < 0 {
            return Err(NetError::Socket(io::Error::last_os_error()));
        }
        // SAFETY: raw is a freshly created descriptor we own; OwnedFd closes
        // it on every exit path.
        let fd = unsafe { OwnedFd::from_raw_fd(raw) };

        // SAFETY: fd is valid and ifr is a zero-initialized ifreq with a
        // NUL-terminated interface name.
        let ret =
            unsafe { libc::ioctl(fd.as_raw_fd(), libc::SIOCGIFADDR, &mut ifr as *mut libc::ifreq) };
        if ret == -1 {
            return Err(NetError::NotFound);
        }

        // SAFETY: for AF_INET the kernel stores a sockaddr_in in ifr_ifru.
        let sin = unsafe {
            *(&ifr.ifr_ifru.ifru_addr as *const libc::sockaddr as *const libc::sockaddr_in)
        };
        Ok(Ipv4Addr::from(u32::from_be(sin.sin_addr.s_addr)))
    }

    fn interface_names(&self) -> Result<Vec<String>, NetError> {
        let head = unsafe { libc::if_nameindex() };
        if head.is_null() {
            return Err(NetError::Socket(io::Error::last_os_error()));
        }

        let mut names = Vec::new();
        // SAFETY: the array returned by if_nameindex is terminated by an
        // entry with if_index == 0 and freed exactly once below.
        unsafe {
            let mut entry = head;
            while (*entry).if_index != 0 {
                if !(*entry).if_name.is_null() {
                    names.push(
                        std::ffi::CStr::from_ptr((*entry).if_name)
                            .to_string_lossy()
                            .into_owned(),
                    );
                }
                entry = entry.add(1);
            }
            libc::if_freenameindex(head);
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockNet;

    #[test]
    fn test_prefix_match_first_resolvable_wins() {
        let net = MockNet::new()
            .with_interface("lo", Some(Ipv4Addr::new(127, 0, 0, 1)))
            .with_interface("wwan0", None)
            .with_interface("wwan1", Some(Ipv4Addr::new(10, 64, 0, 2)));

        // wwan0 matches the prefix first but has no address, so the scan
        // moves on to wwan1
        assert_eq!(
            first_ipv4_with_prefix(&net, "wwan"),
            Some(Ipv4Addr::new(10, 64, 0, 2))
        );
    }

    #[test]
    fn test_prefix_match_no_candidates() {
        let net = MockNet::new().with_interface("eth0", Some(Ipv4Addr::new(192, 168, 1, 2)));
        assert_eq!(first_ipv4_with_prefix(&net, "wwan"), None);
    }

    #[test]
    fn test_prefix_match_follows_enumeration_order() {
        // Both candidates resolve; the scan takes the one the table reports
        // first, whichever it is.
        let net = MockNet::new()
            .with_interface("wwan1", Some(Ipv4Addr::new(10, 0, 0, 1)))
            .with_interface("wwan0", Some(Ipv4Addr::new(10, 0, 0, 2)));

        let winner = first_ipv4_with_prefix(&net, "wwan").unwrap();
        let names = net.interface_names().unwrap();
        let expected_first = names.iter().find(|n| n.starts_with("wwan")).unwrap();
        let expected = net.ipv4_of(expected_first).unwrap();
        assert_eq!(winner, expected);
    }

    #[test]
    fn test_network_collector_snapshot() {
        use crate::collector::mock::MockRunner;
        use crate::collector::net::counters::ConnectionCounters;
        use std::time::Duration;

        let counters = ConnectionCounters::new(
            MockRunner::typical_router(),
            "/proc/net/nf_conntrack",
            "/proc/net/arp",
            Duration::from_secs(1),
        );
        let collector = NetworkCollector::new(
            MockNet::typical_router(),
            counters,
            "eth1",
            "br-lan",
            "wwan",
        );

        let snap = collector.collect();
        assert_eq!(snap.wan_addr, Some(Ipv4Addr::new(100, 64, 10, 2)));
        assert_eq!(snap.lan_addr, Some(Ipv4Addr::new(192, 168, 1, 1)));
        assert_eq!(snap.wwan_addr, Some(Ipv4Addr::new(10, 163, 52, 7)));
        assert_eq!(snap.conntrack_count, Some(118));
        assert_eq!(snap.arp_reachable, Some(2));
    }

    #[test]
    fn test_network_collector_degrades_to_absent() {
        use crate::collector::mock::MockRunner;
        use crate::collector::net::counters::ConnectionCounters;
        use std::time::Duration;

        let counters = ConnectionCounters::new(
            MockRunner::new(),
            "/proc/net/nf_conntrack",
            "/proc/net/arp",
            Duration::from_secs(1),
        );
        let collector =
            NetworkCollector::new(MockNet::new(), counters, "eth1", "br-lan", "wwan");

        let snap = collector.collect();
        assert_eq!(snap, NetworkSnapshot::default());
    }

    #[test]
    fn test_collect_is_idempotent_for_fixed_state() {
        use crate::collector::mock::MockRunner;
        use std::time::Duration;

        let counters = ConnectionCounters::new(
            MockRunner::typical_router(),
            "/proc/net/nf_conntrack",
            "/proc/net/arp",
            Duration::from_secs(1),
        );
        let collector = NetworkCollector::new(
            MockNet::typical_router(),
            counters,
            "eth1",
            "br-lan",
            "wwan",
        );
        assert_eq!(collector.collect(), collector.collect());
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_real_net_nonexistent_interface_is_not_found() {
        let net = RealNet::new();
        assert!(matches!(
            net.ipv4_of("nonexistent0"),
            Err(NetError::NotFound)
        ));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_real_net_overlong_name_is_not_found() {
        let net = RealNet::new();
        assert!(matches!(
            net.ipv4_of("an-interface-name-way-past-ifnamsiz"),
            Err(NetError::NotFound)
        ));
    }
}
