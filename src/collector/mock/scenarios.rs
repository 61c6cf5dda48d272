//! Pre-built mock scenarios.
//!
//! These mirror the state of a typical cellular router so tests (and
//! non-Linux builds of the binary) have something realistic to collect.

use std::net::Ipv4Addr;

use super::filesystem::MockFs;
use super::net::MockNet;
use super::runner::MockRunner;

impl MockFs {
    /// A healthy router: every pseudo-file the host collector reads.
    ///
    /// 8 GiB total / 6 GiB free pairs with
    /// `HostCollector::with_total_memory(8 GiB)`.
    pub fn typical_router() -> Self {
        let mut fs = Self::new();
        fs.add_file("/proc/sys/kernel/hostname", "cpe-router\n");
        fs.add_file("/proc/sys/kernel/osrelease", "6.6.73\n");
        fs.add_file("/proc/loadavg", "0.15 0.10 0.05 1/150 1234\n");
        fs.add_file(
            "/proc/meminfo",
            "MemTotal:        8388608 kB\nMemFree:         6291456 kB\nBuffers:          102400 kB\n",
        );
        fs.add_file("/proc/uptime", "90061.27 170000.00\n");
        fs.add_file(
            "/etc/os-release",
            "NAME=\"OpenWrt\"\nVERSION=\"24.10.0\"\nPRETTY_NAME=\"OpenWrt 24.10.0\"\nBUILD_ID=\"r28427-6df0e3d02a\"\n",
        );
        fs
    }
}

impl MockNet {
    /// Interface table of a typical router: LAN bridge, WAN uplink, and one
    /// modem interface with an address.
    pub fn typical_router() -> Self {
        Self::new()
            .with_interface("lo", Some(Ipv4Addr::new(127, 0, 0, 1)))
            .with_interface("br-lan", Some(Ipv4Addr::new(192, 168, 1, 1)))
            .with_interface("eth1", Some(Ipv4Addr::new(100, 64, 10, 2)))
            .with_interface("wwan0", Some(Ipv4Addr::new(10, 163, 52, 7)))
    }
}

impl MockRunner {
    /// Canned outputs for the conntrack count, the ARP dump, and the modem
    /// helper.
    pub fn typical_router() -> Self {
        Self::new()
            .with_output("wc", "118 /proc/net/nf_conntrack\n")
            .with_output(
                "cat",
                "\
IP address       HW type     Flags       HW address            Mask     Device
192.168.1.10 0x1 0x2 aa:bb:cc:dd:ee:ff * br-lan
192.168.1.23 0x1 0x2 11:22:33:44:55:66 * br-lan
192.168.1.40 0x1 0x0 00:00:00:00:00:00 * br-lan
",
            )
            .with_output(
                "modem-info",
                "\
revision:RM520NGLAAR03A03M4G
temperature:41C
voltage:3.9V
connect:connected
sim:ready
isp:TestISP
cqi:DL 12 UL 9
ambr:DL 1000 Mbps UL 200 Mbps
networkmode:NR5G-SA
signal0name:RSRP
signal0value:-87
signal0min:-140
signal0max:-44
signal0unit:dBm
signal1name:RSRQ
signal1value:-10
signal1min:-20
signal1max:0
signal1unit:dB
signal2name:SINR
signal2value:18
signal2min:-10
signal2max:30
signal2unit:dB
",
            )
    }
}
