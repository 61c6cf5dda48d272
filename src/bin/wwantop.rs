//! wwantop - status dashboard for a cellular router.
//!
//! Collects host, network, and modem telemetry on a two-speed cadence and
//! renders it as a full-screen panel.
//!
//! Usage:
//!   wwantop                  # full-screen dashboard
//!   wwantop --once           # one collection round printed to stdout
//!   wwantop --once --json    # same round as JSON

use std::time::Duration;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[cfg(not(target_os = "linux"))]
use wwantop::collector::mock::{MockFs, MockNet, MockRunner};
#[cfg(target_os = "linux")]
use wwantop::collector::{RealFs, RealNet, RealRunner};
use wwantop::collector::{Collector, CommandRunner, FileSystem, NetQuery};
use wwantop::config::{Config, Sentinels};
use wwantop::model::{HostSnapshot, ModemSnapshot, NetworkSnapshot};
use wwantop::render::{TextSink, publish_host, publish_modem, publish_network};
use wwantop::tui::App;

/// Cellular router status dashboard.
#[derive(Parser)]
#[command(name = "wwantop", about = "Cellular router status dashboard", version)]
struct Args {
    /// Collect one round, print it to stdout, and exit.
    #[arg(long)]
    once: bool,

    /// With --once, print the snapshots as JSON instead of text.
    #[arg(long, requires = "once")]
    json: bool,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = "/proc")]
    proc_path: String,

    /// Path to the OS identity file.
    #[arg(long, default_value = "/etc/os-release")]
    os_release: String,

    /// WAN interface name.
    #[arg(long, default_value = "eth1")]
    wan: String,

    /// LAN interface name.
    #[arg(long, default_value = "br-lan")]
    lan: String,

    /// Modem interfaces are matched by this name prefix.
    #[arg(long, default_value = "wwan")]
    wwan_prefix: String,

    /// Connection tracking table path.
    #[arg(long, default_value = "/proc/net/nf_conntrack")]
    conntrack_path: String,

    /// ARP table path.
    #[arg(long, default_value = "/proc/net/arp")]
    arp_path: String,

    /// Modem helper command line (whitespace-separated).
    #[arg(long, default_value = "modem-info")]
    modem_helper: String,

    /// Deadline in seconds for external commands.
    #[arg(long, default_value = "5")]
    exec_timeout: u64,

    /// Scheduler ticks per host/network refresh.
    #[arg(long, default_value = "200")]
    fast_period: u32,

    /// Host/network refreshes per modem refresh.
    #[arg(long, default_value = "30")]
    slow_period: u32,

    /// Replacement text for values that failed to collect.
    #[arg(long, default_value = "unknown")]
    unknown_text: String,

    /// Replacement text for interfaces without an address.
    #[arg(long, default_value = "no address")]
    no_address_text: String,

    /// Increase logging verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber. The dashboard shares the terminal
/// with the log output, so the default level is WARN.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("wwantop={}", level).parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn config_from_args(args: &Args) -> Config {
    Config {
        proc_path: args.proc_path.clone(),
        os_release_path: args.os_release.clone(),
        wan_interface: args.wan.clone(),
        lan_interface: args.lan.clone(),
        wwan_prefix: args.wwan_prefix.clone(),
        conntrack_path: args.conntrack_path.clone(),
        arp_path: args.arp_path.clone(),
        modem_helper: args
            .modem_helper
            .split_whitespace()
            .map(str::to_string)
            .collect(),
        exec_timeout: Duration::from_secs(args.exec_timeout),
        fast_period: args.fast_period,
        slow_period: args.slow_period,
        sentinels: Sentinels {
            unknown: args.unknown_text.clone(),
            no_address: args.no_address_text.clone(),
        },
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let config = config_from_args(&args);

    #[cfg(target_os = "linux")]
    let mut collector = Collector::new(RealFs::new(), RealNet::new(), RealRunner::new(), &config);
    #[cfg(not(target_os = "linux"))]
    let mut collector = Collector::new(
        MockFs::typical_router(),
        MockNet::typical_router(),
        MockRunner::typical_router(),
        &config,
    )
    .with_total_memory(8 * 1024 * 1024 * 1024);

    if args.once {
        run_once(&mut collector, &config, args.json);
        return;
    }

    let app = App::new(collector, &config);
    if let Err(e) = app.run() {
        eprintln!("Error running dashboard: {}", e);
        std::process::exit(1);
    }
}

/// One collection round on stdout: the scripting/smoke-test entry point.
fn run_once<F, N, R>(collector: &mut Collector<F, N, R>, config: &Config, json: bool)
where
    F: FileSystem,
    N: NetQuery,
    R: CommandRunner + Clone,
{
    let host = collector.collect_host();
    let network = collector.collect_network();
    let modem = collector.collect_modem();

    if json {
        #[derive(serde::Serialize)]
        struct Round<'a> {
            host: &'a HostSnapshot,
            network: &'a NetworkSnapshot,
            modem: &'a ModemSnapshot,
        }
        match serde_json::to_string_pretty(&Round {
            host: &host,
            network: &network,
            modem: &modem,
        }) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error serializing snapshots: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let mut sink = TextSink::new();
    publish_host(&mut sink, &host, &config.sentinels);
    publish_network(&mut sink, &network, &config.sentinels);
    publish_modem(&mut sink, &modem, &config.sentinels);
    for line in sink.into_lines() {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_map_to_config() {
        let args = Args::parse_from([
            "wwantop",
            "--wan",
            "eth0.2",
            "--modem-helper",
            "/usr/bin/python3 /usr/share/wwantop/modem_info.py",
            "--exec-timeout",
            "2",
            "--unknown-text",
            "-",
        ]);
        let config = config_from_args(&args);

        assert_eq!(config.wan_interface, "eth0.2");
        assert_eq!(
            config.modem_helper,
            vec!["/usr/bin/python3", "/usr/share/wwantop/modem_info.py"]
        );
        assert_eq!(config.exec_timeout, Duration::from_secs(2));
        assert_eq!(config.sentinels.unknown, "-");
        // defaults survive
        assert_eq!(config.lan_interface, "br-lan");
        assert_eq!(config.slow_period, 30);
    }
}
