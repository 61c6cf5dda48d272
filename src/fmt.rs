//! Formatting helpers for the rendering boundary.
//!
//! Pure functions only; sentinel substitution for missing values happens in
//! the publisher, not here.

use crate::model::{LoadAvg, MemoryUsage, Uptime};

const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * 1024 * 1024;

/// Format a byte count as `"{:.2}G"` for sizes of at least 1 GiB, otherwise
/// `"{:.2}M"`. Binary units.
pub fn format_memory_size(bytes: u64) -> String {
    if bytes >= GIB {
        format!("{:.2}G", bytes as f64 / GIB as f64)
    } else {
        format!("{:.2}M", bytes as f64 / MIB as f64)
    }
}

/// Format memory usage as `"used / total (pct%)"`.
pub fn format_memory_usage(mem: &MemoryUsage) -> String {
    format!(
        "{} / {} ({}%)",
        format_memory_size(mem.used_bytes),
        format_memory_size(mem.total_bytes),
        mem.percent()
    )
}

/// Format load averages as `"a.aa / b.bb / c.cc"`.
pub fn format_load_avg(load: &LoadAvg) -> String {
    format!("{:.2} / {:.2} / {:.2}", load.one, load.five, load.fifteen)
}

/// Format decomposed uptime as `"1d 2h 3m 4s"`.
pub fn format_uptime(uptime: &Uptime) -> String {
    format!(
        "{}d {}h {}m {}s",
        uptime.days, uptime.hours, uptime.minutes, uptime.seconds
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Uptime;

    #[test]
    fn test_memory_size_gib_boundary() {
        // >= 2^30 renders in G, below renders in M
        assert_eq!(format_memory_size(GIB), "1.00G");
        assert_eq!(format_memory_size(GIB - 1), "1024.00M");
        assert_eq!(format_memory_size(0), "0.00M");
    }

    #[test]
    fn test_memory_size_two_decimals() {
        assert_eq!(format_memory_size(3 * GIB / 2), "1.50G");
        assert_eq!(format_memory_size(512 * MIB), "512.00M");
    }

    #[test]
    fn test_memory_usage_line() {
        let mem = MemoryUsage {
            used_bytes: 2 * GIB,
            total_bytes: 8 * GIB,
        };
        assert_eq!(format_memory_usage(&mem), "2.00G / 8.00G (25%)");
    }

    #[test]
    fn test_load_avg_line() {
        let load = LoadAvg {
            one: 0.5,
            five: 1.0,
            fifteen: 1.257,
        };
        assert_eq!(format_load_avg(&load), "0.50 / 1.00 / 1.26");
    }

    #[test]
    fn test_uptime_line() {
        assert_eq!(format_uptime(&Uptime::from_secs(90_061)), "1d 1h 1m 1s");
        assert_eq!(format_uptime(&Uptime::from_secs(59)), "0d 0h 0m 59s");
    }
}
