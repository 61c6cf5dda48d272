//! Host metrics collector.
//!
//! Gathers hostname, OS identity, kernel release, load average, memory
//! usage, uptime, and wall-clock time. Every field is individually
//! fallible; a failure in one never blocks the others, it just leaves that
//! field `None` in the snapshot.

use std::path::Path;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::collector::procfs::parser::{
    parse_loadavg, parse_meminfo_free_kb, parse_os_release, parse_uptime_secs,
};
use crate::collector::traits::FileSystem;
use crate::model::{HostSnapshot, LoadAvg, MemoryUsage, Uptime};

/// Read bound for single-value pseudo-files.
const VALUE_READ_LIMIT: usize = 64;

/// Collects host-wide metrics from `/proc` and the OS identity file.
pub struct HostCollector<F: FileSystem> {
    fs: F,
    proc_path: String,
    os_release_path: String,
    /// Physical memory is detected once at construction and cached for the
    /// process lifetime; it does not change.
    total_memory: Option<u64>,
}

impl<F: FileSystem> HostCollector<F> {
    /// Creates a new host collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to the proc filesystem (usually "/proc")
    /// * `os_release_path` - Path to the OS identity file
    pub fn new(
        fs: F,
        proc_path: impl Into<String>,
        os_release_path: impl Into<String>,
    ) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
            os_release_path: os_release_path.into(),
            total_memory: detect_total_memory(),
        }
    }

    /// Overrides the detected physical memory size. Used by tests and on
    /// platforms where detection is unavailable.
    pub fn with_total_memory(mut self, bytes: u64) -> Self {
        self.total_memory = Some(bytes);
        self
    }

    /// Collects a snapshot stamped with the current wall-clock time.
    pub fn collect(&self) -> HostSnapshot {
        self.collect_at(Local::now())
    }

    /// Collects a snapshot stamped with the given time.
    pub fn collect_at(&self, now: DateTime<Local>) -> HostSnapshot {
        let (pretty_name, build_id) = self.os_release();
        HostSnapshot {
            hostname: self.hostname(),
            pretty_name,
            build_id,
            kernel_release: self.kernel_release(),
            load_avg: self.load_avg(),
            memory: self.memory(),
            uptime: self.uptime(),
            local_time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    fn hostname(&self) -> Option<String> {
        self.read_value("sys/kernel/hostname")
    }

    fn kernel_release(&self) -> Option<String> {
        self.read_value("sys/kernel/osrelease")
    }

    fn os_release(&self) -> (Option<String>, Option<String>) {
        match self.fs.read_to_string(Path::new(&self.os_release_path)) {
            Ok(content) => {
                let release = parse_os_release(&content);
                (release.pretty_name, release.build_id)
            }
            Err(e) => {
                debug!("cannot read {}: {}", self.os_release_path, e);
                (None, None)
            }
        }
    }

    fn load_avg(&self) -> Option<LoadAvg> {
        let content = self.read_proc("loadavg")?;
        parse_loadavg(&content)
    }

    fn memory(&self) -> Option<MemoryUsage> {
        let total_bytes = self.total_memory?;
        let path = format!("{}/meminfo", self.proc_path);
        let content = match self.fs.read_to_string(Path::new(&path)) {
            Ok(content) => content,
            Err(e) => {
                debug!("cannot read {}: {}", path, e);
                return None;
            }
        };
        let free_bytes = parse_meminfo_free_kb(&content)? * 1024;
        Some(MemoryUsage {
            used_bytes: total_bytes.saturating_sub(free_bytes),
            total_bytes,
        })
    }

    fn uptime(&self) -> Option<Uptime> {
        let content = self.read_proc("uptime")?;
        Some(Uptime::from_secs(parse_uptime_secs(&content)?))
    }

    /// Bounded read of a proc file relative to the proc base path.
    fn read_proc(&self, rel: &str) -> Option<String> {
        let path = format!("{}/{}", self.proc_path, rel);
        match self.fs.read_bounded(Path::new(&path), VALUE_READ_LIMIT) {
            Ok(content) => Some(content),
            Err(e) => {
                debug!("cannot read {}: {}", path, e);
                None
            }
        }
    }

    /// Reads a single-line value file, trimming trailing whitespace.
    fn read_value(&self, rel: &str) -> Option<String> {
        let content = self.read_proc(rel)?;
        let value = content.trim_end();
        if value.is_empty() {
            return None;
        }
        Some(value.to_string())
    }
}

/// Detects total physical memory as page count times page size.
#[cfg(target_os = "linux")]
fn detect_total_memory() -> Option<u64> {
    // SAFETY: sysconf with valid names has no preconditions; failure is
    // reported as -1.
    let pages = unsafe { libc::sysconf(libc::_SC_PHYS_PAGES) };
    let page_size = unsafe { libc::sysconf(libc::_SC_PAGE_SIZE) };
    if pages <= 0 || page_size <= 0 {
        return None;
    }
    Some(pages as u64 * page_size as u64)
}

#[cfg(not(target_os = "linux"))]
fn detect_total_memory() -> Option<u64> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use chrono::TimeZone;

    const GIB: u64 = 1024 * 1024 * 1024;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, 12, 30, 5).unwrap()
    }

    fn collector(fs: MockFs) -> HostCollector<MockFs> {
        HostCollector::new(fs, "/proc", "/etc/os-release").with_total_memory(8 * GIB)
    }

    #[test]
    fn test_collect_full_snapshot() {
        let snap = collector(MockFs::typical_router()).collect_at(fixed_time());

        assert_eq!(snap.hostname.as_deref(), Some("cpe-router"));
        assert_eq!(snap.pretty_name.as_deref(), Some("OpenWrt 24.10.0"));
        assert_eq!(snap.build_id.as_deref(), Some("r28427-6df0e3d02a"));
        assert_eq!(snap.kernel_release.as_deref(), Some("6.6.73"));

        let load = snap.load_avg.unwrap();
        assert!((load.one - 0.15).abs() < 1e-9);

        // 8 GiB total, 6 GiB free
        let mem = snap.memory.unwrap();
        assert_eq!(mem.used_bytes, 2 * GIB);
        assert_eq!(mem.percent(), 25);

        let uptime = snap.uptime.unwrap();
        assert_eq!(
            (uptime.days, uptime.hours, uptime.minutes, uptime.seconds),
            (1, 1, 1, 1)
        );

        assert_eq!(snap.local_time, "2025-06-01 12:30:05");
    }

    #[test]
    fn test_missing_files_degrade_field_by_field() {
        // only loadavg present; every other field falls back independently
        let fs = MockFs::new().with_file("/proc/loadavg", "1.00 2.00 3.00 2/80 999\n");
        let snap = collector(fs).collect_at(fixed_time());

        assert!(snap.hostname.is_none());
        assert!(snap.pretty_name.is_none());
        assert!(snap.build_id.is_none());
        assert!(snap.kernel_release.is_none());
        assert!(snap.memory.is_none());
        assert!(snap.uptime.is_none());
        assert!(snap.load_avg.is_some());
        assert!(!snap.local_time.is_empty());
    }

    #[test]
    fn test_memory_requires_known_total() {
        let fs = MockFs::new().with_file("/proc/meminfo", "MemFree: 1024 kB\n");
        // force the undetected-total case regardless of the test host
        let collector = HostCollector {
            total_memory: None,
            ..HostCollector::new(fs, "/proc", "/etc/os-release")
        };
        assert!(collector.collect_at(fixed_time()).memory.is_none());
    }

    #[test]
    fn test_malformed_loadavg_is_unknown() {
        let fs = MockFs::typical_router().with_file("/proc/loadavg", "0.5 nope\n");
        let snap = collector(fs).collect_at(fixed_time());
        assert!(snap.load_avg.is_none());
    }

    #[test]
    fn test_collect_is_idempotent_for_fixed_state() {
        let collector = collector(MockFs::typical_router());
        let a = collector.collect_at(fixed_time());
        let b = collector.collect_at(fixed_time());
        assert_eq!(a, b);
    }
}
