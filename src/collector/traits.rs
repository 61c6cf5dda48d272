//! Filesystem abstraction for the procfs-backed collectors.
//!
//! The `FileSystem` trait allows the collectors to work with both the real
//! `/proc` filesystem on Linux and an in-memory mock in tests and on other
//! platforms.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Abstraction for read access to pseudo-files.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Reads at most `max` bytes of a file as a string.
    ///
    /// The bound is enforced at read time; the result never allocates past
    /// `max` bytes of input. Returns an error only when the file cannot be
    /// opened or read.
    fn read_bounded(&self, path: &Path, max: usize) -> io::Result<String>;
}

/// Real filesystem implementation that delegates to `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn read_bounded(&self, path: &Path, max: usize) -> io::Result<String> {
        let file = File::open(path)?;
        let mut buf = Vec::with_capacity(max.min(4096));
        file.take(max as u64).read_to_end(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
