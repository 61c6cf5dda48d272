//! Procfs-backed collection: pure parsers and the host metrics collector.

pub mod host;
pub mod parser;

pub use host::HostCollector;
