//! Modem telemetry collector.
//!
//! Invokes the external modem helper on every slow cycle and parses its
//! `key:value` output into a [`ModemSnapshot`]. There is no persistent
//! connection and no incremental update: each invocation starts from the
//! all-default snapshot and the helper is re-run fresh.

pub mod parser;

use std::time::Duration;

use tracing::debug;

use crate::collector::exec::CommandRunner;
use crate::model::ModemSnapshot;

/// Collector lifecycle. Transitions `Idle` → `Parsed` on the first
/// invocation and stays `Parsed` from then on, never backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModemState {
    /// No collection has run yet.
    Idle,
    /// The last collected snapshot is available.
    Parsed,
}

/// Collects modem status by scraping the helper process.
pub struct ModemCollector<R: CommandRunner> {
    runner: R,
    command: Vec<String>,
    timeout: Duration,
    state: ModemState,
    last: ModemSnapshot,
}

impl<R: CommandRunner> ModemCollector<R> {
    /// Creates a collector around the helper command line (program followed
    /// by its arguments).
    pub fn new(runner: R, command: Vec<String>, timeout: Duration) -> Self {
        Self {
            runner,
            command,
            timeout,
            state: ModemState::Idle,
            last: ModemSnapshot::default(),
        }
    }

    pub fn state(&self) -> ModemState {
        self.state
    }

    /// Last collected snapshot; all defaults before the first collection.
    pub fn last(&self) -> &ModemSnapshot {
        &self.last
    }

    /// Runs the helper and produces a fresh snapshot.
    ///
    /// Every field starts at its default; whatever the helper printed
    /// before exiting (or being killed at the deadline) is applied on top.
    /// A helper that cannot be spawned leaves the defaults in place.
    pub fn collect(&mut self) -> ModemSnapshot {
        let snapshot = match self.command.split_first() {
            Some((program, args)) => match self.runner.run(program, args, self.timeout) {
                Ok(output) => parser::parse_modem_info(&output.stdout),
                Err(e) => {
                    debug!("modem helper failed: {}", e);
                    ModemSnapshot::default()
                }
            },
            None => ModemSnapshot::default(),
        };

        self.last = snapshot.clone();
        self.state = ModemState::Parsed;
        snapshot
    }
}
