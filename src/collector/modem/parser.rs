//! Parser for the modem helper's line-oriented output.
//!
//! The helper prints one `key:value` pair per line. Values are not quoted,
//! so a value containing a colon is truncated at the first one. Numeric
//! fields parse-or-default to 0; unrecognized keys are ignored.

use crate::model::{ModemSnapshot, SIGNAL_SLOTS};

/// Parses helper output into a fresh snapshot.
pub fn parse_modem_info(output: &str) -> ModemSnapshot {
    let mut snapshot = ModemSnapshot::default();
    for line in output.lines() {
        apply_line(&mut snapshot, line);
    }
    snapshot
}

/// Applies a single `key:value` line to the snapshot.
fn apply_line(snapshot: &mut ModemSnapshot, line: &str) {
    let Some((key, rest)) = line.split_once(':') else {
        return;
    };
    let value = rest.split(':').next().unwrap_or("");
    if value.is_empty() {
        return;
    }

    match key {
        "revision" => snapshot.revision = Some(value.to_string()),
        "temperature" => snapshot.temperature = Some(value.to_string()),
        "voltage" => snapshot.voltage = Some(value.to_string()),
        "connect" => snapshot.connect = Some(value.to_string()),
        "sim" => snapshot.sim = Some(value.to_string()),
        "isp" => snapshot.isp = Some(value.to_string()),
        "cqi" => snapshot.cqi = Some(value.to_string()),
        "ambr" => snapshot.ambr = Some(value.to_string()),
        "networkmode" => snapshot.network_mode = Some(value.to_string()),
        _ => apply_signal_line(snapshot, key, value),
    }
}

/// Handles the `signal{slot}{field}` key family.
fn apply_signal_line(snapshot: &mut ModemSnapshot, key: &str, value: &str) {
    let Some(rest) = key.strip_prefix("signal") else {
        return;
    };
    let mut chars = rest.chars();
    let Some(slot) = chars.next().and_then(|c| c.to_digit(10)) else {
        return;
    };
    let slot = slot as usize;
    if slot >= SIGNAL_SLOTS {
        return;
    }

    let signal = &mut snapshot.signals[slot];
    match chars.as_str() {
        "name" => signal.name = Some(value.to_string()),
        "unit" => signal.unit = Some(value.to_string()),
        "value" => signal.value = value.parse().unwrap_or(0),
        "min" => signal.min = value.parse().unwrap_or(0),
        "max" => signal.max = value.parse().unwrap_or(0),
        _ => {}
    }
}
