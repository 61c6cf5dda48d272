//! Parsers for procfs files and OS table dumps.
//!
//! These are pure functions over string input, designed to be testable
//! without a real `/proc`. Malformed input is never an error at this layer:
//! a value that does not parse simply yields `None` (or is skipped), and
//! the caller degrades that field to its sentinel.

use crate::model::LoadAvg;

/// Extracts the value of `KEY=value` / `KEY="value"` from a single line.
///
/// Matches only when the line begins with `key` immediately followed by
/// `=`. Quoted values are the content between the first pair of double
/// quotes (an unterminated quote is no match); unquoted values run to the
/// end of the line with a trailing newline trimmed. No-match is the normal
/// case while scanning a file, not an error.
pub fn extract_env_value(line: &str, key: &str) -> Option<String> {
    let rest = line.strip_prefix(key)?;
    let value = rest.strip_prefix('=')?;

    if let Some(quoted) = value.strip_prefix('"') {
        let end = quoted.find('"')?;
        return Some(quoted[..end].to_string());
    }

    Some(value.trim_end_matches(['\n', '\r']).to_string())
}

/// Fields of interest from an OS identity file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
    pub pretty_name: Option<String>,
    pub build_id: Option<String>,
}

/// Scans an OS identity file for `PRETTY_NAME` and `BUILD_ID`.
///
/// The first match per key wins; keys that never match stay `None`.
pub fn parse_os_release(content: &str) -> OsRelease {
    let mut release = OsRelease::default();
    for line in content.lines() {
        if release.pretty_name.is_none() {
            release.pretty_name = extract_env_value(line, "PRETTY_NAME");
        }
        if release.build_id.is_none() {
            release.build_id = extract_env_value(line, "BUILD_ID");
        }
        if release.pretty_name.is_some() && release.build_id.is_some() {
            break;
        }
    }
    release
}

/// Parses the three leading load averages of `/proc/loadavg`.
///
/// Returns `None` unless three floats parse.
pub fn parse_loadavg(content: &str) -> Option<LoadAvg> {
    let mut fields = content.split_whitespace();
    let one = fields.next()?.parse().ok()?;
    let five = fields.next()?.parse().ok()?;
    let fifteen = fields.next()?.parse().ok()?;
    Some(LoadAvg { one, five, fifteen })
}

/// Extracts the `MemFree:` kilobyte value from `/proc/meminfo` content.
pub fn parse_meminfo_free_kb(content: &str) -> Option<u64> {
    for line in content.lines() {
        if let Some(rest) = line.strip_prefix("MemFree:") {
            return rest.split_whitespace().next()?.parse().ok();
        }
    }
    None
}

/// Parses the uptime seconds count leading `/proc/uptime`.
pub fn parse_uptime_secs(content: &str) -> Option<u64> {
    let seconds: f64 = content.split_whitespace().next()?.parse().ok()?;
    if seconds < 0.0 {
        return None;
    }
    Some(seconds as u64)
}

/// Parses the line count leading `wc -l` output.
///
/// An absent table produces empty output, which is `None` here.
pub fn parse_wc_count(output: &str) -> Option<u32> {
    output.split_whitespace().next()?.parse().ok()
}

/// Flags value marking a reachable (resolved) neighbor entry.
const ARP_FLAG_COMPLETE: &str = "0x2";

/// Counts reachable entries in an ARP table dump.
///
/// The header line is skipped; each remaining row must have exactly six
/// whitespace-separated fields (address, hardware type, flags, hardware
/// address, mask, device) and counts when its flags field is `0x2`.
/// Malformed rows are skipped, not errors.
pub fn parse_arp_reachable(content: &str) -> u32 {
    let mut count = 0;
    for line in content.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 6 {
            continue;
        }
        if fields[2] == ARP_FLAG_COMPLETE {
            count += 1;
        }
    }
    count
}
