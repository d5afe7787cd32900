//! Line-oriented extraction of marker output.
//!
//! All helpers tolerate interleaved WLST chatter (banners, warnings, the echo
//! of `connect`) and look only at lines that begin with the requested marker.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Text following `MARKER` on a line that starts with it, if the marker is a
/// whole token (`MARKER`, `MARKER:` or `MARKER: value`).
fn after_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let rest = line.trim_start().strip_prefix(marker)?;
    if rest.is_empty() || rest.trim().is_empty() {
        return Some("");
    }
    rest.strip_prefix(':')
}

/// Whether any line carries `marker`.
pub fn has_marker(stdout: &str, marker: &str) -> bool {
    stdout.lines().any(|line| after_marker(line, marker).is_some())
}

/// Text after the first `MARKER:` line, trimmed.
pub fn marker_message(stdout: &str, marker: &str) -> Option<String> {
    stdout
        .lines()
        .find_map(|line| after_marker(line, marker))
        .map(|rest| rest.trim().to_string())
}

/// Parse every `MARKER:{json}` line into `T`, preserving input order.
///
/// Lines whose payload does not deserialize are skipped.
pub fn marker_records<T: DeserializeOwned>(stdout: &str, marker: &str) -> Vec<T> {
    stdout
        .lines()
        .filter_map(|line| after_marker(line, marker))
        .filter(|payload| !payload.trim().is_empty())
        .filter_map(|payload| match serde_json::from_str::<T>(payload.trim()) {
            Ok(record) => Some(record),
            Err(error) => {
                debug!(marker, %error, "Skipping unparsable marker line");
                None
            }
        })
        .collect()
}

/// Collect `KEY: value` lines with upper-case keys, first occurrence wins.
pub fn key_values(stdout: &str) -> IndexMap<String, String> {
    let mut values = IndexMap::new();
    for line in stdout.lines() {
        let Some((key, value)) = line.trim().split_once(':') else {
            continue;
        };
        let is_marker_key = !key.is_empty() && key.chars().all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit() || ch == '_');
        if is_marker_key {
            values.entry(key.to_string()).or_insert_with(|| value.trim().to_string());
        }
    }
    values
}

/// Trimmed text between the first `start` line and the following `end` line.
pub fn section(stdout: &str, start: &str, end: &str) -> Option<String> {
    let mut lines = stdout.lines();
    lines.by_ref().find(|line| line.trim() == start)?;
    let mut collected = Vec::new();
    for line in lines {
        if line.trim() == end {
            return Some(collected.join("\n").trim().to_string());
        }
        collected.push(line);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        name: String,
    }

    #[test]
    fn marker_records_keep_order_and_skip_garbage() {
        let stdout = "Initializing WebLogic Scripting Tool (WLST) ...\n\
                      SERVER_STATUS:{\"name\":\"AdminServer\"}\n\
                      SERVER_STATUS:not json\n\
                      SERVER_STATUSES:{\"name\":\"ignored\"}\n\
                      \u{20}\u{20}SERVER_STATUS:{\"name\":\"ms1\"}\n";
        let items: Vec<Item> = marker_records(stdout, "SERVER_STATUS");
        assert_eq!(
            items,
            vec![
                Item {
                    name: "AdminServer".to_string()
                },
                Item { name: "ms1".to_string() }
            ]
        );
    }

    #[test]
    fn marker_message_reads_first_occurrence() {
        let stdout = "Connecting to t3://localhost:7001\nSTART_ERROR: Server ms9 does not exist\nSTART_ERROR: second\n";
        assert_eq!(marker_message(stdout, "START_ERROR").as_deref(), Some("Server ms9 does not exist"));
        assert_eq!(marker_message(stdout, "STOP_ERROR"), None);
    }

    #[test]
    fn has_marker_matches_whole_tokens_only() {
        let stdout = "DATASOURCES_DONE\n";
        assert!(has_marker(stdout, "DATASOURCES_DONE"));
        assert!(!has_marker(stdout, "DATASOURCE"));
        assert!(has_marker("SERVER_STOPPED: ms1\n", "SERVER_STOPPED"));
    }

    #[test]
    fn key_values_are_ordered() {
        let stdout = "CONNECTION_SUCCESS\nDOMAIN_NAME: base_domain\nDOMAIN_VERSION: 14.1.1.0.0\nLocation changed to domainRuntime tree: x\n";
        let values = key_values(stdout);
        let keys: Vec<&str> = values.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["DOMAIN_NAME", "DOMAIN_VERSION"]);
        assert_eq!(values["DOMAIN_VERSION"], "14.1.1.0.0");
    }

    #[test]
    fn section_extracts_multiline_block() {
        let stdout = "noise\nTHREAD_DUMP_START\n\"main\" RUNNABLE\n  at java.lang.Thread.run\nTHREAD_DUMP_END\ntrailer\n";
        assert_eq!(
            section(stdout, "THREAD_DUMP_START", "THREAD_DUMP_END").as_deref(),
            Some("\"main\" RUNNABLE\n  at java.lang.Thread.run")
        );
        assert_eq!(section("THREAD_DUMP_START\nno end", "THREAD_DUMP_START", "THREAD_DUMP_END"), None);
    }
}
