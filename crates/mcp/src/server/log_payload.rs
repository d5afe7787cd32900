//! Helpers for shaping tool call log payloads.
//!
//! Payloads are serialized, stripped of credentials, and capped in size
//! before they reach the tracing subscriber.

use serde_json::{Map, Value};

const MAX_LOG_PAYLOAD_BYTES: usize = 16 * 1024;

/// Builds the log payload for one tool call.
///
/// The payload includes `request` and/or `response` when present. Returns
/// `None` when both values are absent.
pub(crate) fn build_log_payload(request: Option<Value>, response: Option<Value>) -> Option<String> {
    let mut payload = Map::new();
    if let Some(request_value) = request {
        payload.insert("request".to_string(), request_value);
    }
    if let Some(response_value) = response {
        payload.insert("response".to_string(), response_value);
    }
    if payload.is_empty() {
        return None;
    }
    let serialized = serde_json::to_string(&Value::Object(payload)).ok()?;
    Some(truncate_payload(wlst_util::redact_sensitive(&serialized)))
}

fn truncate_payload(mut payload: String) -> String {
    if payload.len() <= MAX_LOG_PAYLOAD_BYTES {
        return payload;
    }
    let mut cut = MAX_LOG_PAYLOAD_BYTES;
    while !payload.is_char_boundary(cut) {
        cut -= 1;
    }
    let omitted = payload.len() - cut;
    payload.truncate(cut);
    payload.push_str(&format!("… ({omitted} bytes omitted)"));
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn passwords_never_reach_the_log() {
        let request = json!({ "server_name": "ms1", "password": "welcome1", "db_password": "tiger" });
        let payload = build_log_payload(Some(request), None).expect("payload");
        assert!(payload.contains("ms1"));
        assert!(!payload.contains("welcome1"));
        assert!(!payload.contains("tiger"));
    }

    #[test]
    fn empty_payload_is_skipped() {
        assert!(build_log_payload(None, None).is_none());
    }

    #[test]
    fn oversized_payloads_are_truncated() {
        let response = json!({ "text": "é".repeat(MAX_LOG_PAYLOAD_BYTES) });
        let payload = build_log_payload(None, Some(response)).expect("payload");
        assert!(payload.len() < MAX_LOG_PAYLOAD_BYTES + 64);
        assert!(payload.ends_with("bytes omitted)"));
    }
}
