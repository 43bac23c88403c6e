//! Payload interpretation: sentinel detection and delta extraction

use serde_json::Value;

use crate::sse::events::{DeltaFragment, PayloadOutcome, DONE_SENTINEL};

const CONTENT_PATH: &str = "/choices/0/delta/content";
const FINISH_REASON_PATH: &str = "/choices/0/finish_reason";

/// Interpret the trimmed text of a `data:` line.
///
/// Only `choices[0].delta.content` is read; every other field may hold
/// anything. JSON without that path is `Empty`, not `Incomplete`: only a
/// syntax failure means more bytes may be on the way.
pub fn extract_delta(payload: &str) -> PayloadOutcome {
    let payload = payload.trim();
    if payload == DONE_SENTINEL {
        return PayloadOutcome::Sentinel;
    }
    // A bare `data:` line carries nothing and can never grow into JSON.
    if payload.is_empty() {
        return PayloadOutcome::Empty;
    }

    let value: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(_) => return PayloadOutcome::Incomplete,
    };

    if let Some(reason) = value.pointer(FINISH_REASON_PATH).and_then(Value::as_str) {
        tracing::debug!("Choice finished: {}", reason);
    }

    value
        .pointer(CONTENT_PATH)
        .and_then(Value::as_str)
        .and_then(|text| DeltaFragment::new(text))
        .map(PayloadOutcome::Delta)
        .unwrap_or(PayloadOutcome::Empty)
}
