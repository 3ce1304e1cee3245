//! Composable helpers shared by the per-wizard payload mappers.
//!
//! Every wizard flattens its form state into webhook fields with the same
//! handful of moves: yes/no selectors become booleans, dependent fields are
//! nulled when their gate is off, array inputs are joined, and ordered upload
//! lists splat into numbered keys. The field lists stay explicit per wizard;
//! only the moves live here.

use serde_json::{Map, Value};

use super::FormState;
use crate::upload::UploadRecord;

/// `"yes"` (any casing) becomes `true`; everything else, including a missing
/// slice, becomes `false`.
pub fn yes_no_to_bool(value: &Value) -> Value {
    let is_yes = value
        .as_str()
        .map(|raw| raw.trim().eq_ignore_ascii_case("yes"))
        .unwrap_or(false);
    Value::Bool(is_yes)
}

/// Keeps `value` when the gate holds, otherwise nulls the dependent field.
pub fn only_if(condition: bool, value: Value) -> Value {
    if condition {
        value
    } else {
        Value::Null
    }
}

/// Joins an array of strings with `separator`, skipping blank entries.
/// Non-array slices collapse to an empty string.
pub fn join_non_empty(value: &Value, separator: &str) -> Value {
    let joined = value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str())
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .collect::<Vec<_>>()
                .join(separator)
        })
        .unwrap_or_default();
    Value::String(joined)
}

/// String value of a top-level slice, empty when absent or non-string.
pub fn slice_str(state: &FormState, key: &str) -> Value {
    Value::String(
        state
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string(),
    )
}

/// String value of one field inside an object slice.
pub fn nested_str(state: &FormState, key: &str, field: &str) -> Value {
    Value::String(
        state
            .get(key)
            .and_then(|slice| slice.get(field))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string(),
    )
}

/// Decodes an upload-list slice. Malformed or missing slices decode to an
/// empty list rather than failing the mapper.
pub fn upload_records(state: &FormState, key: &str) -> Vec<UploadRecord> {
    state
        .get(key)
        .cloned()
        .and_then(|slice| serde_json::from_value(slice).ok())
        .unwrap_or_default()
}

/// Splats an ordered upload list into `{prefix}_1 .. {prefix}_N` keys. Array
/// position is the user-assigned rank, so position 1 is the lead photo.
pub fn splat_photo_urls(payload: &mut Map<String, Value>, prefix: &str, records: &[UploadRecord]) {
    for (index, record) in records.iter().enumerate() {
        payload.insert(
            format!("{}_{}", prefix, index + 1),
            Value::String(record.s3_url.clone()),
        );
    }
}

/// URL of a singleton upload slice, null when nothing was uploaded.
pub fn single_photo_url(state: &FormState, key: &str) -> Value {
    state
        .get(key)
        .cloned()
        .and_then(|slice| serde_json::from_value::<UploadRecord>(slice).ok())
        .map(|record| Value::String(record.s3_url))
        .unwrap_or(Value::Null)
}
