// SPDX-License-Identifier: MIT

//! Step normalization - expands shorthand step references

use serde_json::{json, Value};

/// Canonicalize a step
///
/// A bare string is shorthand for beginning the dialog it names; any other
/// value is already a step and is returned as-is.
pub fn normalize_step(step: &Value) -> Value {
    match step {
        Value::String(dialog) => json!({
            "$type": "BeginDialog",
            "dialog": { "$ref": dialog }
        }),
        other => other.clone(),
    }
}
