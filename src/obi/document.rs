// SPDX-License-Identifier: MIT

//! Read-only view over an OBI dialog document

use serde_json::Value;

use super::types::type_tag;

/// Root of every node id
pub const ROOT_ID: &str = "$";

const RULE_FIELDS: [&str; 2] = ["rules", "triggers"];
const STEP_FIELDS: [&str; 2] = ["steps", "actions"];

/// Borrowed accessors for the top-level fields the transformer reads
///
/// Any JSON value is accepted. Fields that are missing or of the wrong shape
/// read as absent/empty, so malformed documents degrade instead of failing.
#[derive(Debug, Clone, Copy)]
pub struct ObiDocument<'a> {
    raw: &'a Value,
}

impl<'a> ObiDocument<'a> {
    pub fn new(raw: &'a Value) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &'a Value {
        self.raw
    }

    /// The `recognizer` field if it is present and not null
    pub fn recognizer(&self) -> Option<&'a Value> {
        self.raw.get("recognizer").filter(|v| !v.is_null())
    }

    /// Recognizer that is an object carrying a type tag
    pub fn typed_recognizer(&self) -> Option<&'a Value> {
        self.recognizer().filter(|r| type_tag(r).is_some())
    }

    /// Recognizer under JavaScript-style truthiness
    pub fn truthy_recognizer(&self) -> Option<&'a Value> {
        self.recognizer().filter(|r| is_truthy(r))
    }

    /// Rule list and the field it was read from (`rules`, then `triggers`)
    pub fn rules(&self) -> (&'static str, &'a [Value]) {
        self.list(&RULE_FIELDS)
    }

    /// Step list and the field it was read from (`steps`, then `actions`)
    pub fn steps(&self) -> (&'static str, &'a [Value]) {
        self.list(&STEP_FIELDS)
    }

    pub fn shape(&self) -> DocumentShape {
        DocumentShape {
            recognizer: self.typed_recognizer().is_some(),
            rules: !self.rules().1.is_empty(),
            steps: !self.steps().1.is_empty(),
        }
    }

    fn list(&self, fields: &[&'static str; 2]) -> (&'static str, &'a [Value]) {
        let raw = self.raw;
        for field in fields {
            if let Some(items) = raw.get(*field).and_then(Value::as_array) {
                return (*field, items.as_slice());
            }
        }
        (fields[0], &[])
    }
}

/// Which of the three structural parts a document has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentShape {
    /// Has a recognizer carrying a type tag
    pub recognizer: bool,
    /// Has a non-empty rule list
    pub rules: bool,
    /// Has a non-empty step list
    pub steps: bool,
}

impl DocumentShape {
    /// Three-character flag string `recognizer|rules|steps`, e.g. `"110"`
    pub fn flag(&self) -> String {
        [self.recognizer, self.rules, self.steps]
            .iter()
            .map(|bit| if *bit { '1' } else { '0' })
            .collect()
    }
}

/// JavaScript truthiness for a JSON value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
