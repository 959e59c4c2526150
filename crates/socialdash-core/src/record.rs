//! Schema-less scraped records and a safe dotted-path resolver.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum number of segments [`MetricRecord::resolve`] follows. Longer paths
/// never resolve.
pub const MAX_PATH_DEPTH: usize = 3;

/// One scraped post or video, exactly as the backend returned it.
///
/// No schema is assumed. Any JSON value is accepted; a record that is not an
/// object simply resolves no paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricRecord(Value);

impl MetricRecord {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Resolves a dotted path such as `"statistics.likeCount"`.
    ///
    /// Returns `None` when any segment is missing, an intermediate value is
    /// not an object, the final value is `null`, or the path has more than
    /// [`MAX_PATH_DEPTH`] segments.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        if path.is_empty() || path.split('.').count() > MAX_PATH_DEPTH {
            return None;
        }

        let mut current = &self.0;
        for segment in path.split('.') {
            current = current.as_object()?.get(segment)?;
        }

        (!current.is_null()).then_some(current)
    }

    /// Returns the first candidate path that resolves, with its value.
    #[must_use]
    pub fn first_present<'p>(&self, paths: &[&'p str]) -> Option<(&'p str, &Value)> {
        paths
            .iter()
            .find_map(|path| self.resolve(path).map(|value| (*path, value)))
    }

    /// Returns the first candidate path holding a non-blank string.
    ///
    /// Numbers are not stringified; callers asking for text want text.
    #[must_use]
    pub fn text(&self, paths: &[&str]) -> Option<&str> {
        paths.iter().find_map(|path| {
            self.resolve(path)
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
        })
    }
}

impl From<Value> for MetricRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Splits a dataset payload into records.
///
/// A JSON array yields one record per element, a lone object is treated as a
/// single record, and any other shape yields an empty dataset.
#[must_use]
pub fn records_from_json(payload: Value) -> Vec<MetricRecord> {
    match payload {
        Value::Array(items) => items.into_iter().map(MetricRecord::new).collect(),
        Value::Object(_) => vec![MetricRecord::new(payload)],
        other => {
            tracing::debug!(kind = %json_kind(&other), "dataset payload is not an array or object");
            Vec::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn resolve_flat_key() {
        let record = MetricRecord::new(json!({ "likeCount": 12 }));
        assert_eq!(record.resolve("likeCount"), Some(&json!(12)));
    }

    #[test]
    fn resolve_nested_key() {
        let record = MetricRecord::new(json!({ "statistics": { "likeCount": "40" } }));
        assert_eq!(record.resolve("statistics.likeCount"), Some(&json!("40")));
    }

    #[test]
    fn resolve_three_levels() {
        let record = MetricRecord::new(json!({ "a": { "b": { "c": 7 } } }));
        assert_eq!(record.resolve("a.b.c"), Some(&json!(7)));
    }

    #[test]
    fn resolve_rejects_paths_deeper_than_limit() {
        let record = MetricRecord::new(json!({ "a": { "b": { "c": { "d": 7 } } } }));
        assert!(record.resolve("a.b.c.d").is_none());
    }

    #[test]
    fn resolve_treats_null_as_missing() {
        let record = MetricRecord::new(json!({ "likeCount": null }));
        assert!(record.resolve("likeCount").is_none());
    }

    #[test]
    fn resolve_through_non_object_is_none() {
        let record = MetricRecord::new(json!({ "statistics": "n/a" }));
        assert!(record.resolve("statistics.likeCount").is_none());
    }

    #[test]
    fn resolve_on_non_object_record_is_none() {
        let record = MetricRecord::new(json!([1, 2, 3]));
        assert!(record.resolve("likeCount").is_none());
        assert!(record.resolve("").is_none());
    }

    #[test]
    fn first_present_respects_candidate_order() {
        let record = MetricRecord::new(json!({ "views": 5, "viewCount": 9 }));
        let (path, value) = record.first_present(&["viewCount", "views"]).unwrap();
        assert_eq!(path, "viewCount");
        assert_eq!(value, &json!(9));
    }

    #[test]
    fn text_skips_blank_and_non_string_values() {
        let record = MetricRecord::new(json!({ "title": "  ", "caption": 5, "text": "hello" }));
        assert_eq!(record.text(&["title", "caption", "text"]), Some("hello"));
    }

    #[test]
    fn records_from_json_array() {
        let records = records_from_json(json!([{ "a": 1 }, { "b": 2 }]));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn records_from_json_single_object() {
        let records = records_from_json(json!({ "a": 1 }));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn records_from_json_scalar_is_empty() {
        assert!(records_from_json(json!("oops")).is_empty());
        assert!(records_from_json(json!(null)).is_empty());
    }
}
