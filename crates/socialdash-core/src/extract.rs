//! The single metric-extraction policy shared by every aggregate.
//!
//! Extraction checks the kind's candidate paths in order, coerces the first
//! non-null hit, and only then consults the [`EstimatorRules`]. It never
//! fails: a record with nothing usable yields zero.

use serde_json::Value;

use crate::coerce::coerce_count;
use crate::estimate::{EstimatorRules, Fallback, Observed};
use crate::metric::{Extraction, MetricKind};
use crate::record::MetricRecord;

/// Deepest nesting level the likes scan descends to (the record is level 0).
const DEEP_SCAN_MAX_DEPTH: usize = 3;

/// Keys holding media blobs rather than engagement data.
const DEEP_SCAN_SKIPPED_KEYS: &[&str] = &[
    "thumbnail",
    "thumbnails",
    "authorThumbnails",
    "image",
    "video",
];

/// Extracts canonical metrics using a configurable fallback table.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extractor {
    rules: EstimatorRules,
}

impl Extractor {
    #[must_use]
    pub fn new(rules: EstimatorRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &EstimatorRules {
        &self.rules
    }

    /// Returns the directly observed value of `kind`, or `None` when no
    /// candidate path (or, for likes, the deep scan) matched.
    #[must_use]
    pub fn observe(&self, record: &MetricRecord, kind: MetricKind) -> Option<u64> {
        if let Some((path, value)) = record.first_present(kind.candidate_paths()) {
            tracing::trace!(%kind, path, "metric resolved");
            return Some(coerce_count(value));
        }

        if kind.deep_scans() {
            if let Some(found) = deep_scan_likes(record.as_value(), 0) {
                tracing::trace!(%kind, value = found, "metric found by deep scan");
                return Some(found);
            }
        }

        None
    }

    /// Extracts `kind` from `record`, falling back to an estimate when no
    /// field matched.
    #[must_use]
    pub fn extract(&self, record: &MetricRecord, kind: MetricKind) -> Extraction {
        if let Some(value) = self.observe(record, kind) {
            return Extraction::observed(value);
        }

        let observed = match kind {
            MetricKind::Likes => Observed {
                views: self.observe(record, MetricKind::Views),
                likes: None,
            },
            MetricKind::Comments => Observed {
                views: self.observe(record, MetricKind::Views),
                likes: self.observe(record, MetricKind::Likes),
            },
            MetricKind::Views | MetricKind::SubscriberCount => Observed::default(),
        };

        match self.rules.estimate(kind, observed) {
            Some(Fallback::Estimated(value)) => {
                tracing::trace!(%kind, value, "metric estimated");
                Extraction::fallback(value)
            }
            Some(Fallback::Unknown) | None => Extraction::missing(),
        }
    }
}

/// Extracts `kind` from `record` with the default fallback table.
#[must_use]
pub fn extract(record: &MetricRecord, kind: MetricKind) -> Extraction {
    Extractor::default().extract(record, kind)
}

/// Recursively looks for a scalar under a key mentioning "like".
///
/// Keys are visited in document order. Arrays are searched element by
/// element and use up one level of depth, as objects do. `dislike*` keys
/// are ignored, as are booleans such as `isLiked`. Only positive values
/// count as a hit.
fn deep_scan_likes(value: &Value, depth: usize) -> Option<u64> {
    if depth > DEEP_SCAN_MAX_DEPTH {
        return None;
    }

    match value {
        Value::Object(object) => object.iter().find_map(|(key, child)| {
            if DEEP_SCAN_SKIPPED_KEYS.contains(&key.as_str()) {
                return None;
            }
            match child {
                Value::Object(_) | Value::Array(_) => deep_scan_likes(child, depth + 1),
                Value::Number(_) | Value::String(_) => {
                    let lower = key.to_ascii_lowercase();
                    let count = coerce_count(child);
                    (lower.contains("like") && !lower.contains("dislike") && count > 0)
                        .then_some(count)
                }
                Value::Bool(_) | Value::Null => None,
            }
        }),
        Value::Array(items) => items
            .iter()
            .filter(|item| item.is_object() || item.is_array())
            .find_map(|item| deep_scan_likes(item, depth + 1)),
        _ => None,
    }
}
