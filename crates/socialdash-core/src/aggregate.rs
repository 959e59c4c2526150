//! Totals, averages, rankings, and summary cards over record collections.
//!
//! Every function borrows its input immutably and returns zero-valued results
//! for empty collections.

use std::fmt;

use serde::Serialize;

use crate::extract::Extractor;
use crate::format::format_count;
use crate::metric::{Extraction, MetricKind};
use crate::record::MetricRecord;

/// A record paired with its extracted value, as returned by [`top_n`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked<'a> {
    pub record: &'a MetricRecord,
    /// Position of the record in the input collection.
    pub index: usize,
    pub extraction: Extraction,
}

/// Headline numbers for a dataset, one per dashboard metric card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    pub record_count: usize,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub average_views: f64,
    pub average_likes: f64,
    pub average_comments: f64,
    /// Records whose likes came from the fallback table.
    pub estimated_likes: usize,
    /// Records whose comments came from the fallback table.
    pub estimated_comments: usize,
    /// `(likes + comments) / views * 100`, or 0 without views.
    pub engagement_rate: f64,
}

/// Channel subscriber count, which the scrapers only sometimes capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Subscribers {
    Count(u64),
    Unknown,
}

impl fmt::Display for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subscribers::Count(n) => write!(f, "{}", format_count(*n)),
            Subscribers::Unknown => write!(f, "Unknown"),
        }
    }
}

impl Extractor {
    /// Sum of `kind` across all records (saturating).
    #[must_use]
    pub fn sum(&self, records: &[MetricRecord], kind: MetricKind) -> u64 {
        records
            .iter()
            .map(|r| self.extract(r, kind).value)
            .fold(0u64, u64::saturating_add)
    }

    /// Mean of `kind`; `0.0` for an empty collection.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self, records: &[MetricRecord], kind: MetricKind) -> f64 {
        if records.is_empty() {
            return 0.0;
        }
        self.sum(records, kind) as f64 / records.len() as f64
    }

    /// The `n` records with the highest `kind`, descending.
    ///
    /// Ties keep their original order. Returns fewer than `n` entries when the
    /// collection is smaller.
    #[must_use]
    pub fn top_n<'a>(
        &self,
        records: &'a [MetricRecord],
        kind: MetricKind,
        n: usize,
    ) -> Vec<Ranked<'a>> {
        let mut ranked: Vec<Ranked<'a>> = records
            .iter()
            .enumerate()
            .map(|(index, record)| Ranked {
                record,
                index,
                extraction: self.extract(record, kind),
            })
            .collect();

        // `sort_by` is stable, which keeps ties in input order.
        ranked.sort_by(|a, b| b.extraction.value.cmp(&a.extraction.value));
        ranked.truncate(n);
        ranked
    }

    /// Builds the dashboard's headline numbers in one pass.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn summarize(&self, records: &[MetricRecord]) -> MetricSummary {
        let mut total_views = 0u64;
        let mut total_likes = 0u64;
        let mut total_comments = 0u64;
        let mut estimated_likes = 0usize;
        let mut estimated_comments = 0usize;

        for record in records {
            let views = self.extract(record, MetricKind::Views);
            let likes = self.extract(record, MetricKind::Likes);
            let comments = self.extract(record, MetricKind::Comments);

            total_views = total_views.saturating_add(views.value);
            total_likes = total_likes.saturating_add(likes.value);
            total_comments = total_comments.saturating_add(comments.value);
            estimated_likes += usize::from(likes.estimated);
            estimated_comments += usize::from(comments.estimated);
        }

        let count = records.len();
        let mean = |total: u64| {
            if count == 0 {
                0.0
            } else {
                total as f64 / count as f64
            }
        };
        let engagement_rate = if total_views == 0 {
            0.0
        } else {
            (total_likes as f64 + total_comments as f64) / total_views as f64 * 100.0
        };

        tracing::debug!(
            records = count,
            estimated_likes,
            estimated_comments,
            "summarized dataset"
        );

        MetricSummary {
            record_count: count,
            total_views,
            total_likes,
            total_comments,
            average_views: mean(total_views),
            average_likes: mean(total_likes),
            average_comments: mean(total_comments),
            estimated_likes,
            estimated_comments,
            engagement_rate,
        }
    }

    /// The first subscriber count any record carries, else
    /// [`Subscribers::Unknown`].
    #[must_use]
    pub fn subscribers(&self, records: &[MetricRecord]) -> Subscribers {
        records
            .iter()
            .find_map(|r| self.observe(r, MetricKind::SubscriberCount))
            .map_or(Subscribers::Unknown, Subscribers::Count)
    }
}

/// Sum of `kind` with the default fallback table.
#[must_use]
pub fn sum(records: &[MetricRecord], kind: MetricKind) -> u64 {
    Extractor::default().sum(records, kind)
}

/// Mean of `kind` with the default fallback table; `0.0` when empty.
#[must_use]
pub fn average(records: &[MetricRecord], kind: MetricKind) -> f64 {
    Extractor::default().average(records, kind)
}

/// Top `n` records by `kind` with the default fallback table.
#[must_use]
pub fn top_n(records: &[MetricRecord], kind: MetricKind, n: usize) -> Vec<Ranked<'_>> {
    Extractor::default().top_n(records, kind, n)
}

#[must_use]
pub fn summarize(records: &[MetricRecord]) -> MetricSummary {
    Extractor::default().summarize(records)
}

#[must_use]
pub fn subscribers(records: &[MetricRecord]) -> Subscribers {
    Extractor::default().subscribers(records)
}
