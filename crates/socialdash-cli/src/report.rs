//! Plain-text reports over a loaded dataset.
//!
//! Each `run_*` prints what the matching `render_*` builds, so the layout can
//! be tested without capturing stdout.

use socialdash_core::format::{format_count, truncate_label};
use socialdash_core::{
    timeline, type_distribution, Extractor, MetricKind, MetricRecord, MetricSummary, Ranked,
    Subscribers,
};

const LABEL_WIDTH: usize = 50;
const LABEL_PATHS: &[&str] = &["title", "snippet.title", "caption", "text", "name"];

pub(crate) fn run_summary(extractor: &Extractor, records: &[MetricRecord]) {
    let summary = extractor.summarize(records);
    let subscribers = extractor.subscribers(records);
    print!("{}", render_summary(&summary, subscribers));
}

pub(crate) fn run_top(extractor: &Extractor, records: &[MetricRecord], kind: MetricKind, n: usize) {
    let ranked = extractor.top_n(records, kind, n);
    print!("{}", render_top(&ranked, kind));
}

pub(crate) fn run_timeline(records: &[MetricRecord]) {
    print!("{}", render_timeline(records));
}

pub(crate) fn run_types(records: &[MetricRecord]) {
    print!("{}", render_types(records));
}

pub(crate) fn render_summary(summary: &MetricSummary, subscribers: Subscribers) -> String {
    if summary.record_count == 0 {
        return "no data available\n".to_string();
    }

    let estimated = |n: usize| {
        if n == 0 {
            String::new()
        } else {
            format!(" ({n} estimated)")
        }
    };

    let mut out = String::new();
    out.push_str(&format!("{:<18}{}\n", "Records:", summary.record_count));
    out.push_str(&format!("{:<18}{subscribers}\n", "Subscribers:"));
    out.push_str(&format!("{:<18}{}\n", "Total views:", format_count(summary.total_views)));
    out.push_str(&format!(
        "{:<18}{}{}\n",
        "Total likes:",
        format_count(summary.total_likes),
        estimated(summary.estimated_likes)
    ));
    out.push_str(&format!(
        "{:<18}{}{}\n",
        "Total comments:",
        format_count(summary.total_comments),
        estimated(summary.estimated_comments)
    ));
    out.push_str(&format!("{:<18}{:.1}\n", "Average views:", summary.average_views));
    out.push_str(&format!("{:<18}{:.1}\n", "Average likes:", summary.average_likes));
    out.push_str(&format!(
        "{:<18}{:.1}\n",
        "Average comments:", summary.average_comments
    ));
    out.push_str(&format!(
        "{:<18}{:.2}%\n",
        "Engagement rate:", summary.engagement_rate
    ));
    out
}

pub(crate) fn render_top(ranked: &[Ranked<'_>], kind: MetricKind) -> String {
    if ranked.is_empty() {
        return "no data available\n".to_string();
    }

    let mut out = format!("{:<5}{:>14}  TITLE\n", "#", kind.label().to_uppercase());
    for (pos, entry) in ranked.iter().enumerate() {
        let label = entry.record.text(LABEL_PATHS).unwrap_or("Untitled");
        let marker = if entry.extraction.estimated { "~" } else { "" };
        out.push_str(&format!(
            "{:<5}{:>14}  {}\n",
            pos + 1,
            format!("{marker}{}", format_count(entry.extraction.value)),
            truncate_label(label, LABEL_WIDTH)
        ));
    }
    if ranked.iter().any(|r| r.extraction.estimated) {
        out.push_str("~ estimated from other metrics\n");
    }
    out
}

pub(crate) fn render_timeline(records: &[MetricRecord]) -> String {
    let points = timeline(records);
    if points.is_empty() {
        return "no dated records\n".to_string();
    }

    let mut out = format!("{:<10}POSTS\n", "MONTH");
    for point in &points {
        out.push_str(&format!("{:<10}{}\n", point.bucket, point.count));
    }
    out
}

pub(crate) fn render_types(records: &[MetricRecord]) -> String {
    let mut out = format!("{:<10}COUNT\n", "TYPE");
    for (content_type, count) in type_distribution(records) {
        out.push_str(&format!("{:<10}{count}\n", content_type.to_string()));
    }
    out
}
