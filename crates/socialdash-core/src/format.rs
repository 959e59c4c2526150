//! Plain-text display helpers shared by tables and exports.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::MetricRecord;

static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("valid ISO 8601 duration regex")
});

const TITLE_PATHS: &[&str] = &["title", "snippet.title", "name"];
const CAPTION_PATHS: &[&str] = &["caption", "text", "title", "description"];
const URL_PATHS: &[&str] = &["url", "permalink", "link", "webVideoUrl"];
const USERNAME_PATHS: &[&str] = &["username", "ownerUsername", "owner.username"];
const DURATION_PATHS: &[&str] = &["duration", "contentDetails.duration", "duration_string"];
const VIDEO_ID_PATHS: &[&str] = &["id", "video_id", "videoId"];
const SHORTCODE_PATHS: &[&str] = &["shortCode", "shortcode", "code"];

/// Formats a count with comma thousands separators: `1234567` → `"1,234,567"`.
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Shortens a chart label to `max` characters, ending in `...` when cut.
#[must_use]
pub fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        return label.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = label.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Normalizes a video duration to `HH:MM:SS`.
///
/// Accepts values already containing `:`, plain seconds, and ISO 8601
/// `PT#H#M#S`. Anything else, including an empty string, is `00:00:00`.
#[must_use]
pub fn format_duration(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "00:00:00".to_string();
    }
    if raw.contains(':') {
        return raw.to_string();
    }
    if let Ok(seconds) = raw.parse::<f64>() {
        return hms(seconds_from_float(seconds));
    }

    let Some(caps) = ISO_DURATION.captures(raw) else {
        return "00:00:00".to_string();
    };
    let part = |i: usize| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };
    hms(part(1)
        .saturating_mul(3600)
        .saturating_add(part(2).saturating_mul(60))
        .saturating_add(part(3)))
}

fn hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn seconds_from_float(v: f64) -> u64 {
    if v.is_finite() && v > 0.0 {
        v.floor() as u64
    } else {
        0
    }
}

/// Video title, or `"Untitled Video"`.
#[must_use]
pub fn title_of(record: &MetricRecord) -> String {
    record
        .text(TITLE_PATHS)
        .unwrap_or("Untitled Video")
        .to_string()
}

/// Post caption, or `"No caption"`.
#[must_use]
pub fn caption_of(record: &MetricRecord) -> String {
    record
        .text(CAPTION_PATHS)
        .unwrap_or("No caption")
        .to_string()
}

/// Raw duration field, formatted with [`format_duration`].
#[must_use]
pub fn duration_of(record: &MetricRecord) -> String {
    match record.first_present(DURATION_PATHS) {
        Some((_, serde_json::Value::String(s))) => format_duration(s),
        Some((_, serde_json::Value::Number(n))) => format_duration(&n.to_string()),
        _ => format_duration(""),
    }
}

/// Post owner, falling back to `fallback` (typically the dataset's account).
#[must_use]
pub fn username_of(record: &MetricRecord, fallback: &str) -> String {
    record
        .text(USERNAME_PATHS)
        .unwrap_or_else(|| fallback.trim_start_matches('@'))
        .to_string()
}

/// Explicit URL field, else a YouTube watch URL built from the video id.
#[must_use]
pub fn video_url_of(record: &MetricRecord) -> String {
    if let Some(url) = record.text(URL_PATHS) {
        return url.to_string();
    }
    format!(
        "https://www.youtube.com/watch?v={}",
        id_text(record, VIDEO_ID_PATHS)
    )
}

/// Explicit URL field, else an Instagram post URL built from the shortcode.
#[must_use]
pub fn post_url_of(record: &MetricRecord) -> String {
    if let Some(url) = record.text(URL_PATHS) {
        return url.to_string();
    }
    format!(
        "https://www.instagram.com/p/{}",
        id_text(record, SHORTCODE_PATHS)
    )
}

fn id_text(record: &MetricRecord, paths: &[&str]) -> String {
    match record.first_present(paths) {
        Some((_, serde_json::Value::String(s))) => s.clone(),
        Some((_, serde_json::Value::Number(n))) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn format_count_inserts_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn truncate_label_short_is_unchanged() {
        assert_eq!(truncate_label("Short title", 20), "Short title");
    }

    #[test]
    fn truncate_label_long_is_cut_with_ellipsis() {
        let out = truncate_label("A very long video title indeed", 20);
        assert_eq!(out, "A very long video...");
        assert_eq!(out.chars().count(), 20);
    }

    #[test]
    fn truncate_label_counts_chars_not_bytes() {
        assert_eq!(truncate_label("ééééééé", 5), "éé...");
    }

    #[test]
    fn duration_from_iso() {
        assert_eq!(format_duration("PT1H30M15S"), "01:30:15");
        assert_eq!(format_duration("PT4M2S"), "00:04:02");
    }

    #[test]
    fn duration_from_seconds() {
        assert_eq!(format_duration("3725"), "01:02:05");
    }

    #[test]
    fn duration_already_clock_format() {
        assert_eq!(format_duration("12:34"), "12:34");
    }

    #[test]
    fn duration_unparseable_or_empty() {
        assert_eq!(format_duration(""), "00:00:00");
        assert_eq!(format_duration("about an hour"), "00:00:00");
    }

    #[test]
    fn title_falls_back_to_snippet_then_default() {
        let snippet = MetricRecord::new(json!({ "snippet": { "title": "From snippet" } }));
        assert_eq!(title_of(&snippet), "From snippet");
        assert_eq!(title_of(&MetricRecord::new(json!({}))), "Untitled Video");
    }

    #[test]
    fn duration_of_numeric_seconds() {
        let record = MetricRecord::new(json!({ "duration": 61 }));
        assert_eq!(duration_of(&record), "00:01:01");
    }

    #[test]
    fn username_falls_back_to_account() {
        let record = MetricRecord::new(json!({ "owner": { "username": "nested" } }));
        assert_eq!(username_of(&record, "@acct"), "nested");
        assert_eq!(username_of(&MetricRecord::new(json!({})), "@acct"), "acct");
    }

    #[test]
    fn urls_are_built_from_ids() {
        let video = MetricRecord::new(json!({ "id": "abc123" }));
        assert_eq!(video_url_of(&video), "https://www.youtube.com/watch?v=abc123");

        let post = MetricRecord::new(json!({ "shortCode": "Cx1" }));
        assert_eq!(post_url_of(&post), "https://www.instagram.com/p/Cx1");

        let explicit = MetricRecord::new(json!({ "url": "https://example.com/v" }));
        assert_eq!(video_url_of(&explicit), "https://example.com/v");
    }
}
