//! Content-type classification from free-text type labels.

use std::fmt;

use serde::Serialize;

use crate::record::MetricRecord;

/// Fields that carry a post's media type, in lookup order.
const TYPE_PATHS: &[&str] = &["type", "mediaType", "media_type", "contentType", "productType"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContentType {
    Photo,
    Video,
    Carousel,
    Other,
}

impl ContentType {
    /// Display order used by distributions.
    pub const ALL: [ContentType; 4] = [
        ContentType::Photo,
        ContentType::Video,
        ContentType::Carousel,
        ContentType::Other,
    ];
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::Photo => write!(f, "Photo"),
            ContentType::Video => write!(f, "Video"),
            ContentType::Carousel => write!(f, "Carousel"),
            ContentType::Other => write!(f, "Other"),
        }
    }
}

/// Maps a loose type label to a [`ContentType`].
///
/// Case-insensitive substring match with precedence carousel/album, then
/// video/reel, then image/photo. Empty input is [`ContentType::Other`].
#[must_use]
pub fn classify(type_field: &str) -> ContentType {
    let lower = type_field.to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

    if has(&["carousel", "album"]) {
        ContentType::Carousel
    } else if has(&["video", "reel"]) {
        ContentType::Video
    } else if has(&["image", "photo"]) {
        ContentType::Photo
    } else {
        ContentType::Other
    }
}

/// Classifies a record by its first non-blank type field.
#[must_use]
pub fn content_type_of(record: &MetricRecord) -> ContentType {
    record.text(TYPE_PATHS).map_or(ContentType::Other, classify)
}

/// Counts records per content type, always listing all four types.
#[must_use]
pub fn type_distribution(records: &[MetricRecord]) -> Vec<(ContentType, usize)> {
    let mut counts = [0usize; ContentType::ALL.len()];
    for record in records {
        let ty = content_type_of(record);
        if let Some(slot) = ContentType::ALL.iter().position(|t| *t == ty) {
            counts[slot] += 1;
        }
    }
    ContentType::ALL.into_iter().zip(counts).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn carousel_album() {
        assert_eq!(classify("CAROUSEL_ALBUM"), ContentType::Carousel);
        assert_eq!(classify("Album"), ContentType::Carousel);
    }

    #[test]
    fn reel_video() {
        assert_eq!(classify("Reel Video"), ContentType::Video);
        assert_eq!(classify("reel"), ContentType::Video);
        assert_eq!(classify("GraphVideo"), ContentType::Video);
    }

    #[test]
    fn image_photo() {
        assert_eq!(classify("IMAGE"), ContentType::Photo);
        assert_eq!(classify("GraphPhoto"), ContentType::Photo);
    }

    #[test]
    fn carousel_takes_precedence_over_video() {
        assert_eq!(classify("video carousel"), ContentType::Carousel);
    }

    #[test]
    fn video_takes_precedence_over_image() {
        assert_eq!(classify("image_video"), ContentType::Video);
    }

    #[test]
    fn empty_and_unknown_are_other() {
        assert_eq!(classify(""), ContentType::Other);
        assert_eq!(classify("Sidecar"), ContentType::Other);
        assert_eq!(classify("story"), ContentType::Other);
    }

    #[test]
    fn content_type_of_checks_fields() {
        let by_media_type = MetricRecord::new(json!({ "mediaType": "VIDEO" }));
        assert_eq!(content_type_of(&by_media_type), ContentType::Video);

        let blank_type = MetricRecord::new(json!({ "type": "", "media_type": "IMAGE" }));
        assert_eq!(content_type_of(&blank_type), ContentType::Photo);

        let missing = MetricRecord::new(json!({ "caption": "hi" }));
        assert_eq!(content_type_of(&missing), ContentType::Other);
    }

    #[test]
    fn distribution_lists_all_types_in_order() {
        let records: Vec<MetricRecord> = vec![
            json!({ "type": "Image" }),
            json!({ "type": "Video" }),
            json!({ "type": "Sidecar" }),
            json!({ "type": "Image" }),
        ]
        .into_iter()
        .map(MetricRecord::new)
        .collect();

        assert_eq!(
            type_distribution(&records),
            vec![
                (ContentType::Photo, 2),
                (ContentType::Video, 1),
                (ContentType::Carousel, 0),
                (ContentType::Other, 1),
            ]
        );
    }

    #[test]
    fn distribution_of_empty_is_all_zero() {
        assert!(type_distribution(&[]).iter().all(|(_, n)| *n == 0));
    }
}
