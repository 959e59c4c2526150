//! Canonical metric kinds and the candidate field paths checked for each.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

/// A canonical metric extracted from a scraped record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Views,
    Likes,
    Comments,
    SubscriberCount,
}

const VIEW_PATHS: &[&str] = &[
    "viewCount",
    "views",
    "statistics.viewCount",
    "videoViewCount",
    "videoPlayCount",
    "playCount",
];

const LIKE_PATHS: &[&str] = &[
    "likeCount",
    "likes",
    "likesCount",
    "statistics.likeCount",
    "engagement.likes",
    "metrics.likes",
    "interaction_metrics.likes",
    "snippet.likeCount",
];

const COMMENT_PATHS: &[&str] = &[
    "commentCount",
    "commentsCount",
    "comments",
    "statistics.commentCount",
    "engagement.comments",
    "metrics.comments",
];

const SUBSCRIBER_PATHS: &[&str] = &[
    "subscriberCount",
    "statistics.subscriberCount",
    "channel_statistics.subscriberCount",
    "channelInfo.subscriberCount",
    "channel.subscriberCount",
];

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Views,
        MetricKind::Likes,
        MetricKind::Comments,
        MetricKind::SubscriberCount,
    ];

    /// Field paths checked in order. The first non-null hit wins.
    #[must_use]
    pub fn candidate_paths(self) -> &'static [&'static str] {
        match self {
            MetricKind::Views => VIEW_PATHS,
            MetricKind::Likes => LIKE_PATHS,
            MetricKind::Comments => COMMENT_PATHS,
            MetricKind::SubscriberCount => SUBSCRIBER_PATHS,
        }
    }

    /// Whether the kind falls back to a recursive key scan when no candidate
    /// path matches. Only likes are scattered widely enough to need it.
    #[must_use]
    pub fn deep_scans(self) -> bool {
        matches!(self, MetricKind::Likes)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MetricKind::Views => "Views",
            MetricKind::Likes => "Likes",
            MetricKind::Comments => "Comments",
            MetricKind::SubscriberCount => "Subscribers",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Views => write!(f, "views"),
            MetricKind::Likes => write!(f, "likes"),
            MetricKind::Comments => write!(f, "comments"),
            MetricKind::SubscriberCount => write!(f, "subscribers"),
        }
    }
}

impl FromStr for MetricKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "views" | "view" => Ok(MetricKind::Views),
            "likes" | "like" => Ok(MetricKind::Likes),
            "comments" | "comment" => Ok(MetricKind::Comments),
            "subscribers" | "subscriber_count" | "subscribercount" => {
                Ok(MetricKind::SubscriberCount)
            }
            _ => Err(CoreError::UnknownMetric(s.to_string())),
        }
    }
}

/// A metric value and whether it came from a heuristic fallback.
///
/// `estimated` is `true` only when no direct field matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub value: u64,
    pub estimated: bool,
}

impl Extraction {
    #[must_use]
    pub fn observed(value: u64) -> Self {
        Self {
            value,
            estimated: false,
        }
    }

    #[must_use]
    pub fn fallback(value: u64) -> Self {
        Self {
            value,
            estimated: true,
        }
    }

    /// Nothing matched and no fallback applied.
    #[must_use]
    pub fn missing() -> Self {
        Self::observed(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn likes_paths_start_with_like_count() {
        let paths = MetricKind::Likes.candidate_paths();
        assert_eq!(paths[0], "likeCount");
        assert!(paths.contains(&"statistics.likeCount"));
        assert!(paths.contains(&"engagement.likes"));
    }

    #[test]
    fn every_candidate_path_fits_resolver_depth() {
        for kind in MetricKind::ALL {
            for path in kind.candidate_paths() {
                assert!(
                    path.split('.').count() <= crate::record::MAX_PATH_DEPTH,
                    "{kind} path {path} is deeper than the resolver follows"
                );
            }
        }
    }

    #[test]
    fn only_likes_deep_scan() {
        assert!(MetricKind::Likes.deep_scans());
        assert!(!MetricKind::Views.deep_scans());
        assert!(!MetricKind::Comments.deep_scans());
    }

    #[test]
    fn parse_metric_names() {
        assert_eq!("Views".parse::<MetricKind>().unwrap(), MetricKind::Views);
        assert_eq!("like".parse::<MetricKind>().unwrap(), MetricKind::Likes);
        assert_eq!(
            "subscribers".parse::<MetricKind>().unwrap(),
            MetricKind::SubscriberCount
        );
    }

    #[test]
    fn parse_unknown_metric_fails() {
        let err = "shares".parse::<MetricKind>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownMetric(ref m) if m == "shares"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for kind in MetricKind::ALL {
            assert_eq!(kind.to_string().parse::<MetricKind>().unwrap(), kind);
        }
    }
}
