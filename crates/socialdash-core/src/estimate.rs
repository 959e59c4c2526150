//! Heuristic fallbacks for metrics missing from a record.
//!
//! The ratios are product decisions inherited from the dashboard, not
//! documented platform behaviour, so they live in [`EstimatorRules`] and can be
//! overridden through configuration.

use crate::metric::MetricKind;

/// Fallback ratios and floors used when a metric has no direct field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorRules {
    /// Likes estimated from views.
    pub likes_per_view: f64,
    /// Floor for a likes estimate when views are positive.
    pub min_estimated_likes: u64,
    /// Comments estimated from observed likes.
    pub comments_per_like: f64,
    /// Comments estimated from views when no likes were observed.
    pub comments_per_view: f64,
    /// Floor for any comments estimate.
    pub min_estimated_comments: u64,
}

impl Default for EstimatorRules {
    fn default() -> Self {
        Self {
            likes_per_view: 0.05,
            min_estimated_likes: 1,
            comments_per_like: 0.1,
            comments_per_view: 0.02,
            min_estimated_comments: 5,
        }
    }
}

/// Directly observed inputs available to the estimator.
///
/// `None` means the record carried no field for that metric. Estimates are
/// never fed back in as inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Observed {
    pub views: Option<u64>,
    pub likes: Option<u64>,
}

/// Result of a fallback rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// A heuristic numeric value.
    Estimated(u64),
    /// The metric is known to be unavailable; render as `"Unknown"`.
    Unknown,
}

impl EstimatorRules {
    /// Applies the fallback rule for `kind`, if one exists and its condition
    /// holds.
    ///
    /// Comments try the likes rule first, then the views rule.
    #[must_use]
    pub fn estimate(&self, kind: MetricKind, observed: Observed) -> Option<Fallback> {
        match kind {
            MetricKind::Views => None,
            MetricKind::Likes => positive(observed.views).map(|views| {
                Fallback::Estimated(
                    scaled(views, self.likes_per_view).max(self.min_estimated_likes),
                )
            }),
            MetricKind::Comments => {
                if let Some(likes) = positive(observed.likes) {
                    Some(Fallback::Estimated(
                        scaled(likes, self.comments_per_like).max(self.min_estimated_comments),
                    ))
                } else {
                    positive(observed.views).map(|views| {
                        Fallback::Estimated(
                            scaled(views, self.comments_per_view)
                                .max(self.min_estimated_comments),
                        )
                    })
                }
            }
            MetricKind::SubscriberCount => Some(Fallback::Unknown),
        }
    }
}

fn positive(value: Option<u64>) -> Option<u64> {
    value.filter(|v| *v > 0)
}

/// `floor(base * ratio)`, clamped to the `u64` range.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn scaled(base: u64, ratio: f64) -> u64 {
    let product = (base as f64 * ratio).floor();
    if product.is_finite() && product > 0.0 {
        product as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> EstimatorRules {
        EstimatorRules::default()
    }

    #[test]
    fn likes_are_five_percent_of_views() {
        let observed = Observed {
            views: Some(10_000),
            likes: None,
        };
        assert_eq!(
            rules().estimate(MetricKind::Likes, observed),
            Some(Fallback::Estimated(500))
        );
    }

    #[test]
    fn likes_estimate_has_floor_of_one() {
        let observed = Observed {
            views: Some(7),
            likes: None,
        };
        assert_eq!(
            rules().estimate(MetricKind::Likes, observed),
            Some(Fallback::Estimated(1))
        );
    }

    #[test]
    fn likes_without_views_have_no_fallback() {
        assert_eq!(rules().estimate(MetricKind::Likes, Observed::default()), None);
        let zero_views = Observed {
            views: Some(0),
            likes: None,
        };
        assert_eq!(rules().estimate(MetricKind::Likes, zero_views), None);
    }

    #[test]
    fn comments_prefer_likes_rule() {
        let observed = Observed {
            views: Some(1_000_000),
            likes: Some(2_000),
        };
        assert_eq!(
            rules().estimate(MetricKind::Comments, observed),
            Some(Fallback::Estimated(200))
        );
    }

    #[test]
    fn comments_from_likes_have_floor_of_five() {
        let observed = Observed {
            views: None,
            likes: Some(12),
        };
        assert_eq!(
            rules().estimate(MetricKind::Comments, observed),
            Some(Fallback::Estimated(5))
        );
    }

    #[test]
    fn comments_fall_back_to_views_without_likes() {
        let observed = Observed {
            views: Some(10_000),
            likes: None,
        };
        assert_eq!(
            rules().estimate(MetricKind::Comments, observed),
            Some(Fallback::Estimated(200))
        );
    }

    #[test]
    fn comments_from_views_have_floor_of_five() {
        let observed = Observed {
            views: Some(100),
            likes: Some(0),
        };
        assert_eq!(
            rules().estimate(MetricKind::Comments, observed),
            Some(Fallback::Estimated(5))
        );
    }

    #[test]
    fn comments_without_inputs_have_no_fallback() {
        assert_eq!(
            rules().estimate(MetricKind::Comments, Observed::default()),
            None
        );
    }

    #[test]
    fn subscribers_are_unknown_never_numeric() {
        let observed = Observed {
            views: Some(1_000),
            likes: Some(10),
        };
        assert_eq!(
            rules().estimate(MetricKind::SubscriberCount, observed),
            Some(Fallback::Unknown)
        );
    }

    #[test]
    fn views_never_estimated() {
        let observed = Observed {
            views: None,
            likes: Some(100),
        };
        assert_eq!(rules().estimate(MetricKind::Views, observed), None);
    }

    #[test]
    fn custom_ratios_apply() {
        let custom = EstimatorRules {
            likes_per_view: 0.1,
            min_estimated_likes: 0,
            ..EstimatorRules::default()
        };
        let observed = Observed {
            views: Some(250),
            likes: None,
        };
        assert_eq!(
            custom.estimate(MetricKind::Likes, observed),
            Some(Fallback::Estimated(25))
        );
    }
}
