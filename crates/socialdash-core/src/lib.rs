//! Metric normalization for scraped social-media records.
//!
//! Records arrive from the scraping backend as loosely-typed JSON whose field
//! names vary by platform, API version, and scraper run. This crate owns the
//! single extraction policy (candidate paths, coercion, estimation) and the
//! aggregates built on top of it: totals, averages, top-N rankings, content
//! type distribution, monthly timelines, and CSV export.

pub mod aggregate;
pub mod app_config;
pub mod classify;
pub mod coerce;
pub mod config;
pub mod error;
pub mod estimate;
pub mod export;
pub mod extract;
pub mod format;
pub mod metric;
pub mod record;
pub mod timeline;

pub use aggregate::{
    average, subscribers, sum, summarize, top_n, MetricSummary, Ranked, Subscribers,
};
pub use app_config::{AppConfig, Environment};
pub use classify::{classify, content_type_of, type_distribution, ContentType};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use estimate::{EstimatorRules, Fallback};
pub use export::{instagram_columns, to_csv, youtube_columns, Cell, Column, Preset};
pub use extract::{extract, Extractor};
pub use metric::{Extraction, MetricKind};
pub use record::{records_from_json, MetricRecord};
pub use timeline::{bucket, date_of, format_date, timeline, DateBucket, TimelinePoint};
