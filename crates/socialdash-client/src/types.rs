//! Backend response types.
//!
//! The backend is loose about which keys it sends, so every field that can be
//! absent carries a serde default.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use socialdash_core::MetricRecord;

/// Response of `GET /data/list`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatasetList {
    #[serde(default)]
    pub youtube: Vec<DatasetEntry>,
    #[serde(default)]
    pub instagram: Vec<DatasetEntry>,
}

impl DatasetList {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.youtube.is_empty() && self.instagram.is_empty()
    }
}

/// One scraped dataset: a YouTube channel or an Instagram account.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetEntry {
    /// `channel_name` for YouTube, `username` for Instagram.
    #[serde(alias = "channel_name", alias = "username", default)]
    pub name: String,
    #[serde(default)]
    pub item_count: u64,
    #[serde(default)]
    pub file_path: String,
    /// Creation time as epoch seconds.
    #[serde(default)]
    pub created: Option<f64>,
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub has_error: bool,
}

impl DatasetEntry {
    /// Display name when the backend supplies one, else the channel or account.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.name)
    }

    /// The inline preview records shipped with the listing.
    #[must_use]
    pub fn records(&self) -> Vec<MetricRecord> {
        self.data.iter().cloned().map(MetricRecord::new).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Running,
    Completed,
    Error,
    #[serde(other)]
    Unknown,
}

/// A background scrape job.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Task {
    pub task_id: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl Task {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.status, TaskStatus::Completed | TaskStatus::Error)
    }
}

/// Response of `GET /config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub youtube_data_dir: String,
    #[serde(default)]
    pub instagram_data_dir: String,
    /// Whether a real scraping token is configured (placeholders count as unset).
    #[serde(default)]
    pub is_api_token_set: bool,
}

/// Response of `POST /config/token`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenUpdate {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl TokenUpdate {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}
