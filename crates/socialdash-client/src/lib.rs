//! HTTP client for the scraping backend that produces dashboard datasets.

pub mod client;
pub mod error;
pub mod normalize;
pub mod scrape;
pub mod settings;
pub mod types;

pub use client::DashboardClient;
pub use error::ClientError;
pub use normalize::normalize_data_path;
pub use types::{BackendConfig, DatasetEntry, DatasetList, Task, TaskStatus, TokenUpdate};
