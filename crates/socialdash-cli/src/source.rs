//! Where a command's records come from: a local JSON file or the backend.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use socialdash_client::DashboardClient;
use socialdash_core::{records_from_json, AppConfig, MetricRecord};

#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub(crate) struct SourceArgs {
    /// Read records from a local JSON file
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Fetch a dataset from the backend by its listed file path
    #[arg(long)]
    pub path: Option<String>,
}

impl SourceArgs {
    /// Loads the selected dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the backend
    /// request fails.
    pub(crate) async fn load(&self, config: &AppConfig) -> anyhow::Result<Vec<MetricRecord>> {
        if let Some(file) = &self.file {
            return load_file(file);
        }
        let Some(path) = &self.path else {
            anyhow::bail!("either --file or --path is required");
        };

        let client = DashboardClient::new(config)?;
        let records = client
            .fetch_dataset(path)
            .await
            .with_context(|| format!("no data available for dataset '{path}'"))?;
        if records.is_empty() {
            tracing::warn!(path = %path, "dataset is empty");
        }
        Ok(records)
    }

    /// File stem of the source, used as the default account name.
    pub(crate) fn dataset_name(&self) -> String {
        let stem = |p: &Path| {
            p.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        match (&self.file, &self.path) {
            (Some(file), _) => stem(file),
            (None, Some(path)) => stem(Path::new(&path.replace('\\', "/"))),
            (None, None) => String::new(),
        }
    }
}

fn load_file(file: &Path) -> anyhow::Result<Vec<MetricRecord>> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    parse_records(&text).with_context(|| format!("failed to parse {}", file.display()))
}

/// Parses a dataset body; any JSON shape is accepted.
pub(crate) fn parse_records(text: &str) -> anyhow::Result<Vec<MetricRecord>> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    Ok(records_from_json(value))
}
