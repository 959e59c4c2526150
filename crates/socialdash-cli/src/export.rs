use std::path::Path;

use anyhow::Context;
use socialdash_core::{instagram_columns, to_csv, youtube_columns, Extractor, MetricRecord, Preset};

/// Write the dataset as CSV to `out`, or stdout when `None`.
///
/// # Errors
///
/// Returns an error if the output file cannot be written.
pub(crate) fn run_export(
    extractor: &Extractor,
    records: &[MetricRecord],
    preset: Preset,
    account: &str,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let csv = render_export(extractor, records, preset, account);
    match out {
        Some(path) => {
            std::fs::write(path, &csv)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), rows = records.len(), "wrote CSV export");
        }
        None => println!("{csv}"),
    }
    Ok(())
}

pub(crate) fn render_export(
    extractor: &Extractor,
    records: &[MetricRecord],
    preset: Preset,
    account: &str,
) -> String {
    let columns = match preset {
        Preset::YouTube => youtube_columns(extractor),
        Preset::Instagram => instagram_columns(extractor, account),
    };
    to_csv(records, &columns)
}
