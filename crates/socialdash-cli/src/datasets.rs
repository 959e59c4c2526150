use socialdash_client::{DashboardClient, DatasetEntry, DatasetList};

/// Print every dataset the backend has scraped.
///
/// # Errors
///
/// Returns an error if the backend request fails.
pub(crate) async fn run_datasets(client: &DashboardClient) -> anyhow::Result<()> {
    let list = client.list_datasets().await?;
    print!("{}", render_datasets(&list));
    Ok(())
}

pub(crate) fn render_datasets(list: &DatasetList) -> String {
    if list.is_empty() {
        return "no datasets found; start a scrape on the backend first\n".to_string();
    }

    let mut out = format!("{:<11}{:<30}{:>7}  PATH\n", "PLATFORM", "NAME", "ITEMS");
    let rows = list
        .youtube
        .iter()
        .map(|e| ("youtube", e))
        .chain(list.instagram.iter().map(|e| ("instagram", e)));
    for (platform, entry) in rows {
        out.push_str(&render_row(platform, entry));
    }
    out
}

fn render_row(platform: &str, entry: &DatasetEntry) -> String {
    let flag = if entry.has_error { " (error)" } else { "" };
    format!(
        "{:<11}{:<30}{:>7}  {}{flag}\n",
        platform,
        entry.label(),
        entry.item_count,
        entry.file_path
    )
}
