mod datasets;
mod export;
mod report;
mod source;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use socialdash_core::{Extractor, MetricKind, Preset};
use tracing_subscriber::EnvFilter;

use crate::source::SourceArgs;

#[derive(Debug, Parser)]
#[command(name = "socialdash")]
#[command(about = "Social media metrics dashboard command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List datasets available on the scraping backend
    Datasets,
    /// Show headline totals and averages for a dataset
    Summary {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Rank records by a metric
    Top {
        #[command(flatten)]
        source: SourceArgs,
        /// Metric to rank by (views, likes, comments)
        #[arg(long, default_value = "views", value_parser = parse_rank_metric)]
        metric: MetricKind,
        /// Number of rows to show (defaults to `SOCIALDASH_TOP_N`)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Count records per publish month
    Timeline {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Count records per content type
    Types {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Export a dataset as CSV
    Export {
        #[command(flatten)]
        source: SourceArgs,
        /// Column layout (youtube or instagram)
        #[arg(long)]
        preset: Preset,
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Username for posts without an owner field (defaults to the dataset name)
        #[arg(long)]
        account: Option<String>,
    },
}

/// Per-record metrics `top` can rank by. Subscriber count is channel-level.
fn parse_rank_metric(raw: &str) -> Result<MetricKind, String> {
    match raw.parse::<MetricKind>() {
        Ok(MetricKind::SubscriberCount) => {
            Err("expected one of views, likes, comments".to_string())
        }
        Ok(kind) => Ok(kind),
        Err(e) => Err(e.to_string()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = socialdash_core::load_app_config()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "loaded configuration");

    let extractor = Extractor::new(config.estimator_rules());

    match cli.command {
        Commands::Datasets => {
            let client = socialdash_client::DashboardClient::new(&config)?;
            datasets::run_datasets(&client).await?;
        }
        Commands::Summary { source } => {
            let records = source.load(&config).await?;
            report::run_summary(&extractor, &records);
        }
        Commands::Top {
            source,
            metric,
            limit,
        } => {
            let records = source.load(&config).await?;
            report::run_top(&extractor, &records, metric, limit.unwrap_or(config.top_n));
        }
        Commands::Timeline { source } => {
            let records = source.load(&config).await?;
            report::run_timeline(&records);
        }
        Commands::Types { source } => {
            let records = source.load(&config).await?;
            report::run_types(&records);
        }
        Commands::Export {
            source,
            preset,
            out,
            account,
        } => {
            let records = source.load(&config).await?;
            let account = account.unwrap_or_else(|| source.dataset_name());
            export::run_export(&extractor, &records, preset, &account, out.as_deref())?;
        }
    }

    Ok(())
}
