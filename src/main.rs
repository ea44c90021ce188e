use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use stocksnap::{Config, DatasetKind, Pipeline, PipelineRunner, TradeSide};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(version, about = "Daily stock table snapshots", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// YAML config file; built-in sources are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the data root directory.
    #[arg(long, global = true)]
    data_root: Option<PathBuf>,

    /// Effective date of the run (YYYY-MM-DD). Defaults to today.
    #[arg(short, long, global = true)]
    date: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch, normalize and store the given pipelines (all when none given).
    Run { pipelines: Vec<PipelineArg> },

    /// Rebuild a dataset from an already stored raw snapshot, without fetching.
    Reprocess {
        dataset: DatasetArg,

        /// Path of the stored `.raw.html` / `.raw.json` file.
        #[arg(long)]
        raw: PathBuf,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum PipelineArg {
    HighShortInterest,
    InsiderTrades,
    UnusualVolume,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum DatasetArg {
    HighShortInterest,
    InsiderBuy,
    InsiderSell,
    UnusualVolume,
}

impl From<PipelineArg> for Pipeline {
    fn from(arg: PipelineArg) -> Self {
        match arg {
            PipelineArg::HighShortInterest => Pipeline::HighShortInterest,
            PipelineArg::InsiderTrades => Pipeline::InsiderTrades,
            PipelineArg::UnusualVolume => Pipeline::UnusualVolume,
        }
    }
}

impl From<DatasetArg> for DatasetKind {
    fn from(arg: DatasetArg) -> Self {
        match arg {
            DatasetArg::HighShortInterest => DatasetKind::HighShortInterest,
            DatasetArg::InsiderBuy => DatasetKind::InsiderTrades(TradeSide::Buy),
            DatasetArg::InsiderSell => DatasetKind::InsiderTrades(TradeSide::Sell),
            DatasetArg::UnusualVolume => DatasetKind::UnusualVolume,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) config ───────────────────────────────────────────────────
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(root) = cli.data_root {
        config.data_root = root;
    }
    let today = cli.date.unwrap_or_else(|| Local::now().date_naive());
    info!(data_root = %config.data_root.display(), %today, "startup");

    let runner = PipelineRunner::new(config).context("building pipeline runner")?;

    // ─── 3) run ──────────────────────────────────────────────────────
    match cli.command {
        Commands::Run { pipelines } => {
            let pipelines: Vec<Pipeline> = if pipelines.is_empty() {
                Pipeline::ALL.to_vec()
            } else {
                pipelines.into_iter().map(Pipeline::from).collect()
            };

            let mut failed = Vec::new();
            for pipeline in pipelines {
                for (kind, result) in runner.trigger(pipeline, today).await {
                    if let Err(e) = result {
                        failed.push(format!("{} ({})", kind, e.kind()));
                    }
                }
            }
            if !failed.is_empty() {
                error!(failed = failed.len(), "some runs failed");
                bail!("failed runs: {}", failed.join(", "));
            }
        }
        Commands::Reprocess { dataset, raw } => {
            let kind = DatasetKind::from(dataset);
            let report = runner
                .reprocess(kind, &raw, today)
                .with_context(|| format!("reprocessing {} from {}", kind, raw.display()))?;
            info!(rows = report.rows, data = %report.paths.data.display(), "reprocessed");
        }
    }

    info!("all done");
    Ok(())
}
