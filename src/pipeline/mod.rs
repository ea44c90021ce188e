// src/pipeline/mod.rs

//! One run = fetch → store raw → locate → normalize → commit, strictly in
//! sequence. The first failing stage aborts the run and nothing past the raw
//! snapshot is written.

use chrono::{Local, NaiveDate, NaiveDateTime};
use futures::future::join_all;
use std::{fs, path::Path, time::Instant};
use tracing::{error, info, instrument};

use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::{PipelineError, Result};
use crate::fetch::Fetcher;
use crate::locate::{locate, Locator};
use crate::process::{self, date_parser};
use crate::store::{self, ArtifactPaths, RunMetadata};
use crate::types::{DatasetKind, Pipeline, RawSnapshot};

/// Outcome of a committed run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub kind: DatasetKind,
    pub rows: usize,
    pub paths: ArtifactPaths,
    pub metadata: RunMetadata,
}

/// Locate and normalize one snapshot body. No I/O.
///
/// Returns the dataset and, for sources that state one, the date the source
/// says its data is from.
pub fn transform(kind: DatasetKind, content: &str) -> Result<(Dataset, Option<NaiveDate>)> {
    let located = locate(content, Locator::for_kind(kind))?;
    let source_date = match kind {
        DatasetKind::HighShortInterest => Some(date_parser::extract_effective_date(content)?),
        _ => None,
    };
    let dataset = process::normalize(&located, kind)?;
    Ok((dataset, source_date))
}

pub struct PipelineRunner {
    config: Config,
    fetcher: Fetcher,
}

impl PipelineRunner {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = Fetcher::new(&config.http, config.retry)?;
        Ok(Self { config, fetcher })
    }

    /// Handle one scheduler trigger. Insider trades run their buy and sell
    /// datasets concurrently; they share nothing and fail independently.
    pub async fn trigger(
        &self,
        pipeline: Pipeline,
        today: NaiveDate,
    ) -> Vec<(DatasetKind, Result<RunReport>)> {
        join_all(
            pipeline
                .datasets()
                .into_iter()
                .map(|kind| async move { (kind, self.run(kind, today).await) }),
        )
        .await
    }

    /// Run one dataset end to end for `today`.
    #[instrument(level = "info", skip(self), fields(dataset = %kind))]
    pub async fn run(&self, kind: DatasetKind, today: NaiveDate) -> Result<RunReport> {
        let start = Instant::now();
        let paths = self.paths(kind, today);

        let result = async {
            let snapshot = self
                .fetcher
                .fetch(&kind.slug(), self.config.url(kind), today)
                .await?;
            store::write_raw(&snapshot, &paths.raw)?;
            self.finish(kind, &snapshot, &paths, Local::now().naive_local())
        }
        .await;

        report(kind, &result, start);
        result
    }

    /// Redo every stage after the fetch from a raw snapshot already on disk.
    #[instrument(level = "info", skip(self, raw_path), fields(dataset = %kind, raw = %raw_path.as_ref().display()))]
    pub fn reprocess(
        &self,
        kind: DatasetKind,
        raw_path: impl AsRef<Path>,
        today: NaiveDate,
    ) -> Result<RunReport> {
        let start = Instant::now();
        let raw_path = raw_path.as_ref();
        let result = fs::read_to_string(raw_path)
            .map_err(|e| PipelineError::io(raw_path, e))
            .and_then(|content| {
                let snapshot = RawSnapshot {
                    source_id: kind.slug(),
                    retrieved_at: today,
                    content,
                };
                self.finish(
                    kind,
                    &snapshot,
                    &self.paths(kind, today),
                    Local::now().naive_local(),
                )
            });
        report(kind, &result, start);
        result
    }

    pub fn paths(&self, kind: DatasetKind, date: NaiveDate) -> ArtifactPaths {
        ArtifactPaths::new(self.config.dataset_dir(kind), kind, date)
    }

    fn finish(
        &self,
        kind: DatasetKind,
        snapshot: &RawSnapshot,
        paths: &ArtifactPaths,
        run_date: NaiveDateTime,
    ) -> Result<RunReport> {
        let (dataset, source_date) = transform(kind, &snapshot.content)?;
        let metadata = RunMetadata::new(
            kind,
            snapshot.retrieved_at,
            run_date,
            source_date,
            paths.data.display().to_string(),
        );
        store::commit_run(&dataset, &metadata, paths)?;
        Ok(RunReport {
            kind,
            rows: dataset.len(),
            paths: paths.clone(),
            metadata,
        })
    }
}

fn report(kind: DatasetKind, result: &Result<RunReport>, start: Instant) {
    match result {
        Ok(r) => info!(
            dataset = %kind,
            rows = r.rows,
            source_date = %r.metadata.source_date,
            elapsed = ?start.elapsed(),
            "run complete"
        ),
        Err(e) => error!(
            dataset = %kind,
            kind = e.kind(),
            error = %e,
            elapsed = ?start.elapsed(),
            "run failed"
        ),
    }
}
