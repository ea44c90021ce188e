// src/store/mod.rs

//! Persisting a run: the raw snapshot, the CSV dataset and its metadata.
//!
//! Every file is staged in its destination directory and renamed into place,
//! so readers never observe a half-written artifact. Same-day runs replace
//! each other's files.

pub mod tabular;
pub mod metadata;

use chrono::NaiveDate;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use crate::dataset::Dataset;
use crate::error::{PipelineError, Result};
use crate::types::{DatasetKind, RawSnapshot};
pub use metadata::RunMetadata;

/// File names of one run: `<dir>/<YYYY-MM-DD>[.<side>].{raw.<ext>,data.csv,metadata.json}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub raw: PathBuf,
    pub data: PathBuf,
    pub metadata: PathBuf,
}

impl ArtifactPaths {
    pub fn new(dir: impl AsRef<Path>, kind: DatasetKind, date: NaiveDate) -> Self {
        let dir = dir.as_ref();
        let stem = match kind {
            DatasetKind::InsiderTrades(side) => format!("{}.{}", date, side.as_str()),
            _ => date.to_string(),
        };
        Self {
            raw: dir.join(format!("{}.raw.{}", stem, kind.format().extension())),
            data: dir.join(format!("{}.data.csv", stem)),
            metadata: dir.join(format!("{}.metadata.json", stem)),
        }
    }
}

/// Store the snapshot body verbatim.
pub fn write_raw(snapshot: &RawSnapshot, path: &Path) -> Result<()> {
    commit_file(stage(path, snapshot.content.as_bytes())?, path)?;
    info!(source = %snapshot.source_id, path = %path.display(), "stored raw snapshot");
    Ok(())
}

/// Write the dataset on its own.
pub fn write_dataset(dataset: &Dataset, path: &Path) -> Result<()> {
    let bytes = tabular::to_csv_bytes(dataset)?;
    commit_file(stage(path, &bytes)?, path)
}

/// Write the metadata document on its own.
pub fn write_metadata(meta: &RunMetadata, path: &Path) -> Result<()> {
    commit_file(stage(path, &metadata_bytes(meta)?)?, path)
}

/// Commit dataset and metadata as a pair.
///
/// Both are rendered and staged before either is renamed into place. If the
/// metadata cannot be committed, the just-written dataset and any older
/// metadata at that path are removed so the date slot never holds one
/// without the other.
pub fn commit_run(dataset: &Dataset, meta: &RunMetadata, paths: &ArtifactPaths) -> Result<()> {
    let data = stage(&paths.data, &tabular::to_csv_bytes(dataset)?)?;
    let metadata = stage(&paths.metadata, &metadata_bytes(meta)?)?;

    if paths.data.exists() || paths.metadata.exists() {
        warn!(
            path = %paths.data.display(),
            "replacing artifacts from an earlier run on the same day"
        );
    }

    commit_file(data, &paths.data)?;
    if let Err(e) = commit_file(metadata, &paths.metadata) {
        error!(error = %e, "metadata commit failed; rolling back dataset");
        for path in [&paths.data, &paths.metadata] {
            if path.is_file() {
                if let Err(rm) = fs::remove_file(path) {
                    error!(path = %path.display(), error = %rm, "rollback failed");
                }
            }
        }
        return Err(e);
    }

    info!(
        rows = dataset.len(),
        data = %paths.data.display(),
        metadata = %paths.metadata.display(),
        "committed run"
    );
    Ok(())
}

fn metadata_bytes(meta: &RunMetadata) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(meta)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write `bytes` to a hidden temp file next to `dest`.
fn stage(dest: &Path, bytes: &[u8]) -> Result<NamedTempFile> {
    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".staging-")
        .tempfile_in(dir)
        .map_err(|e| PipelineError::io(dir, e))?;
    tmp.write_all(bytes)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| PipelineError::io(tmp.path(), e))?;
    debug!(dest = %dest.display(), bytes = bytes.len(), "staged");
    Ok(tmp)
}

fn commit_file(tmp: NamedTempFile, dest: &Path) -> Result<()> {
    tmp.persist(dest)
        .map(|_| ())
        .map_err(|e| PipelineError::io(dest, e.error))
}
