use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::model::{Chamber, PoliticianRecord, StatsScope};
use crate::stats;

pub const RECORDS_FILE: &str = "politicians.json";
pub const STATISTICS_FILE: &str = "statistics.json";

/// Destination for named artifacts.
pub trait Sink {
    fn write(&mut self, name: &str, payload: &str) -> Result<()>;
}

/// Writes each artifact as a file under one directory.
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    /// Create `dir` (and parents) if missing.
    pub fn create(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let existed = dir.is_dir();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        if !existed {
            info!(dir = %dir.display(), "created output directory");
        }
        Ok(DirSink { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Sink for DirSink {
    fn write(&mut self, name: &str, payload: &str) -> Result<()> {
        let path = self.dir.join(name);
        fs::write(&path, payload).with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), bytes = payload.len(), "wrote artifact");
        Ok(())
    }
}

/// Keeps artifacts in memory, in write order.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySink {
    pub written: Vec<(String, String)>,
}

#[cfg(test)]
impl Sink for MemorySink {
    fn write(&mut self, name: &str, payload: &str) -> Result<()> {
        self.written.push((name.to_string(), payload.to_string()));
        Ok(())
    }
}

pub fn records_file(chamber: Chamber) -> String {
    format!("politicians-{}.json", chamber)
}

pub fn statistics_file(chamber: Chamber) -> String {
    format!("statistics-{}.json", chamber)
}

/// Serialize and write the record list and its statistics.
pub fn write_artifacts(
    sink: &mut dyn Sink,
    records: &[PoliticianRecord],
    scope: StatsScope,
    records_name: &str,
    statistics_name: &str,
) -> Result<()> {
    sink.write(records_name, &to_json(records)?)?;
    sink.write(statistics_name, &to_json(&stats::generate(records, scope))?)?;
    Ok(())
}

pub fn write_chamber(sink: &mut dyn Sink, chamber: Chamber, records: &[PoliticianRecord]) -> Result<()> {
    write_artifacts(
        sink,
        records,
        chamber.into(),
        &records_file(chamber),
        &statistics_file(chamber),
    )
}

pub fn write_combined(sink: &mut dyn Sink, records: &[PoliticianRecord]) -> Result<()> {
    write_artifacts(sink, records, StatsScope::All, RECORDS_FILE, STATISTICS_FILE)
}

/// Pretty JSON with two-space indentation.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize JSON")
}
