use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::tracker::DropRecord;

pub const DEFAULT_DATA_FILE: &str = "bloodshards.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("refusing to overwrite {}, it failed to load: {reason}", .path.display())]
    Unloaded { path: PathBuf, reason: String },
}

/// What was found at the data file when loading.
#[derive(Debug, PartialEq)]
pub enum LoadOutcome {
    Loaded(Vec<DropRecord>),
    NotFound,
    Corrupt(String),
}

impl LoadOutcome {
    pub fn into_records(self) -> Vec<DropRecord> {
        match self {
            LoadOutcome::Loaded(records) => records,
            LoadOutcome::NotFound | LoadOutcome::Corrupt(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

/// Persists the whole drop sequence as a single JSON document.
#[derive(Debug, Clone)]
pub struct DropStore {
    config: StoreConfig,
}

impl DropStore {
    pub fn new(config: StoreConfig) -> DropStore {
        DropStore { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.data_file
    }

    /// Overwrites the document with `records`.
    pub fn save(&self, records: &[DropRecord]) -> Result<(), StoreError> {
        let path = self.path();
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let json = serde_json::to_string_pretty(records)?;
        fs::write(path, json)?;
        info!("saved {} drop(s) to {}", records.len(), path.display());

        Ok(())
    }

    pub fn load_outcome(&self) -> LoadOutcome {
        let path = self.path();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no data file at {}", path.display());
                return LoadOutcome::NotFound;
            },
            Err(err) => return LoadOutcome::Corrupt(err.to_string()),
        };

        match serde_json::from_str::<Option<Vec<DropRecord>>>(&text) {
            Ok(records) => LoadOutcome::Loaded(records.unwrap_or_default()),
            Err(err) => LoadOutcome::Corrupt(err.to_string()),
        }
    }

    /// Loads the document, treating a missing or unreadable one as empty.
    pub fn load(&self) -> Vec<DropRecord> {
        let outcome = self.load_outcome();
        if let LoadOutcome::Corrupt(reason) = &outcome {
            warn!("failed to load {}, err={}", self.path().display(), reason);
        }
        outcome.into_records()
    }

    /// Deletes the document if present.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(self.path()) {
            Ok(()) => {
                info!("removed {}", self.path().display());
                Ok(())
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DropCsvRecord {
    pub when: String,
    pub price_gp: u64,
}

impl From<&DropRecord> for DropCsvRecord {
    fn from(record: &DropRecord) -> Self {
        DropCsvRecord {
            when: record.when.format("%Y-%m-%d %H:%M:%S").to_string(),
            price_gp: record.price_gp,
        }
    }
}

pub fn export_csv<W: Write>(records: &[DropRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    for record in records {
        let row: DropCsvRecord = record.into();
        csv_writer.serialize(row)?;
    }

    csv_writer.flush()?;

    Ok(())
}
