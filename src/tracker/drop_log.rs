use std::slice::Iter;

use chrono::{Local, NaiveDateTime};
use log::info;

use super::record::DropRecord;
use super::import::{self, ImportOutcome};
use super::stats::{self, DropStats};

/// The in-memory, insertion ordered sequence of drops for the current session.
#[derive(Debug, Default)]
pub struct DropLog {
    records: Vec<DropRecord>,
}

impl DropLog {
    pub fn new() -> DropLog {
        DropLog { records: Vec::new() }
    }

    /// Inputs are expected to be validated by the caller.
    pub fn add_manual(&mut self, when: NaiveDateTime, price_gp: u64) -> DropRecord {
        let record = DropRecord::new(when, price_gp);
        self.records.push(record.clone());
        record
    }

    /// Imports pasted chat text, stamping new records with the current local time.
    pub fn import_text(&mut self, text: &str) -> ImportOutcome {
        self.import_text_at(text, Local::now().naive_local())
    }

    pub fn import_text_at(&mut self, text: &str, now: NaiveDateTime) -> ImportOutcome {
        let outcome = import::import_text(text, now);
        self.records.extend(outcome.records.iter().cloned());
        info!("imported {} shard(s)", outcome.imported);
        outcome
    }

    /// Drops the current sequence in favour of `records`.
    pub fn replace(&mut self, records: Vec<DropRecord>) {
        self.records = records;
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn stats(&self) -> DropStats {
        stats::compute_stats(&self.records)
    }

    pub fn records(&self) -> &[DropRecord] {
        &self.records
    }

    pub fn iter(&self) -> Iter<'_, DropRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
