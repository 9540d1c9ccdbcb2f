use log::warn;

use crate::data::{DropStore, LoadOutcome, StoreError};
use crate::tracker::DropLog;

/// A drop log bound to the document it was loaded from.
///
/// A document that exists but could not be read is never overwritten: the log
/// stays as it was and `save` refuses until the document is cleared or reloads cleanly.
#[derive(Debug)]
pub struct Session {
    store: DropStore,
    drop_log: DropLog,
    load_failure: Option<String>,
}

impl Session {
    pub fn open(store: DropStore) -> Session {
        let mut session = Session {
            store,
            drop_log: DropLog::new(),
            load_failure: None,
        };
        session.reload();
        session
    }

    /// Replaces the in-memory log with the document's contents.
    pub fn reload(&mut self) {
        match self.store.load_outcome() {
            LoadOutcome::Loaded(records) => {
                self.drop_log.replace(records);
                self.load_failure = None;
            },
            LoadOutcome::NotFound => {
                self.drop_log.replace(Vec::new());
                self.load_failure = None;
            },
            LoadOutcome::Corrupt(reason) => {
                warn!("failed to load {}, err={}", self.store.path().display(), reason);
                self.load_failure = Some(reason);
            },
        }
    }

    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(reason) = &self.load_failure {
            return Err(StoreError::Unloaded {
                path: self.store.path().to_path_buf(),
                reason: reason.clone(),
            });
        }

        self.store.save(self.drop_log.records())
    }

    /// Deletes the document and empties the log.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.clear()?;
        self.drop_log.clear();
        self.load_failure = None;
        Ok(())
    }

    pub fn load_failure(&self) -> Option<&str> {
        self.load_failure.as_deref()
    }

    pub fn store(&self) -> &DropStore {
        &self.store
    }

    pub fn drop_log(&self) -> &DropLog {
        &self.drop_log
    }

    pub fn drop_log_mut(&mut self) -> &mut DropLog {
        &mut self.drop_log
    }
}
