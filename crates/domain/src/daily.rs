use common::Notifier;
use serde::de::DeserializeOwned;
use serde::Serialize;
use storage::LocalStore;
use tracing::warn;

use crate::records::{BiomarkerSample, SleepLog};

/// A record keyed by ISO calendar date; one entry per date survives.
pub trait DailyRecord: Clone + Serialize + DeserializeOwned {
    fn date(&self) -> &str;
}

impl DailyRecord for SleepLog {
    fn date(&self) -> &str {
        &self.date
    }
}

impl DailyRecord for BiomarkerSample {
    fn date(&self) -> &str {
        &self.date
    }
}

/// Date-keyed collection with upsert-by-date semantics: saving for an
/// existing date replaces the prior entry, and entries stay sorted by
/// date ascending.
pub struct DailyLog<R: DailyRecord> {
    storage_key: String,
    entries: Vec<R>,
}

impl<R: DailyRecord> DailyLog<R> {
    pub fn new(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
            entries: Vec::new(),
        }
    }

    pub fn load(&mut self, store: &LocalStore, notifier: &mut Notifier) {
        match store.load::<Vec<R>>(&self.storage_key) {
            Ok(Some(entries)) => self.entries = entries,
            Ok(None) => self.entries = Vec::new(),
            Err(err) => {
                warn!(key = %self.storage_key, %err, "load failed");
                notifier.error("Não foi possível carregar os dados.");
                self.entries = Vec::new();
            }
        }
    }

    pub fn upsert(&mut self, store: &LocalStore, notifier: &mut Notifier, entry: R) {
        self.entries.retain(|e| e.date() != entry.date());
        self.entries.push(entry);
        self.entries.sort_by(|a, b| a.date().cmp(b.date()));
        if let Err(err) = store.save(&self.storage_key, &self.entries) {
            warn!(key = %self.storage_key, %err, "save failed");
            notifier.error("Não foi possível salvar os dados.");
        }
    }

    pub fn entries(&self) -> &[R] {
        &self.entries
    }

    /// Most recent entry by date.
    pub fn latest(&self) -> Option<&R> {
        self.entries.last()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
