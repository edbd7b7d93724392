//! Local persistence adapter: string keys to JSON string values over a
//! single-file SQLite table. The storage file is the sole source of
//! truth across page navigations; collections are reloaded from here
//! every time a page becomes visible.

use std::path::Path;

use common::StorageFailure;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

pub type StorageResult<T> = Result<T, StorageFailure>;

/// Key/value store with JSON (de)serialization per access.
///
/// All access is single-threaded (UI event dispatch), so the adapter
/// holds a plain `Connection`. Key-namespace collisions between
/// modules are avoided by convention: each module owns a documented
/// key or key prefix (`tasksData`, `daily-plan-<date>`, ...).
pub struct LocalStore {
    conn: Connection,
}

impl LocalStore {
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let conn = Connection::open(path.as_ref()).map_err(|e| StorageFailure::Medium {
            key: path.as_ref().display().to_string(),
            reason: e.to_string(),
        })?;
        Self::with_connection(conn)
    }

    /// In-memory store, used by tests and by `--ephemeral` runs.
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| StorageFailure::Medium {
            key: ":memory:".into(),
            reason: e.to_string(),
        })?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> StorageResult<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
        .map_err(|e| StorageFailure::Medium {
            key: "kv".into(),
            reason: e.to_string(),
        })?;
        Ok(Self { conn })
    }

    /// Serializes `value` to JSON and writes it under `key`,
    /// replacing any previous value.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()> {
        let json = serde_json::to_string(value).map_err(|e| StorageFailure::Encode {
            key: key.to_string(),
            source: e,
        })?;
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, json],
            )
            .map_err(|e| StorageFailure::Medium {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        debug!(key, bytes = json.len(), "saved");
        Ok(())
    }

    /// Reads and parses the value under `key`. An unset key is the
    /// normal first-use case and yields `Ok(None)`; invalid stored
    /// JSON is a `StorageFailure` the caller reports and then treats
    /// as absent.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| StorageFailure::Medium {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        match raw {
            None => Ok(None),
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| StorageFailure::Corrupt {
                    key: key.to_string(),
                    source: e,
                }),
        }
    }

    pub fn remove(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(|e| StorageFailure::Medium {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    /// All stored keys starting with `prefix`, sorted ascending. The
    /// gratitude journal enumerates its `gratitudeJournal-` day keys
    /// this way.
    pub fn keys_with_prefix(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv WHERE key LIKE ?1 || '%' ORDER BY key ASC")
            .map_err(|e| StorageFailure::Medium {
                key: prefix.to_string(),
                reason: e.to_string(),
            })?;
        let keys = stmt
            .query_map(params![prefix], |row| row.get::<_, String>(0))
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(|e| StorageFailure::Medium {
                key: prefix.to_string(),
                reason: e.to_string(),
            })?;
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Goal {
        id: String,
        text: String,
        completed: bool,
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = LocalStore::open_in_memory().unwrap();
        let goals = vec![Goal {
            id: "1700000000000".into(),
            text: "Ligar para os pais".into(),
            completed: false,
        }];
        store.save("familiarGoals", &goals).unwrap();
        let loaded: Vec<Goal> = store.load("familiarGoals").unwrap().unwrap();
        assert_eq!(loaded, goals);
    }

    #[test]
    fn absent_key_is_none_not_error() {
        let store = LocalStore::open_in_memory().unwrap();
        let loaded: Option<Vec<Goal>> = store.load("mentalGoals").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn save_overwrites_previous_value() {
        let store = LocalStore::open_in_memory().unwrap();
        store.save("daily-plan-last-date", &"2024-01-01").unwrap();
        store.save("daily-plan-last-date", &"2024-02-02").unwrap();
        let date: String = store.load("daily-plan-last-date").unwrap().unwrap();
        assert_eq!(date, "2024-02-02");
    }

    #[test]
    fn corrupt_json_reports_not_panics() {
        let store = LocalStore::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO kv (key, value) VALUES ('tasksData', 'not json')",
                [],
            )
            .unwrap();
        let loaded: StorageResult<Option<Vec<Goal>>> = store.load("tasksData");
        assert!(matches!(loaded, Err(StorageFailure::Corrupt { .. })));
    }

    #[test]
    fn prefix_scan_is_sorted() {
        let store = LocalStore::open_in_memory().unwrap();
        store.save("gratitudeJournal-2024-01-02", &"b").unwrap();
        store.save("gratitudeJournal-2024-01-01", &"a").unwrap();
        store.save("other", &"x").unwrap();
        let keys = store.keys_with_prefix("gratitudeJournal-").unwrap();
        assert_eq!(
            keys,
            vec![
                "gratitudeJournal-2024-01-01".to_string(),
                "gratitudeJournal-2024-01-02".to_string()
            ]
        );
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.db");
        {
            let store = LocalStore::open(&path).unwrap();
            store.save("socialGoals", &vec!["g"]).unwrap();
        }
        let store = LocalStore::open(&path).unwrap();
        let loaded: Vec<String> = store.load("socialGoals").unwrap().unwrap();
        assert_eq!(loaded, vec!["g".to_string()]);
    }
}
