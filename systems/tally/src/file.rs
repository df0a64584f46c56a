//! Counter store persisted as a small JSON document.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use grid_rescue_core::{CounterStore, Counters};
use thiserror::Error;

use crate::InMemoryCounters;

/// Failures while loading or saving persisted counters.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The counters file could not be read or written.
    #[error("counters file {path} is not accessible")]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The counters file does not hold a counters document.
    #[error("counters file {path} is malformed")]
    Malformed {
        /// File that was being parsed.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Counter store that survives restarts by writing through to a JSON file.
///
/// Every increment is saved immediately. A failed save is logged and the
/// in-memory value still advances, so play is never interrupted by storage.
#[derive(Debug)]
pub struct JsonFileCounters {
    path: PathBuf,
    inner: InMemoryCounters,
}

impl JsonFileCounters {
    /// Opens the store at `path`. A missing file starts every counter at zero.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let counters = match fs::read(&path) {
            Ok(bytes) => {
                serde_json::from_slice::<Counters>(&bytes).map_err(|source| {
                    StoreError::Malformed {
                        path: path.clone(),
                        source,
                    }
                })?
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => Counters::default(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        Ok(Self {
            path,
            inner: InMemoryCounters::with_counters(counters),
        })
    }

    /// File the counters are persisted to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the current counters, replacing the file atomically.
    pub fn save(&self) -> Result<(), StoreError> {
        let io_error = |source: io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        let body = serde_json::to_vec_pretty(&self.inner.counters()).map_err(|source| {
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;

        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, body).map_err(io_error)?;
        fs::rename(&staging, &self.path).map_err(io_error)
    }

    fn persist(&self) {
        if let Err(error) = self.save() {
            tracing::warn!(%error, "failed to persist counters");
        }
    }
}

impl CounterStore for JsonFileCounters {
    fn counters(&self) -> Counters {
        self.inner.counters()
    }

    fn record_visit(&mut self) -> u64 {
        let value = self.inner.record_visit();
        self.persist();
        value
    }

    fn record_game_played(&mut self) -> u64 {
        let value = self.inner.record_game_played();
        self.persist();
        value
    }

    fn record_game_won(&mut self) -> u64 {
        let value = self.inner.record_game_won();
        self.persist();
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_survive_reopening() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("counters.json");

        let mut store = JsonFileCounters::open(&path).expect("missing file opens empty");
        assert_eq!(store.counters(), Counters::default());
        assert_eq!(store.record_visit(), 1);
        assert_eq!(store.record_game_played(), 1);
        assert_eq!(store.record_game_won(), 1);
        drop(store);

        let mut reopened = JsonFileCounters::open(&path).expect("saved file reopens");
        assert_eq!(reopened.record_visit(), 2);
        assert_eq!(
            reopened.counters(),
            Counters {
                visits_count: 2,
                games_played_count: 1,
                games_won_count: 1,
            }
        );
    }

    #[test]
    fn file_uses_the_wire_field_names() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("counters.json");
        let mut store = JsonFileCounters::open(&path).expect("missing file opens empty");
        let _ = store.record_game_played();

        let text = fs::read_to_string(&path).expect("counters were written");
        assert!(text.contains("\"gamesPlayedCount\": 1"), "unexpected file: {text}");
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("counters.json");
        fs::write(&path, "not json").expect("fixture written");

        let error = JsonFileCounters::open(&path).expect_err("garbage is rejected");
        assert!(matches!(error, StoreError::Malformed { .. }));
    }
}
