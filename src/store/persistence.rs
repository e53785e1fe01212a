use serde::{de::DeserializeOwned, Serialize};

use crate::kv::KeyValueStore;
use crate::{log_error, log_info, log_warn};

const ENABLE_LOGS: bool = true;

/// How one collection came back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    Loaded(usize),
    #[default]
    Missing,
    /// Blob present but not decodable; treated as empty.
    Corrupt(String),
    /// Backing store could not be read; treated as empty.
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub dosages: LoadStatus,
    pub check_ins: LoadStatus,
}

impl LoadReport {
    pub fn has_problems(&self) -> bool {
        [&self.dosages, &self.check_ins].iter().any(|status| {
            matches!(status, LoadStatus::Corrupt(_) | LoadStatus::Unavailable(_))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    Failed(String),
}

impl SaveStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved)
    }

    /// First failure wins.
    pub(crate) fn and(self, other: SaveStatus) -> SaveStatus {
        match self {
            SaveStatus::Saved => other,
            failed => failed,
        }
    }
}

pub(crate) fn load_collection<T>(kv: &dyn KeyValueStore, key: &str) -> (Vec<T>, LoadStatus)
where
    T: DeserializeOwned,
{
    match kv.get(key) {
        Ok(None) => {
            log_info!("no saved '{key}' collection; starting empty");
            (Vec::new(), LoadStatus::Missing)
        }
        Ok(Some(bytes)) => match serde_json::from_slice::<Vec<T>>(&bytes) {
            Ok(records) => {
                log_info!("loaded {} records from '{key}'", records.len());
                let count = records.len();
                (records, LoadStatus::Loaded(count))
            }
            Err(err) => {
                log_warn!("saved '{key}' collection is unreadable, starting empty: {err}");
                (Vec::new(), LoadStatus::Corrupt(err.to_string()))
            }
        },
        Err(err) => {
            log_error!("failed to read '{key}' collection: {err:#}");
            (Vec::new(), LoadStatus::Unavailable(format!("{err:#}")))
        }
    }
}

/// Serialize and write `records`, retrying the write once.
pub(crate) fn save_collection<T>(kv: &dyn KeyValueStore, key: &str, records: &[T]) -> SaveStatus
where
    T: Serialize,
{
    let bytes = match serde_json::to_vec(records) {
        Ok(bytes) => bytes,
        Err(err) => {
            log_error!("failed to encode '{key}' collection: {err}");
            return SaveStatus::Failed(err.to_string());
        }
    };

    if let Err(first) = kv.set(key, &bytes) {
        log_warn!("write of '{key}' failed, retrying once: {first:#}");
        if let Err(second) = kv.set(key, &bytes) {
            log_error!("write of '{key}' failed again; changes are only in memory: {second:#}");
            return SaveStatus::Failed(format!("{second:#}"));
        }
    }

    SaveStatus::Saved
}
