use std::{env, path::PathBuf};

pub const DATA_DIR_ENV: &str = "MOLLYCOUNTER_DATA_DIR";

const DEFAULT_DATA_DIR: &str = "data";
const DATABASE_FILE: &str = "mollycounter.sqlite3";
const SETTINGS_FILE: &str = "settings.json";

/// Where the app keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub database_file: PathBuf,
    pub settings_file: PathBuf,
}

impl AppConfig {
    pub fn from_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            database_file: data_dir.join(DATABASE_FILE),
            settings_file: data_dir.join(SETTINGS_FILE),
            data_dir,
        }
    }

    /// Reads `MOLLYCOUNTER_DATA_DIR`, falling back to `./data`.
    pub fn from_env() -> Self {
        let dir = env::var_os(DATA_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        Self::from_data_dir(dir)
    }
}
