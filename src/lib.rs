mod clock;
mod config;
mod db;
mod dosage;
mod errors;
mod kv;
mod models;
mod phases;
mod safety;
mod settings;
mod stats;
mod store;
mod utils;

use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use log::warn;

pub use clock::{Clock, FixedClock, IdGenerator, SystemClock, UuidGenerator};
pub use config::{AppConfig, DATA_DIR_ENV};
pub use db::Database;
pub use dosage::{
    estimate_range, estimate_range_checked, DosageRange, ExperienceLevel, MAX_RECOMMENDED_MG,
};
pub use errors::ValidationError;
pub use kv::{KeyValueStore, MemoryStore};
pub use models::{
    advice_for_label, CheckInEvent, DoseEvent, NewCheckIn, NewDose, Symptom, SymptomAdvice,
    OVERHYDRATION_GLASSES,
};
pub use phases::{
    classify_phase, classify_recovery_stage, days_since, minutes_since, phase_at,
    recovery_progress, EffectPhase, RecoveryStage, FULL_RECOVERY_DAYS,
};
pub use safety::{
    EmergencyResource, EMERGENCY_RESOURCES, HEALTH_TIPS, RECOMMENDED_DAYS_BETWEEN_USES,
    SAFE_USE_GUIDELINES, WARNING_SIGNS,
};
pub use settings::{EmergencyContact, Preferences, SettingsStore, Theme};
pub use stats::{
    days_since_last_use, history, last_dose, monthly_usage_counts, recovery_status,
    MonthlyCount, RecoveryStatus, USAGE_WINDOW_MONTHS,
};
pub use store::{LoadReport, LoadStatus, RecordStore, SaveStatus, CHECK_INS_KEY, DOSAGES_KEY};
pub use utils::init_logging;

/// Everything the presentation shell needs, owned in one place and handed
/// to views by reference.
pub struct AppState {
    pub config: AppConfig,
    pub db: Database,
    pub settings: SettingsStore,
    store: Mutex<RecordStore>,
}

impl AppState {
    pub fn open(config: AppConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir).with_context(|| {
            format!("failed to create data directory {}", config.data_dir.display())
        })?;

        let database = Database::new(config.database_file.clone())?;
        let store = RecordStore::open(Box::new(database.clone()));

        let report = store.last_load_report();
        if report.has_problems() {
            warn!("Saved records could not be fully restored: {report:?}");
        }

        let settings = SettingsStore::new(config.settings_file.clone())?;

        Ok(Self {
            config,
            db: database,
            settings,
            store: Mutex::new(store),
        })
    }

    /// Exclusive access to the record store for one user action.
    pub fn store(&self) -> MutexGuard<'_, RecordStore> {
        match self.store.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Initialize logging and open the app's data under `config`.
pub fn run(config: AppConfig) -> Result<AppState> {
    init_logging();
    log::info!("MollyCounter starting up...");
    AppState::open(config)
}
