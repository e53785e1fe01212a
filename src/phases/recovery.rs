//! Day-granularity recovery stages after the most recent dose.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Days after which recovery counts as complete.
pub const FULL_RECOVERY_DAYS: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecoveryStage {
    Acute,
    Mid,
    Late,
    Full,
}

impl RecoveryStage {
    pub fn label(&self) -> &'static str {
        match self {
            RecoveryStage::Acute => "Acute recovery",
            RecoveryStage::Mid => "Mid recovery",
            RecoveryStage::Late => "Late recovery",
            RecoveryStage::Full => "Full recovery",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RecoveryStage::Acute => "Serotonin levels are rebuilding. Low mood and fatigue are common; rest, eat well and stay hydrated.",
            RecoveryStage::Mid => "Most acute after-effects have faded while your brain chemistry continues to rebalance.",
            RecoveryStage::Late => "Recovery is well underway. Keep waiting before considering another use.",
            RecoveryStage::Full => "The recommended 3-month wait has passed.",
        }
    }
}

/// Stage for whole `days` since the dose. Negative input is treated as day 0.
pub fn classify_recovery_stage(days: i64) -> RecoveryStage {
    match days.max(0) {
        d if d < 7 => RecoveryStage::Acute,
        d if d < 30 => RecoveryStage::Mid,
        d if d < FULL_RECOVERY_DAYS => RecoveryStage::Late,
        _ => RecoveryStage::Full,
    }
}

/// Fraction of the 90-day wait elapsed, in `[0.0, 1.0]`.
pub fn recovery_progress(days: i64) -> f64 {
    (days.max(0) as f64 / FULL_RECOVERY_DAYS as f64).min(1.0)
}

/// Whole days from `dose_time` to `now`, floored and never negative.
pub fn days_since(dose_time: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - dose_time).num_days().max(0)
}
