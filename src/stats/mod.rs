//! Read-only summaries over the dose history for dashboards and charts.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::models::DoseEvent;
use crate::phases::{
    classify_recovery_stage, days_since, recovery_progress, RecoveryStage, FULL_RECOVERY_DAYS,
};

/// Months covered by the usage chart, ending with the reference month.
pub const USAGE_WINDOW_MONTHS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCount {
    pub year: i32,
    pub month: u32,
    /// Short month name, e.g. `"Mar"`.
    pub label: String,
    pub count: usize,
}

/// Dose counts for the six calendar months ending at `reference`'s month,
/// oldest first. Months are evaluated in `reference`'s time zone.
pub fn monthly_usage_counts<Tz: TimeZone>(
    doses: &[DoseEvent],
    reference: &DateTime<Tz>,
) -> Vec<MonthlyCount> {
    let tz = reference.timezone();
    let anchor = month_index(reference.year(), reference.month());

    let mut buckets: Vec<MonthlyCount> = (0..USAGE_WINDOW_MONTHS as i64)
        .rev()
        .map(|back| {
            let (year, month) = from_month_index(anchor - back);
            MonthlyCount {
                year,
                month,
                label: month_label(year, month),
                count: 0,
            }
        })
        .collect();

    for dose in doses {
        let local = dose.timestamp.with_timezone(&tz);
        let offset = anchor - month_index(local.year(), local.month());
        if (0..USAGE_WINDOW_MONTHS as i64).contains(&offset) {
            let slot = buckets.len() - 1 - offset as usize;
            buckets[slot].count += 1;
        }
    }

    buckets
}

fn month_index(year: i32, month: u32) -> i64 {
    i64::from(year) * 12 + i64::from(month) - 1
}

fn from_month_index(index: i64) -> (i32, u32) {
    let year = index.div_euclid(12) as i32;
    let month = index.rem_euclid(12) as u32 + 1;
    (year, month)
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.format("%b").to_string())
        .unwrap_or_default()
}

/// Most recently entered dose (entry order, not timestamp order).
pub fn last_dose(doses: &[DoseEvent]) -> Option<&DoseEvent> {
    doses.last()
}

pub fn days_since_last_use(doses: &[DoseEvent], now: DateTime<Utc>) -> Option<i64> {
    last_dose(doses).map(|dose| days_since(dose.timestamp, now))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryStatus {
    /// `None` when nothing has been logged.
    pub days_since_last_use: Option<i64>,
    pub stage: RecoveryStage,
    pub progress: f64,
    /// Whether the recommended wait between uses has passed.
    pub complete: bool,
}

pub fn recovery_status(doses: &[DoseEvent], now: DateTime<Utc>) -> RecoveryStatus {
    match days_since_last_use(doses, now) {
        Some(days) => RecoveryStatus {
            days_since_last_use: Some(days),
            stage: classify_recovery_stage(days),
            progress: recovery_progress(days),
            complete: days >= FULL_RECOVERY_DAYS,
        },
        None => RecoveryStatus {
            days_since_last_use: None,
            stage: RecoveryStage::Full,
            progress: 1.0,
            complete: true,
        },
    }
}

/// Doses newest first by timestamp, for the history list.
pub fn history(doses: &[DoseEvent]) -> Vec<DoseEvent> {
    let mut sorted = doses.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted
}
