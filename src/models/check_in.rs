//! Follow-up observations recorded against a dose.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::symptom::Symptom;
use crate::errors::{require_score, ValidationError};
use crate::phases::EffectPhase;

/// Glasses since the previous check-in at which the overhydration hint shows.
pub const OVERHYDRATION_GLASSES: u32 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInEvent {
    pub id: Uuid,
    /// Not required to resolve to a stored dose.
    pub dose_id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    pub feeling_score: u8,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub water_consumed_since_last: u32,
    /// Phase label captured when the check-in was saved.
    #[serde(default)]
    pub phase: Option<String>,
}

impl CheckInEvent {
    /// Stored phase, if it still names a known phase.
    pub fn effect_phase(&self) -> Option<EffectPhase> {
        self.phase.as_deref().and_then(EffectPhase::from_label)
    }

    /// Symptoms that map onto the catalog; free-text extras are skipped.
    pub fn catalog_symptoms(&self) -> Vec<Symptom> {
        self.symptoms
            .iter()
            .filter_map(|label| Symptom::from_label(label))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCheckIn {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub dose_id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    pub feeling_score: u8,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub water_consumed_since_last: u32,
    #[serde(default)]
    pub phase: Option<String>,
}

impl NewCheckIn {
    pub fn for_dose(dose_id: Uuid, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: None,
            dose_id,
            timestamp,
            symptoms: Vec::new(),
            feeling_score: 3,
            notes: String::new(),
            water_consumed_since_last: 0,
            phase: None,
        }
    }

    /// Toggle a catalog symptom on or off, keeping selection order.
    pub fn toggle_symptom(&mut self, symptom: Symptom) {
        let label = symptom.label();
        if let Some(pos) = self.symptoms.iter().position(|s| s == label) {
            self.symptoms.remove(pos);
        } else {
            self.symptoms.push(label.to_string());
        }
    }

    pub fn overhydration_warning(&self) -> bool {
        self.water_consumed_since_last >= OVERHYDRATION_GLASSES
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_score("feelingScore", self.feeling_score)?;
        match &self.phase {
            Some(label) if EffectPhase::from_label(label).is_none() => {
                Err(ValidationError::UnknownLabel {
                    field: "phase",
                    value: label.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn into_event(self, id: Uuid) -> CheckInEvent {
        let mut symptoms: Vec<String> = Vec::with_capacity(self.symptoms.len());
        for label in self.symptoms {
            if !symptoms.contains(&label) {
                symptoms.push(label);
            }
        }

        CheckInEvent {
            id,
            dose_id: self.dose_id,
            timestamp: self.timestamp,
            symptoms,
            feeling_score: self.feeling_score,
            notes: self.notes,
            water_consumed_since_last: self.water_consumed_since_last,
            phase: self.phase,
        }
    }
}
