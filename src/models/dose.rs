//! Logged dose records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{require_finite, require_score, ValidationError};

/// A single logged dose. Created once by the store and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoseEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Milligrams. Non-finite values are stored as strings so they reload.
    #[serde(with = "amount_repr")]
    pub amount: f64,
    #[serde(default)]
    pub notes: String,
    pub initial_feeling_score: u8,
    /// Glasses of water prepared.
    #[serde(default)]
    pub water_prepared: u32,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub with_trusted_companions: Option<bool>,
    #[serde(default)]
    pub supplements_taken: Vec<String>,
    #[serde(default)]
    pub purity_source: Option<String>,
    #[serde(default)]
    pub owner_id: Option<Uuid>,
}

/// Form input for a dose. `id` is assigned by the store when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDose {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
    #[serde(with = "amount_repr")]
    pub amount: f64,
    #[serde(default)]
    pub notes: String,
    pub initial_feeling_score: u8,
    #[serde(default)]
    pub water_prepared: u32,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub with_trusted_companions: Option<bool>,
    #[serde(default)]
    pub supplements_taken: Vec<String>,
    #[serde(default)]
    pub purity_source: Option<String>,
    #[serde(default)]
    pub owner_id: Option<Uuid>,
}

impl NewDose {
    /// Blank form defaults: nothing taken yet, neutral expectation.
    pub fn at(timestamp: DateTime<Utc>, amount: f64) -> Self {
        Self {
            id: None,
            timestamp,
            amount,
            notes: String::new(),
            initial_feeling_score: 3,
            water_prepared: 0,
            location: None,
            with_trusted_companions: None,
            supplements_taken: Vec::new(),
            purity_source: None,
            owner_id: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let amount = require_finite("amount", self.amount)?;
        if amount < 0.0 {
            return Err(ValidationError::BelowMinimum {
                field: "amount",
                value: amount,
                min: 0.0,
            });
        }
        require_score("initialFeelingScore", self.initial_feeling_score)
    }

    pub(crate) fn into_event(self, id: Uuid) -> DoseEvent {
        DoseEvent {
            id,
            timestamp: self.timestamp,
            amount: self.amount,
            notes: self.notes,
            initial_feeling_score: self.initial_feeling_score,
            water_prepared: self.water_prepared,
            location: self.location,
            with_trusted_companions: self.with_trusted_companions,
            supplements_taken: self.supplements_taken,
            purity_source: self.purity_source,
            owner_id: self.owner_id,
        }
    }
}

/// JSON has no NaN or infinity, and serde_json would write them as `null`.
/// They go out as `"NaN"`, `"Infinity"` or `"-Infinity"` instead; a `null`
/// from an older blob reads back as NaN.
mod amount_repr {
    use serde::{de, Deserialize, Deserializer, Serializer};

    const NAN: &str = "NaN";
    const INFINITY: &str = "Infinity";
    const NEG_INFINITY: &str = "-Infinity";

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str(NAN)
        } else if value.is_sign_positive() {
            serializer.serialize_str(INFINITY)
        } else {
            serializer.serialize_str(NEG_INFINITY)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Encoded {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Option::<Encoded>::deserialize(deserializer)? {
            None => Ok(f64::NAN),
            Some(Encoded::Number(value)) => Ok(value),
            Some(Encoded::Text(text)) => match text.as_str() {
                NAN => Ok(f64::NAN),
                INFINITY => Ok(f64::INFINITY),
                NEG_INFINITY => Ok(f64::NEG_INFINITY),
                other => other
                    .parse()
                    .map_err(|_| de::Error::custom(format!("invalid amount '{other}'"))),
            },
        }
    }
}
