//! Named effect phases over the first 24 hours after a dose.
//!
//! The intervals are closed and share their boundary minutes; a boundary
//! belongs to the earlier phase because classification scans in order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectPhase {
    #[serde(rename = "Onset")]
    Onset,
    #[serde(rename = "Come-up")]
    ComeUp,
    #[serde(rename = "Peak")]
    Peak,
    #[serde(rename = "Plateau")]
    Plateau,
    #[serde(rename = "Come-down")]
    ComeDown,
    #[serde(rename = "After-effects")]
    AfterEffects,
}

impl EffectPhase {
    /// Declaration order doubles as scan order.
    pub const ALL: [EffectPhase; 6] = [
        EffectPhase::Onset,
        EffectPhase::ComeUp,
        EffectPhase::Peak,
        EffectPhase::Plateau,
        EffectPhase::ComeDown,
        EffectPhase::AfterEffects,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EffectPhase::Onset => "Onset",
            EffectPhase::ComeUp => "Come-up",
            EffectPhase::Peak => "Peak",
            EffectPhase::Plateau => "Plateau",
            EffectPhase::ComeDown => "Come-down",
            EffectPhase::AfterEffects => "After-effects",
        }
    }

    pub fn from_label(label: &str) -> Option<EffectPhase> {
        EffectPhase::ALL
            .iter()
            .copied()
            .find(|phase| phase.label() == label)
    }

    /// Closed minute range `(start, end)` since the dose.
    pub fn minute_range(&self) -> (i64, i64) {
        match self {
            EffectPhase::Onset => (0, 30),
            EffectPhase::ComeUp => (30, 60),
            EffectPhase::Peak => (60, 150),
            EffectPhase::Plateau => (150, 240),
            EffectPhase::ComeDown => (240, 360),
            EffectPhase::AfterEffects => (360, 1440),
        }
    }

    pub fn contains(&self, minutes: i64) -> bool {
        let (start, end) = self.minute_range();
        minutes >= start && minutes <= end
    }

    pub fn description(&self) -> &'static str {
        match self {
            EffectPhase::Onset => "Initial absorption",
            EffectPhase::ComeUp => "Effects begin",
            EffectPhase::Peak => "Maximum effects",
            EffectPhase::Plateau => "Sustained effects",
            EffectPhase::ComeDown => "Reducing effects",
            EffectPhase::AfterEffects => "Recovery beginning",
        }
    }

    pub fn detail(&self) -> &'static str {
        match self {
            EffectPhase::Onset => "Initial effects begin. You may feel slightly alert, anticipatory, and notice subtle body changes.",
            EffectPhase::ComeUp => "Effects intensify. Energy increases, mood enhances, possible rushes of euphoria with occasional anxiety.",
            EffectPhase::Peak => "Maximum effects. Strong euphoria, empathy, heightened senses, enhanced touch and music appreciation, desire to connect with others.",
            EffectPhase::Plateau => "Effects stabilize at a high level. Continued euphoria but slightly less intense than peak, sustained energy and sociability.",
            EffectPhase::ComeDown => "Effects gradually decrease. Energy reducing, still pleasant but less intense, becoming more introspective.",
            EffectPhase::AfterEffects => "Primary effects mostly gone. Fatigue, possible mood fluctuations, reflective mental state, rest needed.",
        }
    }

    pub fn typical_duration(&self) -> &'static str {
        match self {
            EffectPhase::Onset => "0-30 minutes after consumption",
            EffectPhase::ComeUp => "30-60 minutes after consumption",
            EffectPhase::Peak => "1-2.5 hours after consumption",
            EffectPhase::Plateau => "2.5-4 hours after consumption",
            EffectPhase::ComeDown => "4-6 hours after consumption",
            EffectPhase::AfterEffects => "6-24 hours after consumption",
        }
    }

    /// Minute used when previewing the phase without a real dose.
    pub fn representative_minute(&self) -> i64 {
        match self {
            EffectPhase::Onset => 15,
            EffectPhase::ComeUp => 45,
            EffectPhase::Peak => 90,
            EffectPhase::Plateau => 180,
            EffectPhase::ComeDown => 300,
            EffectPhase::AfterEffects => 600,
        }
    }

    pub fn feelings(&self) -> &'static [&'static str] {
        match self {
            EffectPhase::Onset => &["Anticipation", "Subtle changes", "Alertness"],
            EffectPhase::ComeUp => &["Energy", "Enhanced mood", "Excitement", "Possible anxiety"],
            EffectPhase::Peak => &["Euphoria", "Empathy", "Enhanced senses", "Sociability"],
            EffectPhase::Plateau => &["Continued euphoria", "Reduced intensity", "Energy"],
            EffectPhase::ComeDown => &["Gentle decline", "Less energy", "Relaxation"],
            EffectPhase::AfterEffects => &["Fatigue", "Reflective", "Rest needed"],
        }
    }

    // Display hints, consumed only by the presentation shell.
    pub fn color_hint(&self) -> &'static str {
        match self {
            EffectPhase::Onset => "blue",
            EffectPhase::ComeUp => "purple",
            EffectPhase::Peak => "pink",
            EffectPhase::Plateau => "orange",
            EffectPhase::ComeDown => "yellow",
            EffectPhase::AfterEffects => "gray",
        }
    }

    pub fn icon_hint(&self) -> &'static str {
        match self {
            EffectPhase::Onset => "timer",
            EffectPhase::ComeUp => "arrow.up.circle.fill",
            EffectPhase::Peak => "sparkles",
            EffectPhase::Plateau => "waveform.path.ecg",
            EffectPhase::ComeDown => "arrow.down.circle.fill",
            EffectPhase::AfterEffects => "bed.double.fill",
        }
    }
}

/// Phase for `minutes` since the dose; `None` past 24 hours or before the dose.
pub fn classify_phase(minutes: i64) -> Option<EffectPhase> {
    EffectPhase::ALL
        .iter()
        .copied()
        .find(|phase| phase.contains(minutes))
}

/// Whole minutes from `dose_time` to `now`, rounded down. Any dose in the
/// future, even by a second, gives a negative value.
pub fn minutes_since(dose_time: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - dose_time).num_seconds().div_euclid(60)
}

pub fn phase_at(dose_time: DateTime<Utc>, now: DateTime<Utc>) -> Option<EffectPhase> {
    classify_phase(minutes_since(dose_time, now))
}
