//! Static harm-reduction reference content shown alongside the tracker.

use serde::Serialize;

/// Recommended wait between uses, in days.
pub const RECOMMENDED_DAYS_BETWEEN_USES: i64 = crate::phases::FULL_RECOVERY_DAYS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyResource {
    pub name: &'static str,
    pub contact: &'static str,
    /// False for text-only lines.
    pub dialable: bool,
}

impl EmergencyResource {
    pub fn dial_uri(&self) -> Option<String> {
        if !self.dialable {
            return None;
        }
        let digits: String = self.contact.chars().filter(|c| c.is_ascii_digit()).collect();
        Some(format!("tel:{digits}"))
    }
}

pub const EMERGENCY_RESOURCES: &[EmergencyResource] = &[
    EmergencyResource {
        name: "Emergency Services",
        contact: "911",
        dialable: true,
    },
    EmergencyResource {
        name: "Poison Control",
        contact: "1-800-222-1222",
        dialable: true,
    },
    EmergencyResource {
        name: "SAMHSA Helpline",
        contact: "1-800-662-4357",
        dialable: true,
    },
    EmergencyResource {
        name: "Crisis Text Line",
        contact: "Text HOME to 741741",
        dialable: false,
    },
];

pub const WARNING_SIGNS: &[&str] = &[
    "High fever or overheating",
    "Severe headache or dizziness",
    "Irregular heartbeat",
    "Difficulty breathing",
    "Excessive sweating or chills",
    "Confusion or disorientation",
];

pub const SAFE_USE_GUIDELINES: &[&str] = &[
    "Wait at least 3 months between uses",
    "Start with lower doses",
    "Stay hydrated but don't overhydrate",
    "Take breaks when dancing",
    "Be aware of drug interactions",
    "Test your substances",
];

pub const HEALTH_TIPS: &[&str] = &[
    "Stay hydrated but don't overhydrate",
    "Monitor your body temperature",
    "Ensure you get enough rest",
];
