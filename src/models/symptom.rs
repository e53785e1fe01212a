//! Symptom catalog offered on the check-in form, with per-symptom advice.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Symptom {
    JawClenching,
    EyeWiggles,
    IncreasedEnergy,
    Euphoria,
    EnhancedTouch,
    Sweating,
    Thirst,
    IncreasedHeartrate,
    Anxiety,
    EnhancedMusic,
    Talkativeness,
    Empathy,
    BodyWarmth,
    HeightenedSenses,
    LoveFeelings,
    LightSensitivity,
    BlurryVision,
    Dizziness,
    Headache,
    Nausea,
    ColdExtremities,
}

/// Explanation, coping steps and escalation guidance for one symptom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomAdvice {
    pub whats_happening: &'static str,
    pub how_to_manage: &'static [&'static str],
    pub when_to_seek_help: &'static str,
}

impl Symptom {
    pub const ALL: [Symptom; 21] = [
        Symptom::JawClenching,
        Symptom::EyeWiggles,
        Symptom::IncreasedEnergy,
        Symptom::Euphoria,
        Symptom::EnhancedTouch,
        Symptom::Sweating,
        Symptom::Thirst,
        Symptom::IncreasedHeartrate,
        Symptom::Anxiety,
        Symptom::EnhancedMusic,
        Symptom::Talkativeness,
        Symptom::Empathy,
        Symptom::BodyWarmth,
        Symptom::HeightenedSenses,
        Symptom::LoveFeelings,
        Symptom::LightSensitivity,
        Symptom::BlurryVision,
        Symptom::Dizziness,
        Symptom::Headache,
        Symptom::Nausea,
        Symptom::ColdExtremities,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Symptom::JawClenching => "Jaw clenching",
            Symptom::EyeWiggles => "Eye wiggles",
            Symptom::IncreasedEnergy => "Increased energy",
            Symptom::Euphoria => "Euphoria",
            Symptom::EnhancedTouch => "Enhanced touch",
            Symptom::Sweating => "Sweating",
            Symptom::Thirst => "Thirst",
            Symptom::IncreasedHeartrate => "Increased heartrate",
            Symptom::Anxiety => "Anxiety",
            Symptom::EnhancedMusic => "Enhanced music",
            Symptom::Talkativeness => "Talkativeness",
            Symptom::Empathy => "Empathy",
            Symptom::BodyWarmth => "Body warmth",
            Symptom::HeightenedSenses => "Heightened senses",
            Symptom::LoveFeelings => "Love feelings",
            Symptom::LightSensitivity => "Light sensitivity",
            Symptom::BlurryVision => "Blurry vision",
            Symptom::Dizziness => "Dizziness",
            Symptom::Headache => "Headache",
            Symptom::Nausea => "Nausea",
            Symptom::ColdExtremities => "Cold extremities",
        }
    }

    pub fn from_label(label: &str) -> Option<Symptom> {
        let trimmed = label.trim();
        Symptom::ALL
            .iter()
            .copied()
            .find(|symptom| symptom.label().eq_ignore_ascii_case(trimmed))
    }

    /// Catalog in the order the form lists it (alphabetical by label).
    pub fn catalog() -> Vec<Symptom> {
        let mut all = Symptom::ALL.to_vec();
        all.sort_by_key(|symptom| symptom.label());
        all
    }

    pub fn advice(&self) -> SymptomAdvice {
        match self {
            Symptom::JawClenching => SymptomAdvice {
                whats_happening: "Jaw clenching (bruxism) comes from central nervous system stimulation; serotonin activates the jaw muscles.",
                how_to_manage: &[
                    "Chew gum, not too vigorously",
                    "Gently massage the jaw muscles",
                    "Apply a warm compress to the jaw",
                    "Check in regularly and consciously relax your jaw",
                ],
                when_to_seek_help: "Extreme pain, inability to open or close your mouth, or jaw pain lasting into the next day.",
            },
            Symptom::EyeWiggles => SymptomAdvice {
                whats_happening: "Eye wiggles (nystagmus) come from serotonin acting on the brain regions that control eye movement.",
                how_to_manage: &[
                    "Remember it is normal and temporary",
                    "Avoid detailed visual tasks",
                    "Rest in a dimly lit area and close your eyes periodically",
                ],
                when_to_seek_help: "Severe discomfort, extreme vision changes, persistent headaches or complete inability to focus.",
            },
            Symptom::IncreasedEnergy => SymptomAdvice {
                whats_happening: "Released serotonin, dopamine and norepinephrine produce stimulant-like energy.",
                how_to_manage: &[
                    "Dance mindfully and take regular breaks",
                    "Stay in cool environments",
                    "Find a quiet space if the energy feels overwhelming",
                ],
                when_to_seek_help: "Chest pain, extreme shortness of breath, inability to cool down, or confusion.",
            },
            Symptom::Euphoria => SymptomAdvice {
                whats_happening: "A flood of serotonin and dopamine drives intense feelings of pleasure and well-being.",
                how_to_manage: &[
                    "Stay with trusted friends",
                    "Remember the feeling is temporary and chemically induced",
                    "Take moments to appreciate your surroundings",
                ],
                when_to_seek_help: "Extreme disorientation, difficulty breathing, severe panic, or thoughts of harming yourself or others.",
            },
            Symptom::EnhancedTouch => SymptomAdvice {
                whats_happening: "Serotonin release heightens tactile processing, making touch more pleasurable.",
                how_to_manage: &[
                    "Keep soft items such as blankets nearby",
                    "Respect other people's boundaries; consent is essential",
                    "Explore different textures mindfully",
                ],
                when_to_seek_help: "Sensation turning painful, or a rash or hives that may indicate an allergic reaction.",
            },
            Symptom::Sweating => SymptomAdvice {
                whats_happening: "Disrupted temperature regulation raises body temperature and the body sweats to cool down.",
                how_to_manage: &[
                    "Stay hydrated, but do not overhydrate",
                    "Wear light, breathable clothing",
                    "Take breaks in cooler areas",
                ],
                when_to_seek_help: "Extreme sweating with high temperature or confusion, or feeling very hot after sweating stops.",
            },
            Symptom::Thirst => SymptomAdvice {
                whats_happening: "Sweating and activity dehydrate you while natural thirst regulation is impaired.",
                how_to_manage: &[
                    "Drink no more than one cup of water per hour",
                    "Avoid alcohol",
                    "Prefer drinks with electrolytes",
                    "Sip rather than gulp",
                ],
                when_to_seek_help: "Extreme thirst that drinking does not help, confusion, very little urination, or extreme fatigue.",
            },
            Symptom::IncreasedHeartrate => SymptomAdvice {
                whats_happening: "Norepinephrine release activates the sympathetic nervous system, raising heart rate and blood pressure.",
                how_to_manage: &[
                    "Sit or lie down somewhere quiet",
                    "Breathe slowly and deeply",
                    "Avoid other stimulants such as caffeine",
                ],
                when_to_seek_help: "A very rapid or irregular heartbeat, chest pain, shortness of breath, or fainting.",
            },
            Symptom::Anxiety => SymptomAdvice {
                whats_happening: "Rapid neurotransmitter shifts during come-up or come-down can trigger anxiety.",
                how_to_manage: &[
                    "Find a quiet space away from stimulation",
                    "Talk to a trusted friend",
                    "Ground yourself by naming things you can see, touch and hear",
                ],
                when_to_seek_help: "Overwhelming panic, difficulty breathing, chest pain, or thoughts of harming yourself or others.",
            },
            Symptom::EnhancedMusic => SymptomAdvice {
                whats_happening: "Auditory and emotional processing are amplified, making music feel more intense.",
                how_to_manage: &[
                    "Prepare playlists in advance",
                    "Let yourself move naturally to the rhythm",
                ],
                when_to_seek_help: "Sound becoming overwhelming, extreme distress, or painful sensitivity to noise.",
            },
            Symptom::Talkativeness => SymptomAdvice {
                whats_happening: "Serotonin and oxytocin release lower social anxiety and drive the urge to connect.",
                how_to_manage: &[
                    "Be mindful of oversharing",
                    "Take breaks to hydrate",
                    "Listen as well as talk",
                ],
                when_to_seek_help: "Extreme dry mouth that hydration does not help, difficulty speaking, or vocal pain.",
            },
            Symptom::Empathy => SymptomAdvice {
                whats_happening: "Oxytocin and serotonin activity heighten emotional connection to others.",
                how_to_manage: &[
                    "Remember emotions are heightened",
                    "Respect other people's emotional boundaries",
                    "Journal insights for later reflection",
                ],
                when_to_seek_help: "Emotions becoming overwhelming, severe distress, or thoughts of harming yourself or others.",
            },
            Symptom::BodyWarmth => SymptomAdvice {
                whats_happening: "Altered thermoregulation and increased blood flow to the skin produce warmth.",
                how_to_manage: &[
                    "Dress in removable layers",
                    "Take breaks from dancing",
                    "Splash cool water on your wrists and neck",
                ],
                when_to_seek_help: "Warmth turning into extreme heat, confusion, racing heartbeat, or hot skin without sweating.",
            },
            Symptom::HeightenedSenses => SymptomAdvice {
                whats_happening: "Sensory processing regions become more active; colors, sounds and textures intensify.",
                how_to_manage: &[
                    "Keep your sensory environment comfortable",
                    "Close your eyes if visuals become too much",
                    "Take breaks somewhere quieter and dimmer",
                ],
                when_to_seek_help: "Sensory input becoming distressing or painful, or hallucinations that frighten you.",
            },
            Symptom::LoveFeelings => SymptomAdvice {
                whats_happening: "Oxytocin and serotonin drive strong feelings of bonding and trust.",
                how_to_manage: &[
                    "Share the openness with trusted people",
                    "Remember the feelings are amplified by the substance",
                ],
                when_to_seek_help: "Emotional states that feel unmanageable or lead to unsafe decisions.",
            },
            Symptom::LightSensitivity => SymptomAdvice {
                whats_happening: "Dilated pupils let in more light while visual processing is heightened.",
                how_to_manage: &[
                    "Wear sunglasses, even indoors",
                    "Avoid looking at strobing lights",
                    "Rest your eyes in dim areas",
                ],
                when_to_seek_help: "Eye pain, severe headache with light sensitivity, or sudden vision loss.",
            },
            Symptom::BlurryVision => SymptomAdvice {
                whats_happening: "Pupil dilation and altered eye muscle coordination blur vision temporarily.",
                how_to_manage: &[
                    "Avoid tasks needing visual precision",
                    "Sit down if it affects your balance",
                    "Have a friend help you navigate",
                ],
                when_to_seek_help: "Vision loss, double vision that does not resolve, or blurriness with severe headache.",
            },
            Symptom::Dizziness => SymptomAdvice {
                whats_happening: "Blood pressure changes and vestibular effects can make you dizzy.",
                how_to_manage: &[
                    "Sit or lie down",
                    "Avoid sudden position changes",
                    "Find a quiet space away from crowds",
                ],
                when_to_seek_help: "Fainting, inability to stand, or dizziness with chest pain or confusion.",
            },
            Symptom::Headache => SymptomAdvice {
                whats_happening: "Blood vessel changes, dehydration and jaw tension can cause headaches, often during come-down.",
                how_to_manage: &[
                    "Rest somewhere quiet and dim",
                    "Sip water",
                    "Apply a cool compress to your forehead or neck",
                ],
                when_to_seek_help: "A sudden severe headache, headache with confusion or stiff neck, or one that keeps worsening.",
            },
            Symptom::Nausea => SymptomAdvice {
                whats_happening: "Serotonin acts on the digestive system and the brain's nausea trigger zone.",
                how_to_manage: &[
                    "Sit comfortably and breathe slowly",
                    "Try ginger candies or tea",
                    "Take small sips of water",
                ],
                when_to_seek_help: "Repeated vomiting, inability to keep fluids down, or vomiting with confusion.",
            },
            Symptom::ColdExtremities => SymptomAdvice {
                whats_happening: "Blood vessels in the hands and feet constrict as blood is directed to core organs.",
                how_to_manage: &[
                    "Wear warm socks and gloves",
                    "Move your arms and legs to improve circulation",
                    "Have a warm drink",
                ],
                when_to_seek_help: "Fingers or toes turning white or blue, numbness, or pain that does not ease with warmth.",
            },
        }
    }
}

/// Advice shown for labels outside the catalog.
pub const GENERAL_ADVICE: SymptomAdvice = SymptomAdvice {
    whats_happening: "Effects vary from person to person and come from shifts in serotonin, dopamine and norepinephrine.",
    how_to_manage: &[
        "Stay with trusted friends",
        "Take breaks in quieter spaces",
        "Stay hydrated but do not overhydrate (about 500ml water per hour)",
        "Remember effects are temporary",
    ],
    when_to_seek_help: "Any symptom that becomes severe, frightening or keeps worsening.",
};

pub fn advice_for_label(label: &str) -> SymptomAdvice {
    Symptom::from_label(label)
        .map(|symptom| symptom.advice())
        .unwrap_or(GENERAL_ADVICE)
}
