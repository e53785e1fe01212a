pub mod effect;
pub mod recovery;

pub use effect::{classify_phase, minutes_since, phase_at, EffectPhase};
pub use recovery::{
    classify_recovery_stage, days_since, recovery_progress, RecoveryStage, FULL_RECOVERY_DAYS,
};
