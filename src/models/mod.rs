pub mod check_in;
pub mod dose;
pub mod symptom;

pub use check_in::{CheckInEvent, NewCheckIn, OVERHYDRATION_GLASSES};
pub use dose::{DoseEvent, NewDose};
pub use symptom::{advice_for_label, Symptom, SymptomAdvice};
