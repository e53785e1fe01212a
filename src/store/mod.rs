//! Authoritative collection of doses and check-ins for the local profile.
//!
//! Each collection is persisted as its own JSON array under a fixed key.
//! Loading tolerates missing or corrupt blobs; saving is best-effort and
//! never fails the caller.

mod persistence;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::clock::{Clock, IdGenerator, SystemClock, UuidGenerator};
use crate::errors::ValidationError;
use crate::kv::KeyValueStore;
use crate::models::{CheckInEvent, DoseEvent, NewCheckIn, NewDose};
use crate::phases::{phase_at, EffectPhase};
use crate::{log_info, log_warn};

pub use persistence::{LoadReport, LoadStatus, SaveStatus};

const ENABLE_LOGS: bool = true;

pub const DOSAGES_KEY: &str = "dosages";
pub const CHECK_INS_KEY: &str = "checkIns";

/// Draws from the injected generator before falling back to random v4 ids.
const MAX_ID_ATTEMPTS: usize = 16;

pub struct RecordStore {
    kv: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    dosages: Vec<DoseEvent>,
    check_ins: Vec<CheckInEvent>,
    last_load: LoadReport,
    last_save: SaveStatus,
}

impl RecordStore {
    /// Empty store over `kv`; call [`RecordStore::load`] to pick up saved data.
    pub fn new(
        kv: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        Self {
            kv,
            clock,
            ids,
            dosages: Vec::new(),
            check_ins: Vec::new(),
            last_load: LoadReport::default(),
            last_save: SaveStatus::Saved,
        }
    }

    /// Store with the system clock and random ids, already loaded.
    pub fn open(kv: Box<dyn KeyValueStore>) -> Self {
        let mut store = Self::new(kv, Box::new(SystemClock), Box::new(UuidGenerator));
        store.load();
        store
    }

    pub fn dosages(&self) -> &[DoseEvent] {
        &self.dosages
    }

    pub fn check_ins(&self) -> &[CheckInEvent] {
        &self.check_ins
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn dose(&self, dose_id: Uuid) -> Option<&DoseEvent> {
        self.dosages.iter().find(|dose| dose.id == dose_id)
    }

    /// Append a dose and persist the dose collection. Accepts any value.
    pub fn add_dose(&mut self, dose: NewDose) -> DoseEvent {
        let id = self.fresh_id(dose.id, |store, id| store.dose(id).is_some());
        let event = dose.into_event(id);
        self.dosages.push(event.clone());
        log_info!("recorded dose {} ({} mg)", event.id, event.amount);
        self.save_dosages();
        event
    }

    pub fn try_add_dose(&mut self, dose: NewDose) -> Result<DoseEvent, ValidationError> {
        dose.validate()?;
        Ok(self.add_dose(dose))
    }

    /// Append a check-in as given, phase included, and persist.
    pub fn add_check_in(&mut self, check_in: NewCheckIn) -> CheckInEvent {
        let id = self.fresh_id(check_in.id, |store, id| {
            store.check_ins.iter().any(|existing| existing.id == id)
        });
        let event = check_in.into_event(id);
        if self.dose(event.dose_id).is_none() {
            log_warn!(
                "check-in {} references unknown dose {}",
                event.id,
                event.dose_id
            );
        }
        self.check_ins.push(event.clone());
        log_info!("recorded check-in {} for dose {}", event.id, event.dose_id);
        self.save_check_ins();
        event
    }

    pub fn try_add_check_in(
        &mut self,
        check_in: NewCheckIn,
    ) -> Result<CheckInEvent, ValidationError> {
        check_in.validate()?;
        Ok(self.add_check_in(check_in))
    }

    /// Live check-in: stamped with the current time and the phase that
    /// time falls in relative to the parent dose. The phase is stored as a
    /// snapshot and never recomputed.
    pub fn record_check_in(&mut self, mut draft: NewCheckIn) -> CheckInEvent {
        let now = self.clock.now();
        draft.timestamp = now;
        draft.phase = self
            .phase_at(draft.dose_id, now)
            .map(|phase| phase.label().to_string());
        self.add_check_in(draft)
    }

    /// Phase of `dose_id` at `at`; `None` for unknown doses or outside 24h.
    pub fn phase_at(&self, dose_id: Uuid, at: DateTime<Utc>) -> Option<EffectPhase> {
        self.dose(dose_id).and_then(|dose| phase_at(dose.timestamp, at))
    }

    pub fn current_phase(&self, dose_id: Uuid) -> Option<EffectPhase> {
        self.phase_at(dose_id, self.clock.now())
    }

    /// Check-ins for `dose_id`, oldest first. Unknown ids yield an empty list.
    pub fn check_ins_for_dose(&self, dose_id: Uuid) -> Vec<CheckInEvent> {
        let mut matching: Vec<CheckInEvent> = self
            .check_ins
            .iter()
            .filter(|check_in| check_in.dose_id == dose_id)
            .cloned()
            .collect();
        matching.sort_by_key(|check_in| check_in.timestamp);
        matching
    }

    pub fn has_check_ins(&self, dose_id: Uuid) -> bool {
        self.check_ins
            .iter()
            .any(|check_in| check_in.dose_id == dose_id)
    }

    /// Drop every record and persist the empty collections. No undo.
    pub fn reset_all(&mut self) -> SaveStatus {
        log_warn!(
            "resetting all data ({} dosages, {} check-ins)",
            self.dosages.len(),
            self.check_ins.len()
        );
        self.dosages.clear();
        self.check_ins.clear();
        self.save()
    }

    /// Replace in-memory state with what the backing store holds.
    pub fn load(&mut self) -> LoadReport {
        let (dosages, dosages_status) = persistence::load_collection(&*self.kv, DOSAGES_KEY);
        let (check_ins, check_ins_status) =
            persistence::load_collection(&*self.kv, CHECK_INS_KEY);

        self.dosages = dosages;
        self.check_ins = check_ins;
        self.last_load = LoadReport {
            dosages: dosages_status,
            check_ins: check_ins_status,
        };
        self.last_load.clone()
    }

    pub fn save(&mut self) -> SaveStatus {
        let dosages = persistence::save_collection(&*self.kv, DOSAGES_KEY, &self.dosages);
        let check_ins =
            persistence::save_collection(&*self.kv, CHECK_INS_KEY, &self.check_ins);
        self.last_save = dosages.and(check_ins);
        self.last_save.clone()
    }

    pub fn last_load_report(&self) -> &LoadReport {
        &self.last_load
    }

    /// Outcome of the most recent write, for a save-confirmation indicator.
    pub fn last_save_status(&self) -> &SaveStatus {
        &self.last_save
    }

    fn save_dosages(&mut self) {
        self.last_save = persistence::save_collection(&*self.kv, DOSAGES_KEY, &self.dosages);
    }

    fn save_check_ins(&mut self) {
        self.last_save =
            persistence::save_collection(&*self.kv, CHECK_INS_KEY, &self.check_ins);
    }

    fn fresh_id<F>(&self, requested: Option<Uuid>, taken: F) -> Uuid
    where
        F: Fn(&Self, Uuid) -> bool,
    {
        if let Some(id) = requested {
            if !taken(self, id) {
                return id;
            }
            log_warn!("id {id} already in use; assigning a new one");
        }

        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if !taken(self, id) {
                return id;
            }
        }

        log_warn!("id generator keeps repeating taken ids; using random ids");
        loop {
            let id = Uuid::new_v4();
            if !taken(self, id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::kv::MemoryStore;
    use crate::models::Symptom;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 17, 21, 0, 0).unwrap()
    }

    fn make_store(kv: &MemoryStore, clock: &FixedClock) -> RecordStore {
        let mut store = RecordStore::new(
            Box::new(kv.clone()),
            Box::new(clock.clone()),
            Box::new(UuidGenerator),
        );
        store.load();
        store
    }

    fn make_dose(at: DateTime<Utc>, amount: f64) -> NewDose {
        let mut dose = NewDose::at(at, amount);
        dose.notes = "with friends".into();
        dose.water_prepared = 2;
        dose.supplements_taken = vec!["Magnesium".into()];
        dose
    }

    #[test]
    fn empty_store_round_trips() {
        let kv = MemoryStore::new();
        let clock = FixedClock::new(start());

        let mut store = make_store(&kv, &clock);
        assert_eq!(store.last_load_report().dosages, LoadStatus::Missing);
        assert_eq!(store.save(), SaveStatus::Saved);

        let reloaded = make_store(&kv, &clock);
        assert!(reloaded.dosages().is_empty());
        assert!(reloaded.check_ins().is_empty());
        assert_eq!(reloaded.last_load_report().dosages, LoadStatus::Loaded(0));
    }

    #[test]
    fn doses_reload_in_insertion_order() {
        let kv = MemoryStore::new();
        let clock = FixedClock::new(start());
        let mut store = make_store(&kv, &clock);

        // Entered out of timestamp order on purpose.
        let later = store.add_dose(make_dose(start(), 80.0));
        let earlier = store.add_dose(make_dose(start() - Duration::days(40), 100.0));
        let third = store.add_dose(make_dose(start() - Duration::days(3), 60.0));

        let reloaded = make_store(&kv, &clock);
        assert_eq!(reloaded.dosages(), &[later, earlier, third]);
    }

    #[test]
    fn explicit_id_is_kept_unless_taken() {
        let kv = MemoryStore::new();
        let clock = FixedClock::new(start());
        let mut store = make_store(&kv, &clock);

        let wanted = Uuid::new_v4();
        let mut dose = make_dose(start(), 90.0);
        dose.id = Some(wanted);

        assert_eq!(store.add_dose(dose.clone()).id, wanted);
        let duplicate = store.add_dose(dose);
        assert_ne!(duplicate.id, wanted);
    }

    #[test]
    fn check_ins_come_back_sorted_by_time() {
        let kv = MemoryStore::new();
        let clock = FixedClock::new(start());
        let mut store = make_store(&kv, &clock);
        let dose = store.add_dose(make_dose(start(), 80.0));
        let other = store.add_dose(make_dose(start(), 40.0));

        for minutes in [120, 15, 60] {
            let draft = NewCheckIn::for_dose(dose.id, start() + Duration::minutes(minutes));
            store.add_check_in(draft);
        }
        store.add_check_in(NewCheckIn::for_dose(other.id, start()));

        let times: Vec<DateTime<Utc>> = store
            .check_ins_for_dose(dose.id)
            .iter()
            .map(|check_in| check_in.timestamp)
            .collect();
        assert_eq!(
            times,
            vec![
                start() + Duration::minutes(15),
                start() + Duration::minutes(60),
                start() + Duration::minutes(120),
            ]
        );
        assert!(store.check_ins_for_dose(Uuid::new_v4()).is_empty());
    }

    #[test]
    fn has_check_ins_flips_after_first_check_in() {
        let kv = MemoryStore::new();
        let clock = FixedClock::new(start());
        let mut store = make_store(&kv, &clock);

        let dose = store.add_dose(make_dose(start(), 80.0));
        assert!(!store.has_check_ins(dose.id));

        store.add_check_in(NewCheckIn::for_dose(dose.id, start()));
        assert!(store.has_check_ins(dose.id));
    }

    #[test]
    fn orphaned_check_in_is_accepted() {
        let kv = MemoryStore::new();
        let clock = FixedClock::new(start());
        let mut store = make_store(&kv, &clock);

        let ghost = Uuid::new_v4();
        store.add_check_in(NewCheckIn::for_dose(ghost, start()));

        assert_eq!(store.check_ins_for_dose(ghost).len(), 1);
        assert_eq!(store.phase_at(ghost, start()), None);
    }

    #[test]
    fn live_check_in_snapshots_current_phase() {
        let kv = MemoryStore::new();
        let clock = FixedClock::new(start());
        let mut store = make_store(&kv, &clock);
        let dose = store.add_dose(make_dose(start(), 80.0));

        clock.advance(Duration::minutes(90));
        let mut draft = NewCheckIn::for_dose(dose.id, start());
        draft.toggle_symptom(Symptom::Euphoria);
        let peak = store.record_check_in(draft);

        assert_eq!(peak.phase.as_deref(), Some("Peak"));
        assert_eq!(peak.timestamp, start() + Duration::minutes(90));

        clock.advance(Duration::hours(30));
        assert_eq!(store.current_phase(dose.id), None);
        let late = store.record_check_in(NewCheckIn::for_dose(dose.id, start()));
        assert_eq!(late.phase, None);

        // Stored snapshot is untouched by later clock movement.
        assert_eq!(store.check_ins_for_dose(dose.id)[0].phase.as_deref(), Some("Peak"));
    }

    #[test]
    fn reset_clears_and_persists_both_collections() {
        let kv = MemoryStore::new();
        let clock = FixedClock::new(start());
        let mut store = make_store(&kv, &clock);
        let dose = store.add_dose(make_dose(start(), 80.0));
        store.add_check_in(NewCheckIn::for_dose(dose.id, start()));

        assert_eq!(store.reset_all(), SaveStatus::Saved);
        assert!(store.dosages().is_empty());

        let reloaded = make_store(&kv, &clock);
        assert!(reloaded.dosages().is_empty());
        assert!(reloaded.check_ins().is_empty());
    }

    #[test]
    fn corrupt_blob_loads_as_empty_and_is_reported() {
        let kv = MemoryStore::new();
        kv.insert_raw(DOSAGES_KEY, b"{not json");
        let clock = FixedClock::new(start());

        let store = make_store(&kv, &clock);
        assert!(store.dosages().is_empty());
        assert!(matches!(store.last_load_report().dosages, LoadStatus::Corrupt(_)));
        assert!(store.last_load_report().has_problems());
        assert_eq!(store.last_load_report().check_ins, LoadStatus::Missing);
    }

    #[test]
    fn failed_write_is_retried_once_and_reported() {
        let kv = MemoryStore::new();
        let clock = FixedClock::new(start());
        let mut store = make_store(&kv, &clock);

        kv.fail_writes(true);
        let dose = store.add_dose(make_dose(start(), 80.0));

        assert_eq!(store.dosages(), &[dose]);
        assert_eq!(kv.write_attempts(), 2);
        assert!(matches!(store.last_save_status(), SaveStatus::Failed(_)));

        kv.fail_writes(false);
        store.add_dose(make_dose(start(), 40.0));
        assert_eq!(store.last_save_status(), &SaveStatus::Saved);
        assert_eq!(make_store(&kv, &clock).dosages().len(), 2);
    }

    #[test]
    fn validating_adds_reject_bad_input() {
        let kv = MemoryStore::new();
        let clock = FixedClock::new(start());
        let mut store = make_store(&kv, &clock);

        let err = store.try_add_dose(make_dose(start(), -1.0)).unwrap_err();
        assert_eq!(err.field(), "amount");
        assert!(store.dosages().is_empty());

        let mut draft = NewCheckIn::for_dose(Uuid::new_v4(), start());
        draft.feeling_score = 0;
        assert!(store.try_add_check_in(draft).is_err());
        assert!(store.check_ins().is_empty());

        let mut draft = NewCheckIn::for_dose(Uuid::new_v4(), start());
        draft.phase = Some("Afterglow".into());
        assert_eq!(store.try_add_check_in(draft).unwrap_err().field(), "phase");
        assert!(store.check_ins().is_empty());
    }

    #[test]
    fn nan_dose_does_not_wipe_earlier_doses() {
        let kv = MemoryStore::new();
        let clock = FixedClock::new(start());
        let mut store = make_store(&kv, &clock);

        let valid = store.add_dose(make_dose(start(), 80.0));
        store.add_dose(make_dose(start() + Duration::hours(1), f64::NAN));
        store.add_dose(make_dose(start() + Duration::hours(2), f64::INFINITY));
        assert_eq!(store.last_save_status(), &SaveStatus::Saved);

        let reloaded = make_store(&kv, &clock);
        assert_eq!(reloaded.last_load_report().dosages, LoadStatus::Loaded(3));
        assert_eq!(reloaded.dosages()[0], valid);
        assert!(reloaded.dosages()[1].amount.is_nan());
        assert_eq!(reloaded.dosages()[2].amount, f64::INFINITY);
    }

    struct RepeatingIds(Uuid);

    impl IdGenerator for RepeatingIds {
        fn next_id(&self) -> Uuid {
            self.0
        }
    }

    #[test]
    fn repeating_id_generator_still_yields_unique_ids() {
        let kv = MemoryStore::new();
        let clock = FixedClock::new(start());
        let stuck = Uuid::new_v4();
        let mut store = RecordStore::new(
            Box::new(kv.clone()),
            Box::new(clock.clone()),
            Box::new(RepeatingIds(stuck)),
        );

        let first = store.add_dose(make_dose(start(), 80.0));
        let second = store.add_dose(make_dose(start(), 40.0));

        assert_eq!(first.id, stuck);
        assert_ne!(second.id, stuck);
        assert_eq!(store.dosages().len(), 2);
    }
}
