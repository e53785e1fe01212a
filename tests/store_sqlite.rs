use chrono::{Duration, TimeZone, Utc};
use mollycounter_lib::{
    monthly_usage_counts, recovery_status, AppConfig, AppState, Clock, Database, FixedClock,
    KeyValueStore, LoadStatus, NewCheckIn, NewDose, RecordStore, RecoveryStage, Symptom,
    UuidGenerator, CHECK_INS_KEY, DOSAGES_KEY,
};

fn make_store(db: &Database, clock: &FixedClock) -> RecordStore {
    let mut store = RecordStore::new(
        Box::new(db.clone()),
        Box::new(clock.clone()),
        Box::new(UuidGenerator),
    );
    store.load();
    store
}

#[test]
fn records_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mollycounter.sqlite3");
    let start = Utc.with_ymd_and_hms(2025, 7, 12, 22, 0, 0).unwrap();
    let clock = FixedClock::new(start);

    let (dose_ids, check_in_id) = {
        let db = Database::new(path.clone()).unwrap();
        let mut store = make_store(&db, &clock);

        let mut first = NewDose::at(start, 90.0);
        first.location = Some("Festival".into());
        first.with_trusted_companions = Some(true);
        first.purity_source = Some("Reagent tested".into());
        let first = store.add_dose(first);
        let second = store.add_dose(NewDose::at(start - Duration::days(120), 75.0));

        clock.advance(Duration::minutes(45));
        let mut draft = NewCheckIn::for_dose(first.id, start);
        draft.toggle_symptom(Symptom::JawClenching);
        draft.water_consumed_since_last = 1;
        let check_in = store.record_check_in(draft);
        assert_eq!(check_in.phase.as_deref(), Some("Come-up"));

        (vec![first.id, second.id], check_in.id)
    };

    let db = Database::new(path).unwrap();
    let store = make_store(&db, &clock);

    let ids: Vec<_> = store.dosages().iter().map(|dose| dose.id).collect();
    assert_eq!(ids, dose_ids);
    assert_eq!(store.dosages()[0].location.as_deref(), Some("Festival"));
    assert_eq!(store.last_load_report().dosages, LoadStatus::Loaded(2));

    let check_ins = store.check_ins_for_dose(dose_ids[0]);
    assert_eq!(check_ins.len(), 1);
    assert_eq!(check_ins[0].id, check_in_id);
    assert_eq!(check_ins[0].symptoms, vec!["Jaw clenching".to_string()]);
    assert!(!store.has_check_ins(dose_ids[1]));
}

#[test]
fn blobs_are_json_arrays_under_fixed_keys() {
    let db = Database::open_in_memory().unwrap();
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 5, 20, 0, 0).unwrap());
    let mut store = make_store(&db, &clock);

    let dose = store.add_dose(NewDose::at(clock.now(), 100.0));
    store.add_check_in(NewCheckIn::for_dose(dose.id, clock.now()));

    let dosages: serde_json::Value =
        serde_json::from_slice(&db.get(DOSAGES_KEY).unwrap().unwrap()).unwrap();
    let first = &dosages.as_array().unwrap()[0];
    assert_eq!(first["amount"], 100.0);
    assert_eq!(first["initialFeelingScore"], 3);

    let check_ins: serde_json::Value =
        serde_json::from_slice(&db.get(CHECK_INS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(check_ins[0]["doseId"], dose.id.to_string());
}

#[test]
fn app_state_wires_store_and_dashboard() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::from_data_dir(dir.path().join("profile"));

    let now = Utc::now();
    {
        let app = AppState::open(config.clone()).unwrap();
        app.store().add_dose(NewDose::at(now - Duration::days(10), 80.0));
    }

    let app = AppState::open(config).unwrap();
    let store = app.store();
    assert_eq!(store.dosages().len(), 1);

    let status = recovery_status(store.dosages(), now);
    assert_eq!(status.stage, RecoveryStage::Mid);
    assert!(!status.complete);

    let counts = monthly_usage_counts(store.dosages(), &now);
    assert_eq!(counts.len(), 6);
    assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), 1);
}
