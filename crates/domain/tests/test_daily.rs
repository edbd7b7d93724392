use anyhow::Result;
use common::Notifier;
use domain::{keys, BiomarkerSample, DailyLog, DailyPlan, DailyTask, SleepLog};
use storage::LocalStore;

#[test]
fn sleep_upsert_replaces_same_date_entry() -> Result<()> {
    let store = LocalStore::open_in_memory()?;
    let mut notifier = Notifier::new();
    let mut log: DailyLog<SleepLog> = DailyLog::new(keys::SLEEP_LOGS);
    log.load(&store, &mut notifier);

    log.upsert(
        &store,
        &mut notifier,
        SleepLog {
            date: "2026-08-28".into(),
            hours: 6.5,
            quality: 2,
            notes: String::new(),
        },
    );
    log.upsert(
        &store,
        &mut notifier,
        SleepLog {
            date: "2026-08-28".into(),
            hours: 8.0,
            quality: 4,
            notes: "melhor noite".into(),
        },
    );

    assert_eq!(log.entries().len(), 1);
    assert_eq!(log.entries()[0].hours, 8.0);
    assert_eq!(log.entries()[0].quality_label(), "Excelente");

    let stored: Vec<SleepLog> = store.load(keys::SLEEP_LOGS)?.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].hours, 8.0);
    Ok(())
}

#[test]
fn entries_stay_sorted_by_date_ascending() -> Result<()> {
    let store = LocalStore::open_in_memory()?;
    let mut notifier = Notifier::new();
    let mut log: DailyLog<SleepLog> = DailyLog::new(keys::SLEEP_LOGS);
    log.load(&store, &mut notifier);

    for date in ["2026-08-20", "2026-08-10", "2026-08-15"] {
        log.upsert(
            &store,
            &mut notifier,
            SleepLog {
                date: date.into(),
                hours: 7.0,
                quality: 3,
                notes: String::new(),
            },
        );
    }

    let dates: Vec<&str> = log.entries().iter().map(|e| e.date.as_str()).collect();
    assert_eq!(dates, ["2026-08-10", "2026-08-15", "2026-08-20"]);
    assert_eq!(log.latest().unwrap().date, "2026-08-20");
    Ok(())
}

#[test]
fn biomarker_samples_keep_partial_fields() -> Result<()> {
    let store = LocalStore::open_in_memory()?;
    let mut notifier = Notifier::new();
    let mut log: DailyLog<BiomarkerSample> = DailyLog::new(keys::BIOMARKERS);
    log.load(&store, &mut notifier);

    log.upsert(
        &store,
        &mut notifier,
        BiomarkerSample {
            date: "2026-08-01".into(),
            vo2max: Some(42.0),
            grip_strength: None,
            resting_hr: Some(58),
        },
    );

    let mut reloaded: DailyLog<BiomarkerSample> = DailyLog::new(keys::BIOMARKERS);
    reloaded.load(&store, &mut notifier);
    let sample = reloaded.latest().unwrap();
    assert_eq!(sample.vo2max, Some(42.0));
    assert_eq!(sample.grip_strength, None);
    assert_eq!(sample.resting_hr, Some(58));
    Ok(())
}

#[test]
fn daily_plan_is_scoped_per_date() -> Result<()> {
    let store = LocalStore::open_in_memory()?;

    let mut plan = DailyPlan::default();
    let mut task = DailyTask::new("Revisar finanças");
    task.id = "1".into();
    task.mit = true;
    task.completed = true;
    plan.tasks.push(task);
    let mut second = DailyTask::new("Caminhar");
    second.id = "2".into();
    plan.tasks.push(second);
    plan.reflection = "dia produtivo".into();

    store.save(&keys::daily_plan("2026-08-28"), &plan)?;
    store.save(keys::DAILY_PLAN_LAST_DATE, &"2026-08-28".to_string())?;

    assert_eq!(store.load::<DailyPlan>(&keys::daily_plan("2026-08-29"))?, None);
    let loaded: DailyPlan = store.load(&keys::daily_plan("2026-08-28"))?.unwrap();
    assert_eq!(loaded.progress_percent(), 50);
    assert_eq!(loaded.mit_count(), 1);
    assert_eq!(
        store.load::<String>(keys::DAILY_PLAN_LAST_DATE)?.as_deref(),
        Some("2026-08-28")
    );
    Ok(())
}
