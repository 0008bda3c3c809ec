mod common;

use std::{cell::RefCell, rc::Rc};

use common::{create_test_provider, daily_habit, reopen, run_habit, MONDAY, TUESDAY, WEDNESDAY};
use habit_core::{
    models::{Color, Schedule, Tracker, WeekDay},
    CategoryStore, Database, RecordStore, StoreChange, TrackerError, TrackerStore,
};
use tempfile::NamedTempFile;

#[test]
fn test_database_initialization() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let _db = Database::new(temp_file.path()).expect("Failed to create test database");
    assert!(temp_file.path().exists());
}

#[test]
fn test_categories_listed_by_title() {
    let (_temp_dir, provider) = create_test_provider();
    let store = provider.categories();

    for title in ["Work", "Chores", "Health"] {
        store.add(title).expect("Failed to add category");
    }

    let titles: Vec<_> = store
        .list()
        .expect("Failed to list categories")
        .into_iter()
        .map(|c| c.title)
        .collect();
    assert_eq!(titles, ["Chores", "Health", "Work"]);
}

#[test]
fn test_duplicate_title_rejected() {
    let (_temp_dir, provider) = create_test_provider();
    let store = provider.categories();
    store.add("Health").expect("Failed to add category");

    let result = store.add("  Health ");
    assert!(matches!(result, Err(TrackerError::Validation { .. })));
    assert_eq!(store.list().expect("Failed to list").len(), 1);
}

#[test]
fn test_rename_keeps_trackers() {
    let (_temp_dir, provider) = create_test_provider();
    let health = provider.categories().add("Health").expect("add");
    let run = run_habit();
    provider.trackers().add(&run, &health).expect("add tracker");

    let renamed = provider
        .categories()
        .rename(&health, "Fitness")
        .expect("Failed to rename");
    assert_eq!(renamed.title, "Fitness");
    assert_eq!(renamed.trackers.len(), 1);
    assert_eq!(renamed.trackers[0].id, run.id);

    assert!(provider.categories().get("Health").expect("get").is_none());
    let category = provider
        .trackers()
        .category_of(run.id)
        .expect("lookup")
        .expect("tracker should have a category");
    assert_eq!(category.title, "Fitness");
}

#[test]
fn test_rename_missing_category() {
    let (_temp_dir, provider) = create_test_provider();
    let health = provider.categories().add("Health").expect("add");
    provider.categories().delete(&health).expect("delete");

    let result = provider.categories().rename(&health, "Fitness");
    assert!(matches!(result, Err(TrackerError::NotFound { .. })));
}

#[test]
fn test_category_delete_cascades() {
    let (_temp_dir, provider) = create_test_provider();
    let health = provider.categories().add("Health").expect("add");
    let work = provider.categories().add("Work").expect("add");

    let run = run_habit();
    let stretch = daily_habit("Stretch");
    let standup = daily_habit("Standup");
    provider.trackers().add(&run, &health).expect("add");
    provider.trackers().add(&stretch, &health).expect("add");
    provider.trackers().add(&standup, &work).expect("add");
    provider.records().mark(run.id, MONDAY).expect("mark");

    provider.categories().delete(&health).expect("delete");

    assert!(provider.trackers().get(run.id).expect("get").is_none());
    assert!(provider.trackers().get(stretch.id).expect("get").is_none());
    assert_eq!(provider.records().completion_count(run.id).expect("count"), 0);
    assert!(provider.trackers().get(standup.id).expect("get").is_some());

    // Deleting again is a no-op
    provider.categories().delete(&health).expect("second delete");
}

#[test]
fn test_category_delete_notifies_once() {
    let (_temp_dir, provider) = create_test_provider();
    let health = provider.categories().add("Health").expect("add");
    provider.trackers().add(&run_habit(), &health).expect("add");
    provider.trackers().add(&daily_habit("Stretch"), &health).expect("add");

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    provider
        .categories()
        .subscribe(Rc::new(move |change: StoreChange| sink.borrow_mut().push(change)));

    provider.categories().delete(&health).expect("delete");
    assert_eq!(*seen.borrow(), [StoreChange::Categories]);
}

#[test]
fn test_trackers_keep_insertion_order() {
    let (_temp_dir, provider) = create_test_provider();
    let health = provider.categories().add("Health").expect("add");
    for name in ["Walk", "Read", "Meditate"] {
        provider.trackers().add(&daily_habit(name), &health).expect("add");
    }

    let names: Vec<_> = provider
        .trackers()
        .list(&health)
        .expect("list")
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, ["Walk", "Read", "Meditate"]);
}

#[test]
fn test_tracker_round_trips_through_storage() {
    let (_temp_dir, provider) = create_test_provider();
    let errands = provider.categories().add("Errands").expect("add");
    let dentist = Tracker::event("Dentist", Color::rgba(0x12, 0x34, 0x56, 0x80), "🦷");
    provider.trackers().add(&dentist, &errands).expect("add");

    let loaded = provider
        .trackers()
        .get(dentist.id)
        .expect("get")
        .expect("tracker should exist");
    assert_eq!(loaded, dentist);
    assert!(!loaded.is_habit);
    assert_eq!(loaded.schedule, None);
}

#[test]
fn test_add_tracker_to_unknown_category() {
    let (_temp_dir, provider) = create_test_provider();
    let health = provider.categories().add("Health").expect("add");
    provider.categories().delete(&health).expect("delete");

    let result = provider.trackers().add(&run_habit(), &health);
    assert!(matches!(result, Err(TrackerError::NotFound { .. })));
}

#[test]
fn test_habit_without_schedule_rejected() {
    let (_temp_dir, provider) = create_test_provider();
    let health = provider.categories().add("Health").expect("add");
    let lazy = Tracker::habit("Nap", Color::rgb(1, 2, 3), "😴", Schedule::new());

    let result = provider.trackers().add(&lazy, &health);
    assert!(matches!(result, Err(TrackerError::Validation { .. })));
    assert!(provider.trackers().list(&health).expect("list").is_empty());
}

#[test]
fn test_update_reassigns_category() {
    let (_temp_dir, provider) = create_test_provider();
    let health = provider.categories().add("Health").expect("add");
    let work = provider.categories().add("Work").expect("add");
    let run = run_habit();
    provider.trackers().add(&run, &health).expect("add");

    let mut attributes = run.attributes();
    attributes.schedule = Some([WeekDay::Saturday].into_iter().collect());
    let updated = provider
        .trackers()
        .update(run.id, &attributes, Some(&work))
        .expect("update");
    assert!(updated.is_scheduled_on(jiff::civil::date(2024, 1, 6)));

    assert!(provider.trackers().list(&health).expect("list").is_empty());
    let moved = provider.trackers().list(&work).expect("list");
    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0], updated);
}

#[test]
fn test_update_unknown_tracker() {
    let (_temp_dir, provider) = create_test_provider();
    let run = run_habit();
    let result = provider.trackers().update(run.id, &run.attributes(), None);
    assert!(matches!(result, Err(TrackerError::NotFound { .. })));
}

#[test]
fn test_mark_and_unmark_counts() {
    let (_temp_dir, provider) = create_test_provider();
    let health = provider.categories().add("Health").expect("add");
    let run = run_habit();
    provider.trackers().add(&run, &health).expect("add");
    let records = provider.records();

    records.mark(run.id, MONDAY).expect("mark");
    records.mark(run.id, WEDNESDAY).expect("mark");
    records.mark(run.id, MONDAY).expect("mark twice");
    assert_eq!(records.completion_count(run.id).expect("count"), 2);
    assert!(records.is_completed(run.id, MONDAY).expect("query"));
    assert!(!records.is_completed(run.id, TUESDAY).expect("query"));

    records.unmark(run.id, MONDAY).expect("unmark");
    records.unmark(run.id, MONDAY).expect("unmark twice");
    assert_eq!(records.completion_count(run.id).expect("count"), 1);

    let history: Vec<_> = records
        .records_for(run.id)
        .expect("history")
        .into_iter()
        .map(|r| r.check_date)
        .collect();
    assert_eq!(history, [WEDNESDAY]);
}

#[test]
fn test_tracker_delete_removes_records() {
    let (_temp_dir, provider) = create_test_provider();
    let health = provider.categories().add("Health").expect("add");
    let run = run_habit();
    provider.trackers().add(&run, &health).expect("add");
    provider.records().mark(run.id, MONDAY).expect("mark");

    provider.trackers().delete(run.id).expect("delete");
    provider.trackers().delete(run.id).expect("delete twice");

    assert!(provider.trackers().get(run.id).expect("get").is_none());
    assert!(provider.records().records_for(run.id).expect("history").is_empty());
}

#[test]
fn test_stores_share_one_database_handle() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    let categories = CategoryStore::new(db.clone());
    let trackers = TrackerStore::new(db.clone());
    let records = RecordStore::new(db);

    let health = categories.add("Health").expect("add");
    let run = run_habit();
    trackers.add(&run, &health).expect("add");
    records.mark(run.id, MONDAY).expect("mark");

    let listed = categories.list().expect("list");
    assert_eq!(listed[0].trackers, [run.clone()]);
    assert_eq!(records.completion_count(run.id).expect("count"), 1);
}

#[test]
fn test_data_survives_reopen() {
    let (temp_dir, provider) = create_test_provider();
    let health = provider.categories().add("Health").expect("add");
    let run = run_habit();
    provider.trackers().add(&run, &health).expect("add");
    provider.records().mark(run.id, MONDAY).expect("mark");
    drop(provider);

    let provider = reopen(&temp_dir);
    let categories = provider.categories().list().expect("list");
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].trackers, [run.clone()]);
    assert!(provider.records().is_completed(run.id, MONDAY).expect("query"));
}
