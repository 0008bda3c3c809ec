//! Unit tests for the domain models.

use jiff::civil::date;

use crate::{
    error::TrackerError,
    models::{Color, Schedule, Tracker, TrackerCategory, TrackerId, WeekDay},
};

fn weekdays(days: &[WeekDay]) -> Schedule {
    days.iter().copied().collect()
}

#[test]
fn test_weekday_of_date() {
    // 2024-01-01 was a Monday
    assert_eq!(WeekDay::of(date(2024, 1, 1)), WeekDay::Monday);
    assert_eq!(WeekDay::of(date(2024, 1, 7)), WeekDay::Sunday);
}

#[test]
fn test_weekday_parsing() {
    assert_eq!("mon".parse::<WeekDay>(), Ok(WeekDay::Monday));
    assert_eq!("SATURDAY".parse::<WeekDay>(), Ok(WeekDay::Saturday));
    assert!("weekend".parse::<WeekDay>().is_err());
}

#[test]
fn test_categories_compare_by_title_only() {
    let run = Tracker::habit("Run", Color::rgb(1, 2, 3), "🏃", Schedule::daily());
    let empty = TrackerCategory {
        id: 1,
        title: "Health".to_string(),
        trackers: vec![],
    };
    let full = TrackerCategory {
        id: 2,
        title: "Health".to_string(),
        trackers: vec![run],
    };
    let other = TrackerCategory {
        id: 1,
        title: "Work".to_string(),
        trackers: vec![],
    };

    assert_eq!(empty, full);
    assert_ne!(empty, other);
}

#[test]
fn test_habit_is_scheduled_only_on_its_days() {
    let run = Tracker::habit(
        "Run",
        Color::rgb(1, 2, 3),
        "🏃",
        weekdays(&[WeekDay::Monday, WeekDay::Wednesday, WeekDay::Friday]),
    );
    assert!(run.is_scheduled_on(date(2024, 1, 1)));
    assert!(!run.is_scheduled_on(date(2024, 1, 2)));
    assert!(run.is_scheduled_on(date(2024, 1, 3)));
}

#[test]
fn test_event_is_never_scheduled() {
    let party = Tracker::event("Party", Color::rgb(1, 2, 3), "🎉");
    assert!(party.schedule.is_none());
    assert!(!party.is_scheduled_on(date(2024, 1, 1)));
}

#[test]
fn test_validation_rejects_bad_trackers() {
    let color = Color::rgb(1, 2, 3);

    let unnamed = Tracker::habit("  ", color, "🏃", Schedule::daily());
    assert!(matches!(
        unnamed.validate(),
        Err(TrackerError::Validation { ref field, .. }) if field == "name"
    ));

    let unscheduled = Tracker::habit("Run", color, "🏃", Schedule::new());
    assert!(matches!(
        unscheduled.validate(),
        Err(TrackerError::Validation { ref field, .. }) if field == "schedule"
    ));

    let mut scheduled_event = Tracker::event("Party", color, "🎉");
    scheduled_event.schedule = Some(Schedule::daily());
    assert!(scheduled_event.validate().is_err());

    assert!(Tracker::event("Party", color, "🎉").validate().is_ok());
}

#[test]
fn test_tracker_id_text_round_trip() {
    let id = TrackerId::new();
    assert_eq!(id.to_string().parse::<TrackerId>().unwrap(), id);
    assert!("not-a-uuid".parse::<TrackerId>().is_err());
}

#[test]
fn test_color_serializes_as_hex() {
    let json = serde_json::to_string(&Color::rgb(0xFD, 0x4C, 0x49)).unwrap();
    assert_eq!(json, "\"#FD4C49\"");
    let back: Color = serde_json::from_str("\"#007BFA80\"").unwrap();
    assert_eq!(back, Color::rgba(0, 0x7B, 0xFA, 0x80));
}

#[test]
fn test_schedule_serializes_as_day_list() {
    let json = serde_json::to_string(&weekdays(&[WeekDay::Friday, WeekDay::Monday])).unwrap();
    assert_eq!(json, "[\"monday\",\"friday\"]");
}
