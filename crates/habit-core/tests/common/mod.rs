#![allow(dead_code)]

use habit_core::{
    models::{Color, Schedule, Tracker, WeekDay},
    DataProvider, DataProviderBuilder,
};
use jiff::civil::Date;
use tempfile::TempDir;

// 2024-01-01 was a Monday
pub const MONDAY: Date = Date::constant(2024, 1, 1);
pub const TUESDAY: Date = Date::constant(2024, 1, 2);
pub const WEDNESDAY: Date = Date::constant(2024, 1, 3);

/// Helper function to create a test provider backed by a file on disk
pub fn create_test_provider() -> (TempDir, DataProvider) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let provider = DataProviderBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .expect("Failed to create provider");
    (temp_dir, provider)
}

/// Opens a second provider on the same database file
pub fn reopen(temp_dir: &TempDir) -> DataProvider {
    DataProviderBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .build()
        .expect("Failed to reopen provider")
}

/// "Run" on Monday, Wednesday and Friday
pub fn run_habit() -> Tracker {
    Tracker::habit(
        "Run",
        Color::rgb(0x33, 0xCF, 0x69),
        "🏃",
        [WeekDay::Monday, WeekDay::Wednesday, WeekDay::Friday]
            .into_iter()
            .collect(),
    )
}

pub fn daily_habit(name: &str) -> Tracker {
    Tracker::habit(name, Color::rgb(0x80, 0x80, 0x80), "✅", Schedule::daily())
}
