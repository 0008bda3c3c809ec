//! Core library for the habit tracker.
//!
//! This crate owns everything below the user interface: the domain models,
//! their SQLite persistence, and a data provider that turns stored trackers
//! into a per-day, per-category view.
//!
//! # Layers
//!
//! - **Domain Models** ([`models`]): trackers, categories, completion records
//! - **Stores** ([`store`]): one store per record kind, each announcing its
//!   committed changes to subscribed listeners
//! - **Data Provider** ([`provider`]): the single entry point for a
//!   presentation layer, with one change signal per command
//! - **Display** ([`display`]): markdown formatting of models and results
//!
//! # Quick Start
//!
//! ```rust
//! use habit_core::{
//!     models::{Color, Schedule, Tracker},
//!     DataProviderBuilder,
//! };
//! use jiff::civil::date;
//!
//! # fn example() -> habit_core::Result<()> {
//! let mut provider = DataProviderBuilder::new().in_memory().build()?;
//!
//! let health = provider.add_category("Health")?;
//! let water = Tracker::habit("Drink water", Color::rgb(0, 0x7A, 0xFF), "💧", Schedule::daily());
//! provider.add_tracker(&water, &health)?;
//!
//! let today = date(2024, 1, 1);
//! provider.load_trackers(today)?;
//! provider.mark_completed(water.id, today)?;
//! println!("{}", provider.view());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod marshal;
pub mod models;
pub mod provider;
pub mod store;

// Re-export commonly used types
pub use db::Database;
pub use display::{Categories, CompletionHistory, CreateResult, DeleteResult, UpdateResult};
pub use error::{Result, TrackerError};
pub use models::{
    Color, Schedule, Tracker, TrackerAttributes, TrackerCategory, TrackerId, TrackerRecord,
    WeekDay,
};
pub use provider::{
    DataObserver, DataProvider, DataProviderBuilder, IndexPath, Section, SectionedView,
    TrackerCell,
};
pub use store::{CategoryStore, ChangeListener, RecordStore, StoreChange, TrackerStore};
