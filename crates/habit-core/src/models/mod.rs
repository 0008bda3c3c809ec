//! Domain models for trackers, categories and completion marks.
//!
//! These are plain value types. Persistence lives in [`crate::store`] and
//! markdown formatting in [`crate::display`]; the only behaviour kept here is
//! identity and equality, plus the small amount of validation every store
//! applies before writing.
//!
//! # Examples
//!
//! ```rust
//! use habit_core::models::{Color, Schedule, Tracker, WeekDay};
//! use jiff::civil::date;
//!
//! let schedule: Schedule = [WeekDay::Monday, WeekDay::Friday].into_iter().collect();
//! let run = Tracker::habit("Run", Color::rgb(0x33, 0xCF, 0x69), "🏃", schedule);
//!
//! // 2024-01-01 was a Monday
//! assert!(run.is_scheduled_on(date(2024, 1, 1)));
//! assert!(!run.is_scheduled_on(date(2024, 1, 2)));
//! ```

pub mod category;
pub mod color;
pub mod record;
pub mod schedule;
pub mod tracker;

#[cfg(test)]
mod tests;

pub use category::TrackerCategory;
pub use color::Color;
pub use record::TrackerRecord;
pub use schedule::{Schedule, WeekDay};
pub use tracker::{Tracker, TrackerAttributes, TrackerId};
