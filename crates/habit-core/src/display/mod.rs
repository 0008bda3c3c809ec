//! Markdown formatting for domain values and command results.
//!
//! Domain models and the sectioned view implement [`std::fmt::Display`]
//! directly (see [`models`]); collections and command outcomes get small
//! newtype wrappers so each context can format the same data its own way.
//! All output is markdown, rendered by the CLI either through a terminal skin
//! or as plain text.
//!
//! ```rust
//! use habit_core::{
//!     display::CreateResult,
//!     models::{Color, Tracker},
//! };
//!
//! let tracker = Tracker::event("Dentist", Color::rgb(9, 9, 9), "🦷");
//! let output = CreateResult::new(tracker.clone()).to_string();
//! assert!(output.contains(&format!("Created tracker with ID: {}", tracker.id)));
//! ```

pub mod collections;
pub mod models;
pub mod results;

pub use collections::{Categories, CompletionHistory};
pub use results::{CreateResult, DeleteResult, UpdateResult};

/// "1 day", "3 days".
pub(crate) fn days(count: u64) -> String {
    if count == 1 {
        "1 day".to_string()
    } else {
        format!("{count} days")
    }
}
