//! Newtype wrappers for displaying collections.

use std::fmt;

use crate::models::{TrackerCategory, TrackerRecord};

/// Category list with tracker counts.
pub struct Categories(pub Vec<TrackerCategory>);

impl fmt::Display for Categories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No categories found.");
        }

        writeln!(f, "# Categories")?;
        writeln!(f)?;
        for category in &self.0 {
            let count = category.trackers.len();
            let noun = if count == 1 { "tracker" } else { "trackers" };
            writeln!(f, "- **{}** ({count} {noun})", category.title)?;
        }
        Ok(())
    }
}

/// Completion marks of one tracker, oldest first.
pub struct CompletionHistory(pub Vec<TrackerRecord>);

impl fmt::Display for CompletionHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Completed ({})", crate::display::days(self.0.len() as u64))?;
        writeln!(f)?;
        if self.0.is_empty() {
            return writeln!(f, "Not completed yet.");
        }
        for record in &self.0 {
            writeln!(f, "- {}", record.check_date)?;
        }
        Ok(())
    }
}
