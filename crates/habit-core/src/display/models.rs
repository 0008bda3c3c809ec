//! Display implementations for domain models and the sectioned view.

use std::fmt;

use crate::{
    models::{Tracker, TrackerCategory, WeekDay},
    provider::{SectionedView, TrackerCell},
};

impl fmt::Display for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} {}", self.emoji, self.name)?;
        writeln!(f)?;
        writeln!(f, "- **ID**: {}", self.id)?;
        writeln!(f, "- **Kind**: {}", if self.is_habit { "Habit" } else { "Event" })?;
        if let Some(schedule) = &self.schedule {
            writeln!(f, "- **Schedule**: {schedule}")?;
        }
        writeln!(f, "- **Color**: {}", self.color)
    }
}

impl fmt::Display for TrackerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;
        if self.trackers.is_empty() {
            return writeln!(f, "No trackers in this category.");
        }
        for tracker in &self.trackers {
            writeln!(f, "- {} {} `{}`", tracker.emoji, tracker.name, tracker.id)?;
        }
        Ok(())
    }
}

impl fmt::Display for TrackerCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.completed { "[x]" } else { "[ ]" };
        write!(
            f,
            "- {check} {} **{}** ({}) `{}`",
            self.tracker.emoji,
            self.tracker.name,
            crate::display::days(self.completed_days),
            self.tracker.id
        )
    }
}

impl fmt::Display for SectionedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(date) = self.date else {
            return writeln!(f, "No date selected.");
        };

        writeln!(f, "# Trackers for {date} ({})", WeekDay::of(date))?;
        writeln!(f)?;

        if self.sections.is_empty() {
            return writeln!(f, "Nothing to track on this day.");
        }

        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "## {}", section.title)?;
            writeln!(f)?;
            for cell in &section.trackers {
                writeln!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::{
        models::{Color, Schedule},
        provider::Section,
    };

    fn run() -> Tracker {
        Tracker::habit("Run", Color::rgb(0x33, 0xCF, 0x69), "🏃", Schedule::daily())
    }

    #[test]
    fn test_tracker_display() {
        let output = run().to_string();
        assert!(output.starts_with("# 🏃 Run\n"));
        assert!(output.contains("- **Kind**: Habit"));
        assert!(output.contains("- **Schedule**: Mon,Tue,Wed,Thu,Fri,Sat,Sun"));
        assert!(output.contains("- **Color**: #33CF69"));
    }

    #[test]
    fn test_event_display_has_no_schedule() {
        let output = Tracker::event("Dentist", Color::rgb(9, 9, 9), "🦷").to_string();
        assert!(output.contains("- **Kind**: Event"));
        assert!(!output.contains("Schedule"));
    }

    #[test]
    fn test_sectioned_view_display() {
        let view = SectionedView {
            date: Some(date(2024, 1, 1)),
            sections: vec![Section {
                title: "Health".to_string(),
                trackers: vec![TrackerCell {
                    tracker: run(),
                    completed: true,
                    completed_days: 1,
                }],
            }],
        };
        let output = view.to_string();
        assert!(output.starts_with("# Trackers for 2024-01-01 (Mon)"));
        assert!(output.contains("## Health"));
        assert!(output.contains("- [x] 🏃 **Run** (1 day)"));
    }

    #[test]
    fn test_empty_view_display() {
        let view = SectionedView {
            date: Some(date(2024, 1, 2)),
            sections: vec![],
        };
        assert!(view.to_string().contains("Nothing to track on this day."));
        assert!(SectionedView::default()
            .to_string()
            .contains("No date selected."));
    }
}
