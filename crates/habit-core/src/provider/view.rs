//! The sectioned view computed by the data provider.

use jiff::civil::Date;
use serde::Serialize;

use crate::{
    error::{Result, TrackerError},
    models::Tracker,
};

/// Position of a row in the sectioned view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexPath {
    pub section: usize,
    pub row: usize,
}

impl IndexPath {
    pub fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

/// One visible tracker together with its completion state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerCell {
    pub tracker: Tracker,
    /// Completed on the view's reference date
    pub completed: bool,
    /// Number of days ever completed
    pub completed_days: u64,
}

/// Visible trackers of one category. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    pub trackers: Vec<TrackerCell>,
}

/// Category-grouped, date-filtered trackers, in canonical category order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectionedView {
    /// Reference date, `None` until the first load
    pub date: Option<Date>,
    pub sections: Vec<Section>,
}

impl SectionedView {
    pub fn number_of_sections(&self) -> usize {
        self.sections.len()
    }

    pub fn number_of_rows_in_section(&self, section: usize) -> Result<usize> {
        self.section(section).map(|s| s.trackers.len())
    }

    pub fn section(&self, section: usize) -> Result<&Section> {
        self.sections
            .get(section)
            .ok_or(TrackerError::IndexOutOfRange {
                index: section,
                len: self.sections.len(),
            })
    }

    pub fn section_title(&self, section: usize) -> Result<&str> {
        self.section(section).map(|s| s.title.as_str())
    }

    pub fn tracker_at(&self, path: IndexPath) -> Result<&TrackerCell> {
        let section = self.section(path.section)?;
        section
            .trackers
            .get(path.row)
            .ok_or(TrackerError::IndexOutOfRange {
                index: path.row,
                len: section.trackers.len(),
            })
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Every visible cell in section order.
    pub fn cells(&self) -> impl Iterator<Item = &TrackerCell> {
        self.sections.iter().flat_map(|s| s.trackers.iter())
    }
}
