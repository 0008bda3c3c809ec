//! Data provider: the single entry point used by a presentation layer.
//!
//! The [`DataProvider`] composes the three stores, keeps the
//! [`SectionedView`] for the selected date up to date, and tells one
//! registered [`DataObserver`] whenever that view may have changed.
//!
//! ```text
//! ┌──────────────┐ command ┌──────────────┐ mutate ┌──────────────┐
//! │ Presentation │────────▶│ DataProvider │───────▶│    Stores    │
//! │   (CLI, UI)  │◀────────│ (view cache) │◀───────│ (SQLite rows)│
//! └──────────────┘ changed └──────────────┘ notify └──────────────┘
//! ```
//!
//! # Notification contract
//!
//! The provider listens to every store. After each command it checks whether
//! any store committed a change; if so it recomputes the view and calls
//! [`DataObserver::on_data_changed`] exactly once, however many stores the
//! command touched. Commands that change nothing stay silent.
//!
//! # Visibility rules
//!
//! For a reference date, a habit is visible when its schedule contains the
//! date's weekday. An event is visible until it is completed; from then on it
//! only shows on the day it was completed. Categories with no visible tracker
//! produce no section.
//!
//! # Example
//!
//! ```rust
//! use habit_core::{
//!     models::{Color, Tracker, WeekDay},
//!     DataProviderBuilder,
//! };
//! use jiff::civil::date;
//!
//! # fn example() -> habit_core::Result<()> {
//! let mut provider = DataProviderBuilder::new().in_memory().build()?;
//! let health = provider.add_category("Health")?;
//! let run = Tracker::habit(
//!     "Run",
//!     Color::rgb(0x33, 0xCF, 0x69),
//!     "🏃",
//!     [WeekDay::Monday, WeekDay::Wednesday].into_iter().collect(),
//! );
//! provider.add_tracker(&run, &health)?;
//!
//! provider.load_trackers(date(2024, 1, 1))?; // a Monday
//! assert_eq!(provider.number_of_sections(), 1);
//! assert_eq!(provider.section_title(0)?, "Health");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use std::{cell::Cell, rc::Rc};

use jiff::civil::Date;
use log::{debug, warn};

use crate::{
    db::Database,
    error::{Result, TrackerError},
    models::{Tracker, TrackerAttributes, TrackerCategory, TrackerId},
    store::{CategoryStore, ChangeListener, RecordStore, StoreChange, TrackerStore},
};

pub mod builder;
pub mod view;


pub use builder::DataProviderBuilder;
pub use view::{IndexPath, Section, SectionedView, TrackerCell};

/// Receives "the view changed, re-read it" signals.
pub trait DataObserver {
    fn on_data_changed(&self);
}

impl<F: Fn()> DataObserver for F {
    fn on_data_changed(&self) {
        self();
    }
}

/// Collects store signals between two flushes.
#[derive(Default)]
struct PendingChanges {
    dirty: Cell<bool>,
}

impl PendingChanges {
    fn take(&self) -> bool {
        self.dirty.replace(false)
    }

    fn keep(&self) {
        self.dirty.set(true);
    }
}

impl ChangeListener for PendingChanges {
    fn on_change(&self, change: StoreChange) {
        debug!("event=store_changed module=provider change={change:?}");
        self.dirty.set(true);
    }
}

/// Facade over the category, tracker and record stores.
///
/// A command that committed but could not rebuild the view fails with
/// [`TrackerError::ViewRefresh`]. The change is kept; do not retry it.
pub struct DataProvider {
    categories: CategoryStore,
    trackers: TrackerStore,
    records: RecordStore,
    pending: Rc<PendingChanges>,
    observer: Option<Rc<dyn DataObserver>>,
    search_text: Option<String>,
    view: SectionedView,
}

impl DataProvider {
    /// Builds the three stores on one shared database handle.
    pub fn new(db: Database) -> Self {
        let categories = CategoryStore::new(db.clone());
        let trackers = TrackerStore::new(db.clone());
        let records = RecordStore::new(db);

        let pending = Rc::new(PendingChanges::default());
        categories.subscribe(pending.clone());
        trackers.subscribe(pending.clone());
        records.subscribe(pending.clone());

        Self {
            categories,
            trackers,
            records,
            pending,
            observer: None,
            search_text: None,
            view: SectionedView::default(),
        }
    }

    /// Registers the observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: Rc<dyn DataObserver>) {
        self.observer = Some(observer);
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn categories(&self) -> &CategoryStore {
        &self.categories
    }

    pub fn trackers(&self) -> &TrackerStore {
        &self.trackers
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    /// The reference date of the current view, if one was loaded.
    pub fn selected_date(&self) -> Option<Date> {
        self.view.date
    }

    pub fn view(&self) -> &SectionedView {
        &self.view
    }

    /// Recomputes the view for `date` and notifies the observer once.
    pub fn load_trackers(&mut self, date: Date) -> Result<()> {
        self.view = self.compute_view(date)?;
        self.pending.take();
        self.notify();
        Ok(())
    }

    /// Filters visible trackers by name, case-insensitively. `None` or an
    /// empty string clears the filter.
    pub fn set_search_text(&mut self, text: Option<&str>) -> Result<()> {
        let text = text.map(str::trim).filter(|t| !t.is_empty()).map(str::to_lowercase);
        if text == self.search_text {
            return Ok(());
        }
        self.search_text = text;
        match self.view.date {
            Some(date) => self.load_trackers(date),
            None => Ok(()),
        }
    }

    pub fn search_text(&self) -> Option<&str> {
        self.search_text.as_deref()
    }

    /// Picks up changes made directly through the store handles.
    pub fn refresh(&mut self) -> Result<()> {
        self.flush()
    }

    pub fn number_of_sections(&self) -> usize {
        self.view.number_of_sections()
    }

    pub fn number_of_rows_in_section(&self, section: usize) -> Result<usize> {
        self.view.number_of_rows_in_section(section)
    }

    pub fn tracker_at(&self, path: IndexPath) -> Result<&TrackerCell> {
        self.view.tracker_at(path)
    }

    pub fn section_title(&self, section: usize) -> Result<&str> {
        self.view.section_title(section)
    }

    pub fn has_trackers_for_selected_date(&self) -> bool {
        !self.view.is_empty()
    }

    pub fn add_category(&mut self, title: &str) -> Result<TrackerCategory> {
        let category = self.categories.add(title)?;
        self.flush()?;
        Ok(category)
    }

    pub fn rename_category(
        &mut self,
        category: &TrackerCategory,
        new_title: &str,
    ) -> Result<TrackerCategory> {
        let category = self.categories.rename(category, new_title)?;
        self.flush()?;
        Ok(category)
    }

    /// Deletes the category together with its trackers and their marks.
    pub fn delete_category(&mut self, category: &TrackerCategory) -> Result<()> {
        self.categories.delete(category)?;
        self.flush()
    }

    pub fn add_tracker(&mut self, tracker: &Tracker, category: &TrackerCategory) -> Result<()> {
        self.trackers.add(tracker, category)?;
        self.flush()
    }

    pub fn update_tracker(
        &mut self,
        id: TrackerId,
        attributes: &TrackerAttributes,
        new_category: Option<&TrackerCategory>,
    ) -> Result<Tracker> {
        let tracker = self.trackers.update(id, attributes, new_category)?;
        self.flush()?;
        Ok(tracker)
    }

    /// Deletes the tracker and its completion marks. Unknown ids are ignored.
    pub fn delete_tracker(&mut self, id: TrackerId) -> Result<()> {
        self.trackers.delete(id)?;
        self.flush()
    }

    pub fn mark_completed(&mut self, id: TrackerId, date: Date) -> Result<()> {
        self.records.mark(id, date)?;
        self.flush()
    }

    pub fn unmark_completed(&mut self, id: TrackerId, date: Date) -> Result<()> {
        self.records.unmark(id, date)?;
        self.flush()
    }

    /// Flips the completion state for `date` and returns the new state.
    pub fn toggle_completion(&mut self, id: TrackerId, date: Date) -> Result<bool> {
        let completed = !self.records.is_completed(id, date)?;
        if completed {
            self.records.mark(id, date)?;
        } else {
            self.records.unmark(id, date)?;
        }
        self.flush()?;
        Ok(completed)
    }

    /// Runs after a command. A failed recompute leaves the changes pending
    /// and the view empty, so the next `refresh` retries.
    fn flush(&mut self) -> Result<()> {
        if !self.pending.take() {
            return Ok(());
        }

        let Some(date) = self.view.date else {
            self.notify();
            return Ok(());
        };

        match self.compute_view(date) {
            Ok(view) => {
                self.view = view;
                self.notify();
                Ok(())
            }
            Err(e) => {
                warn!("event=view_refresh module=provider status=error date={date} error={e}");
                self.pending.keep();
                self.view.sections.clear();
                self.notify();
                Err(TrackerError::ViewRefresh(Box::new(e)))
            }
        }
    }

    fn notify(&self) {
        debug!(
            "event=view_updated module=provider sections={}",
            self.view.number_of_sections()
        );
        if let Some(observer) = &self.observer {
            observer.on_data_changed();
        }
    }

    fn compute_view(&self, date: Date) -> Result<SectionedView> {
        let mut sections = Vec::new();

        for category in self.categories.list()? {
            let mut cells = Vec::new();

            for tracker in category.trackers {
                if let Some(needle) = &self.search_text {
                    if !tracker.name.to_lowercase().contains(needle.as_str()) {
                        continue;
                    }
                }

                let completed = self.records.is_completed(tracker.id, date)?;
                let completed_days = self.records.completion_count(tracker.id)?;
                let visible = if tracker.is_habit {
                    tracker.is_scheduled_on(date)
                } else {
                    completed_days == 0 || completed
                };

                if visible {
                    cells.push(TrackerCell {
                        tracker,
                        completed,
                        completed_days,
                    });
                }
            }

            if !cells.is_empty() {
                sections.push(Section {
                    title: category.title,
                    trackers: cells,
                });
            }
        }

        Ok(SectionedView {
            date: Some(date),
            sections,
        })
    }
}
