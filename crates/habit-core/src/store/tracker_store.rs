//! Tracker persistence: CRUD, category reassignment and strict decoding.

use std::rc::Rc;

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, types::Value, Connection, OptionalExtension, Row};

use super::{
    category_store::{find_category, select_category_by_id},
    observer::{ChangeListener, Listeners, StoreChange, Subscription},
};
use crate::{
    db::Database,
    error::{DatabaseResultExt, Result, TrackerError},
    marshal,
    models::{Tracker, TrackerAttributes, TrackerCategory, TrackerId},
};

const TRACKER_COLUMNS: &str = "id, name, color_hex, emoji, schedule, is_habit";
const INSERT_TRACKER_SQL: &str = "INSERT INTO trackers (id, name, color_hex, emoji, schedule, is_habit, category_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_TRACKER_HABIT_SQL: &str = "SELECT is_habit FROM trackers WHERE id = ?1";
const UPDATE_TRACKER_SQL: &str =
    "UPDATE trackers SET name = ?1, color_hex = ?2, emoji = ?3, schedule = ?4 WHERE id = ?5";
const UPDATE_TRACKER_CATEGORY_SQL: &str = "UPDATE trackers SET category_id = ?1 WHERE id = ?2";
const DELETE_TRACKER_SQL: &str = "DELETE FROM trackers WHERE id = ?1";
const SELECT_TRACKER_CATEGORY_SQL: &str = "SELECT category_id FROM trackers WHERE id = ?1";

/// A tracker row exactly as stored. Every column may be missing; turning it
/// into a [`Tracker`] goes through [`TrackerStore::decode`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredTracker {
    pub id: Option<String>,
    pub name: Option<String>,
    pub color_hex: Option<String>,
    pub emoji: Option<String>,
    pub schedule: Option<String>,
    pub is_habit: Option<bool>,
}

impl StoredTracker {
    /// Encodes a tracker into its persisted form. Events store an empty
    /// schedule string; NULL is reserved for a missing value.
    pub fn encode(tracker: &Tracker) -> Self {
        Self {
            id: Some(tracker.id.to_string()),
            name: Some(tracker.name.clone()),
            color_hex: Some(marshal::color_to_hex(&tracker.color)),
            emoji: Some(tracker.emoji.clone()),
            schedule: Some(
                tracker
                    .schedule
                    .as_ref()
                    .map(marshal::schedule_to_string)
                    .unwrap_or_default(),
            ),
            is_habit: Some(tracker.is_habit),
        }
    }

    /// Values of the wrong storage type read as missing, so that
    /// [`TrackerStore::decode`] names the damaged column.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let is_habit = match row.get::<_, Value>(5)? {
            Value::Integer(0) => Some(false),
            Value::Integer(1) => Some(true),
            _ => None,
        };

        Ok(Self {
            id: text_column(row, 0)?,
            name: text_column(row, 1)?,
            color_hex: text_column(row, 2)?,
            emoji: text_column(row, 3)?,
            schedule: text_column(row, 4)?,
            is_habit,
        })
    }
}

fn text_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    match row.get::<_, Value>(idx)? {
        Value::Text(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or(TrackerError::Decoding { field })
}

/// Owns tracker rows.
pub struct TrackerStore {
    db: Database,
    listeners: Listeners,
}

impl TrackerStore {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            listeners: Listeners::new(),
        }
    }

    /// Registers a listener for committed tracker changes.
    pub fn subscribe(&self, listener: Rc<dyn ChangeListener>) -> Subscription {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.listeners.unsubscribe(subscription)
    }

    /// Decodes a stored row, all or nothing.
    ///
    /// Fails with [`TrackerError::Decoding`] naming the first field that is
    /// missing or malformed, checked in column order. A schedule that does
    /// not match the habit flag is malformed.
    pub fn decode(stored: &StoredTracker) -> Result<Tracker> {
        let id = required(stored.id.as_deref(), "id")?
            .parse::<TrackerId>()
            .map_err(|_| TrackerError::Decoding { field: "id" })?;
        let name = required(stored.name.clone(), "name")?;
        let color = marshal::hex_to_color(required(
            stored.color_hex.as_deref(),
            marshal::COLOR_FIELD,
        )?)?;
        let emoji = required(stored.emoji.clone(), "emoji")?;
        let schedule =
            marshal::string_to_schedule(required(stored.schedule.as_deref(), marshal::SCHEDULE_FIELD)?)?;
        let is_habit = required(stored.is_habit, "is_habit")?;

        // Habits need at least one day, events none
        if is_habit == schedule.is_empty() {
            return Err(TrackerError::Decoding {
                field: marshal::SCHEDULE_FIELD,
            });
        }

        Ok(Tracker {
            id,
            name,
            color,
            emoji,
            schedule: is_habit.then_some(schedule),
            is_habit,
        })
    }

    /// Persists a new tracker owned by `category`.
    pub fn add(&self, tracker: &Tracker, category: &TrackerCategory) -> Result<()> {
        tracker.validate()?;

        let tx = self
            .db
            .connection()
            .unchecked_transaction()
            .db_context("Failed to begin transaction")?;

        let category_id = find_category(&tx, &category.title)?
            .ok_or_else(|| TrackerError::not_found("Category", &category.title))?;

        let stored = StoredTracker::encode(tracker);
        tx.execute(
            INSERT_TRACKER_SQL,
            params![
                stored.id,
                stored.name,
                stored.color_hex,
                stored.emoji,
                stored.schedule,
                stored.is_habit,
                category_id as i64,
                Timestamp::now().as_microsecond(),
            ],
        )
        .db_context("Failed to insert tracker")?;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!(
            "event=tracker_add module=store id={} category={}",
            tracker.id, category.title
        );
        self.listeners.notify(StoreChange::Trackers);
        Ok(())
    }

    /// Overwrites name, colour, emoji and schedule, and moves the tracker to
    /// `new_category` when one is given. Returns the updated tracker.
    pub fn update(
        &self,
        id: TrackerId,
        attributes: &TrackerAttributes,
        new_category: Option<&TrackerCategory>,
    ) -> Result<Tracker> {
        let tx = self
            .db
            .connection()
            .unchecked_transaction()
            .db_context("Failed to begin transaction")?;

        let is_habit: Option<Option<bool>> = tx
            .query_row(SELECT_TRACKER_HABIT_SQL, params![id.to_string()], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to look up tracker")?;
        let is_habit = match is_habit {
            Some(flag) => required(flag, "is_habit")?,
            None => return Err(TrackerError::not_found("Tracker", id)),
        };

        attributes.validate(is_habit)?;

        let tracker = Tracker {
            id,
            name: attributes.name.clone(),
            color: attributes.color,
            emoji: attributes.emoji.clone(),
            schedule: attributes.schedule.clone(),
            is_habit,
        };
        let stored = StoredTracker::encode(&tracker);

        tx.execute(
            UPDATE_TRACKER_SQL,
            params![
                stored.name,
                stored.color_hex,
                stored.emoji,
                stored.schedule,
                stored.id
            ],
        )
        .db_context("Failed to update tracker")?;

        if let Some(category) = new_category {
            let category_id = find_category(&tx, &category.title)?
                .ok_or_else(|| TrackerError::not_found("Category", &category.title))?;
            tx.execute(
                UPDATE_TRACKER_CATEGORY_SQL,
                params![category_id as i64, stored.id],
            )
            .db_context("Failed to move tracker to category")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        debug!("event=tracker_update module=store id={id}");
        self.listeners.notify(StoreChange::Trackers);
        Ok(tracker)
    }

    /// Removes the tracker and, through the foreign key, its completion
    /// marks. Deleting an unknown id does nothing.
    pub fn delete(&self, id: TrackerId) -> Result<()> {
        let removed = self
            .db
            .connection()
            .execute(DELETE_TRACKER_SQL, params![id.to_string()])
            .db_context("Failed to delete tracker")?;

        if removed > 0 {
            debug!("event=tracker_delete module=store id={id}");
            self.listeners.notify(StoreChange::Trackers);
        }
        Ok(())
    }

    pub fn get(&self, id: TrackerId) -> Result<Option<Tracker>> {
        let stored = self
            .db
            .connection()
            .query_row(
                &format!("SELECT {TRACKER_COLUMNS} FROM trackers WHERE id = ?1"),
                params![id.to_string()],
                StoredTracker::from_row,
            )
            .optional()
            .db_context("Failed to query tracker")?;

        stored.as_ref().map(Self::decode).transpose()
    }

    /// Trackers owned by `category`, oldest first. Empty if the category
    /// does not exist.
    pub fn list(&self, category: &TrackerCategory) -> Result<Vec<Tracker>> {
        let conn = self.db.connection();
        match find_category(conn, &category.title)? {
            Some(category_id) => select_trackers_by_category(conn, category_id),
            None => Ok(Vec::new()),
        }
    }

    /// The category currently owning the tracker, with its trackers loaded.
    pub fn category_of(&self, id: TrackerId) -> Result<Option<TrackerCategory>> {
        let conn = self.db.connection();
        let category_id: Option<i64> = conn
            .query_row(SELECT_TRACKER_CATEGORY_SQL, params![id.to_string()], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to query tracker category")?;

        match category_id {
            Some(category_id) => select_category_by_id(conn, category_id as u64),
            None => Ok(None),
        }
    }
}

/// Loads and decodes every tracker of one category.
pub(crate) fn select_trackers_by_category(
    conn: &Connection,
    category_id: u64,
) -> Result<Vec<Tracker>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {TRACKER_COLUMNS} FROM trackers WHERE category_id = ?1 ORDER BY created_at, rowid"
        ))
        .db_context("Failed to prepare query")?;

    let rows = stmt
        .query_map(params![category_id as i64], StoredTracker::from_row)
        .db_context("Failed to query trackers")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read tracker row")?;

    rows.iter().map(TrackerStore::decode).collect()
}
