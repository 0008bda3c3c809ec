//! Completion marks: one row per (tracker, day).

use std::rc::Rc;

use jiff::civil::Date;
use log::debug;
use rusqlite::{params, types::Type};

use super::observer::{ChangeListener, Listeners, StoreChange, Subscription};
use crate::{
    db::Database,
    error::{DatabaseResultExt, Result, TrackerError},
    models::{TrackerId, TrackerRecord},
};

const CHECK_TRACKER_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM trackers WHERE id = ?1)";
const INSERT_RECORD_SQL: &str =
    "INSERT OR IGNORE INTO completion_records (tracker_id, check_date) VALUES (?1, ?2)";
const DELETE_RECORD_SQL: &str =
    "DELETE FROM completion_records WHERE tracker_id = ?1 AND check_date = ?2";
const CHECK_RECORD_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM completion_records WHERE tracker_id = ?1 AND check_date = ?2)";
const COUNT_RECORDS_SQL: &str = "SELECT COUNT(*) FROM completion_records WHERE tracker_id = ?1";
const SELECT_RECORDS_SQL: &str =
    "SELECT check_date FROM completion_records WHERE tracker_id = ?1 ORDER BY check_date";

/// Owns completion marks.
///
/// Dates are calendar days, so any time-of-day is already gone by the time a
/// mark reaches the store. The store accepts any date; refusing future days
/// is up to the caller.
pub struct RecordStore {
    db: Database,
    listeners: Listeners,
}

impl RecordStore {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            listeners: Listeners::new(),
        }
    }

    /// Registers a listener for committed record changes.
    pub fn subscribe(&self, listener: Rc<dyn ChangeListener>) -> Subscription {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.listeners.unsubscribe(subscription)
    }

    /// Marks the tracker completed on `date`. Marking twice is a no-op.
    pub fn mark(&self, tracker_id: TrackerId, date: Date) -> Result<()> {
        let tx = self
            .db
            .connection()
            .unchecked_transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(
                CHECK_TRACKER_EXISTS_SQL,
                params![tracker_id.to_string()],
                |row| row.get(0),
            )
            .db_context("Failed to check tracker existence")?;
        if !exists {
            return Err(TrackerError::not_found("Tracker", tracker_id));
        }

        let inserted = tx
            .execute(
                INSERT_RECORD_SQL,
                params![tracker_id.to_string(), date.to_string()],
            )
            .db_context("Failed to insert completion record")?;

        tx.commit().db_context("Failed to commit transaction")?;

        if inserted > 0 {
            debug!("event=record_mark module=store tracker_id={tracker_id} date={date}");
            self.listeners.notify(StoreChange::Records);
        }
        Ok(())
    }

    /// Removes the mark for `date` if there is one.
    pub fn unmark(&self, tracker_id: TrackerId, date: Date) -> Result<()> {
        let removed = self
            .db
            .connection()
            .execute(
                DELETE_RECORD_SQL,
                params![tracker_id.to_string(), date.to_string()],
            )
            .db_context("Failed to delete completion record")?;

        if removed > 0 {
            debug!("event=record_unmark module=store tracker_id={tracker_id} date={date}");
            self.listeners.notify(StoreChange::Records);
        }
        Ok(())
    }

    pub fn is_completed(&self, tracker_id: TrackerId, date: Date) -> Result<bool> {
        self.db
            .connection()
            .query_row(
                CHECK_RECORD_EXISTS_SQL,
                params![tracker_id.to_string(), date.to_string()],
                |row| row.get(0),
            )
            .db_context("Failed to query completion record")
    }

    /// Number of days the tracker has been completed on, across all dates.
    pub fn completion_count(&self, tracker_id: TrackerId) -> Result<u64> {
        self.db
            .connection()
            .query_row(COUNT_RECORDS_SQL, params![tracker_id.to_string()], |row| {
                row.get::<_, i64>(0)
            })
            .db_context("Failed to count completion records")
            .map(|count| count as u64)
    }

    /// Every mark of the tracker, oldest first.
    pub fn records_for(&self, tracker_id: TrackerId) -> Result<Vec<TrackerRecord>> {
        let mut stmt = self
            .db
            .connection()
            .prepare(SELECT_RECORDS_SQL)
            .db_context("Failed to prepare query")?;

        let records = stmt
            .query_map(params![tracker_id.to_string()], |row| {
                let check_date = row.get::<_, String>(0)?.parse::<Date>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e))
                })?;
                Ok(TrackerRecord {
                    tracker_id,
                    check_date,
                })
            })
            .db_context("Failed to query completion records")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read completion record")?;

        Ok(records)
    }
}
