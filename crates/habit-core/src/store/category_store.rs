//! Category persistence: create, rename, cascading delete and ordered listing.

use std::rc::Rc;

use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use super::{
    observer::{ChangeListener, Listeners, StoreChange, Subscription},
    tracker_store::select_trackers_by_category,
};
use crate::{
    db::Database,
    error::{DatabaseResultExt, Result, TrackerError},
    models::TrackerCategory,
};

const INSERT_CATEGORY_SQL: &str = "INSERT INTO categories (title) VALUES (?1)";
const SELECT_CATEGORY_ID_SQL: &str = "SELECT id FROM categories WHERE title = ?1";
const SELECT_CATEGORY_TITLE_SQL: &str = "SELECT title FROM categories WHERE id = ?1";
const SELECT_CATEGORIES_SQL: &str = "SELECT id, title FROM categories ORDER BY title ASC";
const RENAME_CATEGORY_SQL: &str = "UPDATE categories SET title = ?1 WHERE id = ?2";
const DELETE_CATEGORY_TRACKERS_SQL: &str = "DELETE FROM trackers WHERE category_id = ?1";
const DELETE_CATEGORY_SQL: &str = "DELETE FROM categories WHERE id = ?1";

/// Storage id of the category with this title, if any.
pub(crate) fn find_category(conn: &Connection, title: &str) -> Result<Option<u64>> {
    conn.query_row(SELECT_CATEGORY_ID_SQL, params![title], |row| {
        row.get::<_, i64>(0)
    })
    .optional()
    .db_context("Failed to look up category")
    .map(|id| id.map(|id| id as u64))
}

pub(crate) fn select_category_by_id(
    conn: &Connection,
    id: u64,
) -> Result<Option<TrackerCategory>> {
    let title: Option<String> = conn
        .query_row(SELECT_CATEGORY_TITLE_SQL, params![id as i64], |row| row.get(0))
        .optional()
        .db_context("Failed to query category")?;

    title
        .map(|title| {
            Ok(TrackerCategory {
                id,
                title,
                trackers: select_trackers_by_category(conn, id)?,
            })
        })
        .transpose()
}

fn validate_title(title: &str) -> Result<&str> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TrackerError::validation("title").with_reason("Title cannot be empty"));
    }
    Ok(title)
}

/// Owns category rows. Deleting a category deletes its trackers.
pub struct CategoryStore {
    db: Database,
    listeners: Listeners,
}

impl CategoryStore {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            listeners: Listeners::new(),
        }
    }

    /// Registers a listener for committed category changes.
    pub fn subscribe(&self, listener: Rc<dyn ChangeListener>) -> Subscription {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.listeners.unsubscribe(subscription)
    }

    /// Creates a category. Titles are trimmed and must be unique.
    pub fn add(&self, title: &str) -> Result<TrackerCategory> {
        let title = validate_title(title)?;

        let tx = self
            .db
            .connection()
            .unchecked_transaction()
            .db_context("Failed to begin transaction")?;

        if find_category(&tx, title)?.is_some() {
            return Err(TrackerError::validation("title")
                .with_reason(format!("Category '{title}' already exists")));
        }

        tx.execute(INSERT_CATEGORY_SQL, params![title])
            .db_context("Failed to insert category")?;
        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!("event=category_add module=store id={id} title={title}");
        self.listeners.notify(StoreChange::Categories);

        Ok(TrackerCategory {
            id,
            title: title.to_string(),
            trackers: Vec::new(),
        })
    }

    /// Renames a category in place; its trackers stay attached.
    pub fn rename(&self, category: &TrackerCategory, new_title: &str) -> Result<TrackerCategory> {
        let new_title = validate_title(new_title)?;
        let conn = self.db.connection();

        let tx = conn
            .unchecked_transaction()
            .db_context("Failed to begin transaction")?;

        let id = find_category(&tx, &category.title)?
            .ok_or_else(|| TrackerError::not_found("Category", &category.title))?;

        if new_title == category.title {
            drop(tx);
            return select_category_by_id(conn, id)?
                .ok_or_else(|| TrackerError::not_found("Category", &category.title));
        }

        if find_category(&tx, new_title)?.is_some() {
            return Err(TrackerError::validation("title")
                .with_reason(format!("Category '{new_title}' already exists")));
        }

        tx.execute(RENAME_CATEGORY_SQL, params![new_title, id as i64])
            .db_context("Failed to rename category")?;
        tx.commit().db_context("Failed to commit transaction")?;

        debug!(
            "event=category_rename module=store id={id} from={} to={new_title}",
            category.title
        );
        self.listeners.notify(StoreChange::Categories);

        select_category_by_id(conn, id)?
            .ok_or_else(|| TrackerError::not_found("Category", new_title))
    }

    /// Deletes every tracker of the category, then the category itself, in
    /// one transaction. Listeners hear about it once. Unknown categories are
    /// ignored.
    pub fn delete(&self, category: &TrackerCategory) -> Result<()> {
        let tx = self
            .db
            .connection()
            .unchecked_transaction()
            .db_context("Failed to begin transaction")?;

        let Some(id) = find_category(&tx, &category.title)? else {
            return Ok(());
        };

        let trackers = tx
            .execute(DELETE_CATEGORY_TRACKERS_SQL, params![id as i64])
            .db_context("Failed to delete category trackers")?;
        tx.execute(DELETE_CATEGORY_SQL, params![id as i64])
            .db_context("Failed to delete category")?;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!(
            "event=category_delete module=store id={id} title={} trackers={trackers}",
            category.title
        );
        self.listeners.notify(StoreChange::Categories);
        Ok(())
    }

    /// All categories sorted by title, trackers loaded. This is the order
    /// sections appear in everywhere.
    pub fn list(&self) -> Result<Vec<TrackerCategory>> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(SELECT_CATEGORIES_SQL)
            .db_context("Failed to prepare query")?;

        let heads = stmt
            .query_map([], |row| {
                Ok((row.get::<_, i64>(0)? as u64, row.get::<_, String>(1)?))
            })
            .db_context("Failed to query categories")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read category row")?;

        heads
            .into_iter()
            .map(|(id, title)| {
                Ok(TrackerCategory {
                    id,
                    title,
                    trackers: select_trackers_by_category(conn, id)?,
                })
            })
            .collect()
    }

    pub fn get(&self, title: &str) -> Result<Option<TrackerCategory>> {
        let conn = self.db.connection();
        match find_category(conn, title.trim())? {
            Some(id) => select_category_by_id(conn, id),
            None => Ok(None),
        }
    }

    /// Returns the category with this title, creating it first if needed.
    pub fn get_or_add(&self, title: &str) -> Result<TrackerCategory> {
        match self.get(title)? {
            Some(category) => Ok(category),
            None => self.add(title),
        }
    }
}
