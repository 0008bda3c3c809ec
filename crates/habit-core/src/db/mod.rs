//! SQLite connection handle shared by every store.
//!
//! A [`Database`] is a cheap, clonable handle around one
//! [`rusqlite::Connection`]. Stores receive it in their constructors, so the
//! caller decides which file (or in-memory database) they operate on.
//!
//! The handle is `!Send`: all stores built from it must be driven from the
//! thread that opened it. Callers that need the data elsewhere should route
//! their commands to that thread.

use std::{path::Path, rc::Rc};

use log::{error, info};
use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result, TrackerError};

pub mod migrations;

/// Shared connection to the tracker database.
#[derive(Clone)]
pub struct Database {
    connection: Rc<Connection>,
}

impl Database {
    /// Opens (creating if needed) the database file and initializes the
    /// schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let connection = match Connection::open(path) {
            Ok(connection) => connection,
            Err(e) => {
                error!("event=db_open module=db status=error mode=file error={e}");
                return Err(TrackerError::persistence("Failed to open database connection")
                    .with_source(e));
            }
        };

        let db = Self::bootstrap(connection)?;
        info!(
            "event=db_open module=db status=ok mode=file path={}",
            path.display()
        );
        Ok(db)
    }

    /// Opens a private in-memory database. Clones of the handle share it.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self::bootstrap(connection)?;
        info!("event=db_open module=db status=ok mode=memory");
        Ok(db)
    }

    fn bootstrap(connection: Connection) -> Result<Self> {
        let db = Self {
            connection: Rc::new(connection),
        };
        db.initialize_schema()?;
        Ok(db)
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.connection
    }
}
