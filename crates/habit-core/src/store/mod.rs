//! Stores mapping domain values to SQLite rows.
//!
//! Each store takes a [`Database`](crate::db::Database) handle in its
//! constructor and owns one kind of record:
//!
//! - [`CategoryStore`]: categories, with cascading delete of their trackers
//! - [`TrackerStore`]: trackers and their strict decoding
//! - [`RecordStore`]: completion marks
//!
//! Mutations run in their own transaction and notify the store's listeners
//! once after commit (see [`observer`]).

pub mod category_store;
pub mod observer;
pub mod record_store;
pub mod tracker_store;

pub use category_store::CategoryStore;
pub use observer::{ChangeListener, Listeners, StoreChange, Subscription};
pub use record_store::RecordStore;
pub use tracker_store::{StoredTracker, TrackerStore};
