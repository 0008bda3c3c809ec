//! Tracker category model.

use serde::{Deserialize, Serialize};

use super::Tracker;

/// A named group of trackers.
///
/// The title is the natural key: two categories compare equal when their
/// titles match, whatever trackers they hold. `id` is the storage row and
/// only keeps ownership links stable across renames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerCategory {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trackers: Vec<Tracker>,
}

impl PartialEq for TrackerCategory {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
    }
}

impl Eq for TrackerCategory {}
