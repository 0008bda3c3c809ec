//! Completion marks.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::TrackerId;

/// A tracker was completed on `check_date`. At most one exists per pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackerRecord {
    pub tracker_id: TrackerId,
    pub check_date: Date,
}
