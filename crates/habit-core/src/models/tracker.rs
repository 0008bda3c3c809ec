//! Tracker model definition and related functionality.

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Color, Schedule};
use crate::error::{Result, TrackerError};

/// Opaque, globally unique tracker identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackerId(Uuid);

impl TrackerId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TrackerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for TrackerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A habit (recurring on weekdays) or a one-off event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tracker {
    pub id: TrackerId,

    /// Display name, never empty
    pub name: String,

    pub color: Color,

    /// Single-grapheme label shown next to the name
    pub emoji: String,

    /// Weekdays a habit is due on; always `None` for events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,

    pub is_habit: bool,
}

impl Tracker {
    /// A recurring tracker with a fresh id.
    pub fn habit(
        name: impl Into<String>,
        color: Color,
        emoji: impl Into<String>,
        schedule: Schedule,
    ) -> Self {
        Self {
            id: TrackerId::new(),
            name: name.into(),
            color,
            emoji: emoji.into(),
            schedule: Some(schedule),
            is_habit: true,
        }
    }

    /// A one-off tracker with a fresh id.
    pub fn event(name: impl Into<String>, color: Color, emoji: impl Into<String>) -> Self {
        Self {
            id: TrackerId::new(),
            name: name.into(),
            color,
            emoji: emoji.into(),
            schedule: None,
            is_habit: false,
        }
    }

    /// Whether a habit is due on `date`. Events are never "scheduled".
    pub fn is_scheduled_on(&self, date: Date) -> bool {
        self.is_habit
            && self
                .schedule
                .as_ref()
                .is_some_and(|schedule| schedule.includes(date))
    }

    /// The editable part of this tracker.
    pub fn attributes(&self) -> TrackerAttributes {
        TrackerAttributes {
            name: self.name.clone(),
            color: self.color,
            emoji: self.emoji.clone(),
            schedule: self.schedule.clone(),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        validate_fields(&self.name, &self.emoji, self.schedule.as_ref(), self.is_habit)
    }
}

/// Replacement values for a tracker update. The habit flag is fixed at
/// creation and is not part of an update.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerAttributes {
    pub name: String,
    pub color: Color,
    pub emoji: String,
    pub schedule: Option<Schedule>,
}

impl TrackerAttributes {
    pub(crate) fn validate(&self, is_habit: bool) -> Result<()> {
        validate_fields(&self.name, &self.emoji, self.schedule.as_ref(), is_habit)
    }
}

fn validate_fields(
    name: &str,
    emoji: &str,
    schedule: Option<&Schedule>,
    is_habit: bool,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(TrackerError::validation("name").with_reason("Name cannot be empty"));
    }
    if emoji.trim().is_empty() {
        return Err(TrackerError::validation("emoji").with_reason("Emoji cannot be empty"));
    }
    match (is_habit, schedule) {
        (true, None) => Err(TrackerError::validation("schedule")
            .with_reason("A habit needs at least one scheduled weekday")),
        (true, Some(days)) if days.is_empty() => Err(TrackerError::validation("schedule")
            .with_reason("A habit needs at least one scheduled weekday")),
        (false, Some(_)) => Err(TrackerError::validation("schedule")
            .with_reason("An event cannot have a schedule")),
        _ => Ok(()),
    }
}
