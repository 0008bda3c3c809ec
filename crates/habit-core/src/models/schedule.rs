//! Weekday schedules for habit trackers.

use std::{collections::BTreeSet, fmt, str::FromStr};

use jiff::civil::{Date, Weekday};
use serde::{Deserialize, Serialize};

use crate::{error::TrackerError, marshal};

/// Day of the week, ordered Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekDay {
    /// Every day, in canonical order.
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
        WeekDay::Sunday,
    ];

    /// Three-letter tag used in the persisted schedule string.
    pub fn as_str(&self) -> &'static str {
        match self {
            WeekDay::Monday => "Mon",
            WeekDay::Tuesday => "Tue",
            WeekDay::Wednesday => "Wed",
            WeekDay::Thursday => "Thu",
            WeekDay::Friday => "Fri",
            WeekDay::Saturday => "Sat",
            WeekDay::Sunday => "Sun",
        }
    }

    /// The weekday a calendar date falls on.
    pub fn of(date: Date) -> Self {
        date.weekday().into()
    }
}

impl From<Weekday> for WeekDay {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Monday => WeekDay::Monday,
            Weekday::Tuesday => WeekDay::Tuesday,
            Weekday::Wednesday => WeekDay::Wednesday,
            Weekday::Thursday => WeekDay::Thursday,
            Weekday::Friday => WeekDay::Friday,
            Weekday::Saturday => WeekDay::Saturday,
            Weekday::Sunday => WeekDay::Sunday,
        }
    }
}

impl FromStr for WeekDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mon" | "monday" => Ok(WeekDay::Monday),
            "tue" | "tuesday" => Ok(WeekDay::Tuesday),
            "wed" | "wednesday" => Ok(WeekDay::Wednesday),
            "thu" | "thursday" => Ok(WeekDay::Thursday),
            "fri" | "friday" => Ok(WeekDay::Friday),
            "sat" | "saturday" => Ok(WeekDay::Saturday),
            "sun" | "sunday" => Ok(WeekDay::Sunday),
            _ => Err(format!("Invalid weekday: {s}")),
        }
    }
}

impl fmt::Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of weekdays a habit is scheduled on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule(BTreeSet<WeekDay>);

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every day of the week.
    pub fn daily() -> Self {
        WeekDay::ALL.into_iter().collect()
    }

    pub fn insert(&mut self, day: WeekDay) -> bool {
        self.0.insert(day)
    }

    pub fn contains(&self, day: WeekDay) -> bool {
        self.0.contains(&day)
    }

    /// Whether the weekday of `date` is part of this schedule.
    pub fn includes(&self, date: Date) -> bool {
        self.contains(WeekDay::of(date))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Days in Monday-first order.
    pub fn iter(&self) -> impl Iterator<Item = WeekDay> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<WeekDay> for Schedule {
    fn from_iter<I: IntoIterator<Item = WeekDay>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&marshal::schedule_to_string(self))
    }
}

impl FromStr for Schedule {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        marshal::string_to_schedule(s)
    }
}
