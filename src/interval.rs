// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Intervals between two civil moments.

use crate::between::time_between;
use crate::instant::TimeInstant;
use crate::moment::CivilMoment;
use crate::unit::IntervalUnit;
use std::fmt;

/// The span from `start` to `end`.
///
/// # Examples
///
/// ```
/// use civildiff::{CivilMoment, Interval, IntervalUnit, Zone};
///
/// let zone = Zone::named("Europe/Madrid").unwrap();
/// let start = CivilMoment::from_ymd(zone.clone(), 2024, 1, 31).unwrap();
/// let end = CivilMoment::from_ymd(zone, 2024, 4, 30).unwrap();
/// let interval = Interval::new(start, end);
///
/// assert_eq!(interval.length(IntervalUnit::Months), 2);
/// assert_eq!(interval.length(IntervalUnit::Days), 90);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub start: CivilMoment,
    pub end: CivilMoment,
}

impl Interval {
    pub fn new(start: CivilMoment, end: CivilMoment) -> Self {
        Interval { start, end }
    }

    /// Whole units from start to end; negative when `end` precedes `start`.
    pub fn length(&self, unit: IntervalUnit) -> i64 {
        time_between(&self.start, &self.end, unit)
    }

    /// Whether `moment` lies in `[start, end)`.
    pub fn contains<T: TimeInstant + ?Sized>(&self, moment: &T) -> bool {
        let instant = moment.instant();
        self.start.instant() <= instant && instant < self.end.instant()
    }

    /// Returns the overlapping sub-interval between `self` and `other`.
    ///
    /// Intervals are treated as half-open ranges `[start, end)`: if one ends
    /// exactly when the other starts, the intersection is empty and `None`
    /// is returned. Each bound keeps the zone of the interval it came from.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = if self.start.instant() >= other.start.instant() {
            &self.start
        } else {
            &other.start
        };
        let end = if self.end.instant() <= other.end.instant() {
            &self.end
        } else {
            &other.end
        };

        if start.instant() < end.instant() {
            Some(Self::new(start.clone(), end.clone()))
        } else {
            None
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
