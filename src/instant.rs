// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Absolute, zone-independent points in time.
//!
//! [`Instant`] counts milliseconds since the Unix epoch
//! (1970-01-01T00:00:00Z). It carries no calendar and no time zone; binding
//! it to a [`Zone`](crate::Zone) yields a [`CivilMoment`](crate::CivilMoment)
//! with Gregorian fields.
//!
//! [`TimeInstant`] is the seam used by the ordering helpers: anything that can
//! name the absolute instant it stands for can be compared with anything else.

use chrono::{DateTime, Utc};
use qtty::Seconds;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Milliseconds in one civil day without DST.
pub(crate) const MILLIS_PER_DAY: i64 = 86_400_000;

/// Convert a quantity in seconds to whole milliseconds, rounding to nearest.
#[inline]
pub(crate) fn seconds_to_millis(seconds: Seconds) -> i64 {
    (seconds.value() * 1000.0).round() as i64
}

// ═══════════════════════════════════════════════════════════════════════════
// Instant
// ═══════════════════════════════════════════════════════════════════════════

/// A point on the UTC timeline with millisecond resolution.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    millis: i64,
}

impl Instant {
    /// 1970-01-01T00:00:00Z.
    pub const UNIX_EPOCH: Self = Self::from_millis(0);

    // ── constructors ──────────────────────────────────────────────────

    /// Create from milliseconds since the Unix epoch.
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    /// The current system time.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Milliseconds since the Unix epoch.
    #[inline]
    pub const fn millis(&self) -> i64 {
        self.millis
    }

    // ── UTC helpers ───────────────────────────────────────────────────

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` if the value falls outside chrono's representable range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.millis)
    }

    /// Build an instant from a `chrono::DateTime<Utc>`.
    ///
    /// Sub-millisecond precision is truncated.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        Self::from_millis(datetime.timestamp_millis())
    }

    // ── min / max ─────────────────────────────────────────────────────

    /// Element-wise minimum.
    #[inline]
    pub const fn min(self, other: Self) -> Self {
        if self.millis <= other.millis {
            self
        } else {
            other
        }
    }

    /// Element-wise maximum.
    #[inline]
    pub const fn max(self, other: Self) -> Self {
        if self.millis >= other.millis {
            self
        } else {
            other
        }
    }

    /// Shift by a signed number of milliseconds, saturating at the `i64` range.
    #[inline]
    pub const fn saturating_add_millis(self, millis: i64) -> Self {
        Self::from_millis(self.millis.saturating_add(millis))
    }
}

// ── Display ───────────────────────────────────────────────────────────────

impl std::fmt::Display for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_utc() {
            Some(utc) => write!(f, "{}", utc.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
            None => write!(f, "{} ms since epoch", self.millis),
        }
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for Instant {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_i64(self.millis)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = i64::deserialize(deserializer)?;
        Ok(Self::from_millis(millis))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<Seconds> for Instant {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Seconds) -> Self::Output {
        self.saturating_add_millis(seconds_to_millis(rhs))
    }
}

impl AddAssign<Seconds> for Instant {
    #[inline]
    fn add_assign(&mut self, rhs: Seconds) {
        *self = *self + rhs;
    }
}

impl Sub<Seconds> for Instant {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Seconds) -> Self::Output {
        self.saturating_add_millis(seconds_to_millis(rhs).saturating_neg())
    }
}

impl SubAssign<Seconds> for Instant {
    #[inline]
    fn sub_assign(&mut self, rhs: Seconds) {
        *self = *self - rhs;
    }
}

/// Signed elapsed milliseconds, `self - rhs`.
impl Sub for Instant {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.millis.saturating_sub(rhs.millis)
    }
}

// ── From/Into ─────────────────────────────────────────────────────────────

impl From<DateTime<Utc>> for Instant {
    #[inline]
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_utc(datetime)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TimeInstant trait
// ═══════════════════════════════════════════════════════════════════════════

/// Trait for values that denote an absolute point in time.
///
/// [`before`](crate::before), [`after`](crate::after) and
/// [`compare`](crate::compare) accept any pair of implementors, so raw
/// instants, civil moments and chrono date-times mix freely.
pub trait TimeInstant {
    /// The absolute instant this value stands for.
    fn instant(&self) -> Instant;
}

impl TimeInstant for Instant {
    #[inline]
    fn instant(&self) -> Instant {
        *self
    }
}

impl<Tz: chrono::TimeZone> TimeInstant for DateTime<Tz> {
    #[inline]
    fn instant(&self) -> Instant {
        Instant::from_millis(self.timestamp_millis())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
