// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-zone data providers.
//!
//! A [`Zone`] answers one question: which UTC offset, and how much of it is
//! daylight saving, applies at a given [`Instant`]. The answer comes from a
//! [`ZoneRules`] provider, so callers can swap the IANA database for
//! synthetic rules.
//!
//! # Providers
//!
//! | Provider | Source |
//! |----------|--------|
//! | [`chrono_tz::Tz`] | IANA time-zone database |
//! | [`Zone::fixed`] | constant offset, never in DST |
//! | [`AnnualDstRule`] | standard offset plus one yearly DST window |

use crate::error::{Error, Result};
use crate::instant::{seconds_to_millis, Instant, MILLIS_PER_DAY};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::{OffsetComponents, Tz};
use qtty::Seconds;
use std::fmt;
use std::sync::Arc;

// ═══════════════════════════════════════════════════════════════════════════
// OffsetInfo
// ═══════════════════════════════════════════════════════════════════════════

/// Offset of a zone at one instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OffsetInfo {
    utc_offset: Seconds,
    savings: Seconds,
}

impl OffsetInfo {
    /// `utc_offset` is the total offset (local − UTC), `savings` the part of
    /// it that is daylight saving.
    #[inline]
    pub const fn new(utc_offset: Seconds, savings: Seconds) -> Self {
        Self {
            utc_offset,
            savings,
        }
    }

    /// Total offset, local − UTC.
    #[inline]
    pub const fn utc_offset(&self) -> Seconds {
        self.utc_offset
    }

    /// Daylight-saving amount included in [`utc_offset`](Self::utc_offset).
    #[inline]
    pub const fn savings(&self) -> Seconds {
        self.savings
    }

    /// Offset with the daylight-saving part removed.
    #[inline]
    pub fn standard_offset(&self) -> Seconds {
        self.utc_offset - self.savings
    }

    /// True when the instant lies within a daylight-saving period.
    #[inline]
    pub fn is_daylight(&self) -> bool {
        self.savings.value() != 0.0
    }

    #[inline]
    pub(crate) fn utc_offset_millis(&self) -> i64 {
        seconds_to_millis(self.utc_offset)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ZoneRules
// ═══════════════════════════════════════════════════════════════════════════

/// A source of time-zone offsets.
///
/// Implementations must be pure: the same instant always yields the same
/// [`OffsetInfo`].
pub trait ZoneRules: fmt::Debug + Send + Sync {
    /// Identifier, e.g. `"Europe/Madrid"`. Two zones with equal identifiers
    /// are treated as the same zone.
    fn id(&self) -> &str;

    /// Offset in effect at `instant`.
    fn offset_at(&self, instant: Instant) -> OffsetInfo;
}

impl ZoneRules for Tz {
    fn id(&self) -> &str {
        Tz::name(*self)
    }

    fn offset_at(&self, instant: Instant) -> OffsetInfo {
        let utc = match instant.to_utc() {
            Some(utc) => utc.naive_utc(),
            None if instant.millis() < 0 => NaiveDateTime::MIN,
            None => NaiveDateTime::MAX,
        };
        let offset = self.offset_from_utc_datetime(&utc);
        let base = offset.base_utc_offset().num_seconds();
        let dst = offset.dst_offset().num_seconds();
        OffsetInfo::new(
            Seconds::new((base + dst) as f64),
            Seconds::new(dst as f64),
        )
    }
}

/// Constant offset, never in daylight saving time.
#[derive(Debug, Clone)]
struct Fixed {
    id: String,
    offset: FixedOffset,
}

impl Fixed {
    fn new(offset: FixedOffset) -> Self {
        let id = format!("UTC{}", format_offset(i64::from(offset.local_minus_utc())));
        Self { id, offset }
    }
}

impl ZoneRules for Fixed {
    fn id(&self) -> &str {
        &self.id
    }

    fn offset_at(&self, _instant: Instant) -> OffsetInfo {
        OffsetInfo::new(
            Seconds::new(self.offset.local_minus_utc() as f64),
            Seconds::new(0.0),
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// AnnualDstRule
// ═══════════════════════════════════════════════════════════════════════════

/// Wall-clock point of a yearly transition, in local standard time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Transition {
    pub month: u32,
    pub day: u32,
    pub hour: u32,
}

impl Transition {
    pub const fn new(month: u32, day: u32, hour: u32) -> Self {
        Self { month, day, hour }
    }

    fn in_year(&self, year: i32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)?.and_hms_opt(self.hour, 0, 0)
    }
}

/// Synthetic zone with one daylight-saving window per year.
///
/// Daylight time runs from `start` (inclusive) to `end` (exclusive), both
/// read in local standard time. When `start` falls after `end` in the year
/// the window wraps the new year, as in the southern hemisphere.
///
/// ```
/// use civildiff::{AnnualDstRule, Transition, Zone};
/// use qtty::Seconds;
///
/// let zone = Zone::from_rules(AnnualDstRule::new(
///     "Test/Northern",
///     Seconds::new(3600.0),
///     Seconds::new(3600.0),
///     Transition::new(3, 31, 2),
///     Transition::new(10, 27, 2),
/// ));
/// assert_eq!(zone.id(), "Test/Northern");
/// ```
#[derive(Debug, Clone)]
pub struct AnnualDstRule {
    id: String,
    standard_offset: Seconds,
    savings: Seconds,
    start: Transition,
    end: Transition,
}

impl AnnualDstRule {
    pub fn new(
        id: impl Into<String>,
        standard_offset: Seconds,
        savings: Seconds,
        start: Transition,
        end: Transition,
    ) -> Self {
        Self {
            id: id.into(),
            standard_offset,
            savings,
            start,
            end,
        }
    }

    fn in_daylight(&self, instant: Instant) -> bool {
        let local_ms = instant
            .millis()
            .saturating_add(seconds_to_millis(self.standard_offset));
        let local = naive_from_millis(local_ms);
        let year = local.year();
        let (Some(start), Some(end)) = (self.start.in_year(year), self.end.in_year(year)) else {
            return false;
        };
        if start <= end {
            start <= local && local < end
        } else {
            local >= start || local < end
        }
    }
}

impl ZoneRules for AnnualDstRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn offset_at(&self, instant: Instant) -> OffsetInfo {
        if self.savings.value() != 0.0 && self.in_daylight(instant) {
            OffsetInfo::new(self.standard_offset + self.savings, self.savings)
        } else {
            OffsetInfo::new(self.standard_offset, Seconds::new(0.0))
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Zone
// ═══════════════════════════════════════════════════════════════════════════

/// Shared handle to a [`ZoneRules`] provider.
///
/// Cloning is cheap. Zones compare equal when their identifiers match.
#[derive(Clone)]
pub struct Zone {
    rules: Arc<dyn ZoneRules>,
}

impl Zone {
    /// Coordinated Universal Time.
    pub fn utc() -> Self {
        Self::from_rules(Tz::UTC)
    }

    /// A constant offset from UTC, with no daylight saving.
    ///
    /// Offsets beyond ±24 h are clamped.
    pub fn fixed(offset: Seconds) -> Self {
        let seconds = offset.value().round().clamp(-86_399.0, 86_399.0) as i32;
        match FixedOffset::east_opt(seconds) {
            Some(offset) => Self::from_rules(Fixed::new(offset)),
            None => Self::utc(),
        }
    }

    /// Look up an IANA zone by name, e.g. `"America/New_York"`.
    pub fn named(name: &str) -> Result<Self> {
        name.parse::<Tz>()
            .map(Self::from_rules)
            .map_err(|_| Error::UnknownZone(name.to_owned()))
    }

    /// Wrap a custom provider.
    pub fn from_rules<R: ZoneRules + 'static>(rules: R) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        self.rules.id()
    }

    #[inline]
    pub fn offset_at(&self, instant: Instant) -> OffsetInfo {
        self.rules.offset_at(instant)
    }

    /// Fixed-offset zone at this zone's standard offset at `instant`.
    pub fn standard_zone_at(&self, instant: Instant) -> Self {
        Self::fixed(self.offset_at(instant).standard_offset())
    }

    /// Local wall-clock fields of `instant` in this zone.
    pub fn local_at(&self, instant: Instant) -> NaiveDateTime {
        let offset = self.offset_at(instant).utc_offset_millis();
        naive_from_millis(instant.millis().saturating_add(offset))
    }

    /// Map a wall-clock date-time in this zone to an instant.
    ///
    /// Repeated wall times (DST fall-back) resolve to the earlier instant.
    /// Skipped wall times (DST spring-forward) are read with the offset in
    /// effect before the transition, landing past the gap by its width.
    pub fn resolve_local(&self, local: NaiveDateTime) -> Instant {
        let local_ms = local.and_utc().timestamp_millis();
        let offset_before = self
            .offset_at(Instant::from_millis(local_ms.saturating_sub(MILLIS_PER_DAY)))
            .utc_offset_millis();
        let offset_after = self
            .offset_at(Instant::from_millis(local_ms.saturating_add(MILLIS_PER_DAY)))
            .utc_offset_millis();

        let candidate = |offset: i64| {
            let instant = Instant::from_millis(local_ms.saturating_sub(offset));
            (self.offset_at(instant).utc_offset_millis() == offset).then_some(instant)
        };

        match (candidate(offset_before), candidate(offset_after)) {
            (Some(a), Some(b)) => a.min(b),
            (Some(one), None) | (None, Some(one)) => one,
            (None, None) => Instant::from_millis(local_ms.saturating_sub(offset_before)),
        }
    }
}

impl fmt::Debug for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Zone").field(&self.id()).finish()
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl PartialEq for Zone {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Zone {}

impl From<Tz> for Zone {
    fn from(tz: Tz) -> Self {
        Self::from_rules(tz)
    }
}

/// The host's configured time zone.
///
/// Falls back to UTC when the host zone cannot be determined or is not in
/// the bundled IANA database. Only meant for the edges of an application;
/// every computation in this crate takes its zone explicitly.
pub fn default_time_zone() -> Zone {
    match iana_time_zone::get_timezone() {
        Ok(name) => match Zone::named(&name) {
            Ok(zone) => zone,
            Err(_err) => {
                warn!("host time zone is not usable, falling back to UTC: {_err}");
                Zone::utc()
            }
        },
        Err(_err) => {
            warn!("failed to get host time zone, falling back to UTC: {_err}");
            Zone::utc()
        }
    }
}

/// `±HH:MM`, or `±HH:MM:SS` when the offset has a seconds part.
pub(crate) fn format_offset(seconds: i64) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let seconds = seconds.unsigned_abs();
    let (h, m, s) = (seconds / 3600, seconds / 60 % 60, seconds % 60);
    if s == 0 {
        format!("{sign}{h:02}:{m:02}")
    } else {
        format!("{sign}{h:02}:{m:02}:{s:02}")
    }
}

/// Wall-clock fields of a millisecond count read as UTC, saturating at
/// chrono's range.
pub(crate) fn naive_from_millis(millis: i64) -> NaiveDateTime {
    match DateTime::from_timestamp_millis(millis) {
        Some(datetime) => datetime.naive_utc(),
        None if millis < 0 => NaiveDateTime::MIN,
        None => NaiveDateTime::MAX,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
