// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Instants bound to a time zone, with proleptic Gregorian fields.
//!
//! A [`CivilMoment`] is immutable. Field arithmetic returns a new value:
//!
//! - [`with_added`](CivilMoment::with_added) moves by whole fields with carry.
//!   Years, months and days move the wall clock and re-resolve it in the zone,
//!   so "one day later" keeps the time of day across a DST change. Hours and
//!   smaller move along the timeline.
//! - [`with_field`](CivilMoment::with_field) sets a field leniently: values out
//!   of range roll into the next larger field, so day 31 of February becomes
//!   early March.

use crate::instant::{Instant, TimeInstant};
use crate::zone::{format_offset, OffsetInfo, Zone};
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::cmp::Ordering;
use std::fmt;

/// A calendar field of a [`CivilMoment`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CalendarField {
    Year,
    /// Zero-based month, `0` is January.
    Month,
    DayOfMonth,
    Hour,
    Minute,
    Second,
    Millisecond,
}

/// Wall-clock fields in a zone, consistent with the absolute instant.
#[derive(Debug, Clone)]
pub struct CivilMoment {
    instant: Instant,
    zone: Zone,
    local: NaiveDateTime,
}

impl CivilMoment {
    // ── constructors ──────────────────────────────────────────────────

    /// Bind `instant` to `zone`.
    pub fn new(instant: Instant, zone: Zone) -> Self {
        let local = zone.local_at(instant);
        Self {
            instant,
            zone,
            local,
        }
    }

    /// The moment showing `local` on the wall clock of `zone`.
    ///
    /// See [`Zone::resolve_local`] for skipped and repeated wall times.
    pub fn from_local(local: NaiveDateTime, zone: Zone) -> Self {
        let instant = zone.resolve_local(local);
        Self::new(instant, zone)
    }

    /// Build from calendar fields, `month` is 1-based.
    ///
    /// Returns `None` for a date or time that does not exist in the
    /// Gregorian calendar, including `millisecond` values of 1000 or more.
    #[allow(clippy::too_many_arguments)]
    pub fn from_ymd_hms_milli(
        zone: Zone,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        millisecond: u32,
    ) -> Option<Self> {
        if millisecond >= 1000 {
            return None;
        }
        let local = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_milli_opt(
            hour,
            minute,
            second,
            millisecond,
        )?;
        Some(Self::from_local(local, zone))
    }

    /// Midnight of the given date, `month` is 1-based.
    pub fn from_ymd(zone: Zone, year: i32, month: u32, day: u32) -> Option<Self> {
        Self::from_ymd_hms_milli(zone, year, month, day, 0, 0, 0, 0)
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub fn instant(&self) -> Instant {
        self.instant
    }

    #[inline]
    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    /// Wall-clock date and time.
    #[inline]
    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    /// Offset of the zone at this moment.
    pub fn offset(&self) -> OffsetInfo {
        self.zone.offset_at(self.instant)
    }

    #[inline]
    pub fn year(&self) -> i32 {
        self.local.year()
    }

    /// Month, `1..=12`.
    #[inline]
    pub fn month(&self) -> u32 {
        self.local.month()
    }

    /// Month, `0..=11`.
    #[inline]
    pub fn month0(&self) -> u32 {
        self.local.month0()
    }

    #[inline]
    pub fn day(&self) -> u32 {
        self.local.day()
    }

    #[inline]
    pub fn hour(&self) -> u32 {
        self.local.hour()
    }

    #[inline]
    pub fn minute(&self) -> u32 {
        self.local.minute()
    }

    #[inline]
    pub fn second(&self) -> u32 {
        self.local.second()
    }

    #[inline]
    pub fn millisecond(&self) -> u32 {
        self.local.nanosecond() / 1_000_000
    }

    /// Value of `field`, months zero-based.
    pub fn get(&self, field: CalendarField) -> i64 {
        match field {
            CalendarField::Year => i64::from(self.year()),
            CalendarField::Month => i64::from(self.month0()),
            CalendarField::DayOfMonth => i64::from(self.day()),
            CalendarField::Hour => i64::from(self.hour()),
            CalendarField::Minute => i64::from(self.minute()),
            CalendarField::Second => i64::from(self.second()),
            CalendarField::Millisecond => i64::from(self.millisecond()),
        }
    }

    // ── transformations ───────────────────────────────────────────────

    /// Move `amount` units of `field`, negative moves backwards.
    ///
    /// Adding years or months clamps the day to the target month, so
    /// February 29 plus one year is February 28.
    pub fn with_added(&self, field: CalendarField, amount: i64) -> Self {
        let timeline = |unit: i64| {
            let instant = self
                .instant
                .saturating_add_millis(amount.saturating_mul(unit));
            Self::new(instant, self.zone.clone())
        };
        match field {
            CalendarField::Year => {
                self.at_local(shift_months(self.local, amount.saturating_mul(12)))
            }
            CalendarField::Month => self.at_local(shift_months(self.local, amount)),
            CalendarField::DayOfMonth => self.at_local(
                Duration::try_days(amount)
                    .and_then(|days| self.local.checked_add_signed(days))
                    .unwrap_or(saturated(amount)),
            ),
            CalendarField::Hour => timeline(3_600_000),
            CalendarField::Minute => timeline(60_000),
            CalendarField::Second => timeline(1_000),
            CalendarField::Millisecond => timeline(1),
        }
    }

    /// Set `field` to `value`, months zero-based, rolling over leniently.
    pub fn with_field(&self, field: CalendarField, value: i64) -> Self {
        let mut fields = [
            i64::from(self.year()),
            i64::from(self.month0()),
            i64::from(self.day()),
            i64::from(self.hour()),
            i64::from(self.minute()),
            i64::from(self.second()),
            i64::from(self.millisecond()),
        ];
        let index = match field {
            CalendarField::Year => 0,
            CalendarField::Month => 1,
            CalendarField::DayOfMonth => 2,
            CalendarField::Hour => 3,
            CalendarField::Minute => 4,
            CalendarField::Second => 5,
            CalendarField::Millisecond => 6,
        };
        fields[index] = value;
        self.at_local(compose(fields))
    }

    /// The same instant seen from another zone.
    pub fn with_zone(&self, zone: Zone) -> Self {
        Self::new(self.instant, zone)
    }

    /// Start of this moment's day in its zone.
    ///
    /// When midnight is skipped by a DST change, the first instant after the
    /// gap is returned.
    pub fn truncated(&self) -> Self {
        self.at_local(self.local.date().and_time(NaiveTime::MIN))
    }

    // ── ordering ──────────────────────────────────────────────────────

    /// Strictly earlier on the timeline.
    #[inline]
    pub fn is_before<T: TimeInstant + ?Sized>(&self, other: &T) -> bool {
        self.instant < other.instant()
    }

    /// Strictly later on the timeline.
    #[inline]
    pub fn is_after<T: TimeInstant + ?Sized>(&self, other: &T) -> bool {
        self.instant > other.instant()
    }

    fn at_local(&self, local: NaiveDateTime) -> Self {
        Self::from_local(local, self.zone.clone())
    }
}

/// Add a signed number of months, clamping the day, saturating at chrono's range.
fn shift_months(local: NaiveDateTime, months: i64) -> NaiveDateTime {
    let magnitude = u32::try_from(months.unsigned_abs()).ok().map(Months::new);
    let shifted = match magnitude {
        Some(m) if months >= 0 => local.checked_add_months(m),
        Some(m) => local.checked_sub_months(m),
        None => None,
    };
    shifted.unwrap_or(saturated(months))
}

fn saturated(direction: i64) -> NaiveDateTime {
    if direction < 0 {
        NaiveDateTime::MIN
    } else {
        NaiveDateTime::MAX
    }
}

/// Build a date-time from possibly out-of-range fields
/// `[year, month0, day, hour, minute, second, millisecond]`, carrying
/// overflow into larger fields.
fn compose([year, month0, day, hour, minute, second, millisecond]: [i64; 7]) -> NaiveDateTime {
    let year = year.saturating_add(month0.div_euclid(12));
    let month = month0.rem_euclid(12) as u32 + 1;
    let Some(first) = i32::try_from(year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, month, 1))
    else {
        return saturated(year);
    };
    let offset_millis = [
        (day.saturating_sub(1), 86_400_000),
        (hour, 3_600_000),
        (minute, 60_000),
        (second, 1_000),
        (millisecond, 1),
    ]
    .into_iter()
    .fold(0i64, |acc, (value, unit)| {
        acc.saturating_add(value.saturating_mul(unit))
    });
    Duration::try_milliseconds(offset_millis)
        .and_then(|offset| first.and_time(NaiveTime::MIN).checked_add_signed(offset))
        .unwrap_or(saturated(offset_millis))
}

impl TimeInstant for CivilMoment {
    #[inline]
    fn instant(&self) -> Instant {
        self.instant
    }
}

/// Equal when both the instant and the zone match.
impl PartialEq for CivilMoment {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant && self.zone == other.zone
    }
}

impl Eq for CivilMoment {}

/// Ordered by instant. The same instant in two different zones is
/// unordered; use [`compare`](crate::compare) for a total order.
impl PartialOrd for CivilMoment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.instant.cmp(&other.instant) {
            Ordering::Equal if self.zone != other.zone => None,
            ordering => Some(ordering),
        }
    }
}

impl fmt::Display for CivilMoment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}[{}]",
            self.local.format("%Y-%m-%dT%H:%M:%S%.3f"),
            format_offset(self.offset().utc_offset_millis() / 1000),
            self.zone,
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn ny() -> Zone {
        Zone::named("America/New_York").unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> CivilMoment {
        CivilMoment::from_ymd(ny(), y, m, d).unwrap()
    }

    #[test]
    fn fields_match_wall_clock() {
        let m = CivilMoment::from_ymd_hms_milli(ny(), 2024, 7, 4, 13, 45, 30, 250).unwrap();
        assert_eq!(m.year(), 2024);
        assert_eq!(m.month(), 7);
        assert_eq!(m.month0(), 6);
        assert_eq!(m.day(), 4);
        assert_eq!(m.hour(), 13);
        assert_eq!(m.minute(), 45);
        assert_eq!(m.second(), 30);
        assert_eq!(m.millisecond(), 250);
        assert_eq!(m.get(CalendarField::Month), 6);
        assert_eq!(m.instant().millis() % 1000, 250);
        assert!(m.offset().is_daylight());
    }

    #[test]
    fn nonexistent_dates_are_rejected() {
        assert!(CivilMoment::from_ymd(ny(), 2023, 2, 29).is_none());
        assert!(CivilMoment::from_ymd(ny(), 2024, 13, 1).is_none());
    }

    #[test]
    fn adding_years_clamps_leap_day() {
        let leap = ymd(2024, 2, 29);
        assert_eq!(leap.with_added(CalendarField::Year, 1), ymd(2025, 2, 28));
        assert_eq!(leap.with_added(CalendarField::Year, 4), ymd(2028, 2, 29));
        assert_eq!(leap.with_added(CalendarField::Year, -1), ymd(2023, 2, 28));
    }

    #[test]
    fn adding_months_carries_into_years() {
        let m = ymd(2023, 11, 30);
        assert_eq!(m.with_added(CalendarField::Month, 3), ymd(2024, 2, 29));
        assert_eq!(m.with_added(CalendarField::Month, -11), ymd(2022, 12, 30));
    }

    #[test]
    fn adding_days_keeps_wall_clock_across_dst() {
        let before = ymd(2024, 3, 9);
        let after = before.with_added(CalendarField::DayOfMonth, 2);
        assert_eq!(after, ymd(2024, 3, 11));
        assert_eq!(after.hour(), 0);
        assert_eq!(after.instant() - before.instant(), 47 * 3_600_000);
    }

    #[test]
    fn adding_hours_follows_timeline() {
        let midnight = ymd(2024, 3, 10);
        let later = midnight.with_added(CalendarField::Hour, 3);
        assert_eq!(later.hour(), 4);
        assert_eq!(later.instant() - midnight.instant(), 3 * 3_600_000);
        let back = later.with_added(CalendarField::Millisecond, -1);
        assert_eq!(back.hour(), 3);
        assert_eq!(back.minute(), 59);
        assert_eq!(back.millisecond(), 999);
    }

    #[test]
    fn setting_day_rolls_over_leniently() {
        let feb = ymd(2025, 2, 10);
        assert_eq!(feb.with_field(CalendarField::DayOfMonth, 31), ymd(2025, 3, 3));
        assert_eq!(feb.with_field(CalendarField::DayOfMonth, 0), ymd(2025, 1, 31));
        assert_eq!(feb.with_field(CalendarField::Month, 12), ymd(2026, 1, 10));
        assert_eq!(feb.with_field(CalendarField::Month, -1), ymd(2024, 12, 10));
        assert_eq!(feb.with_field(CalendarField::Hour, 25).day(), 11);
    }

    #[test]
    fn setting_year_on_leap_day_rolls_into_march() {
        let leap = ymd(2024, 2, 29);
        assert_eq!(leap.with_field(CalendarField::Year, 2025), ymd(2025, 3, 1));
    }

    #[test]
    fn transformations_do_not_touch_the_original() {
        let m = ymd(2020, 5, 17);
        let _ = m.with_added(CalendarField::Year, 3);
        let _ = m.with_field(CalendarField::DayOfMonth, 1);
        assert_eq!(m, ymd(2020, 5, 17));
    }

    #[test]
    fn truncation_zeroes_time_of_day() {
        let m = CivilMoment::from_ymd_hms_milli(ny(), 2024, 11, 3, 23, 59, 59, 999).unwrap();
        let t = m.truncated();
        assert_eq!((t.hour(), t.minute(), t.second(), t.millisecond()), (0, 0, 0, 0));
        assert_eq!((t.year(), t.month(), t.day()), (2024, 11, 3));
        assert_eq!(t.truncated(), t);
    }

    #[test]
    fn truncation_skips_missing_midnight() {
        // Havana springs forward at midnight.
        let havana = Zone::named("America/Havana").unwrap();
        let noon = CivilMoment::from_ymd_hms_milli(havana, 2024, 3, 10, 12, 0, 0, 0).unwrap();
        let start = noon.truncated();
        assert_eq!(start.day(), 10);
        assert_eq!(start.hour(), 1);
    }

    #[test]
    fn ordering_is_by_instant() {
        let a = ymd(2024, 1, 1);
        let b = ymd(2024, 1, 2);
        assert!(a < b);
        assert!(a.is_before(&b));
        assert!(b.is_after(&a));
        assert!(!a.is_after(&a));

        let same_instant = a.with_zone(Zone::utc());
        assert_ne!(a, same_instant);
        assert_eq!(a.partial_cmp(&same_instant), None);
        assert_eq!(a.instant(), same_instant.instant());
    }

    #[test]
    fn display_shows_offset_and_zone() {
        let m = CivilMoment::from_ymd_hms_milli(ny(), 2024, 7, 4, 9, 5, 0, 7).unwrap();
        assert_eq!(m.to_string(), "2024-07-04T09:05:00.007-04:00[America/New_York]");
        let ist = Zone::fixed(qtty::Seconds::new(19_800.0));
        assert_eq!(
            m.with_zone(ist).to_string(),
            "2024-07-04T18:35:00.007+05:30[UTC+05:30]"
        );
    }

    #[test]
    fn offsets_with_seconds_are_kept_apart() {
        let at_epoch = |seconds: f64| {
            CivilMoment::new(Instant::UNIX_EPOCH, Zone::fixed(qtty::Seconds::new(seconds)))
        };
        let lmt = at_epoch(-17_762.0);
        let rounded = at_epoch(-17_760.0);
        assert_ne!(lmt, rounded);
        assert_eq!(lmt.to_string(), "1969-12-31T19:03:58.000-04:56:02[UTC-04:56:02]");
        assert_eq!(rounded.to_string(), "1969-12-31T19:04:00.000-04:56[UTC-04:56]");
    }

    #[test]
    fn milliseconds_beyond_a_second_are_rejected() {
        assert!(CivilMoment::from_ymd_hms_milli(ny(), 2024, 1, 1, 0, 0, 59, 1500).is_none());
        assert!(CivilMoment::from_ymd_hms_milli(ny(), 2024, 1, 1, 0, 0, 59, 999).is_some());
    }
}
