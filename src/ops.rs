// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Ordering, construction and truncation helpers.

use crate::instant::{Instant, TimeInstant};
use crate::moment::CivilMoment;
use crate::zone::Zone;
use std::cmp::Ordering;

/// True if `a` is strictly earlier than `b`.
#[inline]
pub fn before<A, B>(a: &A, b: &B) -> bool
where
    A: TimeInstant + ?Sized,
    B: TimeInstant + ?Sized,
{
    a.instant() < b.instant()
}

/// True if `a` is strictly later than `b`.
#[inline]
pub fn after<A, B>(a: &A, b: &B) -> bool
where
    A: TimeInstant + ?Sized,
    B: TimeInstant + ?Sized,
{
    a.instant() > b.instant()
}

/// Three-way comparison by absolute instant; zones are ignored.
#[inline]
pub fn compare<A, B>(a: &A, b: &B) -> Ordering
where
    A: TimeInstant + ?Sized,
    B: TimeInstant + ?Sized,
{
    a.instant().cmp(&b.instant())
}

/// Bind `instant` to `zone`.
#[inline]
pub fn date_to_civil_moment(instant: Instant, zone: &Zone) -> CivilMoment {
    CivilMoment::new(instant, zone.clone())
}

/// Zero the time of day of `moment` in place and hand it back.
///
/// Clone first to keep the original:
///
/// ```
/// use civildiff::{truncate_time, CivilMoment, Zone};
///
/// let moment = CivilMoment::from_ymd_hms_milli(Zone::utc(), 2024, 5, 6, 7, 8, 9, 10).unwrap();
/// let mut copy = moment.clone();
/// truncate_time(&mut copy);
/// assert_eq!(copy.hour(), 0);
/// assert_eq!(moment.hour(), 7);
/// ```
pub fn truncate_time(moment: &mut CivilMoment) -> &mut CivilMoment {
    *moment = moment.truncated();
    moment
}

/// Move `instant` in place to the start of its day in `zone` and hand it back.
pub fn truncate_instant<'a>(instant: &'a mut Instant, zone: &Zone) -> &'a mut Instant {
    *instant = date_to_civil_moment(*instant, zone).truncated().instant();
    instant
}
