// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Whole-unit differences between two moments.
//!
//! [`time_between`] reports `end − start` in the requested unit, counting
//! only completed units (rounded toward zero).
//!
//! # Daylight saving
//!
//! Years, months, weeks and days are everyday differences: midnight to the
//! next midnight is one day even when a DST change makes it 23 or 25 hours
//! long. Both operands are first passed through [`adjust_dst`], which adds the
//! active savings back so the timeline looks DST-free. Hours, minutes and
//! seconds measure real elapsed time and skip that step.
//!
//! Milliseconds also go through [`adjust_dst`]: across a DST change they
//! report the DST-free length, not the elapsed one.
//!
//! ```
//! use civildiff::{time_between, CivilMoment, IntervalUnit, Zone};
//!
//! let ny = Zone::named("America/New_York").unwrap();
//! let before = CivilMoment::from_ymd(ny.clone(), 2024, 3, 10).unwrap();
//! let after = CivilMoment::from_ymd(ny, 2024, 3, 11).unwrap();
//!
//! assert_eq!(time_between(&before, &after, IntervalUnit::Days), 1);
//! assert_eq!(time_between(&before, &after, IntervalUnit::Hours), 23);
//! ```

use crate::error::{Error, Result};
use crate::instant::Instant;
use crate::moment::{CalendarField, CivilMoment};
use crate::unit::{IntervalUnit, CHAIN_FACTORS};
use crate::zone::Zone;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use qtty::Seconds;

/// Shift `moment` by its zone's daylight savings, if any is in effect, and
/// bind the result to `reference`.
///
/// Outside daylight time the instant is kept as is.
pub fn adjust_dst(moment: &CivilMoment, reference: &Zone) -> CivilMoment {
    let offset = moment.offset();
    let savings = if offset.is_daylight() {
        offset.savings()
    } else {
        Seconds::new(0.0)
    };
    trace!(
        "neutralizing {moment}: adding {} s of daylight savings",
        savings.value()
    );
    CivilMoment::new(moment.instant() + savings, reference.clone())
}

/// Difference `end − start` in `unit`, rounded toward zero.
///
/// Returns `0` whenever less than one full unit separates the operands. The
/// operands may live in different zones.
pub fn time_between(start: &CivilMoment, end: &CivilMoment, unit: IntervalUnit) -> i64 {
    let result = if unit.neutralizes_dst() {
        // Neutralized moments are read at the standard offset of the start's
        // zone, where their fields equal the unshifted wall-clock fields.
        let reference = start.zone().standard_zone_at(start.instant());
        let u1 = adjust_dst(start, &reference);
        let u2 = adjust_dst(end, &reference);
        measure(&u1, &u2, unit)
    } else {
        measure(start, end, unit)
    };
    debug!("{unit} between {start} and {end}: {result}");
    result
}

/// [`time_between`] for raw instants, both read in `zone`.
pub fn time_between_instants(
    start: Instant,
    end: Instant,
    unit: IntervalUnit,
    zone: &Zone,
) -> i64 {
    time_between(
        &CivilMoment::new(start, zone.clone()),
        &CivilMoment::new(end, zone.clone()),
        unit,
    )
}

/// [`time_between`] for two formatted wall-clock times in `zone`.
///
/// `format` uses chrono's strftime syntax, e.g. `"%Y/%m/%d"`. Formats without
/// a time of day denote midnight.
///
/// # Errors
///
/// [`Error::Parse`] if either text does not match `format`.
pub fn time_between_str(
    start: &str,
    end: &str,
    unit: IntervalUnit,
    format: &str,
    zone: &Zone,
) -> Result<i64> {
    let start = parse_civil_moment(start, format, zone)?;
    let end = parse_civil_moment(end, format, zone)?;
    Ok(time_between(&start, &end, unit))
}

/// Parse a wall-clock time in `zone` with a chrono strftime `format`.
///
/// When `format` carries an offset (`%z`, `%:z`) the text denotes that exact
/// instant, which is then viewed in `zone`.
///
/// # Errors
///
/// [`Error::Parse`] if `text` does not match `format`.
pub fn parse_civil_moment(text: &str, format: &str, zone: &Zone) -> Result<CivilMoment> {
    if let Ok(datetime) = DateTime::parse_from_str(text, format) {
        let instant = Instant::from_millis(datetime.timestamp_millis());
        return Ok(CivilMoment::new(instant, zone.clone()));
    }
    let local = match NaiveDateTime::parse_from_str(text, format) {
        Ok(local) => local,
        Err(source) => match NaiveDate::parse_from_str(text, format) {
            Ok(date) => date.and_time(NaiveTime::MIN),
            Err(_) => {
                debug!("failed to parse {text:?} with {format:?}: {source}");
                return Err(Error::Parse {
                    input: text.to_owned(),
                    format: format.to_owned(),
                    source,
                });
            }
        },
    };
    Ok(CivilMoment::from_local(local, zone.clone()))
}

fn measure(u1: &CivilMoment, u2: &CivilMoment, unit: IntervalUnit) -> i64 {
    match unit.chain_depth() {
        Some(depth) => CHAIN_FACTORS[..depth]
            .iter()
            .fold(u2.instant() - u1.instant(), |diff, factor| diff / factor),
        None => calendar_between(u1, u2, unit),
    }
}

/// Years or months by field subtraction, corrected so a unit only counts
/// once a moment that many units after `u1` would not overshoot `u2`.
fn calendar_between(u1: &CivilMoment, u2: &CivilMoment, unit: IntervalUnit) -> i64 {
    let raw_years = i64::from(u2.year()) - i64::from(u1.year());

    if unit == IntervalUnit::Years {
        let shifted = u1.with_added(CalendarField::Year, raw_years);
        return if raw_years > 0 && shifted.is_after(u2) {
            raw_years - 1
        } else if raw_years < 0 && shifted.is_before(u2) {
            raw_years + 1
        } else {
            raw_years
        };
    }

    let aligned = u2.with_field(CalendarField::DayOfMonth, i64::from(u1.day()));
    let months = 12 * raw_years + i64::from(u2.month0()) - i64::from(u1.month0());
    if aligned.is_after(u2) && months > 0 {
        months - 1
    } else if aligned.is_before(u2) && months < 0 {
        months + 1
    } else {
        months
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
