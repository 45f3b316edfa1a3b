// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar differences between timezone-aware moments.
//!
//! [`time_between`] measures how many whole years, months, weeks, days,
//! hours, minutes, seconds or milliseconds separate two moments, rounding
//! toward zero.
//!
//! # Core types
//!
//! - [`Instant`] — absolute point in time, milliseconds since the Unix epoch.
//! - [`Zone`] — handle to a [`ZoneRules`] provider (IANA, fixed, synthetic).
//! - [`CivilMoment`] — an instant bound to a zone, with Gregorian fields.
//! - [`IntervalUnit`] — the unit a difference is expressed in.
//! - [`Interval`] — a start and end moment.
//! - [`TimeInstant`] — trait for anything that denotes an absolute instant.
//!
//! # Units and daylight saving
//!
//! | Unit | Measured on | DST-neutralized |
//! |------|-------------|-----------------|
//! | [`Years`](IntervalUnit::Years), [`Months`](IntervalUnit::Months) | calendar fields | yes |
//! | [`Weeks`](IntervalUnit::Weeks), [`Days`](IntervalUnit::Days) | timeline | yes |
//! | [`Hours`](IntervalUnit::Hours), [`Minutes`](IntervalUnit::Minutes), [`Seconds`](IntervalUnit::Seconds) | timeline | no |
//! | [`Milliseconds`](IntervalUnit::Milliseconds) | timeline | yes |
//!
//! Neutralization ([`adjust_dst`]) adds the active daylight savings back to
//! an instant, so midnight to midnight is always one day while the hour count
//! still shows 23 or 25.
//!
//! # Features
//!
//! - `serde` — serialize [`Instant`] and [`IntervalUnit`].
//! - `logging` — emit `log` records for zone fallbacks and computed results.

#[macro_use]
mod logging;

mod between;
mod error;
pub(crate) mod instant;
mod interval;
pub(crate) mod moment;
mod ops;
mod unit;
pub(crate) mod zone;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use between::{
    adjust_dst, parse_civil_moment, time_between, time_between_instants, time_between_str,
};
pub use error::{Error, Result};
pub use instant::{Instant, TimeInstant};
pub use interval::Interval;
pub use moment::{CalendarField, CivilMoment};
pub use ops::{after, before, compare, date_to_civil_moment, truncate_instant, truncate_time};
pub use unit::IntervalUnit;
pub use zone::{default_time_zone, AnnualDstRule, OffsetInfo, Transition, Zone, ZoneRules};
