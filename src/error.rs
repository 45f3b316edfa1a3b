// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by the fallible entry points.
//!
//! Everything that works on [`Instant`](crate::Instant)s and
//! [`CivilMoment`](crate::CivilMoment)s is total. Only the string overload,
//! zone lookup by name and unit parsing can fail.

/// Errors returned by civildiff.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The text could not be interpreted with the supplied format.
    #[error("cannot parse {input:?} with format {format:?}: {source}")]
    Parse {
        input: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },
    /// No time zone with this identifier exists in the IANA database.
    #[error("unknown time zone {0:?}")]
    UnknownZone(String),
    /// The name does not denote an [`IntervalUnit`](crate::IntervalUnit).
    #[error("unknown interval unit {0:?}")]
    UnknownUnit(String),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
