// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Units a difference can be expressed in.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Divisors taking milliseconds down to seconds, minutes, hours, days, weeks.
pub(crate) const CHAIN_FACTORS: [i64; 5] = [1000, 60, 60, 24, 7];

/// Unit of the value returned by [`time_between`](crate::time_between).
///
/// Years, months, weeks and days are *civil* units: they count calendar
/// steps and ignore daylight-saving shifts. Hours, minutes and seconds count
/// elapsed time on the timeline.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IntervalUnit {
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
}

impl IntervalUnit {
    /// Every unit, largest first.
    pub const ALL: [Self; 8] = [
        Self::Years,
        Self::Months,
        Self::Weeks,
        Self::Days,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
        Self::Milliseconds,
    ];

    /// Years, months, weeks and days.
    #[inline]
    pub const fn is_civil(self) -> bool {
        matches!(self, Self::Years | Self::Months | Self::Weeks | Self::Days)
    }

    /// Whether both operands are DST-neutralized before measuring.
    ///
    /// True for the civil units and, unlike the other clock units, for
    /// milliseconds.
    #[inline]
    pub const fn neutralizes_dst(self) -> bool {
        !matches!(self, Self::Hours | Self::Minutes | Self::Seconds)
    }

    /// Fixed length in milliseconds; `None` for years and months.
    pub const fn millis(self) -> Option<i64> {
        match self.chain_depth() {
            Some(depth) => {
                let mut millis = 1;
                let mut i = 0;
                while i < depth {
                    millis *= CHAIN_FACTORS[i];
                    i += 1;
                }
                Some(millis)
            }
            None => None,
        }
    }

    /// How many [`CHAIN_FACTORS`] divide milliseconds down to this unit.
    pub(crate) const fn chain_depth(self) -> Option<usize> {
        match self {
            Self::Years | Self::Months => None,
            Self::Weeks => Some(5),
            Self::Days => Some(4),
            Self::Hours => Some(3),
            Self::Minutes => Some(2),
            Self::Seconds => Some(1),
            Self::Milliseconds => Some(0),
        }
    }

    /// Lowercase plural name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Years => "years",
            Self::Months => "months",
            Self::Weeks => "weeks",
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
            Self::Milliseconds => "milliseconds",
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IntervalUnit {
    type Err = Error;

    /// Accepts singular or plural names in any case, e.g. `"Day"` or `"MONTHS"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let singular = lower.strip_suffix('s').unwrap_or(&lower);
        Self::ALL
            .into_iter()
            .find(|unit| unit.name().strip_suffix('s') == Some(singular))
            .ok_or_else(|| Error::UnknownUnit(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dst_branch_membership() {
        let neutral: Vec<_> = IntervalUnit::ALL
            .into_iter()
            .filter(|u| u.neutralizes_dst())
            .collect();
        assert_eq!(
            neutral,
            [
                IntervalUnit::Years,
                IntervalUnit::Months,
                IntervalUnit::Weeks,
                IntervalUnit::Days,
                IntervalUnit::Milliseconds,
            ]
        );
        assert!(!IntervalUnit::Milliseconds.is_civil());
        assert!(IntervalUnit::Weeks.is_civil());
    }

    #[test]
    fn fixed_lengths() {
        assert_eq!(IntervalUnit::Years.millis(), None);
        assert_eq!(IntervalUnit::Months.millis(), None);
        assert_eq!(IntervalUnit::Weeks.millis(), Some(604_800_000));
        assert_eq!(IntervalUnit::Days.millis(), Some(86_400_000));
        assert_eq!(IntervalUnit::Hours.millis(), Some(3_600_000));
        assert_eq!(IntervalUnit::Minutes.millis(), Some(60_000));
        assert_eq!(IntervalUnit::Seconds.millis(), Some(1_000));
        assert_eq!(IntervalUnit::Milliseconds.millis(), Some(1));
    }

    #[test]
    fn parse_names() {
        assert_eq!("days".parse::<IntervalUnit>(), Ok(IntervalUnit::Days));
        assert_eq!("Day".parse::<IntervalUnit>(), Ok(IntervalUnit::Days));
        assert_eq!(" MONTHS ".parse::<IntervalUnit>(), Ok(IntervalUnit::Months));
        assert_eq!(
            "millisecond".parse::<IntervalUnit>(),
            Ok(IntervalUnit::Milliseconds)
        );
        assert_eq!(
            "fortnight".parse::<IntervalUnit>(),
            Err(Error::UnknownUnit("fortnight".into()))
        );
        for unit in IntervalUnit::ALL {
            assert_eq!(unit.to_string().parse::<IntervalUnit>(), Ok(unit));
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&IntervalUnit::Weeks).unwrap();
        assert_eq!(json, "\"weeks\"");
        let back: IntervalUnit = serde_json::from_str("\"hours\"").unwrap();
        assert_eq!(back, IntervalUnit::Hours);
    }
}
