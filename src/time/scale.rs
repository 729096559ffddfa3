/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use core::fmt;
use core::str::FromStr;

use super::TimeError;

/// Time scales understood by [crate::time::Instant].
///
/// TAI, GPS, TT and TCG relate through fixed or purely-arithmetic offsets. UTC needs the leap
/// second table, UT1 needs Earth orientation data, and TDB is meant for ephemeris-time arguments
/// only (it is not round-tripped into UTC).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scale {
    /// Coordinated Universal Time
    UTC,
    /// International Atomic Time
    TAI,
    /// GPS time (TAI - 19 s)
    GPS,
    /// Terrestrial Time (TAI + 32.184 s)
    TT,
    /// Universal Time, tied to Earth rotation through UT1-UTC
    UT1,
    /// Barycentric Dynamical Time
    TDB,
    /// Geocentric Coordinate Time
    TCG,
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::UTC => "UTC",
            Self::TAI => "TAI",
            Self::GPS => "GPS",
            Self::TT => "TT",
            Self::UT1 => "UT1",
            Self::TDB => "TDB",
            Self::TCG => "TCG",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Scale {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UTC" => Ok(Self::UTC),
            "TAI" => Ok(Self::TAI),
            "GPS" => Ok(Self::GPS),
            "TT" => Ok(Self::TT),
            "UT1" => Ok(Self::UT1),
            "TDB" => Ok(Self::TDB),
            "TCG" => Ok(Self::TCG),
            _ => Err(TimeError::UnknownScale {
                text: s.to_string(),
            }),
        }
    }
}
