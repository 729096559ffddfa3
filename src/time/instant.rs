/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Add, Sub};

use hifitime::{Duration, Epoch, Unit};
use snafu::ResultExt;

use super::date_time::{Date, DateTime, Time};
use super::{Scale, ScaleConversionUnavailableSnafu, TimeError};
use crate::coordinate::frame::provider::iers;

/// [s] TT - TAI, by definition.
pub const TT_MINUS_TAI_S: f64 = 32.184;

/// [s] TAI - GPS, by definition.
pub const TAI_MINUS_GPS_S: f64 = 19.0;

/// Rate of TCG with respect to TT (IAU 2000 resolution B1.9).
const LG_RATE: f64 = 6.969290134e-10;

/// A point on the continuous TAI timeline.
///
/// Two instants compare and order on their internal TAI count, regardless of the scale they were
/// constructed in. Conversions into UT1 consult the IERS manager and fail with
/// [TimeError::ScaleConversionUnavailable] outside its coverage.
#[derive(Copy, Clone, Debug)]
pub struct Instant(Epoch);

impl Instant {
    /// Builds an instant from a calendar date-time expressed in the provided scale.
    pub fn from_date_time(date_time: DateTime, scale: Scale) -> Result<Self, TimeError> {
        let d = date_time.date();
        let t = date_time.time();
        match scale {
            Scale::TAI => Ok(Self(Epoch::from_gregorian_tai(
                d.year(),
                d.month(),
                d.day(),
                t.hour(),
                t.minute(),
                t.second(),
                t.nanosecond(),
            ))),
            Scale::UTC => Ok(Self(Epoch::from_gregorian_utc(
                d.year(),
                d.month(),
                d.day(),
                t.hour(),
                t.minute(),
                t.second(),
                t.nanosecond(),
            ))),
            Scale::UT1 => {
                // First interpret the reading as UTC to locate the day, then remove UT1-UTC.
                let as_utc = Self::from_date_time(date_time, Scale::UTC)?;
                let delta_s = iers::Manager::global()
                    .ut1_minus_utc_at(&as_utc)
                    .context(ScaleConversionUnavailableSnafu { scale })?;
                Ok(Self(as_utc.0 - delta_s * Unit::Second))
            }
            _ => {
                // Fixed or slowly-varying offsets from TAI: read the fields as TAI then shift.
                let as_tai = Self::from_date_time(date_time, Scale::TAI)?;
                let offset = as_tai.offset_from_tai(scale)?;
                Ok(Self(as_tai.0 - offset))
            }
        }
    }

    /// Builds an instant from a Modified Julian Date expressed in the provided scale.
    pub fn from_modified_julian_date(mjd: f64, scale: Scale) -> Result<Self, TimeError> {
        match scale {
            Scale::TAI => Ok(Self(Epoch::from_mjd_tai(mjd))),
            Scale::UTC => Ok(Self(Epoch::from_mjd_utc(mjd))),
            Scale::UT1 => {
                let as_utc = Self(Epoch::from_mjd_utc(mjd));
                let delta_s = iers::Manager::global()
                    .ut1_minus_utc_at(&as_utc)
                    .context(ScaleConversionUnavailableSnafu { scale })?;
                Ok(Self(as_utc.0 - delta_s * Unit::Second))
            }
            _ => {
                let as_tai = Self(Epoch::from_mjd_tai(mjd));
                let offset = as_tai.offset_from_tai(scale)?;
                Ok(Self(as_tai.0 - offset))
            }
        }
    }

    /// Builds an instant from a Julian Date expressed in the provided scale.
    pub fn from_julian_date(jd: f64, scale: Scale) -> Result<Self, TimeError> {
        Self::from_modified_julian_date(jd - 2_400_000.5, scale)
    }

    /// J2000 epoch: 2000-01-01 12:00:00 TT.
    pub fn j2000() -> Self {
        Self(Epoch::from_gregorian_tai(2000, 1, 1, 11, 59, 27, 816_000_000))
    }

    /// GPS epoch: 1980-01-06 00:00:00 UTC (TAI - UTC was 19 s).
    pub fn gps_epoch() -> Self {
        Self(Epoch::from_gregorian_tai(1980, 1, 6, 0, 0, 19, 0))
    }

    /// Unix epoch: 1970-01-01 00:00:00 UTC.
    pub fn unix_epoch() -> Self {
        Self(Epoch::from_unix_seconds(0.0))
    }

    /// Modified Julian Date epoch: 1858-11-17 00:00:00 TT.
    pub fn modified_julian_date_epoch() -> Self {
        Self(Epoch::from_gregorian_tai(1858, 11, 17, 0, 0, 0, 0) - TT_MINUS_TAI_S * Unit::Second)
    }

    /// Current system time.
    pub fn now() -> Self {
        let unix_s = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64();
        Self(Epoch::from_unix_seconds(unix_s))
    }

    /// The TAI count of this instant, in integral nanoseconds since the hifitime reference epoch.
    pub fn to_tai_nanoseconds(&self) -> i128 {
        self.0.to_tai_duration().total_nanoseconds()
    }

    /// Calendar representation of this instant in the provided scale.
    pub fn to_date_time(&self, scale: Scale) -> Result<DateTime, TimeError> {
        let (y, m, d, hh, mm, ss, ns) = match scale {
            Scale::UTC => self.0.to_gregorian_utc(),
            Scale::UT1 => {
                let delta_s = iers::Manager::global()
                    .ut1_minus_utc_at(self)
                    .context(ScaleConversionUnavailableSnafu { scale })?;
                (self.0 + delta_s * Unit::Second).to_gregorian_utc()
            }
            Scale::TAI => self.0.to_gregorian_tai(),
            _ => (self.0 + self.offset_from_tai(scale)?).to_gregorian_tai(),
        };
        Ok(DateTime::new(Date::new(y, m, d)?, Time::new(hh, mm, ss, ns)?))
    }

    /// Modified Julian Date of this instant in the provided scale.
    pub fn to_modified_julian_date(&self, scale: Scale) -> Result<f64, TimeError> {
        match scale {
            Scale::TAI => Ok(self.0.to_mjd_tai_days()),
            Scale::UTC => Ok(self.0.to_mjd_utc_days()),
            Scale::UT1 => {
                let delta_s = iers::Manager::global()
                    .ut1_minus_utc_at(self)
                    .context(ScaleConversionUnavailableSnafu { scale })?;
                Ok((self.0 + delta_s * Unit::Second).to_mjd_utc_days())
            }
            _ => Ok((self.0 + self.offset_from_tai(scale)?).to_mjd_tai_days()),
        }
    }

    /// Julian Date of this instant in the provided scale.
    pub fn to_julian_date(&self, scale: Scale) -> Result<f64, TimeError> {
        Ok(self.to_modified_julian_date(scale)? + 2_400_000.5)
    }

    /// True when both instants are within the provided tolerance of one another.
    pub fn is_near(&self, other: &Self, tolerance: Duration) -> bool {
        (*self - *other).abs() <= tolerance
    }

    /// TAI - UTC at this instant, when the leap second table covers it.
    pub fn leap_second_count(&self) -> Option<f64> {
        self.0.leap_seconds(true)
    }

    /// True when the TAI - UTC offset at this instant extrapolates the last announced leap
    /// second instead of being a published one. The table is append-only, so instants past its
    /// horizon carry the last known offset and this flag.
    pub fn leap_second_is_extrapolated(&self) -> bool {
        // Last announced leap second: 2017-01-01, TAI - UTC = 37 s.
        self.0 > Epoch::from_gregorian_tai(2017, 1, 1, 0, 0, 37, 0)
    }

    /// Offset such that `reading in scale = reading in TAI + offset`, for the scales whose offset
    /// does not go through the UTC calendar.
    fn offset_from_tai(&self, scale: Scale) -> Result<Duration, TimeError> {
        match scale {
            Scale::TAI => Ok(Duration::ZERO),
            Scale::TT => Ok(TT_MINUS_TAI_S * Unit::Second),
            Scale::GPS => Ok(-TAI_MINUS_GPS_S * Unit::Second),
            Scale::TDB => {
                Ok((TT_MINUS_TAI_S + self.tdb_minus_tt_s()) * Unit::Second)
            }
            Scale::TCG => {
                Ok((TT_MINUS_TAI_S + self.tcg_minus_tt_s()) * Unit::Second)
            }
            Scale::UTC => match self.0.leap_seconds(true) {
                Some(leap_s) => Ok(-leap_s * Unit::Second),
                None => Err(TimeError::UtcUndefined),
            },
            Scale::UT1 => unreachable!("UT1 goes through the UTC calendar"),
        }
    }

    /// [s] TDB - TT periodic correction (USNO approximation, ~30 us accurate).
    fn tdb_minus_tt_s(&self) -> f64 {
        let t = (self.0.to_jde_tai_days() + TT_MINUS_TAI_S / 86400.0 - 2_451_545.0) / 36_525.0;
        let g_rad = (357.53 + 35_999.050 * t).to_radians();
        0.001_657 * (g_rad + 0.016_71 * g_rad.sin()).sin()
    }

    /// [s] TCG - TT linear drift from the 1977 convergence epoch.
    fn tcg_minus_tt_s(&self) -> f64 {
        let t0 = Epoch::from_gregorian_tai(1977, 1, 1, 0, 0, 0, 0);
        let elapsed_tt_s = (self.0 - t0).to_seconds();
        LG_RATE / (1.0 - LG_RATE) * elapsed_tt_s
    }
}

impl PartialEq for Instant {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Instant {}

impl PartialOrd for Instant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Instant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_tai_nanoseconds().cmp(&other.to_tai_nanoseconds())
    }
}

impl Hash for Instant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_tai_nanoseconds().hash(state);
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs)
    }
}

impl Sub<Duration> for Instant {
    type Output = Instant;

    fn sub(self, rhs: Duration) -> Self {
        Self(self.0 - rhs)
    }
}

impl Sub for Instant {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Duration {
        self.0 - rhs.0
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.to_date_time(Scale::TAI) {
            Ok(dt) => write!(f, "{dt} [TAI]"),
            Err(_) => write!(f, "{} [TAI ns]", self.to_tai_nanoseconds()),
        }
    }
}
