/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

//! Analytical planetary theory: low-precision geocentric Sun and Moon positions.
//!
//! Series from Vallado, "Fundamentals of Astrodynamics and Applications", algorithms 29 and 31:
//! the Sun direction is good to ~0.01 deg and the Moon to ~0.3 deg, plenty for eclipse and
//! illumination geometry. Positions are evaluated on the mean equator of date and precessed
//! back into the GCRF.

use std::sync::Arc;

use snafu::ResultExt;

use super::Ephemeris;
use crate::constants::celestial_bodies::ASTRONOMICAL_UNIT_M;
use crate::constants::conversion::DEG_TO_RAD;
use crate::coordinate::frame::provider::{iau, Provider};
use crate::coordinate::frame::Frame;
use crate::coordinate::{Position, Transform};
use crate::environment::{EnvironmentError, FrameSnafu, TimeSnafu};
use crate::math::Vector3;
use crate::time::{Instant, Scale};

/// The bodies the analytical theory covers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnalyticalBody {
    Earth,
    Sun,
    Moon,
}

impl AnalyticalBody {
    const fn name(self) -> &'static str {
        match self {
            Self::Earth => "Earth",
            Self::Sun => "Sun",
            Self::Moon => "Moon",
        }
    }
}

/// An [Ephemeris] backed by the analytical series.
#[derive(Copy, Clone, Debug)]
pub struct AnalyticalEphemeris {
    body: AnalyticalBody,
}

impl AnalyticalEphemeris {
    pub const fn new(body: AnalyticalBody) -> Self {
        Self { body }
    }

    /// [m] Geocentric GCRF position of the body.
    pub fn gcrf_position_m(
        &self,
        instant: &Instant,
    ) -> Result<Vector3, crate::time::TimeError> {
        let jd_tt = instant.to_julian_date(Scale::TT)?;
        let t = iau::julian_centuries_since_j2000(jd_tt);
        let p_mod = match self.body {
            AnalyticalBody::Earth => return Ok(Vector3::zeros()),
            AnalyticalBody::Sun => sun_position_mod_m(t),
            AnalyticalBody::Moon => moon_position_mod_m(t),
        };
        Ok(iau::precession_matrix(t).transpose() * p_mod)
    }
}

impl Ephemeris for AnalyticalEphemeris {
    fn position_in(
        &self,
        frame: &Arc<Frame>,
        instant: &Instant,
    ) -> Result<Position, EnvironmentError> {
        let gcrf_position = Position::meters(
            self.gcrf_position_m(instant).context(TimeSnafu)?,
            Frame::gcrf(),
        );
        gcrf_position.in_frame(frame, instant).context(FrameSnafu)
    }

    fn access_frame(&self) -> Result<Arc<Frame>, EnvironmentError> {
        match self.body {
            AnalyticalBody::Earth => Ok(Frame::itrf()),
            body => {
                // A body-centered frame, GCRF-aligned, translating with the analytical position.
                let name = format!("{} (analytical)", body.name());
                if let Ok(frame) = Frame::with_name(&name) {
                    return Ok(frame);
                }
                Frame::gcrf();
                let ephemeris = Self::new(body);
                let constructed = Frame::construct(
                    &name,
                    true,
                    Some("GCRF"),
                    Provider::Dynamic(Arc::new(move |instant: &Instant| {
                        let position = ephemeris.gcrf_position_m(instant).map_err(|source| {
                            crate::coordinate::frame::provider::ProviderError::Time { source }
                        })?;
                        Ok(Transform::passive(
                            *instant,
                            -position,
                            Vector3::zeros(),
                            crate::math::UnitQuaternion::identity(),
                            Vector3::zeros(),
                        ))
                    })),
                );
                match constructed {
                    // Another thread may have registered the same frame meanwhile.
                    Err(crate::coordinate::frame::FrameError::FrameAlreadyExists { .. }) => {
                        Frame::with_name(&name).context(FrameSnafu)
                    }
                    other => other.context(FrameSnafu),
                }
            }
        }
    }
}

/// [m] Sun position on the mean equator and equinox of date (Vallado algorithm 29).
fn sun_position_mod_m(t: f64) -> Vector3 {
    let mean_longitude_deg = 280.460 + 36_000.771 * t;
    let mean_anomaly_rad = (357.529_109_2 + 35_999.050_34 * t) * DEG_TO_RAD;

    let ecliptic_longitude_rad = (mean_longitude_deg
        + 1.914_666_471 * mean_anomaly_rad.sin()
        + 0.019_994_643 * (2.0 * mean_anomaly_rad).sin())
        * DEG_TO_RAD;

    let distance_au = 1.000_140_612
        - 0.016_708_617 * mean_anomaly_rad.cos()
        - 0.000_139_589 * (2.0 * mean_anomaly_rad).cos();

    let obliquity_rad = (23.439_291 - 0.013_004_2 * t) * DEG_TO_RAD;

    let distance_m = distance_au * ASTRONOMICAL_UNIT_M;
    Vector3::new(
        distance_m * ecliptic_longitude_rad.cos(),
        distance_m * obliquity_rad.cos() * ecliptic_longitude_rad.sin(),
        distance_m * obliquity_rad.sin() * ecliptic_longitude_rad.sin(),
    )
}

/// [m] Moon position on the mean equator and equinox of date (Vallado algorithm 31).
fn moon_position_mod_m(t: f64) -> Vector3 {
    let d = DEG_TO_RAD;

    let ecliptic_longitude_rad = (218.32 + 481_267.881_3 * t
        + 6.29 * ((134.9 + 477_198.85 * t) * d).sin()
        - 1.27 * ((259.2 - 413_335.38 * t) * d).sin()
        + 0.66 * ((235.7 + 890_534.23 * t) * d).sin()
        + 0.21 * ((269.9 + 954_397.70 * t) * d).sin()
        - 0.19 * ((357.5 + 35_999.05 * t) * d).sin()
        - 0.11 * ((186.6 + 966_404.05 * t) * d).sin())
        * d;

    let ecliptic_latitude_rad = (5.13 * ((93.3 + 483_202.03 * t) * d).sin()
        + 0.28 * ((228.2 + 960_400.87 * t) * d).sin()
        - 0.28 * ((318.3 + 6_003.18 * t) * d).sin()
        - 0.17 * ((217.6 - 407_332.20 * t) * d).sin())
        * d;

    let horizontal_parallax_rad = (0.950_8
        + 0.051_8 * ((134.9 + 477_198.85 * t) * d).cos()
        + 0.009_5 * ((259.2 - 413_335.38 * t) * d).cos()
        + 0.007_8 * ((235.7 + 890_534.23 * t) * d).cos()
        + 0.002_8 * ((269.9 + 954_397.70 * t) * d).cos())
        * d;

    let obliquity_rad = (23.439_291 - 0.013_004_2 * t) * d;
    let distance_m =
        crate::constants::celestial_bodies::EARTH_EQUATORIAL_RADIUS_M / horizontal_parallax_rad.sin();

    let (sin_lon, cos_lon) = ecliptic_longitude_rad.sin_cos();
    let (sin_lat, cos_lat) = ecliptic_latitude_rad.sin_cos();
    let (sin_eps, cos_eps) = obliquity_rad.sin_cos();

    distance_m
        * Vector3::new(
            cos_lat * cos_lon,
            cos_eps * cos_lat * sin_lon - sin_eps * sin_lat,
            sin_eps * cos_lat * sin_lon + cos_eps * sin_lat,
        )
}

#[cfg(test)]
mod ut_analytical {
    use super::*;
    use crate::constants::celestial_bodies::EARTH_EQUATORIAL_RADIUS_M;

    #[test]
    fn test_sun_distance_is_one_au() {
        for &t in &[-0.1, 0.0, 0.1, 0.2] {
            let r = sun_position_mod_m(t).norm();
            assert!(
                (r / ASTRONOMICAL_UNIT_M - 1.0).abs() < 0.02,
                "sun distance {r} at t = {t}"
            );
        }
    }

    #[test]
    fn test_moon_distance_is_plausible() {
        for &t in &[-0.1, 0.0, 0.1, 0.2] {
            let r = moon_position_mod_m(t).norm();
            assert!(r > 55.0 * EARTH_EQUATORIAL_RADIUS_M);
            assert!(r < 64.0 * EARTH_EQUATORIAL_RADIUS_M);
        }
    }

    #[test]
    fn test_sun_declination_bounded_by_obliquity() {
        for day in 0..=36 {
            let t = f64::from(day) * 10.0 / 36_525.0;
            let p = sun_position_mod_m(t);
            let declination_deg = (p[2] / p.norm()).asin().to_degrees();
            assert!(declination_deg.abs() < 23.5);
        }
    }

    #[test]
    fn test_sun_near_winter_solstice_direction() {
        // 2000-01-01 is ten days past the solstice: declination close to -23 deg.
        let p = sun_position_mod_m(0.0);
        let declination_deg = (p[2] / p.norm()).asin().to_degrees();
        assert!(declination_deg < -22.0 && declination_deg > -23.5, "{declination_deg}");
    }

    #[test]
    fn test_earth_is_geocentric_origin() {
        let ephemeris = AnalyticalEphemeris::new(AnalyticalBody::Earth);
        let p = ephemeris.gcrf_position_m(&Instant::j2000()).unwrap();
        assert_eq!(p, Vector3::zeros());
    }
}
