/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use std::fmt;

use crate::constants::celestial_bodies::{EARTH_EQUATORIAL_RADIUS_M, EARTH_FLATTENING};
use crate::math::{quaternion_from_matrix, Matrix3, UnitQuaternion, Vector3};
use crate::units::{Angle, Length};

/// Geodetic latitude, longitude and altitude over a reference ellipsoid.
#[derive(Clone, Debug)]
pub struct LLA {
    latitude: Angle,
    longitude: Angle,
    altitude: Length,
}

impl LLA {
    pub fn new(latitude: Angle, longitude: Angle, altitude: Length) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    pub const fn latitude(&self) -> &Angle {
        &self.latitude
    }

    pub const fn longitude(&self) -> &Angle {
        &self.longitude
    }

    pub const fn altitude(&self) -> &Length {
        &self.altitude
    }

    /// [m] Body-fixed Cartesian coordinates over the provided ellipsoid.
    pub fn to_cartesian(&self, equatorial_radius_m: f64, flattening: f64) -> Vector3 {
        let lat = self.latitude.in_radians();
        let lon = self.longitude.in_radians();
        let alt = self.altitude.in_meters();

        let e2 = flattening * (2.0 - flattening);
        let (sin_lat, cos_lat) = lat.sin_cos();
        let n = equatorial_radius_m / (1.0 - e2 * sin_lat * sin_lat).sqrt();

        Vector3::new(
            (n + alt) * cos_lat * lon.cos(),
            (n + alt) * cos_lat * lon.sin(),
            (n * (1.0 - e2) + alt) * sin_lat,
        )
    }

    /// [m] WGS84 Earth-fixed Cartesian coordinates.
    pub fn to_cartesian_wgs84(&self) -> Vector3 {
        self.to_cartesian(EARTH_EQUATORIAL_RADIUS_M, EARTH_FLATTENING)
    }

    /// Geodetic coordinates of a body-fixed Cartesian position (iterative Bowring-style
    /// refinement, converges to sub-millimeter in a few rounds).
    pub fn from_cartesian(
        cartesian_m: &Vector3,
        equatorial_radius_m: f64,
        flattening: f64,
    ) -> Self {
        let e2 = flattening * (2.0 - flattening);
        let p = (cartesian_m[0] * cartesian_m[0] + cartesian_m[1] * cartesian_m[1]).sqrt();
        let longitude = cartesian_m[1].atan2(cartesian_m[0]);

        let mut latitude = (cartesian_m[2] / (p * (1.0 - e2))).atan();
        let mut altitude = 0.0;
        for _ in 0..5 {
            let sin_lat = latitude.sin();
            let n = equatorial_radius_m / (1.0 - e2 * sin_lat * sin_lat).sqrt();
            altitude = if latitude.cos().abs() > 1e-12 {
                p / latitude.cos() - n
            } else {
                cartesian_m[2].abs() - n * (1.0 - e2)
            };
            latitude = (cartesian_m[2] / (p * (1.0 - e2 * n / (n + altitude)))).atan();
        }

        Self::new(
            Angle::radians(latitude),
            Angle::radians(longitude),
            Length::meters(altitude),
        )
    }

    /// Orientation of the local North-East-Down triad: maps body-fixed coordinates into NED.
    pub fn to_ned_orientation(&self) -> UnitQuaternion {
        let lat = self.latitude.in_radians();
        let lon = self.longitude.in_radians();
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();

        // Rows are the north, east and down unit vectors expressed body-fixed.
        let dcm = Matrix3::new(
            -sin_lat * cos_lon,
            -sin_lat * sin_lon,
            cos_lat,
            -sin_lon,
            cos_lon,
            0.0,
            -cos_lat * cos_lon,
            -cos_lat * sin_lon,
            -sin_lat,
        );
        quaternion_from_matrix(&dcm)
    }
}

impl fmt::Display for LLA {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{:.6} deg, {:.6} deg, {:.3} m]",
            self.latitude.in_degrees(),
            self.longitude.in_degrees(),
            self.altitude.in_meters()
        )
    }
}

#[cfg(test)]
mod ut_lla {
    use super::*;

    #[test]
    fn test_equator_prime_meridian() {
        let lla = LLA::new(Angle::degrees(0.0), Angle::degrees(0.0), Length::meters(0.0));
        let ecef = lla.to_cartesian_wgs84();
        assert!((ecef - Vector3::new(EARTH_EQUATORIAL_RADIUS_M, 0.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_pole_uses_polar_radius() {
        let lla = LLA::new(Angle::degrees(90.0), Angle::degrees(0.0), Length::meters(0.0));
        let ecef = lla.to_cartesian_wgs84();
        let polar_radius = EARTH_EQUATORIAL_RADIUS_M * (1.0 - EARTH_FLATTENING);
        assert!((ecef[2] - polar_radius).abs() < 1e-6);
        assert!(ecef.fixed_rows::<2>(0).norm() < 1e-6);
    }

    #[test]
    fn test_cartesian_round_trip() {
        let lla = LLA::new(
            Angle::degrees(45.123),
            Angle::degrees(-93.456),
            Length::meters(212.5),
        );
        let ecef = lla.to_cartesian_wgs84();
        let back = LLA::from_cartesian(&ecef, EARTH_EQUATORIAL_RADIUS_M, EARTH_FLATTENING);
        assert!((back.latitude().in_degrees() - 45.123).abs() < 1e-9);
        assert!((back.longitude().in_degrees() + 93.456).abs() < 1e-9);
        assert!((back.altitude().in_meters() - 212.5).abs() < 1e-3);
    }

    #[test]
    fn test_ned_orientation() {
        // At the equator and prime meridian: north = +z_ecef, east = +y_ecef, down = -x_ecef.
        let lla = LLA::new(Angle::degrees(0.0), Angle::degrees(0.0), Length::meters(0.0));
        let q = lla.to_ned_orientation();
        let north = q * Vector3::z();
        let east = q * Vector3::y();
        let down = q * Vector3::x();
        assert!((north - Vector3::x()).norm() < 1e-12);
        assert!((east - Vector3::y()).norm() < 1e-12);
        assert!((down + Vector3::z()).norm() < 1e-12);
    }
}
