/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

//! Gravitational field models.
//!
//! Spherical-harmonic evaluation of the coefficient files is a pluggable concern: the models
//! here are the closed-form spherical and zonal fields, and [earth::Manager] fetches and
//! exposes the coefficient files for external evaluators.

pub mod earth;

use crate::environment::EnvironmentError;
use crate::math::Vector3;
use crate::time::Instant;

/// A gravitational field.
pub trait GravitationalModel: Send + Sync {
    /// [m/s^2] Field vector at a body-fixed position.
    fn field_at(
        &self,
        position_m: &Vector3,
        instant: &Instant,
    ) -> Result<Vector3, EnvironmentError>;

    /// [m^3/s^2] Gravitational parameter of the generating body.
    fn gravitational_parameter(&self) -> f64;
}

/// Central inverse-square field.
#[derive(Copy, Clone, Debug)]
pub struct SphericalGravitationalModel {
    gravitational_parameter_m3_s2: f64,
}

impl SphericalGravitationalModel {
    pub const fn new(gravitational_parameter_m3_s2: f64) -> Self {
        Self {
            gravitational_parameter_m3_s2,
        }
    }
}

impl GravitationalModel for SphericalGravitationalModel {
    fn field_at(
        &self,
        position_m: &Vector3,
        _instant: &Instant,
    ) -> Result<Vector3, EnvironmentError> {
        let r = position_m.norm();
        Ok(-self.gravitational_parameter_m3_s2 / (r * r) * position_m.normalize())
    }

    fn gravitational_parameter(&self) -> f64 {
        self.gravitational_parameter_m3_s2
    }
}

/// Central field with the J2 and J4 zonal harmonics.
#[derive(Copy, Clone, Debug)]
pub struct ZonalGravitationalModel {
    gravitational_parameter_m3_s2: f64,
    equatorial_radius_m: f64,
    j2: f64,
    j4: f64,
}

impl ZonalGravitationalModel {
    pub const fn new(
        gravitational_parameter_m3_s2: f64,
        equatorial_radius_m: f64,
        j2: f64,
        j4: f64,
    ) -> Self {
        Self {
            gravitational_parameter_m3_s2,
            equatorial_radius_m,
            j2,
            j4,
        }
    }
}

impl GravitationalModel for ZonalGravitationalModel {
    fn field_at(
        &self,
        position_m: &Vector3,
        _instant: &Instant,
    ) -> Result<Vector3, EnvironmentError> {
        let r = position_m.norm();
        let (x, y, z) = (position_m[0], position_m[1], position_m[2]);
        let mu = self.gravitational_parameter_m3_s2;

        let central = -mu / (r * r * r) * position_m;

        // J2 acceleration, cf. Vallado eq. 8-30.
        let re_r2 = (self.equatorial_radius_m / r).powi(2);
        let z2_r2 = (z / r).powi(2);
        let j2_factor = -1.5 * self.j2 * mu / (r * r) * re_r2;
        let j2_accel = j2_factor
            * Vector3::new(
                (1.0 - 5.0 * z2_r2) * x / r,
                (1.0 - 5.0 * z2_r2) * y / r,
                (3.0 - 5.0 * z2_r2) * z / r,
            );

        // J4 acceleration.
        let re_r4 = re_r2 * re_r2;
        let z4_r4 = z2_r2 * z2_r2;
        let j4_factor = -0.625 * self.j4 * mu / (r * r) * re_r4;
        let j4_accel = j4_factor
            * Vector3::new(
                (3.0 - 42.0 * z2_r2 + 63.0 * z4_r4) * x / r,
                (3.0 - 42.0 * z2_r2 + 63.0 * z4_r4) * y / r,
                (15.0 - 70.0 * z2_r2 + 63.0 * z4_r4) * z / r,
            );

        Ok(central + j2_accel + j4_accel)
    }

    fn gravitational_parameter(&self) -> f64 {
        self.gravitational_parameter_m3_s2
    }
}

#[cfg(test)]
mod ut_gravitational {
    use super::*;
    use crate::constants::celestial_bodies::{
        EARTH_EQUATORIAL_RADIUS_M, EARTH_GRAVITATIONAL_PARAMETER_M3_S2, EARTH_J2, EARTH_J4,
    };

    #[test]
    fn test_spherical_field_magnitude() {
        let model = SphericalGravitationalModel::new(EARTH_GRAVITATIONAL_PARAMETER_M3_S2);
        let r = 7.0e6;
        let field = model
            .field_at(&Vector3::new(r, 0.0, 0.0), &crate::time::Instant::j2000())
            .unwrap();
        let expected = EARTH_GRAVITATIONAL_PARAMETER_M3_S2 / (r * r);
        assert!((field.norm() - expected).abs() / expected < 1e-12);
        // Pointing back at the center.
        assert!(field[0] < 0.0);
        assert!(field[1].abs() < 1e-12 && field[2].abs() < 1e-12);
    }

    #[test]
    fn test_zonal_reduces_to_spherical_without_harmonics() {
        let zonal = ZonalGravitationalModel::new(
            EARTH_GRAVITATIONAL_PARAMETER_M3_S2,
            EARTH_EQUATORIAL_RADIUS_M,
            0.0,
            0.0,
        );
        let spherical = SphericalGravitationalModel::new(EARTH_GRAVITATIONAL_PARAMETER_M3_S2);
        let p = Vector3::new(5.2e6, -3.1e6, 2.8e6);
        let instant = crate::time::Instant::j2000();
        let delta = zonal.field_at(&p, &instant).unwrap() - spherical.field_at(&p, &instant).unwrap();
        assert!(delta.norm() < 1e-12);
    }

    #[test]
    fn test_j2_flattens_the_field() {
        let model = ZonalGravitationalModel::new(
            EARTH_GRAVITATIONAL_PARAMETER_M3_S2,
            EARTH_EQUATORIAL_RADIUS_M,
            EARTH_J2,
            EARTH_J4,
        );
        let instant = crate::time::Instant::j2000();
        let r = EARTH_EQUATORIAL_RADIUS_M + 500e3;

        // Equatorial field is stronger than the point-mass field, polar field weaker.
        let equatorial = model
            .field_at(&Vector3::new(r, 0.0, 0.0), &instant)
            .unwrap()
            .norm();
        let polar = model
            .field_at(&Vector3::new(0.0, 0.0, r), &instant)
            .unwrap()
            .norm();
        let point_mass = EARTH_GRAVITATIONAL_PARAMETER_M3_S2 / (r * r);
        assert!(equatorial > point_mass);
        assert!(polar < point_mass);
    }
}
