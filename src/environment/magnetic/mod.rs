/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

//! Magnetic field models.
//!
//! As with gravity, spherical-harmonic evaluation of the coefficient files is pluggable; the
//! built-in model is the centered axial dipole, and [earth::Manager] fetches the coefficient
//! files for external evaluators.

pub mod earth;

use crate::environment::EnvironmentError;
use crate::math::Vector3;
use crate::time::Instant;

/// A magnetic field.
pub trait MagneticModel: Send + Sync {
    /// [T] Field vector at a body-fixed position.
    fn field_at(
        &self,
        position_m: &Vector3,
        instant: &Instant,
    ) -> Result<Vector3, EnvironmentError>;
}

/// A centered dipole aligned with the body rotation axis.
#[derive(Copy, Clone, Debug)]
pub struct DipoleMagneticModel {
    /// [T] Mean field intensity at the magnetic equator, on the reference sphere.
    surface_field_t: f64,
    /// [m] Reference sphere radius.
    reference_radius_m: f64,
}

impl DipoleMagneticModel {
    pub const fn new(surface_field_t: f64, reference_radius_m: f64) -> Self {
        Self {
            surface_field_t,
            reference_radius_m,
        }
    }

    /// The Earth dipole (~30 uT at the equator on the surface).
    pub const fn earth() -> Self {
        Self::new(
            3.12e-5,
            crate::constants::celestial_bodies::EARTH_EQUATORIAL_RADIUS_M,
        )
    }
}

impl MagneticModel for DipoleMagneticModel {
    fn field_at(
        &self,
        position_m: &Vector3,
        _instant: &Instant,
    ) -> Result<Vector3, EnvironmentError> {
        let r = position_m.norm();
        let r_hat = position_m / r;
        // Dipole moment along -z so that the field points north at the magnetic equator.
        let m_hat = -Vector3::z();
        let scale = self.surface_field_t * (self.reference_radius_m / r).powi(3);
        Ok(scale * (3.0 * m_hat.dot(&r_hat) * r_hat - m_hat))
    }
}

#[cfg(test)]
mod ut_magnetic {
    use super::*;
    use crate::constants::celestial_bodies::EARTH_EQUATORIAL_RADIUS_M;

    #[test]
    fn test_dipole_equator_and_pole() {
        let model = DipoleMagneticModel::earth();
        let instant = crate::time::Instant::j2000();

        // At the equator on the reference sphere, the field is horizontal, pointing north (+z).
        let equator = model
            .field_at(&Vector3::new(EARTH_EQUATORIAL_RADIUS_M, 0.0, 0.0), &instant)
            .unwrap();
        assert!((equator.norm() - 3.12e-5).abs() / 3.12e-5 < 1e-12);
        assert!(equator[2] > 0.0);
        assert!(equator[0].abs() < 1e-20);

        // At the pole, the field is twice as strong and vertical.
        let pole = model
            .field_at(&Vector3::new(0.0, 0.0, EARTH_EQUATORIAL_RADIUS_M), &instant)
            .unwrap();
        assert!((pole.norm() - 2.0 * 3.12e-5).abs() / 3.12e-5 < 1e-12);

        // Field falls off as 1/r^3.
        let high = model
            .field_at(
                &Vector3::new(2.0 * EARTH_EQUATORIAL_RADIUS_M, 0.0, 0.0),
                &instant,
            )
            .unwrap();
        assert!((high.norm() * 8.0 - equator.norm()).abs() / equator.norm() < 1e-12);
    }
}
