/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use super::Matrix3;

/// Coordinate rotation about the X axis.
pub fn r1(angle_rad: f64) -> Matrix3 {
    let (s, c) = angle_rad.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
}

/// Coordinate rotation about the Y axis.
pub fn r2(angle_rad: f64) -> Matrix3 {
    let (s, c) = angle_rad.sin_cos();
    Matrix3::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c)
}

/// Coordinate rotation about the Z axis.
pub fn r3(angle_rad: f64) -> Matrix3 {
    let (s, c) = angle_rad.sin_cos();
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}

#[cfg(test)]
mod ut_rotation {
    use super::*;
    use crate::math::Vector3;
    use core::f64::consts::FRAC_PI_2;

    #[test]
    fn test_r3_rotates_coordinates() {
        // Rotating the coordinate system by +90 deg about Z maps the X axis onto -Y coordinates.
        let rotated = r3(FRAC_PI_2) * Vector3::x();
        assert!((rotated - Vector3::new(0.0, -1.0, 0.0)).norm() < 1e-15);
        let rotated = r1(FRAC_PI_2) * Vector3::z();
        assert!((rotated - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-15);
        let rotated = r2(FRAC_PI_2) * Vector3::x();
        assert!((rotated - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-15);
    }
}
