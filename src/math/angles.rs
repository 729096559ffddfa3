/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use core::f64::consts::TAU;

/// Returns the provided angle in radians bounded between 0.0 and 2π.
pub fn between_0_two_pi(angle_rad: f64) -> f64 {
    angle_rad.rem_euclid(TAU)
}

/// Returns the provided angle in radians bounded between -π and +π.
pub fn between_pm_pi(angle_rad: f64) -> f64 {
    let mut bounded = angle_rad.rem_euclid(TAU);
    if bounded >= TAU / 2.0 {
        bounded -= TAU;
    }
    bounded
}

/// Returns the provided angle in degrees bounded between 0.0 and 360.0.
pub fn between_0_360(angle_deg: f64) -> f64 {
    angle_deg.rem_euclid(360.0)
}

#[cfg(test)]
mod ut_angles {
    use super::*;
    use core::f64::consts::PI;

    #[test]
    fn test_bounds() {
        assert!((between_0_two_pi(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-15);
        assert!((between_pm_pi(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-15);
        assert_eq!(between_0_360(-90.0), 270.0);
        assert_eq!(between_0_360(720.0), 0.0);
    }
}
