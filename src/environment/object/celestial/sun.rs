/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use std::sync::Arc;

use crate::constants::celestial_bodies::{
    SUN_EQUATORIAL_RADIUS_M, SUN_GRAVITATIONAL_PARAMETER_M3_S2,
};
use crate::environment::ephemeris::analytical::{AnalyticalBody, AnalyticalEphemeris};
use crate::environment::gravitational::SphericalGravitationalModel;
use crate::environment::object::{Celestial, CelestialType};
use crate::time::Instant;
use crate::units::{Derived, DerivedUnit, Length};

/// The Sun: spherical gravity, no magnetic or atmospheric model.
pub fn sun(instant: Instant) -> Celestial {
    Celestial::new(
        "Sun",
        CelestialType::Sun,
        Derived::new(
            SUN_GRAVITATIONAL_PARAMETER_M3_S2,
            DerivedUnit::gravitational_parameter(),
        ),
        Length::meters(SUN_EQUATORIAL_RADIUS_M),
        0.0,
        0.0,
        0.0,
        Arc::new(AnalyticalEphemeris::new(AnalyticalBody::Sun)),
        Some(Arc::new(SphericalGravitationalModel::new(
            SUN_GRAVITATIONAL_PARAMETER_M3_S2,
        ))),
        None,
        None,
        instant,
    )
}
