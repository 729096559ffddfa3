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
    MOON_EQUATORIAL_RADIUS_M, MOON_GRAVITATIONAL_PARAMETER_M3_S2,
};
use crate::environment::ephemeris::analytical::{AnalyticalBody, AnalyticalEphemeris};
use crate::environment::gravitational::SphericalGravitationalModel;
use crate::environment::object::{Celestial, CelestialType};
use crate::time::Instant;
use crate::units::{Derived, DerivedUnit, Length};

/// The Moon: spherical gravity, no magnetic or atmospheric model.
pub fn moon(instant: Instant) -> Celestial {
    Celestial::new(
        "Moon",
        CelestialType::Moon,
        Derived::new(
            MOON_GRAVITATIONAL_PARAMETER_M3_S2,
            DerivedUnit::gravitational_parameter(),
        ),
        Length::meters(MOON_EQUATORIAL_RADIUS_M),
        0.0,
        0.0,
        0.0,
        Arc::new(AnalyticalEphemeris::new(AnalyticalBody::Moon)),
        Some(Arc::new(SphericalGravitationalModel::new(
            MOON_GRAVITATIONAL_PARAMETER_M3_S2,
        ))),
        None,
        None,
        instant,
    )
}
