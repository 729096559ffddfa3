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
    EARTH_EQUATORIAL_RADIUS_M, EARTH_FLATTENING, EARTH_GRAVITATIONAL_PARAMETER_M3_S2, EARTH_J2,
    EARTH_J4,
};
use crate::environment::atmospheric::earth::ExponentialAtmosphericModel;
use crate::environment::ephemeris::analytical::{AnalyticalBody, AnalyticalEphemeris};
use crate::environment::gravitational::ZonalGravitationalModel;
use crate::environment::magnetic::DipoleMagneticModel;
use crate::environment::object::{Celestial, CelestialType};
use crate::time::Instant;
use crate::units::{Derived, DerivedUnit, Length};

/// The Earth: zonal gravity, dipole magnetic field, exponential atmosphere.
pub fn earth(instant: Instant) -> Celestial {
    Celestial::new(
        "Earth",
        CelestialType::Earth,
        Derived::new(
            EARTH_GRAVITATIONAL_PARAMETER_M3_S2,
            DerivedUnit::gravitational_parameter(),
        ),
        Length::meters(EARTH_EQUATORIAL_RADIUS_M),
        EARTH_FLATTENING,
        EARTH_J2,
        EARTH_J4,
        Arc::new(AnalyticalEphemeris::new(AnalyticalBody::Earth)),
        Some(Arc::new(ZonalGravitationalModel::new(
            EARTH_GRAVITATIONAL_PARAMETER_M3_S2,
            EARTH_EQUATORIAL_RADIUS_M,
            EARTH_J2,
            EARTH_J4,
        ))),
        Some(Arc::new(DipoleMagneticModel::earth())),
        Some(Arc::new(ExponentialAtmosphericModel)),
        instant,
    )
}
