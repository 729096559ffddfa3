/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

//! Atmospheric density models and the space weather data feeding them.

pub mod earth;

use crate::environment::EnvironmentError;
use crate::math::Vector3;
use crate::time::Instant;

/// An atmospheric density model.
pub trait AtmosphericModel: Send + Sync {
    /// [kg/m^3] Density at a body-fixed position.
    fn density_at(
        &self,
        position_m: &Vector3,
        instant: &Instant,
    ) -> Result<f64, EnvironmentError>;
}
