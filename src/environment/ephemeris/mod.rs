/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

//! Ephemerides: where a celestial body is, and the frame it is fixed in.

use std::sync::Arc;

pub mod analytical;
pub mod spice;

pub use analytical::AnalyticalEphemeris;

use super::EnvironmentError;
use crate::coordinate::frame::Frame;
use crate::coordinate::Position;
use crate::time::Instant;

/// A source of celestial body positions.
pub trait Ephemeris: Send + Sync {
    /// [m] Position of the body in the provided frame at the instant.
    fn position_in(
        &self,
        frame: &Arc<Frame>,
        instant: &Instant,
    ) -> Result<Position, EnvironmentError>;

    /// The frame this body is fixed at the origin of (its body frame).
    fn access_frame(&self) -> Result<Arc<Frame>, EnvironmentError>;
}
