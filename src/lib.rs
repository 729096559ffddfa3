/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

extern crate const_format;
extern crate hifitime;
extern crate log;

pub mod constants;
pub mod coordinate;
pub mod data;
pub mod environment;
pub mod errors;
pub mod math;
pub mod time;
pub mod units;

#[cfg(test)]
pub(crate) mod testing {
    /// Pins the IERS manager in Manual mode: unit tests must never reach for the network.
    pub fn pin_managers_offline() {
        crate::coordinate::frame::provider::iers::Manager::global()
            .set_mode(crate::data::Mode::Manual);
    }
}

pub mod prelude {
    pub use crate::coordinate::frame::Frame;
    pub use crate::coordinate::{Axes, Position, Transform, Velocity};
    pub use crate::environment::{Celestial, Environment};
    pub use crate::errors::PhysicsError;
    pub use crate::time::{DateTime, Duration, Instant, Interval, Scale};
    pub use crate::units::{Angle, Derived, Length, Mass};
    pub use std::fs::File;
    pub use std::sync::Arc;
}
