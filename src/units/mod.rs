/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

//! Typed scalar quantities.
//!
//! Each unit family stores its magnitude in the unit it was constructed with: arithmetic between
//! two quantities of the same family converts the right-hand side into the left-hand side's unit,
//! and the result keeps the left-hand unit. Conversions go through the family's SI ratio.

use snafu::prelude::*;

pub mod angle;
pub mod derived;
pub mod electric_current;
pub mod length;
pub mod mass;
pub mod time;

pub use angle::{Angle, AngleUnit};
pub use derived::{Derived, DerivedOrder, DerivedUnit};
pub use electric_current::{ElectricCurrent, ElectricCurrentUnit};
pub use length::{Length, LengthUnit};
pub use mass::{Mass, MassUnit};
pub use time::{TimeQuantity, TimeUnit};

#[derive(Debug, Snafu, PartialEq)]
#[snafu(visibility(pub))]
pub enum UnitError {
    #[snafu(display("units [{expected}] and [{got}] have incompatible derived orders"))]
    UnitIncompatible { expected: String, got: String },
    #[snafu(display("cannot parse {text} as a {family} unit"))]
    UnknownUnit { family: &'static str, text: String },
}
