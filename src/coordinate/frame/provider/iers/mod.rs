/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

//! IERS Earth orientation data: Bulletin A, Finals 2000A, and their manager.

use snafu::prelude::*;

pub mod bulletin_a;
pub mod finals2000a;
pub mod manager;

pub use bulletin_a::BulletinA;
pub use finals2000a::Finals2000A;
pub use manager::Manager;

use crate::data::DataError;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum EopError {
    #[snafu(display("instant {instant} is outside the loaded EOP interval [{start}, {end}]"))]
    OutOfRange {
        instant: String,
        start: String,
        end: String,
    },
    #[snafu(display("no {kind} is loaded"))]
    NoDataLoaded { kind: &'static str },
    #[snafu(display("EOP data management failed: {source}"))]
    Data { source: DataError },
}
