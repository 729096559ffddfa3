/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use snafu::prelude::*;

use crate::coordinate::frame::FrameError;
use crate::data::DataError;
use crate::environment::EnvironmentError;
use crate::time::TimeError;
use crate::units::UnitError;

/// Top-level error, aggregating the per-subsystem errors.
///
/// Library functions return the error of the subsystem they belong to; this enum exists so that
/// callers juggling several subsystems can funnel everything into a single type with `?`.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum PhysicsError {
    #[snafu(display("time error: {source}"))]
    Time { source: TimeError },
    #[snafu(display("unit error: {source}"))]
    Unit { source: UnitError },
    #[snafu(display("data management error: {source}"))]
    Data { source: DataError },
    #[snafu(display("frame error: {source}"))]
    Frame { source: FrameError },
    #[snafu(display("environment error: {source}"))]
    Environment { source: EnvironmentError },
    #[snafu(display("{err}"))]
    GenericError { err: String },
}

pub type PhysicsResult<T> = Result<T, PhysicsError>;

impl From<TimeError> for PhysicsError {
    fn from(source: TimeError) -> Self {
        Self::Time { source }
    }
}

impl From<UnitError> for PhysicsError {
    fn from(source: UnitError) -> Self {
        Self::Unit { source }
    }
}

impl From<DataError> for PhysicsError {
    fn from(source: DataError) -> Self {
        Self::Data { source }
    }
}

impl From<FrameError> for PhysicsError {
    fn from(source: FrameError) -> Self {
        Self::Frame { source }
    }
}

impl From<EnvironmentError> for PhysicsError {
    fn from(source: EnvironmentError) -> Self {
        Self::Environment { source }
    }
}
