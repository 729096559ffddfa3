/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

//! Instants, durations and calendar representations over multiple time scales.
//!
//! The internal timeline is TAI, stored as a hifitime [Epoch]: every [Instant] compares and
//! orders on that uniform count regardless of the scale used to build it. Conversions to UTC go
//! through hifitime's leap second table; conversions to UT1 consult the IERS Earth orientation
//! manager and therefore fail outside its coverage.

use snafu::prelude::*;

pub mod date_time;
pub mod instant;
pub mod interval;
pub mod scale;

pub use date_time::{Date, DateTime, Format, Time};
pub use hifitime::{Duration, Epoch, Unit};
pub use instant::Instant;
pub use interval::{Interval, IntervalKind};
pub use scale::Scale;

use crate::coordinate::frame::provider::iers::EopError;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum TimeError {
    #[snafu(display("conversion into {scale} is unavailable: {source}"))]
    ScaleConversionUnavailable { scale: Scale, source: EopError },
    #[snafu(display("UTC is undefined before 1960 (no TAI-UTC offset is published)"))]
    UtcUndefined,
    #[snafu(display("cannot parse '{text}' as a date-time: {reason}"))]
    DateTimeParse { text: String, reason: String },
    #[snafu(display("{element} = {value} is outside [{min}, {max}]"))]
    ElementOutOfRange {
        element: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[snafu(display("cannot parse '{text}' as a time scale"))]
    UnknownScale { text: String },
    #[snafu(display("interval start {start} is after its end {end}"))]
    InvertedInterval { start: String, end: String },
    #[snafu(display("grid step must be strictly positive"))]
    NonPositiveStep,
}
