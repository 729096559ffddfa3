/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use std::fmt;
use std::sync::Arc;

use crate::coordinate::frame::{Frame, FrameError};
use crate::coordinate::Position;
use crate::math::Vector3;
use crate::time::Instant;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VelocityUnit {
    MeterPerSecond,
}

impl VelocityUnit {
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::MeterPerSecond => "m/s",
        }
    }
}

/// A velocity vector expressed in a frame.
#[derive(Clone, Debug)]
pub struct Velocity {
    coordinates: Vector3,
    unit: VelocityUnit,
    frame: Arc<Frame>,
}

impl Velocity {
    pub fn new(coordinates: Vector3, unit: VelocityUnit, frame: Arc<Frame>) -> Self {
        Self {
            coordinates,
            unit,
            frame,
        }
    }

    pub fn meters_per_second(coordinates: Vector3, frame: Arc<Frame>) -> Self {
        Self::new(coordinates, VelocityUnit::MeterPerSecond, frame)
    }

    pub const fn coordinates(&self) -> &Vector3 {
        &self.coordinates
    }

    pub const fn unit(&self) -> VelocityUnit {
        self.unit
    }

    pub fn frame(&self) -> &Arc<Frame> {
        &self.frame
    }

    /// Same velocity expressed in the destination frame at the provided instant.
    ///
    /// Reframing a velocity needs the position of the point whose velocity this is: the
    /// transform's translation rate and angular velocity both contribute,
    /// `v' = q (v + v_t) - w x (q (x + t))`.
    pub fn in_frame(
        &self,
        position: &Position,
        destination: &Arc<Frame>,
        instant: &Instant,
    ) -> Result<Self, FrameError> {
        if self.frame != *position.frame() {
            return Err(FrameError::FrameMismatch {
                action: "velocity reframing",
                frame1: self.frame.name().to_string(),
                frame2: position.frame().name().to_string(),
            });
        }
        let transform = self.frame.transform_to(destination, instant)?;
        let mapped = transform.apply_to_velocity(
            position.in_meters().coordinates(),
            &self.coordinates,
        );
        Ok(Self::meters_per_second(mapped, destination.clone()))
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}] [{}] @ {}",
            self.coordinates[0],
            self.coordinates[1],
            self.coordinates[2],
            self.unit.symbol(),
            self.frame
        )
    }
}

#[cfg(test)]
mod ut_velocity {
    use super::*;

    #[test]
    fn test_frame_mismatch_is_rejected() {
        let velocity =
            Velocity::meters_per_second(Vector3::new(0.0, 7.5e3, 0.0), Frame::gcrf());
        let position = Position::meters(Vector3::new(7.0e6, 0.0, 0.0), Frame::teme());
        assert!(matches!(
            velocity.in_frame(&position, &Frame::gcrf(), &Instant::j2000()),
            Err(FrameError::FrameMismatch { .. })
        ));
    }
}
