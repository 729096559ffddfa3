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
use crate::math::Vector3;
use crate::time::Instant;
use crate::units::{Length, LengthUnit};

/// A position vector expressed in a frame.
#[derive(Clone, Debug)]
pub struct Position {
    coordinates: Vector3,
    unit: LengthUnit,
    frame: Arc<Frame>,
}

impl Position {
    pub fn new(coordinates: Vector3, unit: LengthUnit, frame: Arc<Frame>) -> Self {
        Self {
            coordinates,
            unit,
            frame,
        }
    }

    pub fn meters(coordinates: Vector3, frame: Arc<Frame>) -> Self {
        Self::new(coordinates, LengthUnit::Meter, frame)
    }

    pub const fn coordinates(&self) -> &Vector3 {
        &self.coordinates
    }

    pub const fn unit(&self) -> LengthUnit {
        self.unit
    }

    pub fn frame(&self) -> &Arc<Frame> {
        &self.frame
    }

    /// Same position expressed in another length unit.
    pub fn in_unit(&self, unit: LengthUnit) -> Self {
        let ratio = self.unit.si_ratio() / unit.si_ratio();
        Self::new(self.coordinates * ratio, unit, self.frame.clone())
    }

    pub fn in_meters(&self) -> Self {
        self.in_unit(LengthUnit::Meter)
    }

    /// Same position expressed in the destination frame at the provided instant.
    pub fn in_frame(
        &self,
        destination: &Arc<Frame>,
        instant: &Instant,
    ) -> Result<Self, FrameError> {
        let transform = self.frame.transform_to(destination, instant)?;
        let meters = self.in_meters();
        Ok(Self::meters(
            transform.apply_to_position(meters.coordinates()),
            destination.clone(),
        ))
    }

    /// True when both positions are within the tolerance of one another.
    ///
    /// Operands in different frames are a hard error, never silently reframed.
    pub fn is_near(&self, other: &Self, tolerance: Length) -> Result<bool, FrameError> {
        if self.frame != other.frame {
            return Err(FrameError::FrameMismatch {
                action: "position comparison",
                frame1: self.frame.name().to_string(),
                frame2: other.frame.name().to_string(),
            });
        }
        let delta_m =
            (self.in_meters().coordinates - other.in_meters().coordinates).norm();
        Ok(delta_m <= tolerance.in_meters())
    }
}

impl fmt::Display for Position {
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
mod ut_position {
    use super::*;
    use crate::units::Length;

    #[test]
    fn test_unit_conversion() {
        let position = Position::new(
            Vector3::new(1.0, 0.0, 0.0),
            LengthUnit::NauticalMile,
            Frame::gcrf(),
        );
        let in_meters = position.in_meters();
        assert!((in_meters.coordinates()[0] - 1_852.0).abs() < 1e-9);
        assert_eq!(in_meters.unit(), LengthUnit::Meter);
    }

    #[test]
    fn test_is_near_requires_same_frame() {
        let a = Position::meters(Vector3::new(1.0, 2.0, 3.0), Frame::gcrf());
        let b = Position::meters(Vector3::new(1.0, 2.0, 3.5), Frame::gcrf());
        assert!(a.is_near(&b, Length::meters(1.0)).unwrap());
        assert!(!a.is_near(&b, Length::meters(0.1)).unwrap());

        let c = Position::meters(Vector3::new(1.0, 2.0, 3.0), Frame::teme());
        assert!(matches!(
            a.is_near(&c, Length::meters(1.0)),
            Err(FrameError::FrameMismatch { .. })
        ));
    }

    #[test]
    fn test_reframe_round_trip() {
        crate::testing::pin_managers_offline();
        let gcrf = Frame::gcrf();
        let teme = Frame::teme();
        let instant = Instant::j2000() + hifitime::Unit::Day * 1000;

        let position = Position::meters(Vector3::new(7.0e6, -1.2e6, 3.4e5), gcrf.clone());
        let round_trip = position
            .in_frame(&teme, &instant)
            .unwrap()
            .in_frame(&gcrf, &instant)
            .unwrap();
        assert!(position
            .is_near(&round_trip, Length::meters(1e-6))
            .unwrap());
    }
}
