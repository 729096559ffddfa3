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

/// An orthonormal triad expressed in a frame.
#[derive(Clone, Debug)]
pub struct Axes {
    x: Vector3,
    y: Vector3,
    z: Vector3,
    frame: Arc<Frame>,
}

impl Axes {
    pub fn new(x: Vector3, y: Vector3, z: Vector3, frame: Arc<Frame>) -> Self {
        Self { x, y, z, frame }
    }

    /// The frame's own basis.
    pub fn of_frame(frame: Arc<Frame>) -> Self {
        Self::new(Vector3::x(), Vector3::y(), Vector3::z(), frame)
    }

    pub const fn x(&self) -> &Vector3 {
        &self.x
    }

    pub const fn y(&self) -> &Vector3 {
        &self.y
    }

    pub const fn z(&self) -> &Vector3 {
        &self.z
    }

    pub fn frame(&self) -> &Arc<Frame> {
        &self.frame
    }

    /// Same triad expressed in the destination frame: each basis vector rotates by the
    /// orientation delta.
    pub fn in_frame(
        &self,
        destination: &Arc<Frame>,
        instant: &Instant,
    ) -> Result<Self, FrameError> {
        let transform = self.frame.transform_to(destination, instant)?;
        Ok(Self::new(
            transform.apply_to_vector(&self.x),
            transform.apply_to_vector(&self.y),
            transform.apply_to_vector(&self.z),
            destination.clone(),
        ))
    }
}

impl fmt::Display for Axes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "x: {:?}, y: {:?}, z: {:?} @ {}",
            self.x.as_slice(),
            self.y.as_slice(),
            self.z.as_slice(),
            self.frame
        )
    }
}

#[cfg(test)]
mod ut_axes {
    use super::*;

    #[test]
    fn test_reframed_triad_stays_orthonormal() {
        crate::testing::pin_managers_offline();
        let axes = Axes::of_frame(Frame::teme());
        let instant = Instant::j2000() + hifitime::Unit::Day * 2000;
        let in_gcrf = axes.in_frame(&Frame::gcrf(), &instant).unwrap();

        assert!((in_gcrf.x().norm() - 1.0).abs() < 1e-12);
        assert!((in_gcrf.y().norm() - 1.0).abs() < 1e-12);
        assert!((in_gcrf.z().norm() - 1.0).abs() < 1e-12);
        assert!(in_gcrf.x().dot(in_gcrf.y()).abs() < 1e-12);
        assert!(in_gcrf.x().cross(in_gcrf.y()).dot(in_gcrf.z()) > 0.999_999);
    }
}
