/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

//! Celestial objects: bodies bundling an ephemeris with their physical models.

use std::fmt;
use std::sync::Arc;

use snafu::ResultExt;

pub mod celestial;
pub mod geometry;

pub use geometry::Segment;

use super::atmospheric::AtmosphericModel;
use super::ephemeris::Ephemeris;
use super::gravitational::GravitationalModel;
use super::magnetic::MagneticModel;
use super::{EnvironmentError, FrameSnafu};
use crate::coordinate::frame::provider::Provider;
use crate::coordinate::frame::Frame;
use crate::coordinate::spherical::LLA;
use crate::coordinate::Position;
use crate::math::Vector3;
use crate::time::Instant;
use crate::units::{Derived, Length};

/// The kind of a celestial body.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CelestialType {
    Sun,
    Mercury,
    Venus,
    Earth,
    Moon,
    Mars,
}

impl fmt::Display for CelestialType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Sun => "Sun",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Earth => "Earth",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
        };
        write!(f, "{name}")
    }
}

/// The kind of local frame [Celestial::frame_at] serves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameType {
    /// North-East-Down at a geodetic point.
    Ned,
}

/// A celestial body: name, physical parameters, ephemeris, and optional field models.
///
/// The field models are optional on purpose: querying an absent model is
/// [EnvironmentError::ModelUndefined], callers check presence first.
#[derive(Clone)]
pub struct Celestial {
    name: String,
    body_type: CelestialType,
    gravitational_parameter: Derived,
    equatorial_radius: Length,
    flattening: f64,
    j2: f64,
    j4: f64,
    ephemeris: Arc<dyn Ephemeris>,
    gravitational_model: Option<Arc<dyn GravitationalModel>>,
    magnetic_model: Option<Arc<dyn MagneticModel>>,
    atmospheric_model: Option<Arc<dyn AtmosphericModel>>,
    instant: Instant,
}

impl Celestial {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        body_type: CelestialType,
        gravitational_parameter: Derived,
        equatorial_radius: Length,
        flattening: f64,
        j2: f64,
        j4: f64,
        ephemeris: Arc<dyn Ephemeris>,
        gravitational_model: Option<Arc<dyn GravitationalModel>>,
        magnetic_model: Option<Arc<dyn MagneticModel>>,
        atmospheric_model: Option<Arc<dyn AtmosphericModel>>,
        instant: Instant,
    ) -> Self {
        Self {
            name: name.to_string(),
            body_type,
            gravitational_parameter,
            equatorial_radius,
            flattening,
            j2,
            j4,
            ephemeris,
            gravitational_model,
            magnetic_model,
            atmospheric_model,
            instant,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn body_type(&self) -> CelestialType {
        self.body_type
    }

    pub const fn gravitational_parameter(&self) -> &Derived {
        &self.gravitational_parameter
    }

    pub const fn equatorial_radius(&self) -> &Length {
        &self.equatorial_radius
    }

    pub const fn flattening(&self) -> f64 {
        self.flattening
    }

    pub const fn j2(&self) -> f64 {
        self.j2
    }

    pub const fn j4(&self) -> f64 {
        self.j4
    }

    pub const fn instant(&self) -> &Instant {
        &self.instant
    }

    /// The same body, moved to another instant.
    pub fn at_instant(&self, instant: Instant) -> Self {
        let mut body = self.clone();
        body.instant = instant;
        body
    }

    pub fn has_gravitational_model(&self) -> bool {
        self.gravitational_model.is_some()
    }

    pub fn has_magnetic_model(&self) -> bool {
        self.magnetic_model.is_some()
    }

    pub fn has_atmospheric_model(&self) -> bool {
        self.atmospheric_model.is_some()
    }

    /// The body frame (the frame this body is fixed at the origin of).
    pub fn access_frame(&self) -> Result<Arc<Frame>, EnvironmentError> {
        self.ephemeris.access_frame()
    }

    /// [m] Position of the body center in the provided frame at the instant.
    pub fn position_in(
        &self,
        frame: &Arc<Frame>,
        instant: &Instant,
    ) -> Result<Position, EnvironmentError> {
        self.ephemeris.position_in(frame, instant)
    }

    /// A local frame attached to this body at the provided geodetic point.
    ///
    /// Frames are registered once and cached by (body, rounded coordinates, type), so repeated
    /// queries at the same point return the same frame and distinct points never collide.
    pub fn frame_at(
        &self,
        lla: &LLA,
        frame_type: FrameType,
    ) -> Result<Arc<Frame>, EnvironmentError> {
        match frame_type {
            FrameType::Ned => {
                let name = format!(
                    "{} NED [{:.8}, {:.8}, {:.3}]",
                    self.name,
                    lla.latitude().in_degrees(),
                    lla.longitude().in_degrees(),
                    lla.altitude().in_meters(),
                );
                if let Ok(frame) = Frame::with_name(&name) {
                    return Ok(frame);
                }

                let body_frame = self.access_frame()?;
                let translation = -lla.to_cartesian(
                    self.equatorial_radius.in_meters(),
                    self.flattening,
                );
                let orientation = lla.to_ned_orientation();
                let constructed = Frame::construct(
                    &name,
                    false,
                    Some(body_frame.name()),
                    Provider::Fixed {
                        orientation,
                        translation,
                    },
                );
                match constructed {
                    // Another thread may have registered the same point meanwhile.
                    Err(crate::coordinate::frame::FrameError::FrameAlreadyExists { .. }) => {
                        Frame::with_name(&name).context(FrameSnafu)
                    }
                    other => other.context(FrameSnafu),
                }
            }
        }
    }

    /// [m/s^2] Gravitational field at a position, expressed in the body frame.
    pub fn gravitational_field_at(
        &self,
        position: &Position,
        instant: &Instant,
    ) -> Result<Vector3, EnvironmentError> {
        let model = self.gravitational_model.as_ref().ok_or_else(|| {
            EnvironmentError::ModelUndefined {
                body: self.name.clone(),
                model: "gravitational",
            }
        })?;
        let body_fixed = position
            .in_frame(&self.access_frame()?, instant)
            .context(FrameSnafu)?;
        model.field_at(body_fixed.coordinates(), instant)
    }

    /// [T] Magnetic field at a position, expressed in the body frame.
    pub fn magnetic_field_at(
        &self,
        position: &Position,
        instant: &Instant,
    ) -> Result<Vector3, EnvironmentError> {
        let model = self.magnetic_model.as_ref().ok_or_else(|| {
            EnvironmentError::ModelUndefined {
                body: self.name.clone(),
                model: "magnetic",
            }
        })?;
        let body_fixed = position
            .in_frame(&self.access_frame()?, instant)
            .context(FrameSnafu)?;
        model.field_at(body_fixed.coordinates(), instant)
    }

    /// [kg/m^3] Atmospheric density at a position.
    pub fn atmospheric_density_at(
        &self,
        position: &Position,
        instant: &Instant,
    ) -> Result<f64, EnvironmentError> {
        let model = self.atmospheric_model.as_ref().ok_or_else(|| {
            EnvironmentError::ModelUndefined {
                body: self.name.clone(),
                model: "atmospheric",
            }
        })?;
        let body_fixed = position
            .in_frame(&self.access_frame()?, instant)
            .context(FrameSnafu)?;
        model.density_at(body_fixed.coordinates(), instant)
    }

    /// The terminator: the great circle separating the lit and dark hemispheres at this body's
    /// instant, as geodetic points on its surface.
    ///
    /// `sun_direction_body_fixed` is the unit vector towards the Sun expressed in the body
    /// frame; the circle is sampled at `point_count` nodes.
    pub fn terminator_geometry(
        &self,
        sun_direction_body_fixed: &Vector3,
        point_count: usize,
    ) -> Vec<LLA> {
        let sun = sun_direction_body_fixed.normalize();
        // Any vector orthogonal to the Sun direction seeds the circle basis.
        let helper = if sun[2].abs() < 0.9 {
            Vector3::z()
        } else {
            Vector3::x()
        };
        let e1 = sun.cross(&helper).normalize();
        let e2 = sun.cross(&e1).normalize();

        let radius = self.equatorial_radius.in_meters();
        (0..point_count)
            .map(|i| {
                let theta = core::f64::consts::TAU * (i as f64) / (point_count as f64);
                let point = radius * (theta.cos() * e1 + theta.sin() * e2);
                LLA::from_cartesian(&point, radius, self.flattening)
            })
            .collect()
    }

    /// Sun direction helper for [Celestial::terminator_geometry]: the unit vector from this
    /// body to the Sun, expressed in this body's frame at this body's instant.
    pub fn sun_direction(
        &self,
        sun: &Celestial,
    ) -> Result<Vector3, EnvironmentError> {
        let body_frame = self.access_frame()?;
        let sun_position = sun.position_in(&body_frame, &self.instant)?;
        Ok(sun_position.in_meters().coordinates().normalize())
    }
}

impl fmt::Display for Celestial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.body_type)
    }
}
