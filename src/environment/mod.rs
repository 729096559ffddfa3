/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

//! The physical environment: celestial bodies, their ephemerides and field models.

use std::sync::Arc;

use snafu::prelude::*;

pub mod atmospheric;
pub mod ephemeris;
pub mod gravitational;
pub mod magnetic;
pub mod object;
pub mod utility;

pub use object::{Celestial, CelestialType};

use crate::coordinate::frame::provider::ProviderError;
use crate::coordinate::frame::FrameError;
use crate::coordinate::Position;
use crate::data::DataError;
use crate::time::{Instant, TimeError};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum EnvironmentError {
    #[snafu(display("celestial body '{body}' has no {model} model"))]
    ModelUndefined { body: String, model: &'static str },
    #[snafu(display("no celestial object named '{name}'"))]
    ObjectNotFound { name: String },
    #[snafu(display("environment has no central body"))]
    NoCentralBody,
    #[snafu(display("frame operation failed: {source}"))]
    Frame { source: FrameError },
    #[snafu(display("provider failed: {source}"))]
    Provider { source: ProviderError },
    #[snafu(display("time conversion failed: {source}"))]
    Time { source: TimeError },
    #[snafu(display("data management failed: {source}"))]
    Data { source: DataError },
}

/// A snapshot of the environment: an instant and the celestial bodies under consideration.
///
/// The default environment carries the Earth (central body), the Sun and the Moon.
#[derive(Clone)]
pub struct Environment {
    instant: Instant,
    objects: Vec<Arc<Celestial>>,
    central_body: Option<Arc<Celestial>>,
}

impl Environment {
    pub fn new(
        instant: Instant,
        objects: Vec<Arc<Celestial>>,
        central_body: Option<Arc<Celestial>>,
    ) -> Self {
        Self {
            instant,
            objects,
            central_body,
        }
    }

    /// Earth-centered default: Earth, Sun and Moon at the J2000 epoch.
    pub fn default_environment() -> Self {
        let earth = Arc::new(object::celestial::earth::earth(Instant::j2000()));
        let sun = Arc::new(object::celestial::sun::sun(Instant::j2000()));
        let moon = Arc::new(object::celestial::moon::moon(Instant::j2000()));
        Self::new(
            Instant::j2000(),
            vec![earth.clone(), sun, moon],
            Some(earth),
        )
    }

    pub const fn instant(&self) -> &Instant {
        &self.instant
    }

    /// Moves the environment (and every object in it) to the provided instant.
    pub fn set_instant(&mut self, instant: Instant) {
        self.instant = instant;
        let central_name = self
            .central_body
            .as_ref()
            .map(|body| body.name().to_string());
        self.objects = self
            .objects
            .iter()
            .map(|body| Arc::new(body.at_instant(instant)))
            .collect();
        self.central_body = central_name.and_then(|name| {
            self.objects
                .iter()
                .find(|body| body.name() == name)
                .cloned()
        });
    }

    pub fn objects(&self) -> &[Arc<Celestial>] {
        &self.objects
    }

    pub fn object_names(&self) -> Vec<String> {
        self.objects
            .iter()
            .map(|body| body.name().to_string())
            .collect()
    }

    pub fn has_object_with_name(&self, name: &str) -> bool {
        self.objects.iter().any(|body| body.name() == name)
    }

    pub fn access_celestial_object_with_name(
        &self,
        name: &str,
    ) -> Result<Arc<Celestial>, EnvironmentError> {
        self.objects
            .iter()
            .find(|body| body.name() == name)
            .cloned()
            .ok_or_else(|| EnvironmentError::ObjectNotFound {
                name: name.to_string(),
            })
    }

    pub fn access_central_body(&self) -> Result<Arc<Celestial>, EnvironmentError> {
        self.central_body.clone().ok_or(EnvironmentError::NoCentralBody)
    }

    /// True when the Sun, seen from the position, is occluded by any object of this environment
    /// (the central body in practice) at the environment's instant.
    pub fn is_position_in_eclipse(&self, position: &Position) -> Result<bool, EnvironmentError> {
        utility::eclipse::is_position_in_eclipse(position, &self.instant, self)
    }
}

#[cfg(test)]
mod ut_environment {
    use super::*;

    #[test]
    fn test_default_environment() {
        let environment = Environment::default_environment();
        assert_eq!(environment.objects().len(), 3);
        assert!(environment.has_object_with_name("Earth"));
        assert!(environment.has_object_with_name("Sun"));
        assert!(environment.has_object_with_name("Moon"));
        assert_eq!(
            environment.access_central_body().unwrap().name(),
            "Earth"
        );
        assert!(matches!(
            environment.access_celestial_object_with_name("Jupiter"),
            Err(EnvironmentError::ObjectNotFound { .. })
        ));
    }

    #[test]
    fn test_set_instant_propagates() {
        let mut environment = Environment::default_environment();
        let later = Instant::j2000() + hifitime::Unit::Day * 42;
        environment.set_instant(later);
        assert_eq!(*environment.instant(), later);
        for body in environment.objects() {
            assert_eq!(*body.instant(), later);
        }
        assert_eq!(
            *environment.access_central_body().unwrap().instant(),
            later
        );
    }
}
