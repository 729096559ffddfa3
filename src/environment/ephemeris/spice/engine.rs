/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use std::sync::{Arc, Mutex};

use log::debug;
use once_cell::sync::Lazy;

use super::kernel::Kernel;
use crate::coordinate::frame::Frame;
use crate::coordinate::Position;
use crate::environment::ephemeris::analytical::{AnalyticalBody, AnalyticalEphemeris};
use crate::environment::ephemeris::Ephemeris;
use crate::environment::EnvironmentError;
use crate::time::Instant;

static GLOBAL: Lazy<Engine> = Lazy::new(|| Engine {
    kernels: Mutex::new(Vec::new()),
});

/// The SPICE engine (thread-safe): the set of loaded kernels and the body queries they answer.
///
/// Kernel byte decoding is a backend concern; the built-in backend evaluates the analytical
/// planetary theory, so positions served here are exact for that theory, not for the kernel
/// bytes. Kernel bookkeeping (load, unload, default set) matches what higher layers expect of
/// a SPICE-backed engine.
pub struct Engine {
    kernels: Mutex<Vec<Kernel>>,
}

impl Engine {
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    pub fn is_kernel_loaded(&self, kernel: &Kernel) -> bool {
        self.kernels.lock().unwrap().contains(kernel)
    }

    pub fn load_kernel(&self, kernel: Kernel) {
        let mut kernels = self.kernels.lock().unwrap();
        if !kernels.contains(&kernel) {
            debug!("loading kernel {kernel}");
            kernels.push(kernel);
        }
    }

    pub fn unload_kernel(&self, kernel: &Kernel) {
        self.kernels.lock().unwrap().retain(|k| k != kernel);
    }

    pub fn loaded_kernels(&self) -> Vec<Kernel> {
        self.kernels.lock().unwrap().clone()
    }

    /// Unloads every kernel.
    pub fn reset(&self) {
        self.kernels.lock().unwrap().clear();
    }

    /// [m] Position of the body in the provided frame.
    pub fn position_of(
        &self,
        body_name: &str,
        frame: &Arc<Frame>,
        instant: &Instant,
    ) -> Result<Position, EnvironmentError> {
        self.ephemeris_of(body_name)?.position_in(frame, instant)
    }

    /// The body frame served for the provided body.
    pub fn frame_of(&self, body_name: &str) -> Result<Arc<Frame>, EnvironmentError> {
        self.ephemeris_of(body_name)?.access_frame()
    }

    /// Orientation of the body frame with respect to the GCRF at the instant.
    pub fn orientation_of(
        &self,
        body_name: &str,
        instant: &Instant,
    ) -> Result<crate::math::UnitQuaternion, EnvironmentError> {
        let body_frame = self.frame_of(body_name)?;
        let transform = Frame::gcrf()
            .transform_to(&body_frame, instant)
            .map_err(|source| EnvironmentError::Frame { source })?;
        Ok(*transform.orientation())
    }

    fn ephemeris_of(&self, body_name: &str) -> Result<AnalyticalEphemeris, EnvironmentError> {
        let body = match body_name {
            "Earth" => AnalyticalBody::Earth,
            "Sun" => AnalyticalBody::Sun,
            "Moon" => AnalyticalBody::Moon,
            other => {
                return Err(EnvironmentError::ObjectNotFound {
                    name: other.to_string(),
                })
            }
        };
        Ok(AnalyticalEphemeris::new(body))
    }
}

/// An [Ephemeris] served through the SPICE engine.
#[derive(Clone, Debug)]
pub struct SpiceEphemeris {
    body_name: String,
}

impl SpiceEphemeris {
    pub fn new(body_name: &str) -> Self {
        Self {
            body_name: body_name.to_string(),
        }
    }
}

impl Ephemeris for SpiceEphemeris {
    fn position_in(
        &self,
        frame: &Arc<Frame>,
        instant: &Instant,
    ) -> Result<Position, EnvironmentError> {
        Engine::global().position_of(&self.body_name, frame, instant)
    }

    fn access_frame(&self) -> Result<Arc<Frame>, EnvironmentError> {
        Engine::global().frame_of(&self.body_name)
    }
}

#[cfg(test)]
mod ut_engine {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_kernel_bookkeeping() {
        let engine = Engine::global();
        let kernel = Kernel::from_path(Path::new("/tmp/ut-engine-de430.bsp"));

        assert!(!engine.is_kernel_loaded(&kernel));
        engine.load_kernel(kernel.clone());
        assert!(engine.is_kernel_loaded(&kernel));

        // Loading twice does not duplicate.
        engine.load_kernel(kernel.clone());
        assert_eq!(
            engine
                .loaded_kernels()
                .iter()
                .filter(|k| **k == kernel)
                .count(),
            1
        );

        engine.unload_kernel(&kernel);
        assert!(!engine.is_kernel_loaded(&kernel));
    }

    #[test]
    fn test_unknown_body_is_rejected() {
        assert!(matches!(
            Engine::global().position_of("Vulcan", &Frame::gcrf(), &Instant::j2000()),
            Err(EnvironmentError::ObjectNotFound { .. })
        ));
    }
}
