/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

//! The reference frame graph.
//!
//! Frames form a directed tree rooted at the GCRF, each non-root frame naming its parent and
//! carrying the [Provider] producing the parent-to-frame transform at any instant. A transform
//! between two arbitrary frames walks both branches to their common ancestor and composes the
//! provider transforms, cf. [Frame::transform_to].

use std::fmt;
use std::sync::Arc;

use log::trace;
use snafu::prelude::*;

pub mod provider;
pub mod registry;

pub use provider::{Provider, Theory};
pub use registry::Registry;

use crate::coordinate::Transform;
use crate::time::{Format, Instant, Scale};

use provider::ProviderError;

/// Parent walks longer than this indicate a cycle introduced by dynamic frame registration.
const MAX_DEPTH: usize = 16;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum FrameError {
    #[snafu(display("no frame is registered under the name '{name}'"))]
    FrameNotFound { name: String },
    #[snafu(display("a different frame is already registered under the name '{name}'"))]
    FrameAlreadyExists { name: String },
    #[snafu(display("frames '{from}' and '{to}' share no common ancestor"))]
    NoCommonAncestor { from: String, to: String },
    #[snafu(display(
        "frame '{name}' is deeper than {MAX_DEPTH} levels (cycle in the frame tree?)"
    ))]
    DepthExceeded { name: String },
    #[snafu(display("provider of frame '{frame}' failed: {source}"))]
    Provider {
        frame: String,
        source: ProviderError,
    },
    #[snafu(display("{action} requires both operands in the same frame, got '{frame1}' and '{frame2}'"))]
    FrameMismatch {
        action: &'static str,
        frame1: String,
        frame2: String,
    },
}

/// A node of the frame tree.
///
/// Frames hold their parent by name, not by reference: the provider and the walk resolve the
/// parent through the registry on demand, which keeps the tree cycle-free by construction.
pub struct Frame {
    name: String,
    quasi_inertial: bool,
    parent_name: Option<String>,
    provider: Provider,
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Frame '{}'", self.name)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Frame {}

impl Frame {
    /// Builds and registers a frame. Fails when the name is already taken.
    pub fn construct(
        name: &str,
        quasi_inertial: bool,
        parent_name: Option<&str>,
        provider: Provider,
    ) -> Result<Arc<Self>, FrameError> {
        let frame = Arc::new(Self {
            name: name.to_string(),
            quasi_inertial,
            parent_name: parent_name.map(str::to_string),
            provider,
        });
        Registry::global().add_frame(frame.clone())?;
        Ok(frame)
    }

    /// Removes the frame registered under the provided name.
    pub fn destruct(name: &str) {
        Registry::global().remove_frame_with_name(name);
    }

    /// The frame registered under the provided name.
    pub fn with_name(name: &str) -> Result<Arc<Self>, FrameError> {
        Registry::global().frame_with_name(name)
    }

    pub fn exists(name: &str) -> bool {
        Registry::global().has_frame_with_name(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn is_quasi_inertial(&self) -> bool {
        self.quasi_inertial
    }

    pub fn has_parent(&self) -> bool {
        self.parent_name.is_some()
    }

    pub fn parent_name(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }

    /// The parent frame, resolved through the registry.
    pub fn access_parent(&self) -> Result<Arc<Frame>, FrameError> {
        match &self.parent_name {
            Some(name) => Registry::global().frame_with_name(name),
            None => Err(FrameError::FrameNotFound {
                name: format!("parent of {}", self.name),
            }),
        }
    }

    pub const fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Geocentric Celestial Reference Frame: the root of the tree.
    pub fn gcrf() -> Arc<Self> {
        Registry::global().frame_or_insert_with("GCRF", || {
            Arc::new(Self {
                name: "GCRF".to_string(),
                quasi_inertial: true,
                parent_name: None,
                provider: Provider::Identity,
            })
        })
    }

    /// Earth mean equator and equinox of J2000.0.
    pub fn j2000(theory: Theory) -> Arc<Self> {
        Self::gcrf();
        let name = match theory {
            Theory::IAU2000A => "J2000 (IAU 2000A)",
            Theory::IAU2006 => "J2000 (IAU 2006)",
        };
        Registry::global().frame_or_insert_with(name, || {
            Arc::new(Self {
                name: name.to_string(),
                quasi_inertial: true,
                parent_name: Some("GCRF".to_string()),
                provider: Provider::J2000(theory),
            })
        })
    }

    /// Mean equator and equinox of date.
    pub fn mod_frame() -> Arc<Self> {
        Self::gcrf();
        Registry::global().frame_or_insert_with("MOD", || {
            Arc::new(Self {
                name: "MOD".to_string(),
                quasi_inertial: true,
                parent_name: Some("GCRF".to_string()),
                provider: Provider::Mod { epoch: None },
            })
        })
    }

    /// Mean equator and equinox frozen at the provided epoch.
    pub fn mod_frame_at(epoch: Instant) -> Arc<Self> {
        Self::gcrf();
        let name = frozen_name("MOD", &epoch);
        Registry::global().frame_or_insert_with(&name, || {
            Arc::new(Self {
                name: name.clone(),
                quasi_inertial: true,
                parent_name: Some("GCRF".to_string()),
                provider: Provider::Mod { epoch: Some(epoch) },
            })
        })
    }

    /// True equator and equinox of date.
    pub fn tod() -> Arc<Self> {
        Self::mod_frame();
        Registry::global().frame_or_insert_with("TOD", || {
            Arc::new(Self {
                name: "TOD".to_string(),
                quasi_inertial: true,
                parent_name: Some("MOD".to_string()),
                provider: Provider::Tod { epoch: None },
            })
        })
    }

    /// True equator and equinox frozen at the provided epoch.
    pub fn tod_at(epoch: Instant) -> Arc<Self> {
        Self::mod_frame();
        let name = frozen_name("TOD", &epoch);
        Registry::global().frame_or_insert_with(&name, || {
            Arc::new(Self {
                name: name.clone(),
                quasi_inertial: true,
                parent_name: Some("MOD".to_string()),
                provider: Provider::Tod { epoch: Some(epoch) },
            })
        })
    }

    /// True equator, mean equinox: the frame of TLE/SGP4 state vectors.
    pub fn teme() -> Arc<Self> {
        Self::tod();
        Registry::global().frame_or_insert_with("TEME", || {
            Arc::new(Self {
                name: "TEME".to_string(),
                quasi_inertial: true,
                parent_name: Some("TOD".to_string()),
                provider: Provider::Teme,
            })
        })
    }

    /// Celestial Intermediate Reference Frame (IAU 2006/2000A).
    pub fn cirf() -> Arc<Self> {
        Self::gcrf();
        Registry::global().frame_or_insert_with("CIRF", || {
            Arc::new(Self {
                name: "CIRF".to_string(),
                quasi_inertial: true,
                parent_name: Some("GCRF".to_string()),
                provider: Provider::Cirf,
            })
        })
    }

    /// Terrestrial Intermediate Reference Frame.
    pub fn tirf() -> Arc<Self> {
        Self::cirf();
        Registry::global().frame_or_insert_with("TIRF", || {
            Arc::new(Self {
                name: "TIRF".to_string(),
                quasi_inertial: false,
                parent_name: Some("CIRF".to_string()),
                provider: Provider::Tirf,
            })
        })
    }

    /// International Terrestrial Reference Frame.
    pub fn itrf() -> Arc<Self> {
        Self::tirf();
        Registry::global().frame_or_insert_with("ITRF", || {
            Arc::new(Self {
                name: "ITRF".to_string(),
                quasi_inertial: false,
                parent_name: Some("TIRF".to_string()),
                provider: Provider::Itrf,
            })
        })
    }

    /// Depth of this frame: its distance to the root.
    fn depth(self: &Arc<Self>) -> Result<usize, FrameError> {
        let mut depth = 0;
        let mut cursor = self.clone();
        while cursor.has_parent() {
            cursor = cursor.access_parent()?;
            depth += 1;
            if depth > MAX_DEPTH {
                return Err(FrameError::DepthExceeded {
                    name: self.name.clone(),
                });
            }
        }
        Ok(depth)
    }

    /// The transform mapping coordinates in this frame into the destination frame.
    ///
    /// Walks both frames up to their common ancestor, composes each branch from the providers'
    /// parent-to-frame transforms, and returns `T_ancestor_to_destination . T_self_to_ancestor`.
    /// Results are cached per `(from, to, instant)`; failures are never cached.
    pub fn transform_to(
        self: &Arc<Self>,
        destination: &Arc<Frame>,
        instant: &Instant,
    ) -> Result<Transform, FrameError> {
        if Arc::ptr_eq(self, destination) || self.name == destination.name {
            return Ok(Transform::identity(*instant));
        }

        let registry = Registry::global();
        if let Some(cached) = registry.cached_transform(&self.name, &destination.name, instant) {
            return Ok(cached);
        }

        let mut from = self.clone();
        let mut to = destination.clone();
        let mut from_depth = from.depth()?;
        let mut to_depth = to.depth()?;

        // T_self_to_ancestor, accumulated while lifting the source branch.
        let mut from_accumulated = Transform::identity(*instant);
        // T_destination_to_ancestor, accumulated while lifting the destination branch.
        let mut to_accumulated = Transform::identity(*instant);

        while from_depth > to_depth {
            from_accumulated = lift(&mut from, instant)? * from_accumulated;
            from_depth -= 1;
        }
        while to_depth > from_depth {
            to_accumulated = lift(&mut to, instant)? * to_accumulated;
            to_depth -= 1;
        }
        while !Arc::ptr_eq(&from, &to) && from.name != to.name {
            if !from.has_parent() || !to.has_parent() {
                return Err(FrameError::NoCommonAncestor {
                    from: self.name.clone(),
                    to: destination.name.clone(),
                });
            }
            from_accumulated = lift(&mut from, instant)? * from_accumulated;
            to_accumulated = lift(&mut to, instant)? * to_accumulated;
        }

        trace!(
            "transform {} -> {} via {} @ {instant}",
            self.name,
            destination.name,
            from.name
        );

        let transform = to_accumulated.inverse() * from_accumulated;
        registry.cache_transform(&self.name, &destination.name, instant, transform.clone());
        Ok(transform)
    }
}

/// Replaces `frame` with its parent and returns the frame-to-parent transform.
fn lift(frame: &mut Arc<Frame>, instant: &Instant) -> Result<Transform, FrameError> {
    let parent_to_frame =
        frame
            .provider()
            .transform_at(instant)
            .map_err(|source| FrameError::Provider {
                frame: frame.name().to_string(),
                source,
            })?;
    *frame = frame.access_parent()?;
    Ok(parent_to_frame.inverse())
}

fn frozen_name(base: &str, epoch: &Instant) -> String {
    match epoch.to_date_time(Scale::TT) {
        Ok(date_time) => format!(
            "{base} ({} [TT])",
            date_time.to_string_with_format(Format::ISO8601)
        ),
        Err(_) => format!("{base} ({} [TAI ns])", epoch.to_tai_nanoseconds()),
    }
}

#[cfg(test)]
mod ut_frame {
    use super::*;
    use crate::constants::conversion::ARCSEC_TO_RAD;

    #[test]
    fn test_same_frame_is_identity() {
        let gcrf = Frame::gcrf();
        let transform = gcrf.transform_to(&gcrf, &Instant::j2000()).unwrap();
        assert!(transform.is_identity());
    }

    #[test]
    fn test_j2000_round_trip() {
        let gcrf = Frame::gcrf();
        let j2000 = Frame::j2000(Theory::IAU2000A);
        let instant = Instant::j2000();

        let forward = gcrf.transform_to(&j2000, &instant).unwrap();
        let backward = j2000.transform_to(&gcrf, &instant).unwrap();
        assert!(forward
            .inverse()
            .is_near(&backward, 1e-12, 1e-9));
    }

    #[test]
    fn test_transform_composes_through_common_ancestor() {
        crate::testing::pin_managers_offline();
        // TEME -> MOD via TOD must equal (TEME -> TOD) then (TOD -> MOD).
        let teme = Frame::teme();
        let tod = Frame::tod();
        let mod_frame = Frame::mod_frame();
        let instant = Instant::j2000() + hifitime::Unit::Day * 6574;

        let direct = teme.transform_to(&mod_frame, &instant).unwrap();
        let step1 = teme.transform_to(&tod, &instant).unwrap();
        let step2 = tod.transform_to(&mod_frame, &instant).unwrap();
        let composed = step2 * step1;

        assert!(direct.is_near(&composed, 1e-6 * ARCSEC_TO_RAD, 1e-6));
    }

    #[test]
    fn test_transform_is_cached() {
        crate::testing::pin_managers_offline();
        let gcrf = Frame::gcrf();
        let teme = Frame::teme();
        let instant = Instant::j2000() + hifitime::Unit::Day * 1234;

        let first = gcrf.transform_to(&teme, &instant).unwrap();
        let cached = Registry::global()
            .cached_transform("GCRF", "TEME", &instant)
            .expect("transform must be cached after the first query");
        assert!(first.is_near(&cached, 0.0, 0.0));
    }

    #[test]
    fn test_unknown_frame_lookup_fails() {
        assert!(matches!(
            Frame::with_name("no-such-frame"),
            Err(FrameError::FrameNotFound { .. })
        ));
    }

    #[test]
    fn test_custom_frame_registration() {
        let gcrf = Frame::gcrf();
        let name = "ut-custom-offset";
        Frame::destruct(name);
        let custom = Frame::construct(
            name,
            true,
            Some("GCRF"),
            Provider::Fixed {
                orientation: crate::math::UnitQuaternion::identity(),
                translation: crate::math::Vector3::new(-100.0, 0.0, 0.0),
            },
        )
        .unwrap();

        // Name collision is rejected.
        assert!(matches!(
            Frame::construct(name, true, Some("GCRF"), Provider::Identity),
            Err(FrameError::FrameAlreadyExists { .. })
        ));

        let instant = Instant::j2000();
        let transform = gcrf.transform_to(&custom, &instant).unwrap();
        let mapped = transform.apply_to_position(&crate::math::Vector3::new(100.0, 0.0, 0.0));
        assert!(mapped.norm() < 1e-12);

        Frame::destruct(name);
        assert!(!Frame::exists(name));
    }
}
