/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::trace;
use once_cell::sync::Lazy;

use super::{Frame, FrameError};
use crate::coordinate::Transform;
use crate::time::Instant;

/// Transform cache: from-frame name, then to-frame name, then TAI nanosecond count.
type TransformCache = HashMap<String, HashMap<String, HashMap<i128, Transform>>>;

static GLOBAL: Lazy<Registry> = Lazy::new(|| Registry {
    frames: Mutex::new(HashMap::new()),
    cache: Mutex::new(HashMap::new()),
});

/// The process-wide frame registry.
///
/// Frames are shared: the registry co-owns each frame so that name lookup returns the same
/// `Arc` every caller holds. Transforms are cached by `(from, to, instant)`; keying on names
/// rather than pointers means a frame re-registered under the same name keeps hitting the same
/// cache entries, and removal invalidates them.
pub struct Registry {
    frames: Mutex<HashMap<String, Arc<Frame>>>,
    cache: Mutex<TransformCache>,
}

impl Registry {
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Adds a frame, failing when the name is already taken by a different frame.
    pub fn add_frame(&self, frame: Arc<Frame>) -> Result<(), FrameError> {
        let mut frames = self.frames.lock().unwrap();
        if let Some(existing) = frames.get(frame.name()) {
            if Arc::ptr_eq(existing, &frame) {
                return Ok(());
            }
            return Err(FrameError::FrameAlreadyExists {
                name: frame.name().to_string(),
            });
        }
        trace!("registering frame {}", frame.name());
        frames.insert(frame.name().to_string(), frame);
        Ok(())
    }

    /// The frame registered under the provided name, inserting the built one when absent.
    pub fn frame_or_insert_with(
        &self,
        name: &str,
        build: impl FnOnce() -> Arc<Frame>,
    ) -> Arc<Frame> {
        let mut frames = self.frames.lock().unwrap();
        frames
            .entry(name.to_string())
            .or_insert_with(|| {
                trace!("registering frame {name}");
                build()
            })
            .clone()
    }

    pub fn frame_with_name(&self, name: &str) -> Result<Arc<Frame>, FrameError> {
        self.frames
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| FrameError::FrameNotFound {
                name: name.to_string(),
            })
    }

    pub fn has_frame_with_name(&self, name: &str) -> bool {
        self.frames.lock().unwrap().contains_key(name)
    }

    /// Removes the frame and invalidates every cached transform involving it.
    pub fn remove_frame_with_name(&self, name: &str) {
        self.frames.lock().unwrap().remove(name);
        let mut cache = self.cache.lock().unwrap();
        cache.remove(name);
        for to_map in cache.values_mut() {
            to_map.remove(name);
        }
    }

    pub fn cached_transform(&self, from: &str, to: &str, instant: &Instant) -> Option<Transform> {
        self.cache
            .lock()
            .unwrap()
            .get(from)?
            .get(to)?
            .get(&instant.to_tai_nanoseconds())
            .cloned()
    }

    pub fn cache_transform(&self, from: &str, to: &str, instant: &Instant, transform: Transform) {
        self.cache
            .lock()
            .unwrap()
            .entry(from.to_string())
            .or_default()
            .entry(to.to_string())
            .or_default()
            .insert(instant.to_tai_nanoseconds(), transform);
    }

    pub fn clear_cache(&self) {
        self.cache.lock().unwrap().clear();
    }

    /// Drops every registered frame and cached transform. Meant for tests.
    pub fn clear(&self) {
        self.frames.lock().unwrap().clear();
        self.clear_cache();
    }
}
