/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

//! SPICE kernel management: kernel files are discovered, fetched and catalogued here.
//!
//! Decoding the kernel bytes is a pluggable backend concern; the built-in backend of the
//! [engine] is the analytical planetary theory.

pub mod engine;
pub mod kernel;
pub mod manager;

pub use engine::{Engine, SpiceEphemeris};
pub use kernel::{Kernel, KernelType};
pub use manager::Manager;
