/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

//! Coordinates: frames, transforms, and framed value types.

pub mod axes;
pub mod frame;
pub mod position;
pub mod spherical;
pub mod transform;
pub mod velocity;

pub use axes::Axes;
pub use position::Position;
pub use transform::{Transform, TransformKind};
pub use velocity::Velocity;
