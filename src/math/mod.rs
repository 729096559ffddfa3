/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

pub mod angles;
pub mod rotation;

/// Vector3 is nalgebra's Vector3 with a 64-bit floating point
pub type Vector3 = nalgebra::Vector3<f64>;
/// Matrix3 is nalgebra's Matrix3 with a 64-bit floating point
pub type Matrix3 = nalgebra::Matrix3<f64>;
/// Quaternion is nalgebra's general quaternion with a 64-bit floating point
pub type Quaternion = nalgebra::Quaternion<f64>;
/// UnitQuaternion is nalgebra's unit quaternion with a 64-bit floating point
pub type UnitQuaternion = nalgebra::UnitQuaternion<f64>;

/// Returns the unit quaternion matching the provided rotation matrix, with a non-negative scalar
/// component.
pub fn quaternion_from_matrix(mat: &Matrix3) -> UnitQuaternion {
    rectify(UnitQuaternion::from_rotation_matrix(&nalgebra::Rotation3::from_matrix_unchecked(
        *mat,
    )))
}

/// Flips the sign of the quaternion such that its scalar component is non-negative.
///
/// Both encodings represent the same rotation; keeping the scalar non-negative makes quaternion
/// comparisons across composition paths stable.
pub fn rectify(q: UnitQuaternion) -> UnitQuaternion {
    if q.w < 0.0 {
        UnitQuaternion::new_unchecked(Quaternion::new(-q.w, -q.i, -q.j, -q.k))
    } else {
        q
    }
}
