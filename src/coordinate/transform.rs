/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use core::fmt;
use core::ops::Mul;

use crate::math::{rectify, UnitQuaternion, Vector3};
use crate::time::Instant;

/// How the constructor arguments were expressed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransformKind {
    Active,
    Passive,
}

/// A rigid-body transform between two coordinate frames at one instant.
///
/// The internal representation is always the passive convention: for a transform from frame A to
/// frame B, a position expressed in A maps to B through `x_B = q (x_A + t)`, with `t` the
/// negated position of B's origin in A, `q` the orientation delta, and the angular velocity of B
/// with respect to A expressed in B. Velocities follow the transport theorem, cf.
/// [Transform::apply_to_velocity].
#[derive(Clone, Debug)]
pub struct Transform {
    instant: Instant,
    translation: Vector3,
    velocity: Vector3,
    orientation: UnitQuaternion,
    angular_velocity: Vector3,
    kind: TransformKind,
}

impl Transform {
    /// Builds a passive transform.
    pub fn passive(
        instant: Instant,
        translation: Vector3,
        velocity: Vector3,
        orientation: UnitQuaternion,
        angular_velocity: Vector3,
    ) -> Self {
        Self {
            instant,
            translation,
            velocity,
            orientation: rectify(orientation),
            angular_velocity,
            kind: TransformKind::Passive,
        }
    }

    /// Builds an active transform: the arguments describe the motion of the frame itself, and
    /// are inverted into the internal passive representation.
    pub fn active(
        instant: Instant,
        translation: Vector3,
        velocity: Vector3,
        orientation: UnitQuaternion,
        angular_velocity: Vector3,
    ) -> Self {
        let mut passive = Self::passive(instant, translation, velocity, orientation, angular_velocity)
            .inverse();
        passive.kind = TransformKind::Active;
        passive
    }

    /// The identity transform at the provided instant.
    pub fn identity(instant: Instant) -> Self {
        Self::passive(
            instant,
            Vector3::zeros(),
            Vector3::zeros(),
            UnitQuaternion::identity(),
            Vector3::zeros(),
        )
    }

    pub const fn instant(&self) -> &Instant {
        &self.instant
    }

    pub const fn translation(&self) -> &Vector3 {
        &self.translation
    }

    pub const fn velocity(&self) -> &Vector3 {
        &self.velocity
    }

    pub const fn orientation(&self) -> &UnitQuaternion {
        &self.orientation
    }

    pub const fn angular_velocity(&self) -> &Vector3 {
        &self.angular_velocity
    }

    pub const fn kind(&self) -> TransformKind {
        self.kind
    }

    pub fn is_identity(&self) -> bool {
        self.translation.norm() == 0.0
            && self.velocity.norm() == 0.0
            && self.orientation.angle() == 0.0
            && self.angular_velocity.norm() == 0.0
    }

    /// The inverse transform (B to A for a transform A to B).
    pub fn inverse(&self) -> Self {
        let rotated_translation = self.orientation * self.translation;
        let orientation = self.orientation.inverse();
        Self {
            instant: self.instant,
            translation: -rotated_translation,
            velocity: -(self.orientation * self.velocity)
                + self.angular_velocity.cross(&rotated_translation),
            orientation: rectify(orientation),
            angular_velocity: -(orientation * self.angular_velocity),
            kind: self.kind,
        }
    }

    /// Maps a position expressed in the source frame into the destination frame.
    pub fn apply_to_position(&self, position: &Vector3) -> Vector3 {
        self.orientation * (position + self.translation)
    }

    /// Maps a velocity expressed in the source frame into the destination frame.
    ///
    /// The source position is needed for the angular-velocity cross term:
    /// `v_B = q (v_A + v) - w x (q (x_A + t))`.
    pub fn apply_to_velocity(&self, position: &Vector3, velocity: &Vector3) -> Vector3 {
        self.orientation * (velocity + self.velocity)
            - self
                .angular_velocity
                .cross(&self.apply_to_position(position))
    }

    /// Rotates a free vector (no translation applied).
    pub fn apply_to_vector(&self, vector: &Vector3) -> Vector3 {
        self.orientation * vector
    }

    /// True when both transforms agree within the provided rotation and translation tolerances.
    pub fn is_near(
        &self,
        other: &Self,
        angular_tolerance_rad: f64,
        translation_tolerance_m: f64,
    ) -> bool {
        let delta_angle = self.orientation.angle_to(&other.orientation);
        let delta_translation = (self.translation - other.translation).norm();
        delta_angle <= angular_tolerance_rad && delta_translation <= translation_tolerance_m
    }
}

/// Composition in operator order: for `second: B -> C` and `first: A -> B`,
/// `second * first` is the transform `A -> C`.
impl Mul for Transform {
    type Output = Transform;

    fn mul(self, first: Transform) -> Transform {
        let q1 = first.orientation;
        let q2 = self.orientation;
        let q1_inv = q1.inverse();

        let orientation = rectify(q2 * q1);
        let translation = first.translation + q1_inv * self.translation;
        let velocity = first.velocity
            + q1_inv * (self.velocity + first.angular_velocity.cross(&self.translation));
        let angular_velocity = q2 * first.angular_velocity + self.angular_velocity;

        Transform {
            instant: first.instant,
            translation,
            velocity,
            orientation,
            angular_velocity,
            kind: TransformKind::Passive,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Transform @ {}: t = {:?}, q = [{}, {}, {}, {}]",
            self.instant,
            self.translation.as_slice(),
            self.orientation.i,
            self.orientation.j,
            self.orientation.k,
            self.orientation.w,
        )
    }
}

#[cfg(test)]
mod ut_transform {
    use super::*;
    use core::f64::consts::FRAC_PI_2;

    fn instant() -> Instant {
        Instant::j2000()
    }

    #[test]
    fn test_identity() {
        let identity = Transform::identity(instant());
        assert!(identity.is_identity());
        let p = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(identity.apply_to_position(&p), p);
    }

    #[test]
    fn test_pure_rotation_position() {
        // Frame B is frame A rotated +90 deg about Z: A's X axis reads as -Y in B coordinates.
        let q = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -FRAC_PI_2);
        let transform = Transform::passive(
            instant(),
            Vector3::zeros(),
            Vector3::zeros(),
            q,
            Vector3::zeros(),
        );
        let mapped = transform.apply_to_position(&Vector3::x());
        assert!((mapped - Vector3::new(0.0, -1.0, 0.0)).norm() < 1e-15);
    }

    #[test]
    fn test_translation_convention() {
        // B's origin sits at +X 10 m in A: a point at that origin has zero B coordinates.
        let transform = Transform::passive(
            instant(),
            Vector3::new(-10.0, 0.0, 0.0),
            Vector3::zeros(),
            UnitQuaternion::identity(),
            Vector3::zeros(),
        );
        let mapped = transform.apply_to_position(&Vector3::new(10.0, 0.0, 0.0));
        assert!(mapped.norm() < 1e-15);
    }

    #[test]
    fn test_inverse_round_trip() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.3);
        let transform = Transform::passive(
            instant(),
            Vector3::new(-1.0, 2.0, -3.0),
            Vector3::new(0.1, -0.2, 0.3),
            q,
            Vector3::new(0.0, 0.0, 7.292e-5),
        );
        let inverse = transform.inverse();

        let p = Vector3::new(4.0, 5.0, 6.0);
        let v = Vector3::new(-0.4, 0.5, -0.6);
        let p_b = transform.apply_to_position(&p);
        let v_b = transform.apply_to_velocity(&p, &v);
        let p_back = inverse.apply_to_position(&p_b);
        let v_back = inverse.apply_to_velocity(&p_b, &v_b);

        assert!((p_back - p).norm() < 1e-12, "{p_back:?}");
        assert!((v_back - v).norm() < 1e-12, "{v_back:?}");

        // T * T^-1 is the identity.
        let round_trip = transform.clone() * inverse;
        assert!(round_trip.orientation.angle() < 1e-12);
        assert!(round_trip.translation.norm() < 1e-12);
        assert!(round_trip.angular_velocity.norm() < 1e-12);
    }

    #[test]
    fn test_composition_matches_sequential_application() {
        let t_ab = Transform::passive(
            instant(),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.1, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.2),
            Vector3::new(0.0, 0.0, 1e-4),
        );
        let t_bc = Transform::passive(
            instant(),
            Vector3::new(0.0, 2.0, 0.0),
            Vector3::new(-0.1, 0.0, 0.05),
            UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -0.4),
            Vector3::new(1e-5, 0.0, 0.0),
        );

        let t_ac = t_bc.clone() * t_ab.clone();

        let p = Vector3::new(3.0, -2.0, 1.0);
        let v = Vector3::new(0.3, 0.2, -0.1);

        let p_b = t_ab.apply_to_position(&p);
        let v_b = t_ab.apply_to_velocity(&p, &v);
        let p_c = t_bc.apply_to_position(&p_b);
        let v_c = t_bc.apply_to_velocity(&p_b, &v_b);

        assert!((t_ac.apply_to_position(&p) - p_c).norm() < 1e-12);
        assert!((t_ac.apply_to_velocity(&p, &v) - v_c).norm() < 1e-12);
    }

    #[test]
    fn test_active_is_inverse_of_passive() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.7);
        let t = Vector3::new(1.0, 2.0, 3.0);
        let active = Transform::active(
            instant(),
            t,
            Vector3::zeros(),
            q,
            Vector3::zeros(),
        );
        let passive = Transform::passive(
            instant(),
            t,
            Vector3::zeros(),
            q,
            Vector3::zeros(),
        );
        let p = Vector3::new(-2.0, 0.5, 4.0);
        let through = passive.apply_to_position(&active.apply_to_position(&p));
        assert!((through - p).norm() < 1e-12);
        assert_eq!(active.kind(), TransformKind::Active);
    }

    #[test]
    fn test_orientation_scalar_is_rectified() {
        use crate::math::Quaternion;
        let negated = UnitQuaternion::new_unchecked(
            Quaternion::new(-0.9486832980505138, 0.0, 0.0, -0.31622776601683794),
        );
        let transform = Transform::passive(
            instant(),
            Vector3::zeros(),
            Vector3::zeros(),
            negated,
            Vector3::zeros(),
        );
        assert!(transform.orientation().w >= 0.0);
    }
}
