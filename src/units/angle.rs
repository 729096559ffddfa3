/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use core::cmp::Ordering;
use core::f64::consts::{PI, TAU};
use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use crate::math::angles::{between_0_two_pi, between_pm_pi};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AngleUnit {
    Radian,
    Degree,
    Arcminute,
    Arcsecond,
    Revolution,
}

impl AngleUnit {
    /// Ratio of one of this unit to one radian.
    pub const fn si_ratio(self) -> f64 {
        match self {
            Self::Radian => 1.0,
            Self::Degree => PI / 180.0,
            Self::Arcminute => PI / 10_800.0,
            Self::Arcsecond => PI / 648_000.0,
            Self::Revolution => TAU,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Radian => "rad",
            Self::Degree => "deg",
            Self::Arcminute => "amin",
            Self::Arcsecond => "asec",
            Self::Revolution => "rev",
        }
    }
}

/// An angle, stored in the unit it was built with.
///
/// Angles are not reduced on construction: `Angle::degrees(720.0)` keeps its two turns until
/// [Angle::reduced_0_two_pi] or [Angle::reduced_pm_pi] is called.
#[derive(Copy, Clone, Debug)]
pub struct Angle {
    value: f64,
    unit: AngleUnit,
}

impl Angle {
    pub const fn new(value: f64, unit: AngleUnit) -> Self {
        Self { value, unit }
    }

    pub const fn radians(value: f64) -> Self {
        Self::new(value, AngleUnit::Radian)
    }

    pub const fn degrees(value: f64) -> Self {
        Self::new(value, AngleUnit::Degree)
    }

    pub const fn arcseconds(value: f64) -> Self {
        Self::new(value, AngleUnit::Arcsecond)
    }

    pub const fn zero() -> Self {
        Self::radians(0.0)
    }

    pub const fn value(&self) -> f64 {
        self.value
    }

    pub const fn unit(&self) -> AngleUnit {
        self.unit
    }

    pub fn in_unit(&self, unit: AngleUnit) -> f64 {
        self.value * self.unit.si_ratio() / unit.si_ratio()
    }

    pub fn in_radians(&self) -> f64 {
        self.in_unit(AngleUnit::Radian)
    }

    pub fn in_degrees(&self) -> f64 {
        self.in_unit(AngleUnit::Degree)
    }

    pub fn in_arcseconds(&self) -> f64 {
        self.in_unit(AngleUnit::Arcsecond)
    }

    /// Same angle reduced to [0, 2π), expressed in this angle's unit.
    pub fn reduced_0_two_pi(&self) -> Self {
        Self::new(
            between_0_two_pi(self.in_radians()) / self.unit.si_ratio(),
            self.unit,
        )
    }

    /// Same angle reduced to [-π, π), expressed in this angle's unit.
    pub fn reduced_pm_pi(&self) -> Self {
        Self::new(
            between_pm_pi(self.in_radians()) / self.unit.si_ratio(),
            self.unit,
        )
    }

    pub fn sin(&self) -> f64 {
        self.in_radians().sin()
    }

    pub fn cos(&self) -> f64 {
        self.in_radians().cos()
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.value + rhs.in_unit(self.unit), self.unit)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.value - rhs.in_unit(self.unit), self.unit)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Self {
        Self::new(-self.value, self.unit)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.value * rhs, self.unit)
    }
}

impl PartialEq for Angle {
    fn eq(&self, other: &Self) -> bool {
        self.in_radians() == other.in_radians()
    }
}

impl PartialOrd for Angle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.in_radians().partial_cmp(&other.in_radians())
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}]", self.value, self.unit.symbol())
    }
}

#[cfg(test)]
mod ut_angle {
    use super::*;

    #[test]
    fn test_degree_radian_identity() {
        let alpha = 1.234567;
        assert!((Angle::radians(alpha).in_degrees() - alpha * 180.0 / PI).abs() < 1e-14);
        assert!((Angle::degrees(90.0).in_radians() - PI / 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_arcsecond() {
        assert!((Angle::arcseconds(3600.0).in_degrees() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_reduction_preserves_unit() {
        let a = Angle::degrees(450.0).reduced_0_two_pi();
        assert_eq!(a.unit(), AngleUnit::Degree);
        assert!((a.value() - 90.0).abs() < 1e-12);

        let b = Angle::degrees(270.0).reduced_pm_pi();
        assert!((b.value() + 90.0).abs() < 1e-12);
    }
}
