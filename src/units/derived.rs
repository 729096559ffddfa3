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
use core::ops::{Div, Mul};

use snafu::prelude::*;

use super::{UnitError, UnitIncompatibleSnafu};

/// Rational exponent of a base dimension in a derived unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DerivedOrder {
    num: i16,
    den: i16,
}

impl DerivedOrder {
    pub const fn new(num: i16, den: i16) -> Self {
        Self { num, den }
    }

    pub const fn zero() -> Self {
        Self::new(0, 1)
    }

    pub const fn one() -> Self {
        Self::new(1, 1)
    }

    pub const fn two() -> Self {
        Self::new(2, 1)
    }

    pub const fn three() -> Self {
        Self::new(3, 1)
    }

    pub fn value(&self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn is_zero(&self) -> bool {
        self.num == 0
    }

    fn reduced(self) -> Self {
        fn gcd(a: i16, b: i16) -> i16 {
            if b == 0 {
                a.abs().max(1)
            } else {
                gcd(b, a % b)
            }
        }
        let g = gcd(self.num, self.den);
        let sign = if self.den < 0 { -1 } else { 1 };
        Self::new(sign * self.num / g, sign * self.den / g)
    }

    fn combine(self, other: Self, sign: i16) -> Self {
        Self::new(
            self.num * other.den + sign * other.num * self.den,
            self.den * other.den,
        )
        .reduced()
    }
}

impl fmt::Display for DerivedOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "({}/{})", self.num, self.den)
        }
    }
}

/// Dimension signature of a derived unit: exponents of length, mass, time, electric current,
/// angle and luminous intensity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DerivedUnit {
    pub length: DerivedOrder,
    pub mass: DerivedOrder,
    pub time: DerivedOrder,
    pub current: DerivedOrder,
    pub angle: DerivedOrder,
    pub luminous_intensity: DerivedOrder,
}

impl DerivedUnit {
    pub const fn new(
        length: DerivedOrder,
        mass: DerivedOrder,
        time: DerivedOrder,
        current: DerivedOrder,
        angle: DerivedOrder,
        luminous_intensity: DerivedOrder,
    ) -> Self {
        Self {
            length,
            mass,
            time,
            current,
            angle,
            luminous_intensity,
        }
    }

    pub const fn scalar() -> Self {
        Self::new(
            DerivedOrder::zero(),
            DerivedOrder::zero(),
            DerivedOrder::zero(),
            DerivedOrder::zero(),
            DerivedOrder::zero(),
            DerivedOrder::zero(),
        )
    }

    /// [m/s]
    pub const fn velocity() -> Self {
        let mut unit = Self::scalar();
        unit.length = DerivedOrder::one();
        unit.time = DerivedOrder::new(-1, 1);
        unit
    }

    /// [rad/s]
    pub const fn angular_velocity() -> Self {
        let mut unit = Self::scalar();
        unit.angle = DerivedOrder::one();
        unit.time = DerivedOrder::new(-1, 1);
        unit
    }

    /// [m^3/s^2]
    pub const fn gravitational_parameter() -> Self {
        let mut unit = Self::scalar();
        unit.length = DerivedOrder::three();
        unit.time = DerivedOrder::new(-2, 1);
        unit
    }

    /// [kg.m/s^2]
    pub const fn force() -> Self {
        let mut unit = Self::scalar();
        unit.mass = DerivedOrder::one();
        unit.length = DerivedOrder::one();
        unit.time = DerivedOrder::new(-2, 1);
        unit
    }

    /// [kg/m^3]
    pub const fn mass_density() -> Self {
        let mut unit = Self::scalar();
        unit.mass = DerivedOrder::one();
        unit.length = DerivedOrder::new(-3, 1);
        unit
    }

    /// [m^3]
    pub const fn cubic_meter() -> Self {
        let mut unit = Self::scalar();
        unit.length = DerivedOrder::three();
        unit
    }

    /// Whether the two units share the same dimension signature.
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        self == other
    }

    fn combined(self, other: Self, sign: i16) -> Self {
        Self::new(
            self.length.combine(other.length, sign),
            self.mass.combine(other.mass, sign),
            self.time.combine(other.time, sign),
            self.current.combine(other.current, sign),
            self.angle.combine(other.angle, sign),
            self.luminous_intensity.combine(other.luminous_intensity, sign),
        )
    }
}

impl fmt::Display for DerivedUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for (symbol, order) in [
            ("m", self.length),
            ("kg", self.mass),
            ("s", self.time),
            ("A", self.current),
            ("rad", self.angle),
            ("cd", self.luminous_intensity),
        ] {
            if order.is_zero() {
                continue;
            }
            if !first {
                write!(f, ".")?;
            }
            first = false;
            if order == DerivedOrder::one() {
                write!(f, "{symbol}")?;
            } else {
                write!(f, "{symbol}^{order}")?;
            }
        }
        if first {
            write!(f, "-")?;
        }
        Ok(())
    }
}

/// A quantity carrying a derived unit, in SI magnitudes.
#[derive(Copy, Clone, Debug)]
pub struct Derived {
    value: f64,
    unit: DerivedUnit,
}

impl Derived {
    pub const fn new(value: f64, unit: DerivedUnit) -> Self {
        Self { value, unit }
    }

    pub const fn value(&self) -> f64 {
        self.value
    }

    pub const fn unit(&self) -> DerivedUnit {
        self.unit
    }

    /// Magnitude of this quantity expressed in the provided unit.
    ///
    /// Fails with [UnitError::UnitIncompatible] when the dimension signatures differ.
    pub fn in_unit(&self, unit: DerivedUnit) -> Result<f64, UnitError> {
        ensure!(
            self.unit.is_compatible_with(&unit),
            UnitIncompatibleSnafu {
                expected: self.unit.to_string(),
                got: unit.to_string(),
            }
        );
        Ok(self.value)
    }

    pub fn try_add(&self, rhs: &Self) -> Result<Self, UnitError> {
        ensure!(
            self.unit.is_compatible_with(&rhs.unit),
            UnitIncompatibleSnafu {
                expected: self.unit.to_string(),
                got: rhs.unit.to_string(),
            }
        );
        Ok(Self::new(self.value + rhs.value, self.unit))
    }

    pub fn try_compare(&self, rhs: &Self) -> Result<bool, UnitError> {
        ensure!(
            self.unit.is_compatible_with(&rhs.unit),
            UnitIncompatibleSnafu {
                expected: self.unit.to_string(),
                got: rhs.unit.to_string(),
            }
        );
        Ok(self.value == rhs.value)
    }
}

impl Mul for Derived {
    type Output = Derived;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.value * rhs.value, self.unit.combined(rhs.unit, 1))
    }
}

impl Div for Derived {
    type Output = Derived;

    fn div(self, rhs: Self) -> Self {
        Self::new(self.value / rhs.value, self.unit.combined(rhs.unit, -1))
    }
}

impl fmt::Display for Derived {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}]", self.value, self.unit)
    }
}

#[cfg(test)]
mod ut_derived {
    use super::*;

    #[test]
    fn test_incompatible_comparison_fails() {
        let mu = Derived::new(3.986004418e14, DerivedUnit::gravitational_parameter());
        let v = Derived::new(7.5e3, DerivedUnit::velocity());
        assert!(mu.try_compare(&v).is_err());
        assert!(mu.try_add(&v).is_err());
        assert!(mu.try_compare(&mu).unwrap());
    }

    #[test]
    fn test_order_algebra() {
        // m^3/s^2 divided by m/s yields m^2/s
        let mu = Derived::new(10.0, DerivedUnit::gravitational_parameter());
        let v = Derived::new(2.0, DerivedUnit::velocity());
        let q = mu / v;
        assert_eq!(q.unit().length, DerivedOrder::two());
        assert_eq!(q.unit().time, DerivedOrder::new(-1, 1));
        assert_eq!(q.value(), 5.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            DerivedUnit::gravitational_parameter().to_string(),
            "m^3.s^-2"
        );
        assert_eq!(DerivedUnit::scalar().to_string(), "-");
    }
}
