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
use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};
use core::str::FromStr;

use snafu::prelude::*;

use super::{UnitError, UnknownUnitSnafu};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LengthUnit {
    Meter,
    Foot,
    TerrestrialMile,
    NauticalMile,
    AstronomicalUnit,
}

impl LengthUnit {
    /// Ratio of one of this unit to one meter.
    pub const fn si_ratio(self) -> f64 {
        match self {
            Self::Meter => 1.0,
            Self::Foot => 0.3048,
            Self::TerrestrialMile => 1609.344,
            Self::NauticalMile => 1852.0,
            Self::AstronomicalUnit => 1.495978707e11,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Meter => "m",
            Self::Foot => "ft",
            Self::TerrestrialMile => "mi",
            Self::NauticalMile => "nmi",
            Self::AstronomicalUnit => "AU",
        }
    }
}

impl FromStr for LengthUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" => Ok(Self::Meter),
            "ft" => Ok(Self::Foot),
            "mi" => Ok(Self::TerrestrialMile),
            "nmi" => Ok(Self::NauticalMile),
            "AU" => Ok(Self::AstronomicalUnit),
            _ => UnknownUnitSnafu {
                family: "length",
                text: s.to_string(),
            }
            .fail(),
        }
    }
}

/// A length, stored in the unit it was built with.
#[derive(Copy, Clone, Debug)]
pub struct Length {
    value: f64,
    unit: LengthUnit,
}

impl Length {
    pub const fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    pub const fn meters(value: f64) -> Self {
        Self::new(value, LengthUnit::Meter)
    }

    pub const fn kilometers(value: f64) -> Self {
        Self::new(value * 1e3, LengthUnit::Meter)
    }

    pub const fn value(&self) -> f64 {
        self.value
    }

    pub const fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Magnitude of this length expressed in the provided unit.
    pub fn in_unit(&self, unit: LengthUnit) -> f64 {
        self.value * self.unit.si_ratio() / unit.si_ratio()
    }

    pub fn in_meters(&self) -> f64 {
        self.in_unit(LengthUnit::Meter)
    }

    pub fn abs(&self) -> Self {
        Self::new(self.value.abs(), self.unit)
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.value + rhs.in_unit(self.unit), self.unit)
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.value - rhs.in_unit(self.unit), self.unit)
    }
}

impl Neg for Length {
    type Output = Length;

    fn neg(self) -> Self {
        Self::new(-self.value, self.unit)
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.value * rhs, self.unit)
    }
}

impl Div<f64> for Length {
    type Output = Length;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.value / rhs, self.unit)
    }
}

impl PartialEq for Length {
    fn eq(&self, other: &Self) -> bool {
        self.in_meters() == other.in_meters()
    }
}

impl PartialOrd for Length {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.in_meters().partial_cmp(&other.in_meters())
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}]", self.value, self.unit.symbol())
    }
}

#[cfg(test)]
mod ut_length {
    use super::*;

    #[test]
    fn test_conversion_composes() {
        let l = Length::meters(1852.0);
        assert!((l.in_unit(LengthUnit::NauticalMile) - 1.0).abs() < 1e-12);
        // l.in(u).in(v) == l.in(v)
        let via_ft = Length::new(l.in_unit(LengthUnit::Foot), LengthUnit::Foot);
        assert!(
            (via_ft.in_unit(LengthUnit::TerrestrialMile) - l.in_unit(LengthUnit::TerrestrialMile))
                .abs()
                < 1e-12
        );
    }

    #[test]
    fn test_arithmetic_keeps_left_unit() {
        let sum = Length::new(1.0, LengthUnit::NauticalMile) + Length::meters(148.0);
        assert_eq!(sum.unit(), LengthUnit::NauticalMile);
        assert!((sum.in_meters() - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_ordering_is_unit_free() {
        assert!(Length::new(1.0, LengthUnit::TerrestrialMile) < Length::meters(1852.0));
        assert_eq!(Length::new(1.0, LengthUnit::NauticalMile), Length::meters(1852.0));
    }
}
