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
use core::ops::{Add, Mul, Sub};
use core::str::FromStr;

use snafu::prelude::*;

use super::{UnitError, UnknownUnitSnafu};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MassUnit {
    Kilogram,
    Gram,
    Tonne,
    Pound,
}

impl MassUnit {
    pub const fn si_ratio(self) -> f64 {
        match self {
            Self::Kilogram => 1.0,
            Self::Gram => 1e-3,
            Self::Tonne => 1e3,
            Self::Pound => 0.45359237,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Kilogram => "kg",
            Self::Gram => "g",
            Self::Tonne => "t",
            Self::Pound => "lb",
        }
    }
}

impl FromStr for MassUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kg" => Ok(Self::Kilogram),
            "g" => Ok(Self::Gram),
            "t" => Ok(Self::Tonne),
            "lb" => Ok(Self::Pound),
            _ => UnknownUnitSnafu {
                family: "mass",
                text: s.to_string(),
            }
            .fail(),
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Mass {
    value: f64,
    unit: MassUnit,
}

impl Mass {
    pub const fn new(value: f64, unit: MassUnit) -> Self {
        Self { value, unit }
    }

    pub const fn kilograms(value: f64) -> Self {
        Self::new(value, MassUnit::Kilogram)
    }

    pub const fn value(&self) -> f64 {
        self.value
    }

    pub const fn unit(&self) -> MassUnit {
        self.unit
    }

    pub fn in_unit(&self, unit: MassUnit) -> f64 {
        self.value * self.unit.si_ratio() / unit.si_ratio()
    }

    pub fn in_kilograms(&self) -> f64 {
        self.in_unit(MassUnit::Kilogram)
    }
}

impl Add for Mass {
    type Output = Mass;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.value + rhs.in_unit(self.unit), self.unit)
    }
}

impl Sub for Mass {
    type Output = Mass;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.value - rhs.in_unit(self.unit), self.unit)
    }
}

impl Mul<f64> for Mass {
    type Output = Mass;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.value * rhs, self.unit)
    }
}

impl PartialEq for Mass {
    fn eq(&self, other: &Self) -> bool {
        self.in_kilograms() == other.in_kilograms()
    }
}

impl PartialOrd for Mass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.in_kilograms().partial_cmp(&other.in_kilograms())
    }
}

impl fmt::Display for Mass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}]", self.value, self.unit.symbol())
    }
}

#[cfg(test)]
mod ut_mass {
    use super::*;

    #[test]
    fn test_conversions() {
        assert!((Mass::new(1.0, MassUnit::Tonne).in_kilograms() - 1000.0).abs() < 1e-12);
        let sum = Mass::kilograms(1.0) + Mass::new(500.0, MassUnit::Gram);
        assert_eq!(sum.unit(), MassUnit::Kilogram);
        assert!((sum.value() - 1.5).abs() < 1e-12);
    }
}
