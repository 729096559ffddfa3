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
use core::ops::{Add, Sub};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElectricCurrentUnit {
    Ampere,
    Milliampere,
}

impl ElectricCurrentUnit {
    pub const fn si_ratio(self) -> f64 {
        match self {
            Self::Ampere => 1.0,
            Self::Milliampere => 1e-3,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Ampere => "A",
            Self::Milliampere => "mA",
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct ElectricCurrent {
    value: f64,
    unit: ElectricCurrentUnit,
}

impl ElectricCurrent {
    pub const fn new(value: f64, unit: ElectricCurrentUnit) -> Self {
        Self { value, unit }
    }

    pub const fn amperes(value: f64) -> Self {
        Self::new(value, ElectricCurrentUnit::Ampere)
    }

    pub const fn value(&self) -> f64 {
        self.value
    }

    pub const fn unit(&self) -> ElectricCurrentUnit {
        self.unit
    }

    pub fn in_unit(&self, unit: ElectricCurrentUnit) -> f64 {
        self.value * self.unit.si_ratio() / unit.si_ratio()
    }

    pub fn in_amperes(&self) -> f64 {
        self.in_unit(ElectricCurrentUnit::Ampere)
    }
}

impl Add for ElectricCurrent {
    type Output = ElectricCurrent;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.value + rhs.in_unit(self.unit), self.unit)
    }
}

impl Sub for ElectricCurrent {
    type Output = ElectricCurrent;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.value - rhs.in_unit(self.unit), self.unit)
    }
}

impl PartialEq for ElectricCurrent {
    fn eq(&self, other: &Self) -> bool {
        self.in_amperes() == other.in_amperes()
    }
}

impl fmt::Display for ElectricCurrent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}]", self.value, self.unit.symbol())
    }
}
