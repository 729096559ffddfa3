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

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
}

impl TimeUnit {
    pub const fn si_ratio(self) -> f64 {
        match self {
            Self::Second => 1.0,
            Self::Minute => 60.0,
            Self::Hour => 3600.0,
            Self::Day => 86400.0,
            Self::Week => 604800.0,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Second => "s",
            Self::Minute => "min",
            Self::Hour => "hr",
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

/// A scalar time quantity (a unit-family member, distinct from [crate::time::Duration] which is
/// the exact nanosecond-integral difference of two instants).
#[derive(Copy, Clone, Debug)]
pub struct TimeQuantity {
    value: f64,
    unit: TimeUnit,
}

impl TimeQuantity {
    pub const fn new(value: f64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    pub const fn seconds(value: f64) -> Self {
        Self::new(value, TimeUnit::Second)
    }

    pub const fn value(&self) -> f64 {
        self.value
    }

    pub const fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn in_unit(&self, unit: TimeUnit) -> f64 {
        self.value * self.unit.si_ratio() / unit.si_ratio()
    }

    pub fn in_seconds(&self) -> f64 {
        self.in_unit(TimeUnit::Second)
    }
}

impl Add for TimeQuantity {
    type Output = TimeQuantity;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.value + rhs.in_unit(self.unit), self.unit)
    }
}

impl Sub for TimeQuantity {
    type Output = TimeQuantity;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.value - rhs.in_unit(self.unit), self.unit)
    }
}

impl Mul<f64> for TimeQuantity {
    type Output = TimeQuantity;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.value * rhs, self.unit)
    }
}

impl PartialEq for TimeQuantity {
    fn eq(&self, other: &Self) -> bool {
        self.in_seconds() == other.in_seconds()
    }
}

impl PartialOrd for TimeQuantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.in_seconds().partial_cmp(&other.in_seconds())
    }
}

impl fmt::Display for TimeQuantity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}]", self.value, self.unit.symbol())
    }
}
