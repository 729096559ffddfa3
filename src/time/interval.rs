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

use hifitime::Duration;

use super::{Instant, TimeError};

/// Whether the interval bounds belong to the interval.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IntervalKind {
    Closed,
    Open,
    HalfOpenLeft,
    HalfOpenRight,
}

/// An interval over [Instant]s.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Interval {
    start: Instant,
    end: Instant,
    kind: IntervalKind,
}

impl Interval {
    pub fn new(start: Instant, end: Instant, kind: IntervalKind) -> Result<Self, TimeError> {
        if start > end {
            return Err(TimeError::InvertedInterval {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end, kind })
    }

    pub fn closed(start: Instant, end: Instant) -> Result<Self, TimeError> {
        Self::new(start, end, IntervalKind::Closed)
    }

    /// Closed interval of the provided duration centered on the instant.
    pub fn centered(instant: Instant, duration: Duration) -> Result<Self, TimeError> {
        let half = duration / 2;
        Self::closed(instant - half, instant + half)
    }

    pub const fn start(&self) -> Instant {
        self.start
    }

    pub const fn end(&self) -> Instant {
        self.end
    }

    pub const fn kind(&self) -> IntervalKind {
        self.kind
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn contains_instant(&self, instant: &Instant) -> bool {
        let after_start = match self.kind {
            IntervalKind::Closed | IntervalKind::HalfOpenRight => *instant >= self.start,
            IntervalKind::Open | IntervalKind::HalfOpenLeft => *instant > self.start,
        };
        let before_end = match self.kind {
            IntervalKind::Closed | IntervalKind::HalfOpenLeft => *instant <= self.end,
            IntervalKind::Open | IntervalKind::HalfOpenRight => *instant < self.end,
        };
        after_start && before_end
    }

    pub fn intersects(&self, other: &Interval) -> bool {
        self.contains_instant(&other.start)
            || self.contains_instant(&other.end)
            || other.contains_instant(&self.start)
            || other.contains_instant(&self.end)
    }

    /// Uniform grid of instants over this interval.
    ///
    /// Instants are generated from the start in steps of `step`; the end is appended when the
    /// last step does not land on it, so the grid always covers the full interval.
    pub fn generate_grid(&self, step: Duration) -> Result<Vec<Instant>, TimeError> {
        if step <= Duration::ZERO {
            return Err(TimeError::NonPositiveStep);
        }
        let mut grid = Vec::new();
        let mut cursor = self.start;
        while cursor < self.end {
            grid.push(cursor);
            cursor = cursor + step;
        }
        grid.push(self.end);
        Ok(grid)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (open, close) = match self.kind {
            IntervalKind::Closed => ("[", "]"),
            IntervalKind::Open => ("]", "["),
            IntervalKind::HalfOpenLeft => ("]", "]"),
            IntervalKind::HalfOpenRight => ("[", "["),
        };
        write!(f, "{}{} - {}{}", open, self.start, self.end, close)
    }
}

#[cfg(test)]
mod ut_interval {
    use super::*;
    use crate::time::{Date, DateTime, Scale, Time};
    use hifitime::Unit;

    fn tai(hour: u8) -> Instant {
        Instant::from_date_time(
            DateTime::new(
                Date::new(2018, 1, 1).unwrap(),
                Time::new(hour, 0, 0, 0).unwrap(),
            ),
            Scale::TAI,
        )
        .unwrap()
    }

    #[test]
    fn test_containment() {
        let closed = Interval::closed(tai(0), tai(2)).unwrap();
        assert!(closed.contains_instant(&tai(0)));
        assert!(closed.contains_instant(&tai(2)));

        let open = Interval::new(tai(0), tai(2), IntervalKind::Open).unwrap();
        assert!(!open.contains_instant(&tai(0)));
        assert!(!open.contains_instant(&tai(2)));
        assert!(open.contains_instant(&tai(1)));
    }

    #[test]
    fn test_inverted_interval_is_rejected() {
        assert!(Interval::closed(tai(2), tai(0)).is_err());
    }

    #[test]
    fn test_grid_covers_interval() {
        let interval = Interval::closed(tai(0), tai(1)).unwrap();
        let grid = interval.generate_grid(Duration::from_seconds(600.0)).unwrap();
        assert_eq!(grid.len(), 7);
        assert_eq!(*grid.first().unwrap(), interval.start());
        assert_eq!(*grid.last().unwrap(), interval.end());

        // Non-aligned step: the end is still the last node.
        let grid = interval
            .generate_grid(Duration::from_seconds(700.0))
            .unwrap();
        assert_eq!(*grid.last().unwrap(), interval.end());
        assert_eq!(grid.len(), 7);

        assert!(interval.generate_grid(0 * Unit::Second).is_err());
    }

    #[test]
    fn test_intersection() {
        let a = Interval::closed(tai(0), tai(2)).unwrap();
        let b = Interval::closed(tai(1), tai(3)).unwrap();
        let c = Interval::closed(tai(3), tai(4)).unwrap();
        assert!(a.intersects(&b));
        assert!(b.intersects(&c));
        assert!(!a.intersects(&c));
    }
}
