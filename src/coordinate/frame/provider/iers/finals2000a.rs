/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use std::io::{BufRead, BufReader};
use std::ops::Range;
use std::path::Path;

use log::debug;

use crate::data::DataError;
use crate::time::{Instant, Interval, Scale};

/// Whether a row holds an IERS determination or a prediction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// 'I' flag
    Determination,
    /// 'P' flag
    Prediction,
}

impl ValueKind {
    fn from_flag(flag: Option<char>) -> Option<Self> {
        match flag {
            Some('I') => Some(Self::Determination),
            Some('P') => Some(Self::Prediction),
            _ => None,
        }
    }
}

/// One day of the IERS `finals.data` product (IAU-2000A layout).
///
/// Angles are in arcseconds, UT1-UTC in seconds, LOD in milliseconds, nutation offsets dX/dY in
/// milliarcseconds. The `*_b` fields carry the Bulletin-B columns when present.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Data {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub mjd: f64,
    pub polar_motion_kind: Option<ValueKind>,
    pub x_a: Option<f64>,
    pub x_error_a: Option<f64>,
    pub y_a: Option<f64>,
    pub y_error_a: Option<f64>,
    pub ut1_minus_utc_kind: Option<ValueKind>,
    pub ut1_minus_utc_a: Option<f64>,
    pub ut1_minus_utc_error_a: Option<f64>,
    pub lod_a: Option<f64>,
    pub lod_error_a: Option<f64>,
    pub nutation_kind: Option<ValueKind>,
    pub dx_a: Option<f64>,
    pub dx_error_a: Option<f64>,
    pub dy_a: Option<f64>,
    pub dy_error_a: Option<f64>,
    pub x_b: Option<f64>,
    pub y_b: Option<f64>,
    pub ut1_minus_utc_b: Option<f64>,
    pub dx_b: Option<f64>,
    pub dy_b: Option<f64>,
}

fn field_f64(line: &str, range: Range<usize>) -> Option<f64> {
    let raw = line.get(range)?.trim();
    if raw.is_empty() {
        return None;
    }
    lexical_core::parse(raw.as_bytes()).ok()
}

fn field_i64(line: &str, range: Range<usize>) -> Option<i64> {
    let raw = line.get(range)?.trim();
    if raw.is_empty() {
        return None;
    }
    lexical_core::parse(raw.as_bytes()).ok()
}

fn field_char(line: &str, index: usize) -> Option<char> {
    line.get(index..index + 1)
        .and_then(|s| s.chars().next())
        .filter(|c| !c.is_whitespace())
}

impl Data {
    /// Parses one fixed-column `finals.data` line. Lines whose mandatory date fields are
    /// malformed are rejected; optional trailing fields simply come out as `None`.
    fn from_line(line: &str) -> Result<Self, String> {
        let two_digit_year =
            field_i64(line, 0..2).ok_or_else(|| format!("bad year in '{line}'"))?;
        let month =
            field_i64(line, 2..4).ok_or_else(|| format!("bad month in '{line}'"))? as u8;
        let day = field_i64(line, 4..6).ok_or_else(|| format!("bad day in '{line}'"))? as u8;
        let mjd = field_f64(line, 7..15).ok_or_else(|| format!("bad MJD in '{line}'"))?;

        // The file carries two-digit years; the century flips at MJD 51544 (2000-01-01).
        let year = if mjd >= 51_544.0 {
            2000 + two_digit_year as i32
        } else {
            1900 + two_digit_year as i32
        };

        Ok(Self {
            year,
            month,
            day,
            mjd,
            polar_motion_kind: ValueKind::from_flag(field_char(line, 16)),
            x_a: field_f64(line, 18..27),
            x_error_a: field_f64(line, 27..36),
            y_a: field_f64(line, 37..46),
            y_error_a: field_f64(line, 46..55),
            ut1_minus_utc_kind: ValueKind::from_flag(field_char(line, 57)),
            ut1_minus_utc_a: field_f64(line, 58..68),
            ut1_minus_utc_error_a: field_f64(line, 68..78),
            lod_a: field_f64(line, 79..86),
            lod_error_a: field_f64(line, 86..93),
            nutation_kind: ValueKind::from_flag(field_char(line, 95)),
            dx_a: field_f64(line, 97..106),
            dx_error_a: field_f64(line, 106..115),
            dy_a: field_f64(line, 116..125),
            dy_error_a: field_f64(line, 125..134),
            x_b: field_f64(line, 134..144),
            y_b: field_f64(line, 144..154),
            ut1_minus_utc_b: field_f64(line, 154..165),
            dx_b: field_f64(line, 165..175),
            dy_b: field_f64(line, 175..185),
        })
    }
}

/// The IERS Finals 2000A combined series: one [Data] row per day, ordered by MJD.
#[derive(Clone, Debug)]
pub struct Finals2000A {
    data: Vec<Data>,
    interval: Interval,
}

impl Finals2000A {
    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let file = std::fs::File::open(path).map_err(|source| DataError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut data = Vec::new();
        for (number, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| DataError::Io {
                path: path.display().to_string(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            match Data::from_line(&line) {
                Ok(row) => data.push(row),
                Err(cause) => {
                    return Err(DataError::ParseFailed {
                        path: format!("{}:{}", path.display(), number + 1),
                        cause,
                    })
                }
            }
        }

        Self::from_data(data).map_err(|cause| DataError::ParseFailed {
            path: path.display().to_string(),
            cause,
        })
    }

    fn from_data(data: Vec<Data>) -> Result<Self, String> {
        if data.is_empty() {
            return Err("no data row".to_string());
        }
        if data.windows(2).any(|pair| pair[0].mjd >= pair[1].mjd) {
            return Err("rows are not strictly increasing in MJD".to_string());
        }

        let start = Instant::from_modified_julian_date(data.first().unwrap().mjd, Scale::UTC)
            .map_err(|e| e.to_string())?;
        let end = Instant::from_modified_julian_date(data.last().unwrap().mjd, Scale::UTC)
            .map_err(|e| e.to_string())?;
        let interval = Interval::closed(start, end).map_err(|e| e.to_string())?;

        debug!(
            "loaded {} finals rows over {interval}",
            data.len()
        );

        Ok(Self { data, interval })
    }

    /// Covered interval, from the first to the last row (UTC midnights).
    pub const fn interval(&self) -> &Interval {
        &self.interval
    }

    pub fn data(&self) -> &[Data] {
        &self.data
    }

    /// The bracketing `(lower, upper)` rows around the instant's UTC MJD.
    ///
    /// `hint` is the index of the last accessed lower row: repeated nearby queries skip the
    /// bisection entirely. Returns `None` when the instant is outside the covered interval.
    pub fn access_data_range(
        &self,
        instant: &Instant,
        hint: &mut usize,
    ) -> Option<(&Data, &Data)> {
        let mjd = instant.to_modified_julian_date(Scale::UTC).ok()?;

        let brackets = |i: usize| -> bool {
            i + 1 < self.data.len() && self.data[i].mjd <= mjd && mjd <= self.data[i + 1].mjd
        };

        let index = if brackets(*hint) {
            *hint
        } else {
            let i = match self
                .data
                .binary_search_by(|row| row.mjd.partial_cmp(&mjd).unwrap())
            {
                Ok(exact) => exact.min(self.data.len() - 2),
                Err(0) => return None,
                Err(insertion) if insertion >= self.data.len() => {
                    // Querying the exact end of the interval still brackets on the last pair.
                    if mjd <= self.data.last()?.mjd {
                        self.data.len() - 2
                    } else {
                        return None;
                    }
                }
                Err(insertion) => insertion - 1,
            };
            if !brackets(i) {
                return None;
            }
            i
        };

        *hint = index;
        Some((&self.data[index], &self.data[index + 1]))
    }

    /// The nearest lower row for the instant.
    pub fn data_at(&self, instant: &Instant, hint: &mut usize) -> Option<Data> {
        self.access_data_range(instant, hint).map(|(lower, _)| *lower)
    }

    /// [asec] Linearly-interpolated polar motion.
    pub fn polar_motion_at(&self, instant: &Instant, hint: &mut usize) -> Option<(f64, f64)> {
        let (lower, upper) = self.access_data_range(instant, hint)?;
        let mjd = instant.to_modified_julian_date(Scale::UTC).ok()?;
        let x = interpolate(mjd, lower.mjd, upper.mjd, lower.x_a?, upper.x_a?);
        let y = interpolate(mjd, lower.mjd, upper.mjd, lower.y_a?, upper.y_a?);
        Some((x, y))
    }

    /// [s] Linearly-interpolated UT1-UTC, evaluated on the UTC side of a leap second.
    pub fn ut1_minus_utc_at(&self, instant: &Instant, hint: &mut usize) -> Option<f64> {
        let (lower, upper) = self.access_data_range(instant, hint)?;
        let mjd = instant.to_modified_julian_date(Scale::UTC).ok()?;
        let mut upper_value = upper.ut1_minus_utc_a?;
        let lower_value = lower.ut1_minus_utc_a?;
        // A leap second between the two rows shifts the upper value by a full second; undo it
        // before interpolating, so that the interpolation stays continuous in UTC.
        let jump = upper_value - lower_value;
        if jump.abs() > 0.5 {
            upper_value -= jump.round();
        }
        Some(interpolate(mjd, lower.mjd, upper.mjd, lower_value, upper_value))
    }

    /// [ms] Linearly-interpolated length of day.
    pub fn lod_at(&self, instant: &Instant, hint: &mut usize) -> Option<f64> {
        let (lower, upper) = self.access_data_range(instant, hint)?;
        let mjd = instant.to_modified_julian_date(Scale::UTC).ok()?;
        Some(interpolate(mjd, lower.mjd, upper.mjd, lower.lod_a?, upper.lod_a?))
    }

    /// [mas] Linearly-interpolated nutation offsets (dX, dY), zero when the file has none.
    pub fn nutation_offsets_at(&self, instant: &Instant, hint: &mut usize) -> Option<(f64, f64)> {
        let (lower, upper) = self.access_data_range(instant, hint)?;
        let mjd = instant.to_modified_julian_date(Scale::UTC).ok()?;
        match (lower.dx_a, lower.dy_a, upper.dx_a, upper.dy_a) {
            (Some(dx0), Some(dy0), Some(dx1), Some(dy1)) => Some((
                interpolate(mjd, lower.mjd, upper.mjd, dx0, dx1),
                interpolate(mjd, lower.mjd, upper.mjd, dy0, dy1),
            )),
            _ => Some((0.0, 0.0)),
        }
    }
}

fn interpolate(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}
