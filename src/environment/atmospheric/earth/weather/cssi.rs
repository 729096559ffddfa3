/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use std::collections::BTreeMap;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::data::DataError;
use crate::time::{Date, DateTime, Instant, Interval, Scale, Time};

/// Provenance of a space weather row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReadingKind {
    Observed,
    Interpolated,
    DailyPrediction,
    MonthlyPrediction,
}

/// One day of the CSSI space weather product.
///
/// Kp indices are stored as published, scaled by ten (a Kp of 3+ reads 33). F10.7 fluxes are in
/// solar flux units.
#[derive(Clone, Debug, PartialEq)]
pub struct Reading {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub kind: ReadingKind,
    /// 3-hourly planetary geomagnetic indices, scaled by 10.
    pub kp_3_hour: [f64; 8],
    /// 3-hourly planetary equivalent amplitudes.
    pub ap_3_hour: [f64; 8],
    /// Daily planetary equivalent amplitude.
    pub ap_daily: f64,
    /// Adjusted daily F10.7 flux.
    pub f107_adjusted: f64,
    /// Adjusted centered 81-day mean.
    pub f107_adjusted_centered_81: f64,
    /// Adjusted trailing 81-day mean.
    pub f107_adjusted_last_81: f64,
    /// Observed daily F10.7 flux.
    pub f107_observed: f64,
    /// Observed centered 81-day mean.
    pub f107_observed_centered_81: f64,
    /// Observed trailing 81-day mean.
    pub f107_observed_last_81: f64,
}

/// The CSSI space weather flat file: OBSERVED, DAILY_PREDICTED and MONTHLY_PREDICTED sections.
#[derive(Clone, Debug)]
pub struct CSSISpaceWeather {
    readings: BTreeMap<i64, Reading>,
    observation_interval: Interval,
    daily_prediction_interval: Option<Interval>,
    monthly_prediction_interval: Option<Interval>,
}

impl CSSISpaceWeather {
    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let file = std::fs::File::open(path).map_err(|source| DataError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut readings = BTreeMap::new();
        let mut section: Option<ReadingKind> = None;

        for line in BufReader::new(file).lines() {
            let line = line.map_err(|source| DataError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match trimmed {
                "BEGIN OBSERVED" => {
                    section = Some(ReadingKind::Observed);
                    continue;
                }
                "BEGIN DAILY_PREDICTED" => {
                    section = Some(ReadingKind::DailyPrediction);
                    continue;
                }
                "BEGIN MONTHLY_PREDICTED" => {
                    section = Some(ReadingKind::MonthlyPrediction);
                    continue;
                }
                "END OBSERVED" | "END DAILY_PREDICTED" | "END MONTHLY_PREDICTED" => {
                    section = None;
                    continue;
                }
                _ => {}
            }

            let Some(kind) = section else { continue };
            if let Some(reading) = parse_reading(trimmed, kind) {
                readings.insert(day_key(reading.year, reading.month, reading.day), reading);
            }
        }

        let observation_interval =
            interval_of(&readings, ReadingKind::Observed).ok_or_else(|| DataError::ParseFailed {
                path: path.display().to_string(),
                cause: "no observed row".to_string(),
            })?;
        let daily_prediction_interval = interval_of(&readings, ReadingKind::DailyPrediction);
        let monthly_prediction_interval = interval_of(&readings, ReadingKind::MonthlyPrediction);

        debug!(
            "loaded CSSI space weather: {} rows over {observation_interval}",
            readings.len()
        );

        Ok(Self {
            readings,
            observation_interval,
            daily_prediction_interval,
            monthly_prediction_interval,
        })
    }

    pub const fn observation_interval(&self) -> &Interval {
        &self.observation_interval
    }

    pub fn daily_prediction_interval(&self) -> Option<&Interval> {
        self.daily_prediction_interval.as_ref()
    }

    pub fn monthly_prediction_interval(&self) -> Option<&Interval> {
        self.monthly_prediction_interval.as_ref()
    }

    /// The reading covering the instant: an observation, else a daily prediction, else the
    /// nearest lower monthly prediction.
    pub fn reading_at(&self, instant: &Instant) -> Option<&Reading> {
        let mjd = instant.to_modified_julian_date(Scale::UTC).ok()?;
        let key = mjd.floor() as i64;

        if let Some(reading) = self.readings.get(&key) {
            return Some(reading);
        }
        // Monthly predictions carry one row per month: take the nearest lower row.
        self.readings
            .range(..=key)
            .next_back()
            .map(|(_, reading)| reading)
            .filter(|reading| reading.kind == ReadingKind::MonthlyPrediction)
    }
}

/// Key readings by their UTC MJD so that lookup by instant is a single map query.
fn day_key(year: i32, month: u8, day: u8) -> i64 {
    match mjd_of(year, month, day) {
        Some(mjd) => mjd,
        None => i64::MIN,
    }
}

fn mjd_of(year: i32, month: u8, day: u8) -> Option<i64> {
    let date_time = DateTime::new(
        Date::new(year, month, day).ok()?,
        Time::midnight(),
    );
    let instant = Instant::from_date_time(date_time, Scale::UTC).ok()?;
    Some(instant.to_modified_julian_date(Scale::UTC).ok()?.round() as i64)
}

fn interval_of(readings: &BTreeMap<i64, Reading>, kind: ReadingKind) -> Option<Interval> {
    let mut keys = readings
        .iter()
        .filter(|(_, reading)| reading.kind == kind)
        .map(|(key, _)| *key);
    let first = keys.next()?;
    let last = keys.last().unwrap_or(first);
    let start = Instant::from_modified_julian_date(first as f64, Scale::UTC).ok()?;
    let end = Instant::from_modified_julian_date((last + 1) as f64, Scale::UTC).ok()?;
    Interval::closed(start, end).ok()
}

/// Parses one whitespace-tokenized row. Observed and daily-predicted rows carry the full column
/// set; monthly rows stop after the flux columns and have no geomagnetic indices.
fn parse_reading(line: &str, kind: ReadingKind) -> Option<Reading> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return None;
    }

    let value = |index: usize| -> Option<f64> {
        fields
            .get(index)
            .and_then(|f| lexical_core::parse(f.as_bytes()).ok())
    };

    let year = value(0)? as i32;
    let month = value(1)? as u8;
    let day = value(2)? as u8;

    let mut kp_3_hour = [0.0; 8];
    let mut ap_3_hour = [0.0; 8];
    let mut ap_daily = 0.0;

    let full_row = fields.len() >= 33;
    if full_row {
        for (i, slot) in kp_3_hour.iter_mut().enumerate() {
            *slot = value(5 + i)?;
        }
        // Field 13 is the Kp sum.
        for (i, slot) in ap_3_hour.iter_mut().enumerate() {
            *slot = value(14 + i)?;
        }
        ap_daily = value(22)?;
    }

    // Columns: ... Cp C9 ISN F10.7Adj Q AdjCtr81 AdjLst81 F10.7Obs ObsCtr81 ObsLst81
    let tail = |offset_from_end: usize| value(fields.len() - 1 - offset_from_end);
    let f107_observed_last_81 = tail(0)?;
    let f107_observed_centered_81 = tail(1)?;
    let f107_observed = tail(2)?;
    let f107_adjusted_last_81 = tail(3)?;
    let f107_adjusted_centered_81 = tail(4)?;
    // Skip the Q qualifier column.
    let f107_adjusted = tail(6)?;

    let kind = if full_row && kind == ReadingKind::Observed && f107_observed == 0.0 {
        ReadingKind::Interpolated
    } else {
        kind
    };

    Some(Reading {
        year,
        month,
        day,
        kind,
        kp_3_hour,
        ap_3_hour,
        ap_daily,
        f107_adjusted,
        f107_adjusted_centered_81,
        f107_adjusted_last_81,
        f107_observed,
        f107_observed_centered_81,
        f107_observed_last_81,
    })
}

#[cfg(test)]
mod ut_cssi {
    use super::*;
    use std::io::Write;

    fn fixture(path: &Path) {
        let mut file = std::fs::File::create(path).unwrap();
        writeln!(file, "BEGIN OBSERVED").unwrap();
        writeln!(
            file,
            "2018 01 01 2515  7  27  20  23  20  23  20  13  17 163  12   7   9   7   9   7   5   6   8 0.4  2  12  69.1 0  68.9  71.0  67.0  69.5  71.8"
        )
        .unwrap();
        writeln!(
            file,
            "2018 01 02 2515  8  10  13  17  20  17  13  10  13 113   4   5   6   7   9   7   5   4   6 0.3  2  15  68.5 0  68.9  71.0  66.5  69.4  71.8"
        )
        .unwrap();
        writeln!(file, "END OBSERVED").unwrap();
        writeln!(file, "BEGIN DAILY_PREDICTED").unwrap();
        writeln!(
            file,
            "2018 01 03 2515  9  13  13  13  13  13  13  13  13 104   5   5   5   5   5   5   5   5   5 0.3  2  15  68.0 0  68.8  70.9  66.0  69.3  71.7"
        )
        .unwrap();
        writeln!(file, "END DAILY_PREDICTED").unwrap();
        writeln!(file, "BEGIN MONTHLY_PREDICTED").unwrap();
        writeln!(file, "2018 02 01 2516  70.0 0  69.0  70.0  68.0  69.0  70.0").unwrap();
        writeln!(file, "END MONTHLY_PREDICTED").unwrap();
    }

    fn instant_of(year: i32, month: u8, day: u8) -> Instant {
        Instant::from_date_time(
            DateTime::new(Date::new(year, month, day).unwrap(), Time::midnight()),
            Scale::UTC,
        )
        .unwrap()
    }

    #[test]
    fn test_sections_and_lookup() {
        let dir = std::env::temp_dir().join("ostk-physics-ut").join("cssi");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("SW-Last5Years.txt");
        fixture(&path);

        let weather = CSSISpaceWeather::from_file(&path).unwrap();

        let observed = weather.reading_at(&instant_of(2018, 1, 1)).unwrap();
        assert_eq!(observed.kind, ReadingKind::Observed);
        assert_eq!(observed.kp_3_hour[0], 27.0);
        assert_eq!(observed.ap_3_hour[0], 12.0);
        assert_eq!(observed.ap_daily, 8.0);
        assert!((observed.f107_observed - 67.0).abs() < 1e-9);
        assert!((observed.f107_adjusted - 69.1).abs() < 1e-9);
        assert!((observed.f107_observed_last_81 - 71.8).abs() < 1e-9);

        let daily = weather.reading_at(&instant_of(2018, 1, 3)).unwrap();
        assert_eq!(daily.kind, ReadingKind::DailyPrediction);

        // Mid-February resolves to the nearest lower monthly row.
        let monthly = weather.reading_at(&instant_of(2018, 2, 15)).unwrap();
        assert_eq!(monthly.kind, ReadingKind::MonthlyPrediction);
        assert!((monthly.f107_adjusted - 70.0).abs() < 1e-9);

        // Before the first row there is nothing.
        assert!(weather.reading_at(&instant_of(2017, 12, 31)).is_none());
    }
}
