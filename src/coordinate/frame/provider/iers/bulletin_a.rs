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
use crate::time::{Instant, Interval, Scale};

/// One rapid-service determination of a weekly IERS Bulletin A.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Observation {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub mjd: f64,
    /// [asec] PM-x
    pub x: f64,
    /// [asec] Error in PM-x
    pub x_error: f64,
    /// [asec] PM-y
    pub y: f64,
    /// [asec] Error in PM-y
    pub y_error: f64,
    /// [s] UT1-UTC
    pub ut1_minus_utc: f64,
    /// [s] Error in UT1-UTC
    pub ut1_minus_utc_error: f64,
}

/// One prediction row of a weekly IERS Bulletin A, up to 365 days past the last determination.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Prediction {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub mjd: f64,
    /// [asec] PM-x
    pub x: f64,
    /// [asec] PM-y
    pub y: f64,
    /// [s] UT1-UTC
    pub ut1_minus_utc: f64,
}

/// An IERS Bulletin A: rapid determinations followed by predictions.
///
/// The consumed shape is the combined earth-orientation section of the bulletin: observation
/// rows of ten whitespace-separated fields (`yy mm dd mjd x xerr y yerr ut1-utc err`), then a
/// `PREDICTIONS:` marker, then prediction rows of seven fields (`yyyy mm dd mjd x y ut1-utc`).
/// Header prose before the first observation row is skipped.
#[derive(Clone, Debug)]
pub struct BulletinA {
    observations: BTreeMap<i64, Observation>,
    predictions: BTreeMap<i64, Prediction>,
    observation_interval: Interval,
    prediction_interval: Interval,
}

impl BulletinA {
    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let file = std::fs::File::open(path).map_err(|source| DataError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut observations = BTreeMap::new();
        let mut predictions = BTreeMap::new();
        let mut in_predictions = false;

        for line in BufReader::new(file).lines() {
            let line = line.map_err(|source| DataError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with("PREDICTIONS") {
                in_predictions = true;
                continue;
            }

            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            if !in_predictions {
                if let Some(observation) = parse_observation(&fields) {
                    observations.insert(observation.mjd.floor() as i64, observation);
                }
            } else if let Some(prediction) = parse_prediction(&fields) {
                predictions.insert(prediction.mjd.floor() as i64, prediction);
            }
        }

        let observation_interval =
            interval_of(observations.values().map(|o| o.mjd)).map_err(|cause| {
                DataError::ParseFailed {
                    path: path.display().to_string(),
                    cause: format!("observations: {cause}"),
                }
            })?;
        let prediction_interval =
            interval_of(predictions.values().map(|p| p.mjd)).map_err(|cause| {
                DataError::ParseFailed {
                    path: path.display().to_string(),
                    cause: format!("predictions: {cause}"),
                }
            })?;

        debug!(
            "loaded Bulletin A: {} observations, {} predictions",
            observations.len(),
            predictions.len()
        );

        Ok(Self {
            observations,
            predictions,
            observation_interval,
            prediction_interval,
        })
    }

    pub const fn observation_interval(&self) -> &Interval {
        &self.observation_interval
    }

    pub const fn prediction_interval(&self) -> &Interval {
        &self.prediction_interval
    }

    /// The determination whose day contains the instant.
    pub fn observation_at(&self, instant: &Instant) -> Option<Observation> {
        let mjd = instant.to_modified_julian_date(Scale::UTC).ok()?;
        if !self.observation_interval.contains_instant(instant) {
            return None;
        }
        self.observations.get(&(mjd.floor() as i64)).copied()
    }

    /// The prediction whose day contains the instant.
    pub fn prediction_at(&self, instant: &Instant) -> Option<Prediction> {
        let mjd = instant.to_modified_julian_date(Scale::UTC).ok()?;
        if !self.prediction_interval.contains_instant(instant) {
            return None;
        }
        self.predictions.get(&(mjd.floor() as i64)).copied()
    }
}

fn parse_observation(fields: &[&str]) -> Option<Observation> {
    if fields.len() != 10 {
        return None;
    }
    let values: Vec<f64> = fields
        .iter()
        .map(|f| lexical_core::parse(f.as_bytes()).ok())
        .collect::<Option<_>>()?;
    let mjd = values[3];
    Some(Observation {
        year: two_digit_year(values[0] as i64, mjd),
        month: values[1] as u8,
        day: values[2] as u8,
        mjd,
        x: values[4],
        x_error: values[5],
        y: values[6],
        y_error: values[7],
        ut1_minus_utc: values[8],
        ut1_minus_utc_error: values[9],
    })
}

fn parse_prediction(fields: &[&str]) -> Option<Prediction> {
    if fields.len() != 7 {
        return None;
    }
    let values: Vec<f64> = fields
        .iter()
        .map(|f| lexical_core::parse(f.as_bytes()).ok())
        .collect::<Option<_>>()?;
    Some(Prediction {
        year: values[0] as i32,
        month: values[1] as u8,
        day: values[2] as u8,
        mjd: values[3],
        x: values[4],
        y: values[5],
        ut1_minus_utc: values[6],
    })
}

fn two_digit_year(year: i64, mjd: f64) -> i32 {
    if year >= 100 {
        year as i32
    } else if mjd >= 51_544.0 {
        2000 + year as i32
    } else {
        1900 + year as i32
    }
}

fn interval_of(mjds: impl Iterator<Item = f64> + Clone) -> Result<Interval, String> {
    let first = mjds.clone().next().ok_or("no row")?;
    let last = mjds.last().ok_or("no row")?;
    let start =
        Instant::from_modified_julian_date(first, Scale::UTC).map_err(|e| e.to_string())?;
    // A row covers its full day.
    let end = Instant::from_modified_julian_date(last + 1.0, Scale::UTC)
        .map_err(|e| e.to_string())?;
    Interval::closed(start, end).map_err(|e| e.to_string())
}
