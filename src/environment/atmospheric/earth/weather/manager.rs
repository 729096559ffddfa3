/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::info;
use once_cell::sync::Lazy;

use super::cssi::{CSSISpaceWeather, Reading};
use crate::data;
use crate::data::{fetch_file, DataError, ManagerConfig, Mode};
use crate::time::Instant;

/// Environment variable prefix of this manager.
pub const VARIABLE_PREFIX: &str = "OSTK_PHYSICS_ENVIRONMENT_ATMOSPHERIC_EARTH_MANAGER";

/// Repository subdirectory under the shared data root.
pub const REPOSITORY_SUBDIRECTORY: &str = "environment/atmospheric/earth/CSSISpaceWeather";

/// Manifest resource id of the CSSI file.
pub const CSSI_SPACE_WEATHER_RESOURCE: &str = "CSSI-space-weather";

struct State {
    config: ManagerConfig,
    space_weather: Option<CSSISpaceWeather>,
    fetch_attempted: bool,
}

impl State {
    fn from_environment() -> Self {
        Self {
            config: ManagerConfig::from_environment(VARIABLE_PREFIX, REPOSITORY_SUBDIRECTORY),
            space_weather: None,
            fetch_attempted: false,
        }
    }

    /// Makes sure space weather covering the instant is loaded, fetching it in Automatic mode.
    /// Mutex must already be held by the caller.
    fn ensure_loaded_(&mut self, instant: &Instant) -> Result<(), DataError> {
        let covered = self
            .space_weather
            .as_ref()
            .map(|weather| {
                weather.observation_interval().contains_instant(instant)
                    || weather
                        .daily_prediction_interval()
                        .is_some_and(|interval| interval.contains_instant(instant))
                    || weather
                        .monthly_prediction_interval()
                        .is_some_and(|interval| interval.contains_instant(instant))
            })
            .unwrap_or(false);
        if covered {
            return Ok(());
        }

        match self.config.mode {
            Mode::Manual => {
                if self.space_weather.is_some() {
                    Ok(())
                } else {
                    Err(DataError::DataUnavailable {
                        resource: CSSI_SPACE_WEATHER_RESOURCE.to_string(),
                        instant: instant.to_string(),
                    })
                }
            }
            Mode::Automatic => {
                if self.fetch_attempted {
                    return Ok(());
                }
                self.fetch_attempted = true;
                let urls =
                    data::Manager::global().remote_data_urls(CSSI_SPACE_WEATHER_RESOURCE)?;
                self.config.setup_repository()?;
                let _lock = self.config.lock_repository()?;
                let path = fetch_file(
                    &urls,
                    &self.config.local_repository,
                    CSSI_SPACE_WEATHER_RESOURCE,
                )?;
                drop(_lock);
                let weather = CSSISpaceWeather::from_file(&path)?;
                info!(
                    "refreshed CSSI space weather over {}",
                    weather.observation_interval()
                );
                self.space_weather = Some(weather);
                Ok(())
            }
        }
    }

    fn reading_at_(&mut self, instant: &Instant) -> Result<Reading, DataError> {
        self.ensure_loaded_(instant)?;
        self.space_weather
            .as_ref()
            .and_then(|weather| weather.reading_at(instant))
            .cloned()
            .ok_or_else(|| DataError::DataUnavailable {
                resource: CSSI_SPACE_WEATHER_RESOURCE.to_string(),
                instant: instant.to_string(),
            })
    }
}

static GLOBAL: Lazy<Manager> = Lazy::new(|| Manager {
    state: Mutex::new(State::from_environment()),
});

/// The space weather manager (thread-safe): serves Kp, Ap and F10.7 indices at any covered
/// instant.
pub struct Manager {
    state: Mutex<State>,
}

impl Manager {
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    pub fn mode(&self) -> Mode {
        self.state.lock().unwrap().config.mode
    }

    pub fn set_mode(&self, mode: Mode) {
        self.state.lock().unwrap().config.mode = mode;
    }

    pub fn local_repository(&self) -> PathBuf {
        self.state.lock().unwrap().config.local_repository.clone()
    }

    pub fn set_local_repository(&self, directory: PathBuf) {
        self.state.lock().unwrap().config.local_repository = directory;
    }

    /// The loaded space weather file.
    pub fn space_weather(&self) -> Result<CSSISpaceWeather, DataError> {
        self.state
            .lock()
            .unwrap()
            .space_weather
            .clone()
            .ok_or_else(|| DataError::DataUnavailable {
                resource: CSSI_SPACE_WEATHER_RESOURCE.to_string(),
                instant: Instant::now().to_string(),
            })
    }

    /// Replaces the loaded space weather data.
    pub fn load_space_weather(&self, space_weather: CSSISpaceWeather) {
        self.state.lock().unwrap().space_weather = Some(space_weather);
    }

    /// Loads a CSSI file from disk.
    pub fn load_space_weather_file(&self, path: &Path) -> Result<(), DataError> {
        let weather = CSSISpaceWeather::from_file(path)?;
        self.load_space_weather(weather);
        Ok(())
    }

    /// The full reading at the instant.
    pub fn reading_at(&self, instant: &Instant) -> Result<Reading, DataError> {
        self.state.lock().unwrap().reading_at_(instant)
    }

    /// The eight 3-hourly Kp indices of the instant's day (scaled by ten, as published).
    pub fn kp_3_hour_solar_indices_at(&self, instant: &Instant) -> Result<[f64; 8], DataError> {
        Ok(self.reading_at(instant)?.kp_3_hour)
    }

    /// The eight 3-hourly Ap indices of the instant's day.
    pub fn ap_3_hour_solar_indices_at(&self, instant: &Instant) -> Result<[f64; 8], DataError> {
        Ok(self.reading_at(instant)?.ap_3_hour)
    }

    /// The daily planetary equivalent amplitude.
    pub fn ap_daily_index_at(&self, instant: &Instant) -> Result<f64, DataError> {
        Ok(self.reading_at(instant)?.ap_daily)
    }

    /// [sfu] The observed daily F10.7 solar flux.
    pub fn f107_solar_flux_at(&self, instant: &Instant) -> Result<f64, DataError> {
        Ok(self.reading_at(instant)?.f107_observed)
    }

    /// [sfu] The observed centered 81-day mean F10.7 flux.
    pub fn f107_solar_flux_81_day_avg_at(&self, instant: &Instant) -> Result<f64, DataError> {
        Ok(self.reading_at(instant)?.f107_observed_centered_81)
    }

    /// Drops all in-memory state and re-reads the environment.
    pub fn reset(&self) {
        *self.state.lock().unwrap() = State::from_environment();
    }

    /// Removes every cached file from the local repository.
    pub fn clear_local_repository(&self) -> Result<(), DataError> {
        let state = self.state.lock().unwrap();
        let repository = state.config.local_repository.clone();
        if repository.exists() {
            std::fs::remove_dir_all(&repository).map_err(|source| DataError::Io {
                path: repository.display().to_string(),
                source,
            })?;
        }
        state.config.setup_repository()
    }
}
