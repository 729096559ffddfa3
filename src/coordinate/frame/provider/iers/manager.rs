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

use log::{debug, info};
use once_cell::sync::Lazy;

use super::bulletin_a::BulletinA;
use super::finals2000a::{Data, Finals2000A};
use super::EopError;
use crate::data;
use crate::data::{fetch_file, DataError, ManagerConfig, Mode};
use crate::time::Instant;

/// Environment variable prefix of this manager.
pub const VARIABLE_PREFIX: &str = "OSTK_PHYSICS_COORDINATE_FRAME_PROVIDER_IERS_MANAGER";

/// Repository subdirectory under the shared data root.
pub const REPOSITORY_SUBDIRECTORY: &str = "coordinate/frame/provider/iers";

/// Manifest resource ids.
pub const BULLETIN_A_RESOURCE: &str = "bulletin-A";
pub const FINALS_2000A_RESOURCE: &str = "finals-2000A";

struct State {
    config: ManagerConfig,
    bulletin_a: Option<BulletinA>,
    finals_2000a: Option<Finals2000A>,
    finals_hint: usize,
    fetch_attempted: bool,
}

impl State {
    fn from_environment() -> Self {
        Self {
            config: ManagerConfig::from_environment(VARIABLE_PREFIX, REPOSITORY_SUBDIRECTORY),
            bulletin_a: None,
            finals_2000a: None,
            finals_hint: 0,
            fetch_attempted: false,
        }
    }

    /// Makes sure finals data covering the instant is loaded, fetching it in Automatic mode.
    /// Mutex must already be held by the caller.
    fn ensure_finals_(&mut self, instant: &Instant) -> Result<(), EopError> {
        let covered = self
            .finals_2000a
            .as_ref()
            .map(|finals| finals.interval().contains_instant(instant))
            .unwrap_or(false);
        if covered {
            return Ok(());
        }

        match self.config.mode {
            Mode::Manual => {
                if self.finals_2000a.is_some() {
                    // Loaded but not covering: surface the coverage, not a missing file.
                    Ok(())
                } else {
                    Err(EopError::Data {
                        source: DataError::DataUnavailable {
                            resource: FINALS_2000A_RESOURCE.to_string(),
                            instant: instant.to_string(),
                        },
                    })
                }
            }
            Mode::Automatic => {
                if self.fetch_attempted {
                    // One refresh per reset: a second miss means the remote data simply does not
                    // cover the instant.
                    return Ok(());
                }
                self.fetch_attempted = true;
                let path = self.fetch_finals_2000a_()?;
                let finals = Finals2000A::from_file(&path)
                    .map_err(|source| EopError::Data { source })?;
                info!("refreshed finals 2000A over {}", finals.interval());
                self.finals_2000a = Some(finals);
                self.finals_hint = 0;
                Ok(())
            }
        }
    }

    fn fetch_finals_2000a_(&self) -> Result<PathBuf, EopError> {
        let urls = data::Manager::global()
            .remote_data_urls(FINALS_2000A_RESOURCE)
            .map_err(|source| EopError::Data { source })?;
        let directory = self.config.local_repository.join("finals-2000A");
        std::fs::create_dir_all(&directory).map_err(|source| EopError::Data {
            source: DataError::Io {
                path: directory.display().to_string(),
                source,
            },
        })?;
        let _lock = self
            .config
            .lock_repository()
            .map_err(|source| EopError::Data { source })?;
        fetch_file(&urls, &directory, FINALS_2000A_RESOURCE)
            .map_err(|source| EopError::Data { source })
    }

    fn out_of_range(&self, instant: &Instant) -> EopError {
        match &self.finals_2000a {
            Some(finals) => EopError::OutOfRange {
                instant: instant.to_string(),
                start: finals.interval().start().to_string(),
                end: finals.interval().end().to_string(),
            },
            None => EopError::NoDataLoaded {
                kind: "finals 2000A",
            },
        }
    }
}

static GLOBAL: Lazy<Manager> = Lazy::new(|| Manager {
    state: Mutex::new(State::from_environment()),
});

/// The IERS bulletins manager (thread-safe).
///
/// Holds at most one Bulletin A and one Finals 2000A at a time and serves Earth orientation
/// parameters at any covered instant. The following environment variables override the defaults:
///
/// - `OSTK_PHYSICS_COORDINATE_FRAME_PROVIDER_IERS_MANAGER_MODE`
/// - `OSTK_PHYSICS_COORDINATE_FRAME_PROVIDER_IERS_MANAGER_LOCAL_REPOSITORY`
/// - `OSTK_PHYSICS_COORDINATE_FRAME_PROVIDER_IERS_MANAGER_LOCAL_REPOSITORY_LOCK_TIMEOUT`
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

    pub fn bulletin_a_directory(&self) -> PathBuf {
        self.local_repository().join("bulletin-A")
    }

    pub fn finals_2000a_directory(&self) -> PathBuf {
        self.local_repository().join("finals-2000A")
    }

    /// The loaded Bulletin A.
    pub fn bulletin_a(&self) -> Result<BulletinA, EopError> {
        self.state
            .lock()
            .unwrap()
            .bulletin_a
            .clone()
            .ok_or(EopError::NoDataLoaded { kind: "Bulletin A" })
    }

    /// The loaded Finals 2000A.
    pub fn finals_2000a(&self) -> Result<Finals2000A, EopError> {
        self.state
            .lock()
            .unwrap()
            .finals_2000a
            .clone()
            .ok_or(EopError::NoDataLoaded {
                kind: "finals 2000A",
            })
    }

    /// Replaces the loaded Bulletin A.
    pub fn load_bulletin_a(&self, bulletin_a: BulletinA) {
        let mut state = self.state.lock().unwrap();
        debug!("loading Bulletin A over {}", bulletin_a.observation_interval());
        state.bulletin_a = Some(bulletin_a);
    }

    /// Replaces the loaded Finals 2000A.
    pub fn load_finals_2000a(&self, finals_2000a: Finals2000A) {
        let mut state = self.state.lock().unwrap();
        debug!("loading finals 2000A over {}", finals_2000a.interval());
        state.finals_2000a = Some(finals_2000a);
        state.finals_hint = 0;
    }

    /// Loads a Bulletin A file from disk.
    pub fn load_bulletin_a_file(&self, path: &Path) -> Result<(), EopError> {
        let bulletin_a =
            BulletinA::from_file(path).map_err(|source| EopError::Data { source })?;
        self.load_bulletin_a(bulletin_a);
        Ok(())
    }

    /// Loads a finals.data file from disk.
    pub fn load_finals_2000a_file(&self, path: &Path) -> Result<(), EopError> {
        let finals =
            Finals2000A::from_file(path).map_err(|source| EopError::Data { source })?;
        self.load_finals_2000a(finals);
        Ok(())
    }

    /// [asec] Polar motion (x, y) at the instant.
    pub fn polar_motion_at(&self, instant: &Instant) -> Result<(f64, f64), EopError> {
        let mut state = self.state.lock().unwrap();
        state.ensure_finals_(instant)?;
        let State {
            finals_2000a,
            finals_hint,
            ..
        } = &mut *state;
        if let Some(finals) = finals_2000a {
            if let Some(values) = finals.polar_motion_at(instant, finals_hint) {
                return Ok(values);
            }
        }
        if let Some(bulletin_a) = &state.bulletin_a {
            if let Some(observation) = bulletin_a.observation_at(instant) {
                return Ok((observation.x, observation.y));
            }
            if let Some(prediction) = bulletin_a.prediction_at(instant) {
                return Ok((prediction.x, prediction.y));
            }
        }
        Err(state.out_of_range(instant))
    }

    /// [s] UT1-UTC at the instant.
    pub fn ut1_minus_utc_at(&self, instant: &Instant) -> Result<f64, EopError> {
        let mut state = self.state.lock().unwrap();
        state.ensure_finals_(instant)?;
        if let Some(bulletin_a) = &state.bulletin_a {
            if let Some(observation) = bulletin_a.observation_at(instant) {
                return Ok(observation.ut1_minus_utc);
            }
            if let Some(prediction) = bulletin_a.prediction_at(instant) {
                return Ok(prediction.ut1_minus_utc);
            }
        }
        let State {
            finals_2000a,
            finals_hint,
            ..
        } = &mut *state;
        if let Some(finals) = finals_2000a {
            if let Some(value) = finals.ut1_minus_utc_at(instant, finals_hint) {
                return Ok(value);
            }
        }
        Err(state.out_of_range(instant))
    }

    /// [ms] Length of day at the instant.
    pub fn lod_at(&self, instant: &Instant) -> Result<f64, EopError> {
        let mut state = self.state.lock().unwrap();
        state.ensure_finals_(instant)?;
        let State {
            finals_2000a,
            finals_hint,
            ..
        } = &mut *state;
        if let Some(finals) = finals_2000a {
            if let Some(value) = finals.lod_at(instant, finals_hint) {
                return Ok(value);
            }
        }
        Err(state.out_of_range(instant))
    }

    /// [mas] Celestial pole offsets (dX, dY) at the instant, zero when the file carries none.
    pub fn nutation_offsets_at(&self, instant: &Instant) -> Result<(f64, f64), EopError> {
        let mut state = self.state.lock().unwrap();
        state.ensure_finals_(instant)?;
        let State {
            finals_2000a,
            finals_hint,
            ..
        } = &mut *state;
        if let Some(finals) = finals_2000a {
            if let Some(values) = finals.nutation_offsets_at(instant, finals_hint) {
                return Ok(values);
            }
        }
        Err(state.out_of_range(instant))
    }

    /// The nearest lower finals record for the instant.
    pub fn data_at(&self, instant: &Instant) -> Result<Data, EopError> {
        let mut state = self.state.lock().unwrap();
        state.ensure_finals_(instant)?;
        let State {
            finals_2000a,
            finals_hint,
            ..
        } = &mut *state;
        if let Some(finals) = finals_2000a {
            if let Some(data) = finals.data_at(instant, finals_hint) {
                return Ok(data);
            }
        }
        Err(state.out_of_range(instant))
    }

    /// Fetches the latest Bulletin A into the local repository and loads it.
    pub fn fetch_latest_bulletin_a(&self) -> Result<PathBuf, EopError> {
        let urls = data::Manager::global()
            .remote_data_urls(BULLETIN_A_RESOURCE)
            .map_err(|source| EopError::Data { source })?;
        let state = self.state.lock().unwrap();
        let directory = state.config.local_repository.join("bulletin-A");
        std::fs::create_dir_all(&directory).map_err(|source| EopError::Data {
            source: DataError::Io {
                path: directory.display().to_string(),
                source,
            },
        })?;
        let _lock = state
            .config
            .lock_repository()
            .map_err(|source| EopError::Data { source })?;
        let path = fetch_file(&urls, &directory, BULLETIN_A_RESOURCE)
            .map_err(|source| EopError::Data { source })?;
        drop(_lock);
        drop(state);
        self.load_bulletin_a_file(&path)?;
        Ok(path)
    }

    /// Drops all in-memory state and re-reads the environment.
    pub fn reset(&self) {
        *self.state.lock().unwrap() = State::from_environment();
    }

    /// Removes every cached file from the local repository.
    pub fn clear_local_repository(&self) -> Result<(), EopError> {
        let state = self.state.lock().unwrap();
        let repository = state.config.local_repository.clone();
        if repository.exists() {
            std::fs::remove_dir_all(&repository).map_err(|source| EopError::Data {
                source: DataError::Io {
                    path: repository.display().to_string(),
                    source,
                },
            })?;
        }
        state
            .config
            .setup_repository()
            .map_err(|source| EopError::Data { source })
    }
}
