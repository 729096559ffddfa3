/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

use log::info;
use once_cell::sync::Lazy;

use crate::data;
use crate::data::{fetch_file, DataError, ManagerConfig, Mode};
use crate::time::Instant;

/// Environment variable prefix of this manager.
pub const VARIABLE_PREFIX: &str = "OSTK_PHYSICS_ENVIRONMENT_GRAVITATIONAL_EARTH_MANAGER";

/// Repository subdirectory under the shared data root.
pub const REPOSITORY_SUBDIRECTORY: &str = "environment/gravitational/earth";

/// The Earth gravity coefficient sets the manager knows how to fetch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EarthGravitationalModelType {
    WGS84,
    EGM84,
    EGM96,
    EGM2008,
}

impl EarthGravitationalModelType {
    /// Manifest resource id and base file name of this model's coefficient set.
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::WGS84 => "wgs84",
            Self::EGM84 => "egm84",
            Self::EGM96 => "egm96",
            Self::EGM2008 => "egm2008",
        }
    }

    /// The files a complete coefficient set is made of.
    pub fn file_names(self) -> [String; 2] {
        [
            format!("{}.egm", self.file_stem()),
            format!("{}.egm.cof", self.file_stem()),
        ]
    }
}

impl fmt::Display for EarthGravitationalModelType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::WGS84 => "WGS84",
            Self::EGM84 => "EGM84",
            Self::EGM96 => "EGM96",
            Self::EGM2008 => "EGM2008",
        };
        write!(f, "{name}")
    }
}

struct State {
    config: ManagerConfig,
}

impl State {
    fn from_environment() -> Self {
        Self {
            config: ManagerConfig::from_environment(VARIABLE_PREFIX, REPOSITORY_SUBDIRECTORY),
        }
    }
}

static GLOBAL: Lazy<Manager> = Lazy::new(|| Manager {
    state: Mutex::new(State::from_environment()),
});

/// The Earth gravity data manager (thread-safe): fetches and exposes coefficient files.
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

    /// True when every file of the model's coefficient set is cached locally.
    pub fn has_data_files_for_type(&self, model_type: EarthGravitationalModelType) -> bool {
        let repository = self.local_repository();
        model_type
            .file_names()
            .iter()
            .all(|name| repository.join(name).exists())
    }

    /// Local paths of the model's coefficient set.
    pub fn local_data_files_for_type(
        &self,
        model_type: EarthGravitationalModelType,
    ) -> Vec<PathBuf> {
        let repository = self.local_repository();
        model_type
            .file_names()
            .iter()
            .map(|name| repository.join(name))
            .collect()
    }

    /// Fetches the model's coefficient set when missing; returns the local paths.
    pub fn fetch_data_files_for_type(
        &self,
        model_type: EarthGravitationalModelType,
    ) -> Result<Vec<PathBuf>, DataError> {
        if self.has_data_files_for_type(model_type) {
            return Ok(self.local_data_files_for_type(model_type));
        }

        let state = self.state.lock().unwrap();
        if state.config.mode == Mode::Manual {
            return Err(DataError::DataUnavailable {
                resource: model_type.file_stem().to_string(),
                instant: Instant::now().to_string(),
            });
        }

        let urls = data::Manager::global().remote_data_urls(model_type.file_stem())?;
        state.config.setup_repository()?;
        let _lock = state.config.lock_repository()?;
        let path = fetch_file(&urls, &state.config.local_repository, model_type.file_stem())?;
        info!("fetched gravity model {model_type} into {}", path.display());
        drop(_lock);
        drop(state);
        Ok(self.local_data_files_for_type(model_type))
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
