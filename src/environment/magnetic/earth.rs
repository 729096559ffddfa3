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
pub const VARIABLE_PREFIX: &str = "OSTK_PHYSICS_ENVIRONMENT_MAGNETIC_EARTH_MANAGER";

/// Repository subdirectory under the shared data root.
pub const REPOSITORY_SUBDIRECTORY: &str = "environment/magnetic/earth";

/// The Earth magnetic coefficient sets the manager knows how to fetch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EarthMagneticModelType {
    EMM2010,
    EMM2015,
    EMM2017,
    IGRF11,
    IGRF12,
    WMM2010,
    WMM2015,
}

impl EarthMagneticModelType {
    /// Manifest resource id and base file name of this model's coefficient set.
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::EMM2010 => "emm2010",
            Self::EMM2015 => "emm2015",
            Self::EMM2017 => "emm2017",
            Self::IGRF11 => "igrf11",
            Self::IGRF12 => "igrf12",
            Self::WMM2010 => "wmm2010",
            Self::WMM2015 => "wmm2015",
        }
    }

    /// The files a complete coefficient set is made of.
    pub fn file_names(self) -> [String; 2] {
        [
            format!("{}.wmm", self.file_stem()),
            format!("{}.wmm.cof", self.file_stem()),
        ]
    }
}

impl fmt::Display for EarthMagneticModelType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::EMM2010 => "EMM2010",
            Self::EMM2015 => "EMM2015",
            Self::EMM2017 => "EMM2017",
            Self::IGRF11 => "IGRF11",
            Self::IGRF12 => "IGRF12",
            Self::WMM2010 => "WMM2010",
            Self::WMM2015 => "WMM2015",
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

/// The Earth magnetic data manager (thread-safe): fetches and exposes coefficient files.
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
    pub fn has_data_files_for_type(&self, model_type: EarthMagneticModelType) -> bool {
        let repository = self.local_repository();
        model_type
            .file_names()
            .iter()
            .all(|name| repository.join(name).exists())
    }

    /// Local paths of the model's coefficient set.
    pub fn local_data_files_for_type(
        &self,
        model_type: EarthMagneticModelType,
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
        model_type: EarthMagneticModelType,
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

        let urls = data::Manager::global()
            .remote_data_urls(&format!("earth-magnetic-{model_type}"))?;
        state.config.setup_repository()?;
        let _lock = state.config.lock_repository()?;
        let path = fetch_file(&urls, &state.config.local_repository, model_type.file_stem())?;
        info!("fetched magnetic model {model_type} into {}", path.display());
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
