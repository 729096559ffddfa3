/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use std::path::PathBuf;
use std::sync::Mutex;

use log::info;
use once_cell::sync::Lazy;

use super::kernel::Kernel;
use crate::data;
use crate::data::{fetch_file, DataError, ManagerConfig, Mode};
use crate::time::Instant;

/// Environment variable prefix of this manager.
pub const VARIABLE_PREFIX: &str = "OSTK_PHYSICS_ENVIRONMENT_EPHEMERIS_SPICE_MANAGER";

/// Repository subdirectory under the shared data root.
pub const REPOSITORY_SUBDIRECTORY: &str = "environment/ephemeris/spice";

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

/// The SPICE kernel manager (thread-safe): fetches kernel files into the local repository.
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

    /// Path of the kernel inside the local repository, fetching it first when missing.
    ///
    /// The manifest resource id of a kernel is its file name.
    pub fn fetch_kernel(&self, kernel: &Kernel) -> Result<PathBuf, DataError> {
        let state = self.state.lock().unwrap();
        state.config.setup_repository()?;
        let local_path = state.config.local_repository.join(kernel.name());
        if local_path.exists() {
            return Ok(local_path);
        }
        if state.config.mode == Mode::Manual {
            return Err(DataError::DataUnavailable {
                resource: kernel.name(),
                instant: Instant::now().to_string(),
            });
        }

        let urls = data::Manager::global().remote_data_urls(&kernel.name())?;
        let _lock = state.config.lock_repository()?;
        let path = fetch_file(&urls, &state.config.local_repository, &kernel.name())?;
        info!("fetched kernel {kernel} into {}", path.display());
        Ok(path)
    }

    /// Fetches every kernel whose manifest resource id matches the pattern; returns the local
    /// paths.
    pub fn fetch_matching_kernels(&self, pattern: &str) -> Result<Vec<PathBuf>, DataError> {
        let matches = data::Manager::global().find_remote_data_urls(pattern)?;
        let state = self.state.lock().unwrap();
        state.config.setup_repository()?;
        let _lock = state.config.lock_repository()?;
        let mut paths = Vec::with_capacity(matches.len());
        for (resource, urls) in matches {
            paths.push(fetch_file(&urls, &state.config.local_repository, &resource)?);
        }
        Ok(paths)
    }

    /// The kernel files currently present in the local repository.
    pub fn local_kernels(&self) -> Result<Vec<Kernel>, DataError> {
        let repository = self.local_repository();
        if !repository.exists() {
            return Ok(Vec::new());
        }
        let entries = std::fs::read_dir(&repository).map_err(|source| DataError::Io {
            path: repository.display().to_string(),
            source,
        })?;
        let mut kernels = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| DataError::Io {
                path: repository.display().to_string(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() {
                let kernel = Kernel::from_path(&path);
                if kernel.kind().is_some() {
                    kernels.push(kernel);
                }
            }
        }
        Ok(kernels)
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
