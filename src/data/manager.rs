/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use std::fs::{create_dir_all, remove_file, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration as StdDuration;

use log::{debug, info, warn};
use snafu::prelude::*;

use super::{DataError, IoSnafu, Mode};
use crate::constants::data::{DATA_ROOT_ENV, DEFAULT_DATA_ROOT};

/// [s] Default repository lock timeout.
const DEFAULT_LOCK_TIMEOUT_S: u64 = 60;

/// [s] Poll period while waiting on the repository lock.
const LOCK_POLL_PERIOD_S: u64 = 1;

/// Configuration shared by every data manager, resolved from the environment.
///
/// Given a variable prefix `P`, the recognized variables are `P_MODE` (Manual/Automatic),
/// `P_LOCAL_REPOSITORY` and `P_LOCAL_REPOSITORY_LOCK_TIMEOUT` (seconds). The repository defaults
/// to `<data root>/<subdirectory>`, where the data root itself honors
/// `OSTK_PHYSICS_DATA_LOCAL_REPOSITORY`.
#[derive(Clone, Debug)]
pub struct ManagerConfig {
    pub mode: Mode,
    pub local_repository: PathBuf,
    pub lock_timeout: StdDuration,
}

impl ManagerConfig {
    pub fn from_environment(variable_prefix: &str, subdirectory: &str) -> Self {
        let mode = match std::env::var(format!("{variable_prefix}_MODE")) {
            Ok(text) => match text.parse() {
                Ok(mode) => mode,
                Err(_) => {
                    warn!("ignoring invalid mode '{text}' for {variable_prefix}");
                    Mode::default()
                }
            },
            Err(_) => Mode::default(),
        };

        let data_root =
            std::env::var(DATA_ROOT_ENV).unwrap_or_else(|_| DEFAULT_DATA_ROOT.to_string());

        let local_repository = match std::env::var(format!("{variable_prefix}_LOCAL_REPOSITORY")) {
            Ok(path) => PathBuf::from(path),
            Err(_) => Path::new(&data_root).join(subdirectory),
        };

        let lock_timeout_s =
            match std::env::var(format!("{variable_prefix}_LOCAL_REPOSITORY_LOCK_TIMEOUT")) {
                Ok(text) => text.parse().unwrap_or_else(|_| {
                    warn!("ignoring invalid lock timeout '{text}' for {variable_prefix}");
                    DEFAULT_LOCK_TIMEOUT_S
                }),
                Err(_) => DEFAULT_LOCK_TIMEOUT_S,
            };

        Self {
            mode,
            local_repository,
            lock_timeout: StdDuration::from_secs(lock_timeout_s),
        }
    }

    /// Creates the local repository directory when missing.
    pub fn setup_repository(&self) -> Result<(), DataError> {
        create_dir_all(&self.local_repository).context(IoSnafu {
            path: self.local_repository.display().to_string(),
        })
    }

    /// Acquires the repository lock with this configuration's timeout.
    pub fn lock_repository(&self) -> Result<RepositoryLock, DataError> {
        RepositoryLock::acquire(&self.local_repository, self.lock_timeout)
    }
}

/// Exclusive lock over a local repository, visible across processes.
///
/// The lock is a sentinel `.lock` file created atomically inside the repository. Acquisition
/// polls at 1 Hz until the configured timeout. The sentinel is removed on drop, on every exit
/// path.
#[derive(Debug)]
pub struct RepositoryLock {
    path: PathBuf,
}

impl RepositoryLock {
    pub fn acquire(repository: &Path, timeout: StdDuration) -> Result<Self, DataError> {
        let path = repository.join(".lock");
        let deadline = std::time::Instant::now() + timeout;
        loop {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => {
                    debug!("acquired lock {}", path.display());
                    return Ok(Self { path });
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    if std::time::Instant::now() >= deadline {
                        return Err(DataError::LockTimeout {
                            path: path.display().to_string(),
                            timeout_s: timeout.as_secs(),
                        });
                    }
                    std::thread::sleep(StdDuration::from_secs(LOCK_POLL_PERIOD_S));
                }
                Err(source) => {
                    return Err(DataError::Io {
                        path: path.display().to_string(),
                        source,
                    })
                }
            }
        }
    }
}

impl Drop for RepositoryLock {
    fn drop(&mut self) {
        if let Err(e) = remove_file(&self.path) {
            warn!("could not release lock {}: {e}", self.path.display());
        } else {
            debug!("released lock {}", self.path.display());
        }
    }
}

/// Downloads `resource` into `destination_dir`, trying each URL in order.
///
/// The caller must hold the repository lock. The file name is taken from the last URL path
/// segment. Returns the path of the downloaded file.
pub fn fetch_file(
    remote_urls: &[String],
    destination_dir: &Path,
    resource: &str,
) -> Result<PathBuf, DataError> {
    let mut last_cause = format!("no remote URL is defined for '{resource}'");

    for remote_url in remote_urls {
        let parsed = match url::Url::parse(remote_url) {
            Ok(parsed) => parsed,
            Err(e) => {
                last_cause = format!("invalid URL '{remote_url}': {e}");
                continue;
            }
        };

        let file_name = match parsed
            .path_segments()
            .and_then(|segments| segments.last())
            .filter(|name| !name.is_empty())
        {
            Some(name) => name.to_string(),
            None => {
                last_cause = format!("URL '{remote_url}' has no file name");
                continue;
            }
        };

        let agent = ureq::AgentBuilder::new()
            .timeout_connect(StdDuration::from_secs(30))
            .timeout_read(StdDuration::from_secs(60))
            .build();

        match agent.get(remote_url).call() {
            Ok(response) => {
                let destination = destination_dir.join(&file_name);
                let mut file = File::create(&destination).context(IoSnafu {
                    path: destination.display().to_string(),
                })?;
                let mut reader = response.into_reader();
                let written =
                    std::io::copy(&mut reader, &mut file).context(IoSnafu {
                        path: destination.display().to_string(),
                    })?;
                file.flush().context(IoSnafu {
                    path: destination.display().to_string(),
                })?;
                info!("fetched {remote_url} into {} ({written} bytes)", destination.display());
                return Ok(destination);
            }
            Err(e) => {
                debug!("fetching {remote_url} failed: {e}");
                last_cause = format!("{e}");
            }
        }
    }

    Err(DataError::FetchFailed {
        resource: resource.to_string(),
        cause: last_cause,
    })
}
