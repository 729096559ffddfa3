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
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_derive::{Deserialize, Serialize};
use snafu::prelude::*;

use super::manager::{fetch_file, ManagerConfig};
use super::{DataError, IoSnafu, Mode};
use crate::constants::data::{DEFAULT_MANIFEST_REMOTE_URL, MANIFEST_REMOTE_URL_ENV};
use crate::time::{DateTime, Format, Instant, Scale};

/// Logical resource id under which the manifest describes itself.
pub const MANIFEST_RESOURCE_ID: &str = "manifest";

/// [s] How long a manifest stays fresh when it does not state a check frequency.
const DEFAULT_CHECK_FREQUENCY_S: u64 = 86_400;

/// One manifest entry: where a logical resource lives and when it last changed.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ManifestEntry {
    /// ISO-8601 UTC timestamp of the last remote update.
    pub last_modified: String,
    /// Download locations, attempted in order.
    pub remote_urls: Vec<String>,
    /// [s] Age after which the resource (the manifest itself included) is considered stale.
    #[serde(default)]
    pub check_frequency: Option<u64>,
}

/// The data manifest: a map from logical resource ids to remote locations.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    #[serde(flatten)]
    pub entries: BTreeMap<String, ManifestEntry>,
}

impl Manifest {
    pub fn from_path(path: &Path) -> Result<Self, DataError> {
        let file = File::open(path).context(IoSnafu {
            path: path.display().to_string(),
        })?;
        serde_json::from_reader(file).map_err(|e| DataError::ParseFailed {
            path: path.display().to_string(),
            cause: e.to_string(),
        })
    }

    pub fn entry(&self, resource: &str) -> Result<&ManifestEntry, DataError> {
        self.entries
            .get(resource)
            .ok_or_else(|| DataError::ManifestResourceNotFound {
                resource: resource.to_string(),
            })
    }

    /// Download URLs for the provided resource, in preference order.
    pub fn remote_data_urls(&self, resource: &str) -> Result<Vec<String>, DataError> {
        Ok(self.entry(resource)?.remote_urls.clone())
    }

    /// Last remote update of the provided resource.
    pub fn last_update_timestamp_for(&self, resource: &str) -> Result<Instant, DataError> {
        let entry = self.entry(resource)?;
        let date_time = DateTime::parse(
            entry.last_modified.trim_end_matches('Z'),
            Format::ISO8601,
        )
        .map_err(|e| DataError::ParseFailed {
            path: format!("manifest entry '{resource}'"),
            cause: e.to_string(),
        })?;
        Instant::from_date_time(date_time, Scale::UTC).map_err(|e| DataError::ParseFailed {
            path: format!("manifest entry '{resource}'"),
            cause: e.to_string(),
        })
    }

    /// All `(resource, urls)` pairs whose resource id matches the provided pattern.
    pub fn find_remote_data_urls(
        &self,
        resource_pattern: &str,
    ) -> Result<Vec<(String, Vec<String>)>, DataError> {
        let re = Regex::new(resource_pattern).map_err(|e| DataError::InvalidConfiguration {
            variable: "resource pattern".to_string(),
            value: format!("{resource_pattern} ({e})"),
        })?;
        Ok(self
            .entries
            .iter()
            .filter(|(id, _)| re.is_match(id))
            .map(|(id, entry)| (id.clone(), entry.remote_urls.clone()))
            .collect())
    }
}

struct State {
    config: ManagerConfig,
    remote_url: String,
    manifest: Option<Manifest>,
    fetched_at: Option<Instant>,
}

impl State {
    fn from_environment() -> Self {
        Self {
            config: ManagerConfig::from_environment("OSTK_PHYSICS_DATA_MANAGER", ""),
            remote_url: std::env::var(MANIFEST_REMOTE_URL_ENV)
                .unwrap_or_else(|_| DEFAULT_MANIFEST_REMOTE_URL.to_string()),
            manifest: None,
            fetched_at: None,
        }
    }

    fn manifest_path(&self) -> PathBuf {
        self.config.local_repository.join("manifest.json")
    }

    fn is_stale(&self) -> bool {
        let check_frequency_s = self
            .manifest
            .as_ref()
            .and_then(|m| m.entries.get(MANIFEST_RESOURCE_ID))
            .and_then(|entry| entry.check_frequency)
            .unwrap_or(DEFAULT_CHECK_FREQUENCY_S);
        match self.fetched_at {
            Some(fetched_at) => {
                (Instant::now() - fetched_at).to_seconds() > check_frequency_s as f64
            }
            None => true,
        }
    }

    /// Loads the local manifest, fetching it first when in Automatic mode and missing or stale.
    /// Mutex must already be held by the caller.
    fn load_manifest_(&mut self) -> Result<Manifest, DataError> {
        if let Some(manifest) = &self.manifest {
            if !self.is_stale() {
                return Ok(manifest.clone());
            }
        }

        self.config.setup_repository()?;
        let path = self.manifest_path();

        if self.config.mode == Mode::Automatic && (self.is_stale() || !path.exists()) {
            let _lock = self.config.lock_repository()?;
            debug!("refreshing manifest from {}", self.remote_url);
            fetch_file(
                &[self.remote_url.clone()],
                &self.config.local_repository,
                MANIFEST_RESOURCE_ID,
            )?;
        }

        if !path.exists() {
            return Err(DataError::DataUnavailable {
                resource: MANIFEST_RESOURCE_ID.to_string(),
                instant: Instant::now().to_string(),
            });
        }

        let manifest = Manifest::from_path(&path)?;
        info!("loaded manifest with {} entries", manifest.entries.len());
        self.manifest = Some(manifest.clone());
        self.fetched_at = Some(Instant::now());
        Ok(manifest)
    }
}

static GLOBAL: Lazy<Manager> = Lazy::new(|| Manager {
    state: Mutex::new(State::from_environment()),
});

/// The manifest manager: the root data manager every other manager queries for remote URLs.
///
/// Thread-safe process-wide singleton. Configured through `OSTK_PHYSICS_DATA_MANAGER_MODE`,
/// `OSTK_PHYSICS_DATA_MANAGER_LOCAL_REPOSITORY`,
/// `OSTK_PHYSICS_DATA_MANAGER_LOCAL_REPOSITORY_LOCK_TIMEOUT` and
/// `OSTK_PHYSICS_DATA_MANIFEST_REMOTE_URL`.
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
        let mut state = self.state.lock().unwrap();
        state.config.local_repository = directory;
        state.manifest = None;
        state.fetched_at = None;
    }

    pub fn remote_url(&self) -> String {
        self.state.lock().unwrap().remote_url.clone()
    }

    pub fn set_remote_url(&self, remote_url: String) {
        self.state.lock().unwrap().remote_url = remote_url;
    }

    /// The loaded manifest, fetching or refreshing it first when the mode allows.
    pub fn manifest(&self) -> Result<Manifest, DataError> {
        self.state.lock().unwrap().load_manifest_()
    }

    pub fn remote_data_urls(&self, resource: &str) -> Result<Vec<String>, DataError> {
        self.manifest()?.remote_data_urls(resource)
    }

    pub fn last_update_timestamp_for(&self, resource: &str) -> Result<Instant, DataError> {
        self.manifest()?.last_update_timestamp_for(resource)
    }

    pub fn find_remote_data_urls(
        &self,
        resource_pattern: &str,
    ) -> Result<Vec<(String, Vec<String>)>, DataError> {
        self.manifest()?.find_remote_data_urls(resource_pattern)
    }

    /// Drops all in-memory state and re-reads the environment.
    pub fn reset(&self) {
        *self.state.lock().unwrap() = State::from_environment();
    }

    /// Removes every cached file from the local repository.
    pub fn clear_local_repository(&self) -> Result<(), DataError> {
        let mut state = self.state.lock().unwrap();
        let repository = state.config.local_repository.clone();
        if repository.exists() {
            std::fs::remove_dir_all(&repository).context(IoSnafu {
                path: repository.display().to_string(),
            })?;
        }
        state.config.setup_repository()?;
        state.manifest = None;
        state.fetched_at = None;
        Ok(())
    }
}

#[cfg(test)]
mod ut_manifest {
    use super::*;

    #[test]
    fn test_manifest_parsing() {
        let manifest: Manifest = serde_json::from_str(
            r#"{
                "manifest": {
                    "last_modified": "2023-08-02T00:00:00",
                    "remote_urls": ["https://example.org/manifest.json"],
                    "check_frequency": 3600
                },
                "finals-2000A": {
                    "last_modified": "2023-08-01T12:00:00",
                    "remote_urls": [
                        "https://example.org/finals/finals2000A.data",
                        "https://mirror.example.org/finals2000A.data"
                    ]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.entries.len(), 2);
        let urls = manifest.remote_data_urls("finals-2000A").unwrap();
        assert_eq!(urls.len(), 2);
        assert!(urls[0].contains("finals2000A.data"));

        assert!(matches!(
            manifest.remote_data_urls("no-such-resource"),
            Err(DataError::ManifestResourceNotFound { .. })
        ));
    }

    #[test]
    fn test_last_update_timestamp() {
        let manifest: Manifest = serde_json::from_str(
            r#"{"bulletin-A": {"last_modified": "2023-08-01T12:00:00Z", "remote_urls": []}}"#,
        )
        .unwrap();
        let stamp = manifest.last_update_timestamp_for("bulletin-A").unwrap();
        let expected = Instant::from_date_time(
            DateTime::parse("2023-08-01T12:00:00", Format::ISO8601).unwrap(),
            Scale::UTC,
        )
        .unwrap();
        assert_eq!(stamp, expected);
    }

    #[test]
    fn test_find_by_pattern() {
        let manifest: Manifest = serde_json::from_str(
            r#"{
                "earth-magnetic-WMM2015": {"last_modified": "2023-01-01T00:00:00", "remote_urls": ["https://example.org/wmm2015.cof"]},
                "earth-magnetic-IGRF12": {"last_modified": "2023-01-01T00:00:00", "remote_urls": ["https://example.org/igrf12.cof"]},
                "egm2008": {"last_modified": "2023-01-01T00:00:00", "remote_urls": ["https://example.org/egm2008.egm"]}
            }"#,
        )
        .unwrap();
        let matches = manifest.find_remote_data_urls("^earth-magnetic-.*").unwrap();
        assert_eq!(matches.len(), 2);
    }
}
