/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

//! Data management: local repositories, repository locks, remote manifest.
//!
//! Every manager of this crate (IERS, SPICE kernels, space weather, gravity and magnetic
//! coefficients) shares the same lifecycle: a local repository directory holding cached files, a
//! sentinel `.lock` file guarding mutations, a Manual/Automatic mode, and configuration read
//! from environment variables on construction and on [reset].

use core::fmt;
use core::str::FromStr;

use snafu::prelude::*;

pub mod manager;
pub mod manifest;

pub use manager::{fetch_file, ManagerConfig, RepositoryLock};
pub use manifest::{Manager, Manifest, ManifestEntry};

/// Data loading discipline of a manager.
///
/// In Automatic mode, a query for data outside the loaded window triggers a fetch from the
/// remote repositories listed in the manifest. In Manual mode the same query fails with
/// [DataError::DataUnavailable] and the caller is expected to load files explicitly.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    Manual,
    #[default]
    Automatic,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "Manual"),
            Self::Automatic => write!(f, "Automatic"),
        }
    }
}

impl FromStr for Mode {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Manual" => Ok(Self::Manual),
            "Automatic" => Ok(Self::Automatic),
            _ => Err(DataError::InvalidConfiguration {
                variable: "mode".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum DataError {
    #[snafu(display("data for '{resource}' at {instant} is unavailable in Manual mode"))]
    DataUnavailable { resource: String, instant: String },
    #[snafu(display("fetching '{resource}' failed: {cause}"))]
    FetchFailed { resource: String, cause: String },
    #[snafu(display("parsing {path} failed: {cause}"))]
    ParseFailed { path: String, cause: String },
    #[snafu(display("could not lock repository {path} within {timeout_s} s"))]
    LockTimeout { path: String, timeout_s: u64 },
    #[snafu(display("manifest has no entry for resource '{resource}'"))]
    ManifestResourceNotFound { resource: String },
    #[snafu(display("I/O error on {path}: {source}"))]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[snafu(display("environment variable {variable} holds invalid value '{value}'"))]
    InvalidConfiguration { variable: String, value: String },
}
