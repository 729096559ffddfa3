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
use std::path::{Path, PathBuf};

/// The NAIF kernel families, each tied to a file extension.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KernelType {
    /// Spacecraft clock (`.tsc`)
    Sclk,
    /// Leap seconds (`.tls`)
    Lsk,
    /// Text planetary constants (`.tpc`)
    Pck,
    /// Instrument (`.ti`)
    Ik,
    /// Frames (`.tf`)
    Fk,
    /// Events (`.bes`)
    Ek,
    /// Meta-kernel (`.tm`)
    Mk,
    /// Ephemeris (`.bsp`)
    Spk,
    /// Binary planetary constants (`.bpc`)
    Bpck,
    /// Attitude (`.bc`)
    Ck,
    /// Binary events (`.bds`)
    Bek,
}

impl KernelType {
    /// The kernel type matching a file extension, `None` when the extension is unknown.
    pub fn from_file_extension(extension: &str) -> Option<Self> {
        match extension {
            "tsc" => Some(Self::Sclk),
            "tls" => Some(Self::Lsk),
            "tpc" => Some(Self::Pck),
            "ti" => Some(Self::Ik),
            "tf" => Some(Self::Fk),
            "bes" => Some(Self::Ek),
            "tm" => Some(Self::Mk),
            "bsp" => Some(Self::Spk),
            "bpc" => Some(Self::Bpck),
            "bc" => Some(Self::Ck),
            "bds" => Some(Self::Bek),
            _ => None,
        }
    }
}

impl fmt::Display for KernelType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Sclk => "SCLK",
            Self::Lsk => "LSK",
            Self::Pck => "PCK",
            Self::Ik => "IK",
            Self::Fk => "FK",
            Self::Ek => "EK",
            Self::Mk => "MK",
            Self::Spk => "SPK",
            Self::Bpck => "BPCK",
            Self::Ck => "CK",
            Self::Bek => "BEK",
        };
        write!(f, "{name}")
    }
}

/// A SPICE kernel file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Kernel {
    kind: Option<KernelType>,
    path: PathBuf,
}

impl Kernel {
    /// Builds a kernel from its file path; the type derives from the extension.
    pub fn from_path(path: &Path) -> Self {
        let kind = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(KernelType::from_file_extension);
        Self {
            kind,
            path: path.to_path_buf(),
        }
    }

    pub const fn kind(&self) -> Option<KernelType> {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            Some(kind) => write!(f, "{} [{kind}]", self.name()),
            None => write!(f, "{} [unknown]", self.name()),
        }
    }
}
