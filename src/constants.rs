/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

/// Physical parameters of the celestial bodies bundled with the default environment.
pub mod celestial_bodies {
    /// [m^3/s^2] Earth gravitational parameter (EGM2008)
    pub const EARTH_GRAVITATIONAL_PARAMETER_M3_S2: f64 = 3.986004418e14;
    /// [m] Earth equatorial radius (WGS84)
    pub const EARTH_EQUATORIAL_RADIUS_M: f64 = 6378137.0;
    /// Earth flattening (WGS84)
    pub const EARTH_FLATTENING: f64 = 1.0 / 298.257223563;
    /// Earth second zonal harmonic (EGM96)
    pub const EARTH_J2: f64 = 1.0826269e-3;
    /// Earth fourth zonal harmonic (EGM96)
    pub const EARTH_J4: f64 = -1.6204e-6;

    /// [m^3/s^2] Sun gravitational parameter
    pub const SUN_GRAVITATIONAL_PARAMETER_M3_S2: f64 = 1.32712440018e20;
    /// [m] Sun equatorial radius
    pub const SUN_EQUATORIAL_RADIUS_M: f64 = 6.955e8;

    /// [m^3/s^2] Moon gravitational parameter
    pub const MOON_GRAVITATIONAL_PARAMETER_M3_S2: f64 = 4.9048695e12;
    /// [m] Moon equatorial radius
    pub const MOON_EQUATORIAL_RADIUS_M: f64 = 1.7374e6;

    /// [m] Astronomical unit
    pub const ASTRONOMICAL_UNIT_M: f64 = 1.495978707e11;
}

/// Earth rotation.
pub mod rotation {
    /// [rad/s] Mean Earth rotation rate about the CIP axis
    pub const EARTH_ANGULAR_VELOCITY_RAD_S: f64 = 7.2921150e-5;
}

/// Unit conversion factors.
pub mod conversion {
    use core::f64::consts::PI;

    /// Arcseconds to radians
    pub const ARCSEC_TO_RAD: f64 = PI / 648_000.0;
    /// Milliarcseconds to radians
    pub const MAS_TO_RAD: f64 = ARCSEC_TO_RAD / 1_000.0;
    /// Microarcseconds to radians
    pub const UAS_TO_RAD: f64 = ARCSEC_TO_RAD / 1_000_000.0;
    /// Degrees to radians
    pub const DEG_TO_RAD: f64 = PI / 180.0;
}

/// Data management defaults, overridable through the environment (cf. [crate::data]).
pub mod data {
    /// Root of the shared on-disk data repository.
    pub const DEFAULT_DATA_ROOT: &str = "./.open-space-toolkit/physics/data";

    /// Environment variable overriding [DEFAULT_DATA_ROOT] for every manager at once.
    pub const DATA_ROOT_ENV: &str = "OSTK_PHYSICS_DATA_LOCAL_REPOSITORY";

    /// Environment variable overriding the manifest source.
    pub const MANIFEST_REMOTE_URL_ENV: &str = "OSTK_PHYSICS_DATA_MANIFEST_REMOTE_URL";

    /// Default remote URL of the data manifest.
    pub const DEFAULT_MANIFEST_REMOTE_URL: &str =
        "https://github.com/open-space-collective/open-space-toolkit-data/raw/main/data/manifest.json";
}
