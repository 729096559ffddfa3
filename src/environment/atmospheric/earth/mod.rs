/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

pub mod weather;

use super::AtmosphericModel;
use crate::constants::celestial_bodies::{EARTH_EQUATORIAL_RADIUS_M, EARTH_FLATTENING};
use crate::coordinate::spherical::LLA;
use crate::environment::EnvironmentError;
use crate::math::Vector3;
use crate::time::Instant;

/// One band of the piecewise-exponential density profile: base altitude, nominal density at the
/// base, scale height. Altitudes in km, densities in kg/m^3.
struct ExponentialBand {
    base_altitude_km: f64,
    nominal_density_kg_m3: f64,
    scale_height_km: f64,
}

/// Piecewise-exponential atmosphere (Vallado, table 8-4).
const EXPONENTIAL_BANDS: [ExponentialBand; 28] = [
    ExponentialBand { base_altitude_km: 0.0, nominal_density_kg_m3: 1.225, scale_height_km: 7.249 },
    ExponentialBand { base_altitude_km: 25.0, nominal_density_kg_m3: 3.899e-2, scale_height_km: 6.349 },
    ExponentialBand { base_altitude_km: 30.0, nominal_density_kg_m3: 1.774e-2, scale_height_km: 6.682 },
    ExponentialBand { base_altitude_km: 40.0, nominal_density_kg_m3: 3.972e-3, scale_height_km: 7.554 },
    ExponentialBand { base_altitude_km: 50.0, nominal_density_kg_m3: 1.057e-3, scale_height_km: 8.382 },
    ExponentialBand { base_altitude_km: 60.0, nominal_density_kg_m3: 3.206e-4, scale_height_km: 7.714 },
    ExponentialBand { base_altitude_km: 70.0, nominal_density_kg_m3: 8.770e-5, scale_height_km: 6.549 },
    ExponentialBand { base_altitude_km: 80.0, nominal_density_kg_m3: 1.905e-5, scale_height_km: 5.799 },
    ExponentialBand { base_altitude_km: 90.0, nominal_density_kg_m3: 3.396e-6, scale_height_km: 5.382 },
    ExponentialBand { base_altitude_km: 100.0, nominal_density_kg_m3: 5.297e-7, scale_height_km: 5.877 },
    ExponentialBand { base_altitude_km: 110.0, nominal_density_kg_m3: 9.661e-8, scale_height_km: 7.263 },
    ExponentialBand { base_altitude_km: 120.0, nominal_density_kg_m3: 2.438e-8, scale_height_km: 9.473 },
    ExponentialBand { base_altitude_km: 130.0, nominal_density_kg_m3: 8.484e-9, scale_height_km: 12.636 },
    ExponentialBand { base_altitude_km: 140.0, nominal_density_kg_m3: 3.845e-9, scale_height_km: 16.149 },
    ExponentialBand { base_altitude_km: 150.0, nominal_density_kg_m3: 2.070e-9, scale_height_km: 22.523 },
    ExponentialBand { base_altitude_km: 180.0, nominal_density_kg_m3: 5.464e-10, scale_height_km: 29.740 },
    ExponentialBand { base_altitude_km: 200.0, nominal_density_kg_m3: 2.789e-10, scale_height_km: 37.105 },
    ExponentialBand { base_altitude_km: 250.0, nominal_density_kg_m3: 7.248e-11, scale_height_km: 45.546 },
    ExponentialBand { base_altitude_km: 300.0, nominal_density_kg_m3: 2.418e-11, scale_height_km: 53.628 },
    ExponentialBand { base_altitude_km: 350.0, nominal_density_kg_m3: 9.518e-12, scale_height_km: 53.298 },
    ExponentialBand { base_altitude_km: 400.0, nominal_density_kg_m3: 3.725e-12, scale_height_km: 58.515 },
    ExponentialBand { base_altitude_km: 450.0, nominal_density_kg_m3: 1.585e-12, scale_height_km: 60.828 },
    ExponentialBand { base_altitude_km: 500.0, nominal_density_kg_m3: 6.967e-13, scale_height_km: 63.822 },
    ExponentialBand { base_altitude_km: 600.0, nominal_density_kg_m3: 1.454e-13, scale_height_km: 71.835 },
    ExponentialBand { base_altitude_km: 700.0, nominal_density_kg_m3: 3.614e-14, scale_height_km: 88.667 },
    ExponentialBand { base_altitude_km: 800.0, nominal_density_kg_m3: 1.170e-14, scale_height_km: 124.64 },
    ExponentialBand { base_altitude_km: 900.0, nominal_density_kg_m3: 5.245e-15, scale_height_km: 181.05 },
    ExponentialBand { base_altitude_km: 1000.0, nominal_density_kg_m3: 3.019e-15, scale_height_km: 268.00 },
];

/// The piecewise-exponential Earth atmosphere.
#[derive(Copy, Clone, Debug, Default)]
pub struct ExponentialAtmosphericModel;

impl ExponentialAtmosphericModel {
    /// [kg/m^3] Density at a geodetic altitude.
    pub fn density_at_altitude(altitude_m: f64) -> f64 {
        let altitude_km = altitude_m / 1e3;
        if altitude_km < 0.0 {
            return EXPONENTIAL_BANDS[0].nominal_density_kg_m3;
        }
        let band = EXPONENTIAL_BANDS
            .iter()
            .rev()
            .find(|band| altitude_km >= band.base_altitude_km)
            .unwrap_or(&EXPONENTIAL_BANDS[0]);
        band.nominal_density_kg_m3
            * (-(altitude_km - band.base_altitude_km) / band.scale_height_km).exp()
    }
}

impl AtmosphericModel for ExponentialAtmosphericModel {
    fn density_at(
        &self,
        position_m: &Vector3,
        _instant: &Instant,
    ) -> Result<f64, EnvironmentError> {
        let lla = LLA::from_cartesian(position_m, EARTH_EQUATORIAL_RADIUS_M, EARTH_FLATTENING);
        Ok(Self::density_at_altitude(lla.altitude().in_meters()))
    }
}

#[cfg(test)]
mod ut_exponential {
    use super::*;

    #[test]
    fn test_sea_level_density() {
        assert!((ExponentialAtmosphericModel::density_at_altitude(0.0) - 1.225).abs() < 1e-12);
    }

    #[test]
    fn test_density_decreases_with_altitude() {
        let mut previous = f64::INFINITY;
        for altitude_km in [0.0, 50.0, 100.0, 200.0, 400.0, 700.0, 1000.0, 1500.0] {
            let density = ExponentialAtmosphericModel::density_at_altitude(altitude_km * 1e3);
            assert!(density < previous, "density must fall at {altitude_km} km");
            assert!(density > 0.0);
            previous = density;
        }
    }

    #[test]
    fn test_band_reference_values() {
        // At each band base the profile returns the nominal density exactly.
        let at_400 = ExponentialAtmosphericModel::density_at_altitude(400e3);
        assert!((at_400 - 3.725e-12).abs() / 3.725e-12 < 1e-12);
        let at_150 = ExponentialAtmosphericModel::density_at_altitude(150e3);
        assert!((at_150 - 2.070e-9).abs() / 2.070e-9 < 1e-12);
    }
}
