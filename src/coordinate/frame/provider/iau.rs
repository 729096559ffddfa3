/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

//! IAU Earth-orientation theory: precession, nutation, sidereal angles, CIP and CIO.
//!
//! Every function here is a pure function of its time argument(s). The nutation and CIO-locator
//! series are truncated to their milliarcsecond-class terms, which keeps the assembled rotations
//! well inside one arcsecond of the full theories over several decades around J2000.

use core::f64::consts::TAU;

use crate::constants::conversion::ARCSEC_TO_RAD;
use crate::math::rotation::{r1, r2, r3};
use crate::math::Matrix3;

/// [day] Julian date of the J2000 epoch.
pub const JD_J2000: f64 = 2_451_545.0;

/// [day] Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian centuries of TT since J2000 for the provided Julian date.
pub fn julian_centuries_since_j2000(jd: f64) -> f64 {
    (jd - JD_J2000) / DAYS_PER_CENTURY
}

/// [rad] Mean obliquity of the ecliptic (IAU 1980).
pub fn mean_obliquity_rad(t: f64) -> f64 {
    (84_381.448 + t * (-46.8150 + t * (-0.00059 + t * 0.001_813))) * ARCSEC_TO_RAD
}

/// [rad] IAU-1976 precession angles (zeta, theta, z).
pub fn precession_angles_rad(t: f64) -> (f64, f64, f64) {
    let zeta = (t * (2_306.2181 + t * (0.301_88 + t * 0.017_998))) * ARCSEC_TO_RAD;
    let theta = (t * (2_004.3109 + t * (-0.426_65 + t * -0.041_833))) * ARCSEC_TO_RAD;
    let z = (t * (2_306.2181 + t * (1.094_68 + t * 0.018_203))) * ARCSEC_TO_RAD;
    (zeta, theta, z)
}

/// Mean-of-date precession matrix: coordinates of date from J2000 mean equator and equinox.
pub fn precession_matrix(t: f64) -> Matrix3 {
    let (zeta, theta, z) = precession_angles_rad(t);
    r3(-z) * r2(theta) * r3(-zeta)
}

/// [rad] IAU-1980 Delaunay fundamental arguments (l, l', F, D, Omega).
pub fn delaunay_arguments_rad(t: f64) -> [f64; 5] {
    const REV: f64 = 1_296_000.0;
    let l = 485_866.733 + t * (1_325.0 * REV + 715_922.633 + t * (31.310 + t * 0.064));
    let lp = 1_287_099.804 + t * (99.0 * REV + 1_292_581.224 + t * (-0.577 + t * -0.012));
    let f = 335_778.877 + t * (1_342.0 * REV + 295_263.137 + t * (-13.257 + t * 0.011));
    let d = 1_072_261.307 + t * (1_236.0 * REV + 1_105_601.328 + t * (-6.891 + t * 0.019));
    let om = 450_160.280 + t * (-(5.0 * REV + 482_890.539) + t * (7.455 + t * 0.008));
    [l, lp, f, d, om].map(|arcsec| (arcsec * ARCSEC_TO_RAD) % TAU)
}

/// One luni-solar nutation term: Delaunay multipliers and sine/cosine coefficients.
struct NutationTerm {
    multipliers: [i8; 5],
    /// [0.1 mas] longitude, constant and t-rate
    psi: (f64, f64),
    /// [0.1 mas] obliquity, constant and t-rate
    eps: (f64, f64),
}

/// IAU-1980 luni-solar series, truncated to the terms above one milliarcsecond.
const NUTATION_TERMS: [NutationTerm; 20] = [
    NutationTerm { multipliers: [0, 0, 0, 0, 1], psi: (-171_996.0, -174.2), eps: (92_025.0, 8.9) },
    NutationTerm { multipliers: [0, 0, 2, -2, 2], psi: (-13_187.0, -1.6), eps: (5_736.0, -3.1) },
    NutationTerm { multipliers: [0, 0, 2, 0, 2], psi: (-2_274.0, -0.2), eps: (977.0, -0.5) },
    NutationTerm { multipliers: [0, 0, 0, 0, 2], psi: (2_062.0, 0.2), eps: (-895.0, 0.5) },
    NutationTerm { multipliers: [0, 1, 0, 0, 0], psi: (1_426.0, -3.4), eps: (54.0, -0.1) },
    NutationTerm { multipliers: [1, 0, 0, 0, 0], psi: (712.0, 0.1), eps: (-7.0, 0.0) },
    NutationTerm { multipliers: [0, 1, 2, -2, 2], psi: (-517.0, 1.2), eps: (224.0, -0.6) },
    NutationTerm { multipliers: [0, 0, 2, 0, 1], psi: (-386.0, -0.4), eps: (200.0, 0.0) },
    NutationTerm { multipliers: [1, 0, 2, 0, 2], psi: (-301.0, 0.0), eps: (129.0, -0.1) },
    NutationTerm { multipliers: [0, -1, 2, -2, 2], psi: (217.0, -0.5), eps: (-95.0, 0.3) },
    NutationTerm { multipliers: [0, 0, 2, -2, 1], psi: (129.0, 0.1), eps: (-70.0, 0.0) },
    NutationTerm { multipliers: [-1, 0, 2, 0, 2], psi: (123.0, 0.0), eps: (-53.0, 0.0) },
    NutationTerm { multipliers: [1, 0, 0, -2, 0], psi: (-158.0, 0.0), eps: (-1.0, 0.0) },
    NutationTerm { multipliers: [1, 0, 0, 0, 1], psi: (63.0, 0.1), eps: (-33.0, 0.0) },
    NutationTerm { multipliers: [0, 0, 0, 2, 0], psi: (63.0, 0.0), eps: (-2.0, 0.0) },
    NutationTerm { multipliers: [-1, 0, 0, 0, 1], psi: (-58.0, -0.1), eps: (32.0, 0.0) },
    NutationTerm { multipliers: [-1, 0, 2, 2, 2], psi: (-59.0, 0.0), eps: (26.0, 0.0) },
    NutationTerm { multipliers: [1, 0, 2, 0, 1], psi: (-51.0, 0.0), eps: (27.0, 0.0) },
    NutationTerm { multipliers: [0, 0, 2, 2, 2], psi: (-38.0, 0.0), eps: (16.0, 0.0) },
    NutationTerm { multipliers: [2, 0, 2, 0, 2], psi: (-31.0, 0.0), eps: (13.0, 0.0) },
];

/// [rad] IAU-1980 nutation in longitude and obliquity (truncated series).
pub fn nutation_rad(t: f64) -> (f64, f64) {
    let args = delaunay_arguments_rad(t);
    let mut dpsi = 0.0;
    let mut deps = 0.0;
    for term in &NUTATION_TERMS {
        let argument: f64 = term
            .multipliers
            .iter()
            .zip(args.iter())
            .map(|(&m, &a)| f64::from(m) * a)
            .sum();
        dpsi += (term.psi.0 + term.psi.1 * t) * argument.sin();
        deps += (term.eps.0 + term.eps.1 * t) * argument.cos();
    }
    // Series coefficients are in units of 0.1 milliarcsecond.
    (
        dpsi * 1e-4 * ARCSEC_TO_RAD,
        deps * 1e-4 * ARCSEC_TO_RAD,
    )
}

/// True-of-date nutation matrix: true equator and equinox from the mean of date.
pub fn nutation_matrix(t: f64, dpsi_rad: f64, deps_rad: f64) -> Matrix3 {
    let eps = mean_obliquity_rad(t);
    r1(-(eps + deps_rad)) * r3(-dpsi_rad) * r1(eps)
}

/// [rad] Greenwich mean sidereal time, 1982 model.
pub fn gmst_1982_rad(jd_ut1: f64) -> f64 {
    let t = julian_centuries_since_j2000(jd_ut1);
    let seconds = 67_310.548_41
        + t * ((876_600.0 * 3_600.0 + 8_640_184.812_866) + t * (0.093_104 + t * -6.2e-6));
    (seconds.rem_euclid(86_400.0)) * TAU / 86_400.0
}

/// [rad] Equation of the equinoxes, 1982 model (with the 1994 complementary terms).
pub fn equation_of_equinoxes_1982_rad(t: f64) -> f64 {
    let (dpsi, _) = nutation_rad(t);
    let eps = mean_obliquity_rad(t);
    let om = delaunay_arguments_rad(t)[4];
    dpsi * eps.cos() + (0.002_64 * om.sin() + 0.000_063 * (2.0 * om).sin()) * ARCSEC_TO_RAD
}

/// [rad] Earth rotation angle (IAU 2000), from the UT1 Julian date.
pub fn earth_rotation_angle_rad(jd_ut1: f64) -> f64 {
    let t = jd_ut1 - JD_J2000;
    let fraction = jd_ut1.rem_euclid(1.0);
    (TAU * (fraction + 0.779_057_273_264_0 + 0.002_737_811_911_354_48 * t)).rem_euclid(TAU)
}

/// [rad] IAU-2006 Fukushima-Williams bias-precession angles (gamma_bar, phi_bar, psi_bar,
/// epsilon_A).
pub fn fukushima_williams_angles_rad(t: f64) -> (f64, f64, f64, f64) {
    let gamb = -0.052_928
        + t * (10.556_378
            + t * (0.493_204_4 + t * (-0.000_312_38 + t * (-0.000_002_788 + t * 0.000_000_026_0))));
    let phib = 84_381.412_819
        + t * (-46.811_016
            + t * (0.051_126_8 + t * (0.000_532_89 + t * (-0.000_000_440 + t * -0.000_000_017_6))));
    let psib = -0.041_775
        + t * (5_038.481_484
            + t * (1.558_417_5 + t * (-0.000_185_22 + t * (-0.000_026_452 + t * -0.000_000_014_8))));
    let epsa = 84_381.406
        + t * (-46.836_769
            + t * (-0.000_183_1 + t * (0.002_003_40 + t * (-0.000_000_576 + t * -0.000_000_043_4))));
    (
        gamb * ARCSEC_TO_RAD,
        phib * ARCSEC_TO_RAD,
        psib * ARCSEC_TO_RAD,
        epsa * ARCSEC_TO_RAD,
    )
}

/// Coordinates of the Celestial Intermediate Pole in the GCRS, from the Fukushima-Williams
/// angles and the nutation of date: (X, Y) are the first two components of the third row of the
/// bias-precession-nutation matrix.
pub fn cip_xy(t: f64) -> (f64, f64) {
    let (gamb, phib, psib, epsa) = fukushima_williams_angles_rad(t);
    let (dpsi, deps) = nutation_rad(t);
    let npb = r1(-(epsa + deps)) * r3(-(psib + dpsi)) * r1(phib) * r3(gamb);
    (npb[(2, 0)], npb[(2, 1)])
}

/// [rad] CIO locator s, truncated to its secular and principal terms:
/// `s = -XY/2 + 94 uas + 3808.65 uas t`.
pub fn cio_locator_s_rad(t: f64, x: f64, y: f64) -> f64 {
    -x * y / 2.0 + (94e-6 + 3_808.65e-6 * t) * ARCSEC_TO_RAD
}

/// Celestial-to-intermediate matrix from the CIP coordinates and the CIO locator.
pub fn celestial_to_intermediate_matrix(x: f64, y: f64, s: f64) -> Matrix3 {
    let r2_xy = x * x + y * y;
    let e = if r2_xy > 0.0 { y.atan2(x) } else { 0.0 };
    let d = (r2_xy / (1.0 - r2_xy)).sqrt().atan();
    r3(-(e + s)) * r2(d) * r3(e)
}

/// Polar motion matrix: ITRS coordinates from the terrestrial intermediate frame.
///
/// `W^-1 = R1(-yp) R2(-xp) R3(s')`, with `s' = -47 uas t`.
pub fn polar_motion_matrix(xp_rad: f64, yp_rad: f64, t: f64) -> Matrix3 {
    let sp = -47e-6 * t * ARCSEC_TO_RAD;
    r1(-yp_rad) * r2(-xp_rad) * r3(sp)
}
