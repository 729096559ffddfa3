/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use ostk_physics::constants::conversion::ARCSEC_TO_RAD;
use ostk_physics::coordinate::frame::provider::iers::{BulletinA, EopError, Finals2000A, Manager};

use crate::common::{data_dir, instant_utc, setup_eop};

#[test]
fn test_ut1_minus_utc_at_reference_instant() {
    setup_eop();
    let instant = instant_utc("2017-12-31T23:59:30");
    let value = Manager::global().ut1_minus_utc_at(&instant).unwrap();
    assert!(
        (value - 0.232_466_65).abs() < 1e-4,
        "UT1-UTC = {value}"
    );
}

#[test]
fn test_polar_motion_at_reference_instant() {
    setup_eop();
    let instant = instant_utc("2018-06-01T00:00:00");
    let (x_asec, y_asec) = Manager::global().polar_motion_at(&instant).unwrap();
    // Expected values are the fixture row for MJD 58270.
    assert!(
        ((x_asec - 0.001_154_36) * ARCSEC_TO_RAD).abs() < 1e-8,
        "xp = {x_asec} asec"
    );
    assert!(
        ((y_asec - 0.345_890_99) * ARCSEC_TO_RAD).abs() < 1e-8,
        "yp = {y_asec} asec"
    );
}

#[test]
fn test_lod_at_reference_instant() {
    setup_eop();
    let instant = instant_utc("2018-06-01T00:00:00");
    let lod_ms = Manager::global().lod_at(&instant).unwrap();
    assert!((lod_ms - 1.292_257_8).abs() < 1e-4, "LOD = {lod_ms} ms");
}

#[test]
fn test_data_at_returns_nearest_lower_record() {
    setup_eop();
    let instant = instant_utc("2018-06-01T15:30:00");
    let data = Manager::global().data_at(&instant).unwrap();
    assert_eq!(data.mjd, 58_270.0);
    assert_eq!((data.year, data.month, data.day), (2018, 6, 1));
}

#[test]
fn test_out_of_coverage_is_out_of_range() {
    setup_eop();
    let instant = instant_utc("1995-01-01T00:00:00");
    assert!(matches!(
        Manager::global().polar_motion_at(&instant),
        Err(EopError::OutOfRange { .. })
    ));
    assert!(matches!(
        Manager::global().ut1_minus_utc_at(&instant),
        Err(EopError::OutOfRange { .. })
    ));
}

#[test]
fn test_interpolation_is_linear_between_rows() {
    setup_eop();
    let finals = Finals2000A::from_file(&data_dir().join("finals2000A.data")).unwrap();
    let mut hint = 0;

    let lower = instant_utc("2018-06-01T00:00:00");
    let upper = instant_utc("2018-06-02T00:00:00");
    let midpoint = instant_utc("2018-06-01T12:00:00");

    let value_lower = finals.ut1_minus_utc_at(&lower, &mut hint).unwrap();
    let value_upper = finals.ut1_minus_utc_at(&upper, &mut hint).unwrap();
    let value_mid = finals.ut1_minus_utc_at(&midpoint, &mut hint).unwrap();
    assert!(
        (value_mid - 0.5 * (value_lower + value_upper)).abs() < 1e-12,
        "midpoint is not the mean of the bracketing rows"
    );
}

#[test]
fn test_reload_yields_identical_state() {
    // Loading the same file twice must expose byte-identical public state.
    let first = Finals2000A::from_file(&data_dir().join("finals2000A.data")).unwrap();
    let second = Finals2000A::from_file(&data_dir().join("finals2000A.data")).unwrap();
    assert_eq!(first.interval(), second.interval());
    assert_eq!(first.data().len(), second.data().len());
    for (a, b) in first.data().iter().zip(second.data().iter()) {
        assert_eq!(a, b);
    }
}

#[test]
fn test_bulletin_a_observations_and_predictions() {
    let bulletin = BulletinA::from_file(&data_dir().join("ser7.dat")).unwrap();

    let in_observations = instant_utc("2018-06-01T06:00:00");
    let observation = bulletin.observation_at(&in_observations).unwrap();
    assert_eq!(observation.mjd, 58_270.0);
    assert!((observation.x - 0.120_001).abs() < 1e-9);
    assert!((observation.ut1_minus_utc - 0.170_100_0).abs() < 1e-9);

    let in_predictions = instant_utc("2018-06-06T06:00:00");
    assert!(bulletin.observation_at(&in_predictions).is_none());
    let prediction = bulletin.prediction_at(&in_predictions).unwrap();
    assert!((prediction.x - 0.121).abs() < 1e-9);
}
