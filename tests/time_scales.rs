/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use ostk_physics::time::{
    DateTime, Duration, Format, Instant, Interval, Scale, TimeError, Unit,
};

use crate::common::{instant_tai, instant_utc, setup_eop};

#[test]
fn test_j2000_readings_across_scales() {
    let j2000 = Instant::j2000();
    let reading = |scale| {
        j2000
            .to_date_time(scale)
            .unwrap()
            .to_string_with_format(Format::ISO8601)
    };
    assert_eq!(reading(Scale::TT), "2000-01-01T12:00:00");
    assert_eq!(reading(Scale::TAI), "2000-01-01T11:59:27.816");
    assert_eq!(reading(Scale::UTC), "2000-01-01T11:58:55.816");
    assert_eq!(reading(Scale::GPS), "2000-01-01T11:59:08.816");
}

#[test]
fn test_round_trip_through_every_arithmetic_scale() {
    let instant = instant_tai("2018-01-01T00:00:37.123456789");
    for scale in [Scale::TAI, Scale::UTC, Scale::TT, Scale::GPS, Scale::TCG] {
        let date_time = instant.to_date_time(scale).unwrap();
        let back = Instant::from_date_time(date_time, scale).unwrap();
        assert!(
            instant.is_near(&back, Duration::from_seconds(1e-9)),
            "round trip through {scale} drifted by {}",
            back - instant
        );
    }
}

#[test]
fn test_ut1_round_trip_with_eop() {
    setup_eop();
    let instant = instant_utc("2018-03-15T06:30:00");
    let in_ut1 = instant.to_date_time(Scale::UT1).unwrap();
    let back = Instant::from_date_time(in_ut1, Scale::UT1).unwrap();
    // UT1-UTC varies by about a millisecond per day; the double interpolation agrees far
    // below a microsecond.
    assert!(instant.is_near(&back, Duration::from_seconds(1e-6)));
}

#[test]
fn test_ut1_outside_coverage_fails() {
    setup_eop();
    let instant = instant_utc("1995-01-01T00:00:00");
    assert!(matches!(
        instant.to_date_time(Scale::UT1),
        Err(TimeError::ScaleConversionUnavailable { .. })
    ));
    assert!(matches!(
        instant.to_modified_julian_date(Scale::UT1),
        Err(TimeError::ScaleConversionUnavailable { .. })
    ));
}

#[test]
fn test_julian_date_scales() {
    let j2000 = Instant::j2000();
    assert!((j2000.to_julian_date(Scale::TT).unwrap() - 2_451_545.0).abs() < 1e-9);
    let mjd_tt = j2000.to_modified_julian_date(Scale::TT).unwrap();
    assert!((mjd_tt - 51_544.5).abs() < 1e-9);

    // GPS epoch is MJD 44244 in GPS time.
    let gps_epoch = Instant::gps_epoch();
    assert!((gps_epoch.to_modified_julian_date(Scale::GPS).unwrap() - 44_244.0).abs() < 1e-9);
}

#[test]
fn test_named_epochs_are_consistent() {
    // The GPS epoch reads 1980-01-06 00:00:00 in UTC (TAI - UTC was 19 s).
    let gps_in_utc = Instant::gps_epoch()
        .to_date_time(Scale::UTC)
        .unwrap()
        .to_string_with_format(Format::ISO8601);
    assert_eq!(gps_in_utc, "1980-01-06T00:00:00");

    assert!(Instant::modified_julian_date_epoch()
        .to_modified_julian_date(Scale::TT)
        .unwrap()
        .abs()
        < 1e-9);

    // Named epochs order as they do physically.
    assert!(Instant::unix_epoch() < Instant::gps_epoch());
    assert!(Instant::gps_epoch() < Instant::j2000());
}

#[test]
fn test_parsing_formats_agree() {
    let iso = instant_utc("2020-05-15T12:00:00");
    let standard = Instant::from_date_time(
        DateTime::parse("2020-05-15 12:00:00", Format::Standard).unwrap(),
        Scale::UTC,
    )
    .unwrap();
    let stk = Instant::from_date_time(
        DateTime::parse("15 May 2020 12:00:00", Format::STK).unwrap(),
        Scale::UTC,
    )
    .unwrap();
    assert_eq!(iso, standard);
    assert_eq!(iso, stk);
}

#[test]
fn test_interval_grid_over_scales() {
    let start = instant_utc("2018-01-01T00:00:00");
    let end = instant_utc("2018-01-01T01:00:00");
    let interval = Interval::closed(start, end).unwrap();
    assert_eq!(interval.duration(), Unit::Hour * 1);

    let grid = interval.generate_grid(Unit::Minute * 10).unwrap();
    assert_eq!(grid.len(), 7);
    assert!(grid.windows(2).all(|pair| pair[0] < pair[1]));
}
