/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use ostk_physics::coordinate::frame::Frame;
use ostk_physics::coordinate::spherical::LLA;
use ostk_physics::coordinate::Position;
use ostk_physics::environment::utility::eclipse_intervals_at_position;
use ostk_physics::environment::Environment;
use ostk_physics::math::Vector3;
use ostk_physics::time::{Interval, Unit};
use ostk_physics::units::{Angle, Length};

use crate::common::{instant_utc, setup_eop};

fn equator_site() -> Position {
    let lla = LLA::new(
        Angle::degrees(0.0),
        Angle::degrees(0.0),
        Length::meters(10.0),
    );
    Position::meters(lla.to_cartesian_wgs84(), Frame::itrf())
}

#[test]
fn test_eclipse_intervals_over_one_day() {
    setup_eop();
    let environment = Environment::default_environment();
    let analysis_interval = Interval::closed(
        instant_utc("2018-01-01T00:00:00"),
        instant_utc("2018-01-02T00:00:00"),
    )
    .unwrap();

    let umbras =
        eclipse_intervals_at_position(&analysis_interval, &equator_site(), &environment)
            .unwrap();

    // Midnight UTC at the prime meridian is local night: the day starts and ends in umbra.
    assert_eq!(umbras.len(), 2, "umbras: {umbras:?}");

    let night_end = umbras[0].end();
    let night_start = umbras[1].start();
    assert_eq!(umbras[0].start(), analysis_interval.start());
    assert_eq!(umbras[1].end(), analysis_interval.end());

    // Sunrise and sunset at the equator and prime meridian in early January happen close to
    // 06:00 and 18:00 UTC.
    let sunrise_window = Interval::closed(
        instant_utc("2018-01-01T05:30:00"),
        instant_utc("2018-01-01T06:30:00"),
    )
    .unwrap();
    let sunset_window = Interval::closed(
        instant_utc("2018-01-01T17:30:00"),
        instant_utc("2018-01-01T18:30:00"),
    )
    .unwrap();
    assert!(
        sunrise_window.contains_instant(&night_end),
        "sunrise at {night_end}"
    );
    assert!(
        sunset_window.contains_instant(&night_start),
        "sunset at {night_start}"
    );

    // Day and night each last roughly twelve hours at the equator.
    let daylight = night_start - night_end;
    assert!(daylight > Unit::Hour * 11);
    assert!(daylight < Unit::Hour * 13);
}

#[test]
fn test_eclipse_predicate_day_and_night() {
    setup_eop();
    let mut environment = Environment::default_environment();
    let site = equator_site();

    // Local noon at the prime meridian: lit.
    environment.set_instant(instant_utc("2018-01-01T12:05:00"));
    assert!(!environment.is_position_in_eclipse(&site).unwrap());

    // Local midnight: in umbra.
    environment.set_instant(instant_utc("2018-01-01T00:05:00"));
    assert!(environment.is_position_in_eclipse(&site).unwrap());
}

#[test]
fn test_terminator_separates_lit_and_dark() {
    setup_eop();
    let mut environment = Environment::default_environment();
    environment.set_instant(instant_utc("2018-01-01T12:00:00"));
    let earth = environment.access_central_body().unwrap();
    let sun = environment
        .access_celestial_object_with_name("Sun")
        .unwrap();

    let sun_direction = earth.sun_direction(&sun).unwrap();
    let terminator = earth.terminator_geometry(&sun_direction, 90);
    assert_eq!(terminator.len(), 90);

    // Every terminator point is on the surface, orthogonal to the Sun direction.
    for lla in &terminator {
        assert!(lla.altitude().in_meters().abs() < 50_000.0);
        let p = lla
            .to_cartesian(
                earth.equatorial_radius().in_meters(),
                earth.flattening(),
            )
            .normalize();
        assert!(p.dot(&sun_direction).abs() < 0.01);
    }

    // The subsolar point is lit, the antisolar point is dark.
    let radius = earth.equatorial_radius().in_meters();
    let subsolar = Position::meters(sun_direction * (radius + 10.0), Frame::itrf());
    let antisolar = Position::meters(-sun_direction * (radius + 10.0), Frame::itrf());
    assert!(!environment.is_position_in_eclipse(&subsolar).unwrap());
    assert!(environment.is_position_in_eclipse(&antisolar).unwrap());
}

#[test]
fn test_earth_field_queries() {
    setup_eop();
    let environment = Environment::default_environment();
    let earth = environment.access_central_body().unwrap();
    let instant = instant_utc("2018-01-01T00:00:00");

    let lla = LLA::new(
        Angle::degrees(0.0),
        Angle::degrees(0.0),
        Length::meters(500e3),
    );
    let position = Position::meters(lla.to_cartesian_wgs84(), Frame::itrf());

    let gravity = earth.gravitational_field_at(&position, &instant).unwrap();
    // ~8.4 m/s^2 at 500 km, pulling down.
    assert!(gravity.norm() > 8.0 && gravity.norm() < 9.0);

    let magnetic = earth.magnetic_field_at(&position, &instant).unwrap();
    assert!(magnetic.norm() > 1e-5 && magnetic.norm() < 1e-4);

    let density = earth.atmospheric_density_at(&position, &instant).unwrap();
    assert!(density > 1e-14 && density < 1e-11, "density = {density}");
}

#[test]
fn test_sun_position_distance() {
    setup_eop();
    let environment = Environment::default_environment();
    let sun = environment
        .access_celestial_object_with_name("Sun")
        .unwrap();
    let position = sun
        .position_in(&Frame::gcrf(), &instant_utc("2018-01-03T00:00:00"))
        .unwrap();
    let distance_au = position.in_meters().coordinates().norm() / 1.495_978_707e11;
    // Early January is perihelion.
    assert!((distance_au - 0.983).abs() < 0.01, "distance = {distance_au} AU");
}

#[test]
fn test_moon_position_distance() {
    setup_eop();
    let environment = Environment::default_environment();
    let moon = environment
        .access_celestial_object_with_name("Moon")
        .unwrap();
    let position = moon
        .position_in(&Frame::gcrf(), &instant_utc("2018-01-03T00:00:00"))
        .unwrap();
    let distance_m = position.in_meters().coordinates().norm();
    assert!(distance_m > 3.5e8 && distance_m < 4.1e8);

    let site = Position::meters(Vector3::new(7e6, 0.0, 0.0), Frame::gcrf());
    // The Moon never shows up at 7000 km.
    assert!(
        (position.in_meters().coordinates() - site.in_meters().coordinates()).norm() > 3.0e8
    );
}
