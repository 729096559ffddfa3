/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use std::path::{Path, PathBuf};

use ostk_physics::data::{self, DataError, Manifest, Mode};
use ostk_physics::environment::atmospheric::earth::weather;
use ostk_physics::environment::ephemeris::spice;
use ostk_physics::environment::ephemeris::spice::{Kernel, KernelType};
use ostk_physics::environment::gravitational::earth::EarthGravitationalModelType;
use ostk_physics::environment::magnetic::earth::EarthMagneticModelType;
use ostk_physics::environment::{gravitational, magnetic};

use crate::common::{data_dir, instant_utc};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join("ostk-physics-it")
        .join(name)
        .join(format!("{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_manifest_manager_serves_local_manifest() {
    let repository = scratch_dir("manifest");
    std::fs::copy(data_dir().join("manifest.json"), repository.join("manifest.json")).unwrap();

    let manager = data::Manager::global();
    manager.set_mode(Mode::Manual);
    manager.set_local_repository(repository);

    let urls = manager.remote_data_urls("finals-2000A").unwrap();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].ends_with("finals2000A.data"));

    let stamp = manager.last_update_timestamp_for("bulletin-A").unwrap();
    assert_eq!(stamp, instant_utc("2023-08-01T00:00:00"));

    let magnetic_entries = manager.find_remote_data_urls("^earth-magnetic-.*").unwrap();
    assert_eq!(magnetic_entries.len(), 1);
    assert_eq!(magnetic_entries[0].0, "earth-magnetic-WMM2015");

    assert!(matches!(
        manager.remote_data_urls("no-such-resource"),
        Err(DataError::ManifestResourceNotFound { .. })
    ));
}

#[test]
fn test_manifest_model() {
    let manifest = Manifest::from_path(&data_dir().join("manifest.json")).unwrap();
    assert!(manifest.entries.len() >= 5);
    let entry = manifest.entry("manifest").unwrap();
    assert_eq!(entry.check_frequency, Some(86_400));

    assert!(matches!(
        Manifest::from_path(Path::new("/no/such/manifest.json")),
        Err(DataError::Io { .. })
    ));
}

#[test]
fn test_gravity_manager_manual_mode() {
    let manager = gravitational::earth::Manager::global();
    manager.set_mode(Mode::Manual);
    manager.set_local_repository(scratch_dir("gravity"));

    assert!(!manager.has_data_files_for_type(EarthGravitationalModelType::EGM96));
    assert!(matches!(
        manager.fetch_data_files_for_type(EarthGravitationalModelType::EGM96),
        Err(DataError::DataUnavailable { .. })
    ));

    // Drop the files in place: the manager now reports and returns them.
    let repository = manager.local_repository();
    for name in EarthGravitationalModelType::EGM96.file_names() {
        std::fs::write(repository.join(name), b"coefficients").unwrap();
    }
    assert!(manager.has_data_files_for_type(EarthGravitationalModelType::EGM96));
    let files = manager
        .fetch_data_files_for_type(EarthGravitationalModelType::EGM96)
        .unwrap();
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|file| file.exists()));
}

#[test]
fn test_magnetic_manager_manual_mode() {
    let manager = magnetic::earth::Manager::global();
    manager.set_mode(Mode::Manual);
    manager.set_local_repository(scratch_dir("magnetic"));

    assert!(!manager.has_data_files_for_type(EarthMagneticModelType::WMM2015));
    assert!(matches!(
        manager.fetch_data_files_for_type(EarthMagneticModelType::WMM2015),
        Err(DataError::DataUnavailable { .. })
    ));
}

#[test]
fn test_spice_manager_manual_mode() {
    let manager = spice::Manager::global();
    manager.set_mode(Mode::Manual);
    manager.set_local_repository(scratch_dir("spice"));

    let kernel = Kernel::from_path(Path::new("de430.bsp"));
    assert_eq!(kernel.kind(), Some(KernelType::Spk));
    assert!(matches!(
        manager.fetch_kernel(&kernel),
        Err(DataError::DataUnavailable { .. })
    ));

    // A kernel dropped into the repository is discovered and served without fetching.
    std::fs::write(manager.local_repository().join("de430.bsp"), b"DAF/SPK").unwrap();
    let path = manager.fetch_kernel(&kernel).unwrap();
    assert!(path.exists());

    let local = manager.local_kernels().unwrap();
    assert!(local.iter().any(|k| k.name() == "de430.bsp"));
}

#[test]
fn test_space_weather_manager_queries() {
    let manager = weather::Manager::global();
    manager.set_mode(Mode::Manual);
    manager
        .load_space_weather_file(&data_dir().join("SW-Last5Years.txt"))
        .unwrap();

    let instant = instant_utc("2018-01-01T10:00:00");

    let kp = manager.kp_3_hour_solar_indices_at(&instant).unwrap();
    assert_eq!(kp, [27.0, 20.0, 23.0, 20.0, 23.0, 20.0, 13.0, 17.0]);

    let ap = manager.ap_3_hour_solar_indices_at(&instant).unwrap();
    assert_eq!(ap[0], 12.0);
    assert_eq!(manager.ap_daily_index_at(&instant).unwrap(), 8.0);

    let f107 = manager.f107_solar_flux_at(&instant).unwrap();
    assert!((f107 - 67.1).abs() < 1e-9);
    let f107_avg = manager.f107_solar_flux_81_day_avg_at(&instant).unwrap();
    assert!((f107_avg - 69.6).abs() < 1e-9);

    // Daily predictions answer later instants.
    let predicted = manager
        .reading_at(&instant_utc("2018-01-12T00:00:00"))
        .unwrap();
    assert_eq!(predicted.kind, weather::ReadingKind::DailyPrediction);

    // Monthly predictions resolve to the nearest lower monthly row.
    let monthly = manager
        .reading_at(&instant_utc("2018-02-20T00:00:00"))
        .unwrap();
    assert_eq!(monthly.kind, weather::ReadingKind::MonthlyPrediction);
    assert!((monthly.f107_adjusted - 70.0).abs() < 1e-9);

    // Outside every section in Manual mode: unavailable.
    assert!(matches!(
        manager.reading_at(&instant_utc("2017-06-01T00:00:00")),
        Err(DataError::DataUnavailable { .. })
    ));

    // Reset drops the loaded data; re-loading the same file restores the same public view.
    manager.reset();
    assert!(manager.space_weather().is_err());
    manager.set_mode(Mode::Manual);
    manager
        .load_space_weather_file(&data_dir().join("SW-Last5Years.txt"))
        .unwrap();
    let weather_data = manager.space_weather().unwrap();
    assert_eq!(
        weather_data.observation_interval().start(),
        instant_utc("2018-01-01T00:00:00")
    );
}
