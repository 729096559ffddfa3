/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use std::path::PathBuf;
use std::sync::Once;

use ostk_physics::coordinate::frame::provider::iers;
use ostk_physics::data::Mode;
use ostk_physics::time::{DateTime, Format, Instant, Scale};

pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

static EOP: Once = Once::new();

/// Loads the bundled Earth orientation fixture into the IERS manager, once per process, with
/// the manager pinned in Manual mode so that no test ever reaches for the network.
pub fn setup_eop() {
    EOP.call_once(|| {
        let manager = iers::Manager::global();
        manager.set_mode(Mode::Manual);
        manager
            .load_finals_2000a_file(&data_dir().join("finals2000A.data"))
            .expect("bundled finals fixture must parse");
    });
}

pub fn instant_utc(text: &str) -> Instant {
    Instant::from_date_time(
        DateTime::parse(text, Format::ISO8601).unwrap(),
        Scale::UTC,
    )
    .unwrap()
}

pub fn instant_tai(text: &str) -> Instant {
    Instant::from_date_time(
        DateTime::parse(text, Format::ISO8601).unwrap(),
        Scale::TAI,
    )
    .unwrap()
}
