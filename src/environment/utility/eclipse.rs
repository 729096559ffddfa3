/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

//! Umbra search: when is the Sun, seen from a position, occluded by a body.

use hifitime::Duration;
use snafu::ResultExt;

use crate::coordinate::frame::Frame;
use crate::coordinate::Position;
use crate::environment::object::Segment;
use crate::environment::{Environment, EnvironmentError, FrameSnafu, TimeSnafu};
use crate::time::{Instant, Interval};

/// [s] Coarse sampling step of the occultation predicate.
const COARSE_STEP_S: f64 = 30.0;

/// [s] Bisection stops once the crossing is bracketed tighter than this.
const REFINEMENT_TOLERANCE_S: f64 = 1.0;

/// True when the Sun, seen from `position` at `instant`, is occluded by the environment's
/// central body.
///
/// The Sun is treated as a point at its computed position and the occulting body as its
/// spherical envelope; the predicate is whether the position-to-Sun segment crosses the body
/// volume.
pub fn is_position_in_eclipse(
    position: &Position,
    instant: &Instant,
    environment: &Environment,
) -> Result<bool, EnvironmentError> {
    let gcrf = Frame::gcrf();
    let sun = environment.access_celestial_object_with_name("Sun")?;
    let occluder = environment.access_central_body()?;

    let observer_gcrf = position.in_frame(&gcrf, instant).context(FrameSnafu)?;
    let sun_gcrf = sun.position_in(&gcrf, instant)?;
    let occluder_gcrf = occluder.position_in(&gcrf, instant)?;

    // Express both segment ends relative to the occluder center.
    let r1 = observer_gcrf.in_meters().coordinates() - occluder_gcrf.in_meters().coordinates();
    let r2 = sun_gcrf.in_meters().coordinates() - occluder_gcrf.in_meters().coordinates();

    // An observer on (or marginally below) the surface is not its own occlusion: pull the
    // segment start just above the envelope before testing.
    let radius = occluder.equatorial_radius().in_meters();
    let r1 = if r1.norm() <= radius {
        r1.normalize() * (radius * (1.0 + 1e-9))
    } else {
        r1
    };

    Ok(Segment::new(r1, r2).intersects_origin_sphere(radius))
}

/// The ordered umbra intervals over the analysis interval, for an observer at `position`.
///
/// The predicate is sampled at a coarse step; every sign change is bracketed and refined by
/// bisection down to [REFINEMENT_TOLERANCE_S]. Umbra intervals running into the analysis bounds
/// are clipped to them.
pub fn eclipse_intervals_at_position(
    analysis_interval: &Interval,
    position: &Position,
    environment: &Environment,
) -> Result<Vec<Interval>, EnvironmentError> {
    let step = Duration::from_seconds(COARSE_STEP_S);
    let grid = analysis_interval
        .generate_grid(step)
        .context(TimeSnafu)?;

    let mut intervals = Vec::new();
    let mut eclipse_start: Option<Instant> = None;
    let mut previous_instant = *grid.first().ok_or_else(|| EnvironmentError::Time {
        source: crate::time::TimeError::NonPositiveStep,
    })?;
    let mut previous_state = is_position_in_eclipse(position, &previous_instant, environment)?;

    if previous_state {
        eclipse_start = Some(previous_instant);
    }

    for instant in grid.iter().skip(1) {
        let state = is_position_in_eclipse(position, instant, environment)?;
        if state != previous_state {
            let crossing = refine_crossing(
                position,
                environment,
                previous_instant,
                *instant,
                previous_state,
            )?;
            if state {
                eclipse_start = Some(crossing);
            } else if let Some(start) = eclipse_start.take() {
                intervals.push(Interval::closed(start, crossing).context(TimeSnafu)?);
            }
        }
        previous_state = state;
        previous_instant = *instant;
    }

    if let Some(start) = eclipse_start {
        intervals.push(
            Interval::closed(start, analysis_interval.end()).context(TimeSnafu)?,
        );
    }

    Ok(intervals)
}

/// Bisects the predicate crossing inside `[dark_side, lit_side]` (in either order).
fn refine_crossing(
    position: &Position,
    environment: &Environment,
    mut before: Instant,
    mut after: Instant,
    state_before: bool,
) -> Result<Instant, EnvironmentError> {
    let tolerance = Duration::from_seconds(REFINEMENT_TOLERANCE_S);
    while (after - before) > tolerance {
        let midpoint = before + (after - before) / 2;
        let state = is_position_in_eclipse(position, &midpoint, environment)?;
        if state == state_before {
            before = midpoint;
        } else {
            after = midpoint;
        }
    }
    Ok(after)
}
