//! Circular-orbit position and spin calculator.
//!
//! Pure functions of (definition, simulation time). Bodies move on flat
//! circles in the XZ plane, either around the origin or around their
//! parent's current position.

#[cfg(test)]
mod proptest_orbit;

use std::f64::consts::TAU;

use bevy::math::DVec3;

use crate::catalog::BodyDefinition;
use crate::error::SimError;
use crate::types::ORIGIN;

fn degenerate(body: &BodyDefinition, time: f64) -> SimError {
    SimError::DegenerateOrbit {
        body: body.name.clone(),
        distance: body.orbital_distance,
        speed: body.orbital_speed,
        time,
    }
}

/// Offset from the orbit center after `time` seconds.
///
/// The angle is wrapped before the trig calls so large times keep their
/// precision.
pub fn local_offset(distance: f64, speed: f64, time: f64) -> DVec3 {
    let angle = (time * speed).rem_euclid(TAU);
    DVec3::new(distance * angle.cos(), 0.0, distance * angle.sin())
}

/// Position of `body` at `time`.
///
/// `parent_position` must be the parent's position at the same `time` when
/// the body has a parent; it is ignored otherwise.
pub fn compute_position(
    body: &BodyDefinition,
    time: f64,
    parent_position: Option<DVec3>,
) -> Result<DVec3, SimError> {
    if body.is_central() {
        return Ok(ORIGIN);
    }
    if !body.orbital_speed.is_finite() || !body.orbital_distance.is_finite() || !time.is_finite() {
        return Err(degenerate(body, time));
    }

    let local = local_offset(body.orbital_distance, body.orbital_speed, time);
    let position = match &body.parent {
        Some(parent) => parent_position.ok_or_else(|| SimError::NotFound(parent.clone()))? + local,
        None => local,
    };

    if position.is_finite() {
        Ok(position)
    } else {
        Err(degenerate(body, time))
    }
}

/// Spin angle of `body` at `time`, in radians. Unbounded.
pub fn compute_rotation(body: &BodyDefinition, time: f64) -> Result<f64, SimError> {
    let angle = body.rotation_speed * time;
    if angle.is_finite() {
        Ok(angle)
    } else {
        Err(degenerate(body, time))
    }
}

/// Simulation seconds per full orbit, or `None` for a body that never moves.
pub fn orbital_period(body: &BodyDefinition) -> Option<f64> {
    if body.is_central() || body.orbital_speed == 0.0 || !body.orbital_speed.is_finite() {
        None
    } else {
        Some(TAU / body.orbital_speed.abs())
    }
}

/// Closed polyline approximating an orbit of `radius` around `center`.
///
/// Returns `segments + 1` points; the last repeats the first.
pub fn orbit_ring(center: DVec3, radius: f64, segments: usize) -> Vec<DVec3> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let angle = TAU * i as f64 / segments as f64;
            center + DVec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
        })
        .collect()
}
