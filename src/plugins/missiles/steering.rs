//! Homing math: aim point tracking, obstacle avoidance and turn-rate-limited rotation.
//!
//! Everything here is plain math over two seams, [`TargetCatalog`] and [`ObstacleProbe`],
//! so the fixed-step system stays a thin loop and the behaviour is testable without a
//! physics world.

use avian2d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::components::{MissileFlight, NEAR_ZERO_SQR};
use super::config::MissileSpec;
use super::ranking::TargetCatalog;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObstacleHit {
    pub point: Vec2,
    pub normal: Vec2,
}

/// Forward ray probe against obstacles.
pub trait ObstacleProbe {
    fn probe(&self, origin: Vec2, direction: Dir2, max_distance: f32, mask: LayerMask) -> Option<ObstacleHit>;
}

/// Obstacle probe backed by Avian's spatial query pipeline.
#[derive(SystemParam)]
pub struct PhysicsProbe<'w, 's> {
    spatial: SpatialQuery<'w, 's>,
}

impl ObstacleProbe for PhysicsProbe<'_, '_> {
    fn probe(&self, origin: Vec2, direction: Dir2, max_distance: f32, mask: LayerMask) -> Option<ObstacleHit> {
        let filter = SpatialQueryFilter::from_mask(mask);
        let hit = self
            .spatial
            .cast_ray(origin, direction, max_distance, true, &filter)?;
        Some(ObstacleHit {
            point: origin + *direction * hit.distance,
            normal: hit.normal,
        })
    }
}

/// Result of one fixed step of steering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteerOutcome {
    pub velocity: Vec2,
    pub avoiding: bool,
}

/// Where the missile should fly this step.
///
/// While the target is valid the closest point on it is used and remembered. Once the
/// target is gone, cleared or shapeless the last remembered point is used instead.
pub fn current_aim_point<C: TargetCatalog>(flight: &mut MissileFlight, position: Vec2, catalog: &C) -> Vec2 {
    let Some(target) = flight.target else {
        return flight.fallback_aim;
    };
    if catalog.is_cleared(target) {
        return flight.fallback_aim;
    }
    let Some(point) = catalog.closest_point(target, position) else {
        return flight.fallback_aim;
    };

    flight.fallback_aim = point;
    point
}

/// Blend `desired` sideways along the obstacle surface.
///
/// The side (left/right of the normal) closest to `desired` wins.
pub fn avoidance_direction(desired: Vec2, normal: Vec2, strength: f32) -> Vec2 {
    let left = normal.perp().normalize_or_zero();
    let right = -left;
    let side = if left.dot(desired) > right.dot(desired) { left } else { right };

    desired
        .lerp(side, strength.clamp(0.0, 1.0))
        .try_normalize()
        .unwrap_or(desired)
}

/// Rotate unit vector `current` toward `target` by at most `max_radians`.
pub fn rotate_towards(current: Vec2, target: Vec2, max_radians: f32) -> Vec2 {
    let angle = current.perp_dot(target).atan2(current.dot(target));
    let step = angle.clamp(-max_radians, max_radians);
    Vec2::from_angle(step)
        .rotate(current)
        .try_normalize()
        .unwrap_or(current)
}

/// Steering direction after the optional obstacle probe.
fn steer_direction<P: ObstacleProbe>(spec: &MissileSpec, position: Vec2, desired: Vec2, probe: &P) -> (Vec2, bool) {
    if !spec.avoid_enabled || spec.avoid_ray_distance <= 0.0 {
        return (desired, false);
    }
    let Ok(dir) = Dir2::new(desired) else {
        return (desired, false);
    };

    match probe.probe(position, dir, spec.avoid_ray_distance, spec.obstacle_mask()) {
        Some(hit) => (avoidance_direction(desired, hit.normal, spec.avoid_strength), true),
        None => (desired, false),
    }
}

/// One fixed step of homing for a flying missile.
///
/// Updates `flight.heading` (and the fallback aim point) and returns the new velocity.
pub fn steer<C: TargetCatalog, P: ObstacleProbe>(
    flight: &mut MissileFlight,
    spec: &MissileSpec,
    position: Vec2,
    dt: f32,
    catalog: &C,
    probe: &P,
) -> SteerOutcome {
    let speed = spec.speed * flight.speed_multiplier();

    let aim = current_aim_point(flight, position, catalog);
    let to_aim = aim - position;
    if to_aim.length_squared() < NEAR_ZERO_SQR {
        // On the aim point: coast forward.
        return SteerOutcome {
            velocity: flight.heading * speed,
            avoiding: false,
        };
    }

    let desired = to_aim.normalize();
    let (steer_dir, avoiding) = steer_direction(spec, position, desired, probe);

    flight.heading = rotate_towards(flight.heading, steer_dir, spec.turn_rate_rad() * dt);

    SteerOutcome {
        velocity: flight.heading * speed,
        avoiding,
    }
}
