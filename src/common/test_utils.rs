//! Test helpers.
//!
//! Systems are exercised with `World::run_system_once` instead of a full schedule.
//! Queued `Commands` are applied with `world.flush()` before assertions.

use std::time::Duration;

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Insert a `Time` (the generic clock systems read) advanced by `dt` seconds.
pub fn insert_time_with_delta(world: &mut World, dt: f32) {
    let mut t = Time::<()>::default();
    t.advance_by(Duration::from_secs_f32(dt));
    world.insert_resource(t);
}
