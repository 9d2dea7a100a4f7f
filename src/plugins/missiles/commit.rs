//! Return commit: recycle finished missiles back into the pool.
//!
//! This system owns the *Inactive invariants*:
//! - hidden
//! - velocity = 0
//! - collide with nothing (filters empty)
//! - no target

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{MissileEntity, MissileFlight, MissilePhase, PooledMissile};
use super::pool::{inactive_missile_layers, MissilePool};

pub fn return_to_pool_commit(
    mut pool: ResMut<MissilePool>,
    mut q: Query<(
        Entity,
        &mut MissilePhase,
        &mut MissileFlight,
        &mut Visibility,
        &mut LinearVelocity,
        &mut AngularVelocity,
        &mut CollisionLayers,
    ), With<PooledMissile>>,
) {
    for (e, mut phase, mut flight, mut vis, mut vel, mut ang, mut layers) in &mut q {
        if !phase.is_ready_for_return() {
            continue;
        }

        // Overwriting the phase also drops any pending impact timer.
        *phase = MissilePhase::Inactive;
        flight.reset();
        *vis = Visibility::Hidden;
        vel.0 = Vec2::ZERO;
        ang.0 = 0.0;
        *layers = inactive_missile_layers();

        pool.push_free(MissileEntity(e));
    }
}
