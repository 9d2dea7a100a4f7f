//! Per-missile flight systems.
//!
//! - Update (frame dt): lifetime expiry, impact delay.
//! - FixedUpdate (fixed dt): homing, before the physics step integrates velocity.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::plugins::blocks::{Block, BlockCatalog};

use super::components::{Missile, MissileFlight, MissilePhase, PooledMissile};
use super::steering::{steer, PhysicsProbe};

/// Expire missiles that outlived their spec. Expiry fires no impact effects.
pub fn tick_missile_lifetime(
    time: Res<Time>,
    mut q: Query<(Entity, &Missile, &mut MissileFlight, &mut MissilePhase), With<PooledMissile>>,
) {
    let dt = time.delta_secs();
    for (e, missile, mut flight, mut phase) in &mut q {
        if !phase.is_flying() {
            continue;
        }
        if flight.tick_lifetime(dt, missile.spec.max_lifetime_secs) {
            debug!("Missile {e} expired after {:.2}s", flight.elapsed_secs);
            *phase = MissilePhase::Expired;
        }
    }
}

/// Count down the post-impact delay. The commit system recycles finished missiles.
pub fn tick_impact_delay(time: Res<Time>, mut q: Query<&mut MissilePhase, With<PooledMissile>>) {
    for mut phase in &mut q {
        if let MissilePhase::Impacted { despawn } = &mut *phase {
            despawn.tick(time.delta());
        }
    }
}

/// Home every flying missile toward its aim point.
pub fn steer_missiles(
    time: Res<Time<Fixed>>,
    blocks: BlockCatalog,
    probe: PhysicsProbe,
    mut q: Query<(
        &Missile,
        &mut MissileFlight,
        &mut MissilePhase,
        &mut Transform,
        &mut LinearVelocity,
    ), (With<PooledMissile>, Without<Block>)>,
) {
    let dt = time.delta_secs();

    for (missile, mut flight, mut phase, mut tf, mut vel) in &mut q {
        if !phase.is_flying() {
            continue;
        }

        let out = steer(&mut flight, &missile.spec, tf.translation.truncate(), dt, &blocks, &probe);
        vel.0 = out.velocity;
        tf.rotation = flight.rotation();

        let next = if out.avoiding { MissilePhase::Avoiding } else { MissilePhase::Seeking };
        if *phase != next {
            *phase = next;
        }
    }
}
