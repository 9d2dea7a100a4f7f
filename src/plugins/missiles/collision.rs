//! Impact resolution: a flying missile touching an unlit block lights it.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::blocks::{closest_point_on, Block};

use super::components::{Missile, MissileFlight, MissilePhase, PooledMissile};
use super::config::{ImpactForceMode, MissileSpec};
use super::messages::MissileImpact;
use super::pool::inactive_missile_layers;

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionTarget {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

/// Push applied to the struck block: along missile → contact, or along the heading when
/// the missile already sits on the contact point.
pub fn impact_force(spec: &MissileSpec, missile_pos: Vec2, contact: Vec2, heading: Vec2) -> Vec2 {
    let dir = (contact - missile_pos).normalize_or_zero();
    let dir = if dir.length_squared() < 0.01 { heading } else { dir };
    dir * spec.hit_force
}

pub fn process_missile_collisions(
    mut started: MessageReader<CollisionStart>,
    tunables: Res<Tunables>,
    mut impacts: MessageWriter<MissileImpact>,
    q_is_missile: Query<(), With<PooledMissile>>,
    mut q_missiles: Query<(
        &Missile,
        &MissileFlight,
        &Transform,
        &mut MissilePhase,
        &mut LinearVelocity,
        &mut CollisionLayers,
    ), With<PooledMissile>>,
    mut q_blocks: Query<(&mut Block, &Transform, Option<&Collider>), Without<PooledMissile>>,
    mut q_forces: Query<Forces, Without<PooledMissile>>,
) {
    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let m1 = q_is_missile.contains(t1.collider);
        let m2 = q_is_missile.contains(t2.collider);
        if !(m1 ^ m2) {
            continue; // must be exactly one missile
        }
        let (missile_side, other_side) = if m1 { (t1, t2) } else { (t2, t1) };

        let Ok((missile, flight, m_tf, mut phase, mut vel, mut layers)) =
            q_missiles.get_mut(missile_side.collider)
        else {
            continue;
        };

        // First contact only: an impacted missile no longer reacts.
        if !phase.is_flying() {
            continue;
        }

        let block_e = other_side.gameplay_owner();
        let Ok((mut block, b_tf, collider)) = q_blocks.get_mut(block_e) else {
            continue; // not a block
        };
        if !block.player_hit() {
            continue; // already lit
        }

        let pos = m_tf.translation.truncate();
        let contact = collider.map_or(b_tf.translation.truncate(), |c| closest_point_on(c, b_tf, pos));

        let force = impact_force(&missile.spec, pos, contact, flight.heading);
        if let Ok(mut forces) = q_forces.get_mut(block_e) {
            match missile.spec.hit_force_mode {
                ImpactForceMode::Impulse => forces.apply_linear_impulse(force),
                ImpactForceMode::Force => forces.apply_force(force),
            }
        }

        impacts.write(MissileImpact {
            missile: missile_side.collider,
            block: block_e,
            point: contact,
        });

        // Linger at the impact point until the delay runs out.
        *phase = MissilePhase::impacted(tunables.impact_despawn_secs);
        vel.0 = Vec2::ZERO;
        *layers = inactive_missile_layers();
    }
}
