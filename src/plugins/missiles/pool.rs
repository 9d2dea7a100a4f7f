//! Missile pool: pre-spawned missiles, activated and recycled without structural changes.
//!
//! Inactive missiles are hidden, motionless and collide with nothing (empty filters).

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};
use crate::plugins::blocks::Block;
use crate::plugins::player::Player;

use super::components::{Missile, MissileEntity, MissileFlight, MissilePhase, PooledMissile};
use super::config::MissileSpec;

const MISSILE_RADIUS: f32 = 6.0;

#[derive(Resource, Debug)]
pub struct MissilePool {
    free: Vec<MissileEntity>,
    pub capacity: usize,
}

impl MissilePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn pop_free(&mut self) -> Option<MissileEntity> {
        self.free.pop()
    }

    #[inline]
    pub fn push_free(&mut self, e: MissileEntity) {
        self.free.push(e);
    }

    #[inline]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }
}

#[inline]
pub fn active_missile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Missile, [Layer::Block])
}

#[inline]
pub fn inactive_missile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Missile, [] as [Layer; 0])
}

/// Pre-spawn the level's missiles, all inactive.
pub fn init_missile_pool(mut commands: Commands, mut pool: ResMut<MissilePool>) {
    pool.free.clear();
    let cap = pool.capacity;
    pool.free.reserve(cap);

    for _ in 0..cap {
        let e = commands
            .spawn((
                Name::new("Missile(Pooled)"),
                PooledMissile,
                MissilePhase::Inactive,
                Missile::default(),
                MissileFlight::default(),
                Sprite {
                    color: Color::WHITE,
                    custom_size: Some(Vec2::new(MISSILE_RADIUS * 1.5, MISSILE_RADIUS * 3.0)),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, 3.0),
                Visibility::Hidden,
                (
                    RigidBody::Kinematic,
                    Collider::circle(MISSILE_RADIUS),
                    Sensor,
                    inactive_missile_layers(),
                    LinearVelocity(Vec2::ZERO),
                    AngularVelocity(0.0),
                    // Only pairs with at least one opted-in collider emit CollisionStart.
                    CollisionEventsEnabled,
                ),
                DespawnOnExit(GameState::InGame),
            ))
            .id();

        pool.free.push(MissileEntity(e));
    }
}

/// Pooled missile data touched by a launch.
///
/// Disjoint from blocks and the player so launchers can read their transforms.
pub type LaunchQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut MissilePhase,
        &'static mut Missile,
        &'static mut MissileFlight,
        &'static mut Transform,
        &'static mut LinearVelocity,
        &'static mut AngularVelocity,
        &'static mut Visibility,
        &'static mut Sprite,
        &'static mut CollisionLayers,
    ),
    (With<PooledMissile>, Without<Block>, Without<Player>),
>;

/// Take a missile from the pool and launch it from `position` toward `aim_point`.
///
/// Returns `None` when the pool is empty (capacity decision, not a failure).
pub fn launch_from_pool(
    pool: &mut MissilePool,
    q: &mut LaunchQuery<'_, '_>,
    spec: MissileSpec,
    position: Vec2,
    aim_point: Vec2,
    target: Entity,
) -> Option<Entity> {
    let MissileEntity(e) = pool.pop_free()?;

    let (mut phase, mut missile, mut flight, mut tf, mut vel, mut ang, mut vis, mut sprite, mut layers) =
        q.get_mut(e).expect("MissilePool contained an entity missing pooled missile components");

    flight.launch(position, aim_point, target);

    tf.translation = position.extend(tf.translation.z);
    tf.rotation = flight.rotation();
    vel.0 = Vec2::ZERO;
    ang.0 = 0.0;
    sprite.color = spec.color();
    *vis = Visibility::Visible;
    *layers = active_missile_layers();
    missile.spec = spec;
    *phase = MissilePhase::Seeking;

    Some(e)
}
