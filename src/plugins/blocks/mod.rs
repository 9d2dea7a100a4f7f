//! Blocks plugin: the targets the player (and the missiles) light up.
//!
//! A block is "cleared" once lit. The missiles module never owns blocks; it reads them
//! through [`BlockCatalog`] and lights them through [`Block::player_hit`].

use avian2d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::math::EulerRot;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};
use crate::plugins::missiles::ranking::TargetCatalog;

const BLOCK_SIZE: f32 = 40.0;
const UNLIT_COLOR: Color = Color::srgb(0.22, 0.24, 0.32);
const LIT_COLOR: Color = Color::srgb(1.0, 0.82, 0.25);

#[derive(Component, Debug, Default, Clone)]
pub struct Block {
    lit: bool,
}

impl Block {
    #[inline]
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Light the block. Returns `false` when it was already lit.
    #[inline]
    pub fn player_hit(&mut self) -> bool {
        !std::mem::replace(&mut self.lit, true)
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_blocks)
        .add_systems(PostUpdate, tint_blocks.run_if(in_state(GameState::InGame)));
}

#[inline]
fn block_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::Block,
        [Layer::World, Layer::Player, Layer::Block, Layer::Missile],
    )
}

/// Spawn the level's block field above the player start.
fn spawn_blocks(mut commands: Commands) {
    let layers = block_layers();

    (0..3)
        .flat_map(|row| (-2..=2).map(move |col| (col, row)))
        .for_each(|(col, row)| {
            let pos = Vec3::new(col as f32 * 180.0, 220.0 + row as f32 * 110.0, 1.0);
            commands.spawn((
                Name::new(format!("Block({col},{row})")),
                Block::default(),
                Sprite {
                    color: UNLIT_COLOR,
                    custom_size: Some(Vec2::splat(BLOCK_SIZE)),
                    ..default()
                },
                Transform::from_translation(pos),
                RigidBody::Dynamic,
                Collider::rectangle(BLOCK_SIZE, BLOCK_SIZE),
                layers,
                LinearDamping(4.0),
                AngularDamping(4.0),
                DespawnOnExit(GameState::InGame),
            ));
        });
}

fn tint_blocks(mut q: Query<(&Block, &mut Sprite), Changed<Block>>) {
    for (block, mut sprite) in &mut q {
        sprite.color = if block.is_lit() { LIT_COLOR } else { UNLIT_COLOR };
    }
}

/// Closest point on a collider's boundary as seen from `from`.
///
/// Points inside the shape project onto themselves.
pub fn closest_point_on(collider: &Collider, tf: &Transform, from: Vec2) -> Vec2 {
    let angle = tf.rotation.to_euler(EulerRot::XYZ).2;
    let (point, _inside) = collider.project_point(
        Position(tf.translation.truncate()),
        Rotation::radians(angle),
        from,
        true,
    );
    point
}

/// ECS view of the block set.
///
/// A block without a collider, or with `ColliderDisabled`, has no usable shape.
/// A despawned block reads as cleared.
#[derive(SystemParam)]
pub struct BlockCatalog<'w, 's> {
    blocks: Query<
        'w,
        's,
        (
            Entity,
            &'static Block,
            &'static Transform,
            Option<&'static Collider>,
            Has<ColliderDisabled>,
        ),
    >,
}

impl TargetCatalog for BlockCatalog<'_, '_> {
    fn targets(&self) -> impl Iterator<Item = Entity> + '_ {
        self.blocks.iter().map(|(e, ..)| e)
    }

    fn is_cleared(&self, target: Entity) -> bool {
        self.blocks
            .get(target)
            .map_or(true, |(_, block, ..)| block.is_lit())
    }

    fn closest_point(&self, target: Entity, from: Vec2) -> Option<Vec2> {
        let (_, _, tf, collider, disabled) = self.blocks.get(target).ok()?;
        if disabled {
            return None;
        }
        Some(closest_point_on(collider?, tf, from))
    }

    fn anchor(&self, target: Entity) -> Option<Vec2> {
        let (_, _, tf, ..) = self.blocks.get(target).ok()?;
        Some(tf.translation.truncate())
    }
}
