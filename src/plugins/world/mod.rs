//! World plugin: arena walls and the pillars missiles have to steer around.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};

const TILE: i32 = 64;
const HALF_W: i32 = TILE * 16;
const HALF_H: i32 = TILE * 9;

const WALL_COLOR: Color = Color::srgb(0.25, 0.27, 0.33);

/// Pillars between the player start and the block field.
const PILLARS: [(f32, f32); 3] = [(-260.0, 40.0), (0.0, 60.0), (260.0, 40.0)];
const PILLAR_SIZE: Vec2 = Vec2::new(90.0, 24.0);

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), (spawn_arena, spawn_pillars));
}

#[inline]
fn world_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::World, [Layer::Player, Layer::Block])
}

fn spawn_static(commands: &mut Commands, name: String, pos: Vec3, size: Vec2) {
    commands.spawn((
        Name::new(name),
        Sprite {
            color: WALL_COLOR,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(pos),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        world_layers(),
        DespawnOnExit(GameState::InGame),
    ));
}

fn spawn_arena(mut commands: Commands) {
    let thickness = 30.0;
    let (hw, hh) = (HALF_W as f32, HALF_H as f32);

    let walls = [
        ("WallTop", Vec3::new(0.0, hh + thickness * 0.5, 0.0), Vec2::new(hw * 2.0 + thickness * 2.0, thickness)),
        ("WallBottom", Vec3::new(0.0, -hh - thickness * 0.5, 0.0), Vec2::new(hw * 2.0 + thickness * 2.0, thickness)),
        ("WallLeft", Vec3::new(-hw - thickness * 0.5, 0.0, 0.0), Vec2::new(thickness, hh * 2.0)),
        ("WallRight", Vec3::new(hw + thickness * 0.5, 0.0, 0.0), Vec2::new(thickness, hh * 2.0)),
    ];

    for (name, pos, size) in walls {
        spawn_static(&mut commands, name.into(), pos, size);
    }
}

fn spawn_pillars(mut commands: Commands) {
    for (i, (x, y)) in PILLARS.into_iter().enumerate() {
        spawn_static(&mut commands, format!("Pillar{i}"), Vec3::new(x, y, 0.0), PILLAR_SIZE);
    }
}
