use bevy::prelude::*;
use avian2d::prelude::*;

use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::missiles::components::SeekingMissiles;

#[test]
fn spawn_creates_player_with_unused_launcher() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn);

    let launcher = world
        .query_filtered::<&SeekingMissiles, With<super::Player>>()
        .single(&world)
        .expect("one player");
    assert!(!launcher.is_used());
}

#[test]
fn apply_movement_sets_velocity() {
    let mut world = World::new();
    world.insert_resource(Tunables { player_speed: 100.0, ..Tunables::default() });
    world.insert_resource(super::PlayerInput { move_axis: Vec2::new(1.0, 0.0) });
    world.spawn((super::Player, LinearVelocity::ZERO));

    run_system_once(&mut world, super::apply_movement);

    let v = world.query::<&LinearVelocity>().iter(&world).next().unwrap();
    assert_eq!(v.0, Vec2::new(100.0, 0.0));
}
