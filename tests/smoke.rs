mod common;

use bevy::prelude::*;
use seeking_missiles::common::tunables::Tunables;
use seeking_missiles::plugins::blocks::Block;
use seeking_missiles::plugins::missiles::components::{PooledMissile, SeekingMissiles};
use seeking_missiles::plugins::missiles::pool::MissilePool;
use seeking_missiles::plugins::player::Player;

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();

    for _ in 0..3 {
        app.update();
    }
}

#[test]
fn level_is_populated_on_enter() {
    let mut app = common::app_headless();
    app.update();

    let world = app.world_mut();

    let launchers = world
        .query_filtered::<&SeekingMissiles, With<Player>>()
        .iter(world)
        .filter(|l| !l.is_used())
        .count();
    assert_eq!(launchers, 1, "one player with an unused launcher");

    let blocks = world.query::<&Block>().iter(world).count();
    assert_eq!(blocks, 15);

    let capacity = world.resource::<Tunables>().missile_pool_capacity;
    let pooled = world.query::<&PooledMissile>().iter(world).count();
    assert_eq!(pooled, capacity);
    assert_eq!(world.resource::<MissilePool>().free_len(), capacity);
}
