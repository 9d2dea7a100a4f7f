//! End-to-end volley: activation message in, reports and impacts out, pool refilled.

mod common;

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use seeking_missiles::common::tunables::Tunables;
use seeking_missiles::plugins::blocks::Block;
use seeking_missiles::plugins::missiles::components::MissileFlight;
use seeking_missiles::plugins::missiles::messages::{ActivateSeekingMissiles, MissileImpact, SeekingMissilesReport};
use seeking_missiles::plugins::missiles::pool::MissilePool;

#[derive(Resource, Default)]
struct Seen {
    reports: Vec<SeekingMissilesReport>,
    impacts: Vec<MissileImpact>,
}

fn collect(
    mut seen: ResMut<Seen>,
    mut reports: MessageReader<SeekingMissilesReport>,
    mut impacts: MessageReader<MissileImpact>,
) {
    seen.reports.extend(reports.read().copied());
    seen.impacts.extend(impacts.read().copied());
}

fn with_collector(mut app: App) -> App {
    app.init_resource::<Seen>().add_systems(Last, collect);
    // Enter the level.
    app.update();
    app
}

fn launched(seen: &Seen) -> Vec<(Entity, Entity)> {
    seen.reports
        .iter()
        .filter_map(|r| match *r {
            SeekingMissilesReport::Launched { missile, target, .. } => Some((missile, target)),
            _ => None,
        })
        .collect()
}

#[test]
fn volley_launches_one_missile_per_target_up_to_amount() {
    let mut app = with_collector(common::app_headless_with(common::catalog(5)));

    app.world_mut().write_message(ActivateSeekingMissiles);
    common::run_for(&mut app, 1.5);

    let seen = app.world().resource::<Seen>();
    assert_eq!(seen.reports.first(), Some(&SeekingMissilesReport::Activated { planned: 5 }));
    assert_eq!(seen.reports.last(), Some(&SeekingMissilesReport::Completed { launched: 5 }));

    let volley = launched(seen);
    assert_eq!(volley.len(), 5);
    let mut targets: Vec<_> = volley.iter().map(|&(_, t)| t).collect();
    targets.sort();
    targets.dedup();
    assert_eq!(targets.len(), 5, "each missile gets its own block");
}

#[test]
fn second_activation_in_the_same_level_is_refused() {
    let mut app = with_collector(common::app_headless_with(common::catalog(2)));

    app.world_mut().write_message(ActivateSeekingMissiles);
    common::run_for(&mut app, 1.0);
    app.world_mut().write_message(ActivateSeekingMissiles);
    common::run_for(&mut app, 1.0);

    let seen = app.world().resource::<Seen>();
    assert_eq!(launched(seen).len(), 2);
    assert_eq!(seen.reports.last(), Some(&SeekingMissilesReport::AlreadyUsed));
}

#[test]
fn every_missile_comes_back_and_impacts_match_lit_blocks() {
    let mut app = with_collector(common::app_headless_with(common::catalog(4)));
    let capacity = app.world().resource::<Tunables>().missile_pool_capacity;

    app.world_mut().write_message(ActivateSeekingMissiles);
    // Longest path: last launch at 0.8s plus the full 6s lifetime.
    common::run_for(&mut app, 8.0);

    assert_eq!(app.world().resource::<MissilePool>().free_len(), capacity);

    // Missiles fly through world geometry, so every one finds a block in time.
    let impacts = app.world().resource::<Seen>().impacts.len();
    assert!((1..=4).contains(&impacts), "impacts: {impacts}");

    let world = app.world_mut();
    let lit = world.query::<&Block>().iter(world).filter(|b| b.is_lit()).count();
    assert_eq!(lit, impacts, "only missile impacts light blocks here");
}

#[test]
fn every_launched_target_is_hit_with_a_clear_line_of_fire() {
    let mut app = with_collector(common::app_headless_with(common::catalog(3)));

    // Nothing between the player and the first block row.
    let world = app.world_mut();
    let pillars: Vec<Entity> = world
        .query::<(Entity, &Name)>()
        .iter(world)
        .filter(|(_, n)| n.as_str().starts_with("Pillar"))
        .map(|(e, _)| e)
        .collect();
    assert_eq!(pillars.len(), 3);
    for e in pillars {
        world.despawn(e);
    }

    app.world_mut().write_message(ActivateSeekingMissiles);
    common::run_for(&mut app, 4.0);

    let seen = app.world().resource::<Seen>();
    let volley = launched(seen);
    assert_eq!(volley.len(), 3);

    let mut hit: Vec<Entity> = seen.impacts.iter().map(|i| i.block).collect();
    let mut targets: Vec<Entity> = volley.iter().map(|&(_, t)| t).collect();
    hit.sort();
    targets.sort();
    assert_eq!(hit, targets, "each missile lands on its own block");

    for target in targets {
        assert!(app.world().get::<Block>(target).unwrap().is_lit());
    }
}

#[test]
fn launch_waits_past_the_activation_frame_and_starts_fresh() {
    let mut app = with_collector(common::app_headless_with(common::catalog(1)));

    app.world_mut().write_message(ActivateSeekingMissiles);
    app.update();
    let seen = app.world().resource::<Seen>();
    assert_eq!(seen.reports, vec![SeekingMissilesReport::Activated { planned: 1 }]);

    let mut frames = 0;
    let missile = loop {
        app.update();
        frames += 1;
        assert!(frames <= 20, "no launch after {frames} frames");
        if let Some(&(missile, _)) = launched(app.world().resource::<Seen>()).first() {
            break missile;
        }
    };

    // 0.2s interval at 50ms per frame.
    assert!(frames >= 4, "launched after {frames} frames");
    let flight = app.world().get::<MissileFlight>(missile).unwrap();
    assert_eq!(flight.elapsed_secs, 0.0);
}

#[test]
fn exhausted_pool_drops_the_overflow() {
    // Tunables are read when the pool is built.
    let mut app = App::new();
    app.insert_resource(Tunables { missile_pool_capacity: 2, ..Tunables::default() });
    common::install_headless(&mut app, common::catalog(5));
    let mut app = with_collector(app);

    app.world_mut().write_message(ActivateSeekingMissiles);
    common::run_for(&mut app, 1.1);

    let seen = app.world().resource::<Seen>();
    assert_eq!(launched(seen).len(), 2);
    assert!(seen.reports.contains(&SeekingMissilesReport::Completed { launched: 2 }));
}
