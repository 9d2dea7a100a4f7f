//! Launch sequencer: one activation per level, one missile per interval.
//!
//! ```text
//! Idle --activate--> Activating { queue, timer } --queue drained--> Completed
//!   \--activate, nothing to fire-----------------------------------^
//! ```
//!
//! Targets are ranked once at activation. Aim points are recomputed at each launch from
//! wherever the player is by then.

use std::collections::VecDeque;

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use rand::Rng;

use crate::common::tunables::Tunables;
use crate::plugins::blocks::BlockCatalog;
use crate::plugins::player::Player;

use super::components::{LauncherState, PendingLaunch, SeekingMissiles};
use super::config::MissileCatalog;
use super::messages::{ActivateSeekingMissiles, SeekingMissilesReport};
use super::pool::{launch_from_pool, LaunchQuery, MissilePool};
use super::ranking::{rank, TargetCatalog};

/// Try to start the launcher. Pure state transition; launching happens later.
///
/// The launcher counts as used even when there is nothing to fire.
pub fn activate<C: TargetCatalog>(
    launcher: &mut SeekingMissiles,
    origin: Vec2,
    targets: &C,
    missiles: &MissileCatalog,
    interval_secs: f32,
    rng: &mut impl Rng,
) -> SeekingMissilesReport {
    if launcher.is_used() {
        return SeekingMissilesReport::AlreadyUsed;
    }
    launcher.state = LauncherState::Completed;

    let candidates = rank(origin, targets);
    if candidates.is_empty() {
        return SeekingMissilesReport::NoTargets;
    }

    let roster = missiles.roster(rng);
    if roster.is_empty() {
        return SeekingMissilesReport::NoMissiles;
    }

    let queue: VecDeque<PendingLaunch> = roster
        .into_iter()
        .zip(candidates)
        .map(|(spec, c)| PendingLaunch { spec, target: c.target })
        .collect();
    let planned = queue.len();

    launcher.state = LauncherState::Activating {
        queue,
        timer: Timer::from_seconds(interval_secs.max(0.0), TimerMode::Repeating),
        launched: 0,
    };

    SeekingMissilesReport::Activated { planned }
}

fn log_report(report: SeekingMissilesReport) {
    match report {
        SeekingMissilesReport::AlreadyUsed => info!("Seeking missiles already used in this level"),
        SeekingMissilesReport::NoTargets => info!("Seeking missiles: no unlit blocks to target"),
        SeekingMissilesReport::NoMissiles => warn!("Seeking missiles: no missiles available"),
        SeekingMissilesReport::Activated { planned } => info!("Seeking missiles activated: {planned} planned"),
        SeekingMissilesReport::Launched { missile, target, aim_point } => {
            debug!("Missile {missile} launched at {target}, aim point {aim_point}")
        }
        SeekingMissilesReport::Completed { launched } => info!("Seeking missiles done: {launched} launched"),
    }
}

/// Consumer: handle activation requests against the player's launcher.
pub fn activate_seeking_missiles(
    mut reader: MessageReader<ActivateSeekingMissiles>,
    mut reports: MessageWriter<SeekingMissilesReport>,
    tunables: Res<Tunables>,
    missiles: Res<MissileCatalog>,
    blocks: BlockCatalog,
    mut q_player: Query<(&Transform, &mut SeekingMissiles), With<Player>>,
) {
    for _ in reader.read() {
        let (tf, mut launcher) = match q_player.single_mut() {
            Ok(v) => v,
            Err(e) => {
                debug!("No single Player launcher: {e:?}");
                continue;
            }
        };

        let report = activate(
            &mut launcher,
            tf.translation.truncate(),
            &blocks,
            &missiles,
            tunables.launch_interval_secs,
            &mut rand::thread_rng(),
        );
        log_report(report);
        reports.write(report);
    }
}

/// Launch queued missiles as the interval timer fires.
///
/// At most one launch per run: a long frame delays the rest instead of spawning them
/// together. Runs before activation so a fresh timer starts ticking on the next frame.
pub fn advance_launch_sequence(
    time: Res<Time>,
    mut pool: ResMut<MissilePool>,
    mut reports: MessageWriter<SeekingMissilesReport>,
    blocks: BlockCatalog,
    mut q_player: Query<(&Transform, &mut SeekingMissiles), With<Player>>,
    mut q_missiles: LaunchQuery,
) {
    for (tf, mut launcher) in &mut q_player {
        let LauncherState::Activating {
            queue,
            timer,
            launched,
        } = &mut launcher.state
        else {
            continue;
        };

        timer.tick(time.delta());
        if !timer.just_finished() {
            continue;
        }

        if let Some(next) = queue.pop_front() {
            let origin = tf.translation.truncate();
            let aim = blocks
                .closest_point(next.target, origin)
                .or_else(|| blocks.anchor(next.target));

            match aim {
                None => debug!("Target {} vanished before launch", next.target),
                Some(aim_point) => {
                    match launch_from_pool(
                        &mut pool,
                        &mut q_missiles,
                        next.spec,
                        origin,
                        aim_point,
                        next.target,
                    ) {
                        Some(missile) => {
                            *launched += 1;
                            let report = SeekingMissilesReport::Launched {
                                missile,
                                target: next.target,
                                aim_point,
                            };
                            log_report(report);
                            reports.write(report);
                        }
                        // Capacity decision, not a correctness failure.
                        None => debug!("Missile pool exhausted; dropping launch at {}", next.target),
                    }
                }
            }
        }

        if queue.is_empty() {
            let report = SeekingMissilesReport::Completed {
                launched: *launched,
            };
            launcher.state = LauncherState::Completed;
            log_report(report);
            reports.write(report);
        }
    }
}
