//! Buffered messages in and out of the seeking-missiles pipeline.
//!
//! - `ActivateSeekingMissiles`: intent from the input layer (or any caller).
//! - `SeekingMissilesReport`: what an activation did, for HUDs and tests.
//! - `MissileImpact`: impact cue for effects.

use bevy::prelude::*;

/// Fire the player's seeking missiles. The origin and targets are implicit.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct ActivateSeekingMissiles;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum SeekingMissilesReport {
    /// The launcher was already used this level.
    AlreadyUsed,
    /// No reachable unlit block.
    NoTargets,
    /// The roster came back empty.
    NoMissiles,
    Activated { planned: usize },
    Launched { missile: Entity, target: Entity, aim_point: Vec2 },
    Completed { launched: usize },
}

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct MissileImpact {
    pub missile: Entity,
    pub block: Entity,
    pub point: Vec2,
}
