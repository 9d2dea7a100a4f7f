//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub player_speed: f32,
    /// Delay before each missile of an activation leaves the launcher.
    pub launch_interval_secs: f32,
    /// How long an impacted missile lingers before returning to the pool.
    pub impact_despawn_secs: f32,
    pub missile_pool_capacity: usize,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            player_speed: 420.0,
            launch_interval_secs: 0.2,
            impact_despawn_secs: 0.2,
            missile_pool_capacity: 32,
        }
    }
}
