//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::missiles::SeekingMissilesPlugin;

pub mod blocks;
pub mod core;
pub mod missiles;
pub mod physics;
pub mod player;
pub mod world;

// Render-only
pub mod camera;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    // Tunables first: physics and the missile pool read them at build time.
    core::plugin(app);
    physics::plugin(app);
    world::plugin(app);
    blocks::plugin(app);
    player::plugin(app);
    app.add_plugins(SeekingMissilesPlugin);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
}
