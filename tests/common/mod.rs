//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `seeking_missiles::game::configure_headless` to install gameplay plugins.
//! - time advances by a fixed manual step so runs are reproducible.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use seeking_missiles::plugins::missiles::config::{MissileCatalog, MissileSpec};

pub const STEP: Duration = Duration::from_millis(50);

pub fn app_headless() -> App {
    app_headless_with(MissileCatalog::default())
}

/// Headless app with a caller-provided catalog instead of the asset file.
pub fn app_headless_with(catalog: MissileCatalog) -> App {
    let mut app = App::new();
    install_headless(&mut app, catalog);
    app
}

/// Install the headless stack into `app`. Resources inserted beforehand (e.g. `Tunables`)
/// are kept.
pub fn install_headless(app: &mut App, catalog: MissileCatalog) {
    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));
    app.insert_resource(catalog);

    seeking_missiles::game::configure_headless(app);

    // `App::run` normally does this; tests drive `update()` directly, so finish plugin
    // setup here (Avian registers its diagnostics resources in `Plugin::finish`).
    app.finish();
    app.cleanup();
}

pub fn catalog(amount: u32) -> MissileCatalog {
    MissileCatalog::new(amount, vec![MissileSpec::default()])
}

/// Advance `secs` of game time in `STEP` increments.
pub fn run_for(app: &mut App, secs: f32) {
    let steps = (secs / STEP.as_secs_f32()).ceil() as usize;
    for _ in 0..steps {
        app.update();
    }
}
