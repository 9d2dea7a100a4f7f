//! Physics plugin: Avian 2D in pixel units, top-down (no gravity).
//!
//! Avian is also the geometry provider for the missiles: collider projection for aim
//! points, ray casts for obstacle probes.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let ppm = app.world().resource::<Tunables>().pixels_per_meter;
    app.add_plugins(PhysicsPlugins::default().with_length_unit(ppm))
        .insert_resource(Gravity(Vec2::ZERO));
}
