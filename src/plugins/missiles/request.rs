use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use super::messages::ActivateSeekingMissiles;

pub const ACTIVATE_KEY: KeyCode = KeyCode::Space;

/// Producer: turn the activation key into an `ActivateSeekingMissiles` message.
///
/// No-op in headless apps without keyboard input.
pub fn request_activation(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut writer: MessageWriter<ActivateSeekingMissiles>,
) {
    let Some(keys) = keys else { return; };
    if keys.just_pressed(ACTIVATE_KEY) {
        writer.write(ActivateSeekingMissiles);
    }
}
