//! Collision layers.

use avian2d::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layer {
    #[default]
    Default,
    World,
    Player,
    Block,
    Missile,
}

/// Fold a list of layers into a single mask.
pub fn mask_of(layers: &[Layer]) -> LayerMask {
    LayerMask(layers.iter().fold(0, |bits, layer| bits | layer.to_bits()))
}
