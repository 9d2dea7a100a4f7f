//! Global state machine.
//!
//! One `InGame` run is one level: everything scoped to it despawns on exit.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}
