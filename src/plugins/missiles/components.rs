use std::collections::VecDeque;

use bevy::prelude::*;

use super::config::MissileSpec;

/// Squared length below which a direction is treated as "already there".
pub const NEAR_ZERO_SQR: f32 = 1e-4;

/// Marker for pre-spawned missile entities owned by the pool.
#[derive(Component)]
pub struct PooledMissile;

/// Pool handle newtype: an entity known to carry every pooled-missile component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MissileEntity(pub Entity);

/// Missile lifecycle.
///
/// `Inactive` missiles sit in the pool. The impact timer is owned by the phase, so
/// overwriting the phase or despawning the entity cancels the pending return.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub enum MissilePhase {
    #[default]
    Inactive,
    Seeking,
    Avoiding,
    Impacted {
        despawn: Timer,
    },
    Expired,
}

impl MissilePhase {
    #[inline]
    pub fn is_flying(&self) -> bool {
        matches!(self, Self::Seeking | Self::Avoiding)
    }

    #[inline]
    pub fn impacted(delay_secs: f32) -> Self {
        Self::Impacted {
            despawn: Timer::from_seconds(delay_secs, TimerMode::Once),
        }
    }

    /// Terminal and done waiting: the commit system may recycle it.
    #[inline]
    pub fn is_ready_for_return(&self) -> bool {
        match self {
            Self::Expired => true,
            Self::Impacted { despawn } => despawn.is_finished(),
            _ => false,
        }
    }
}

/// The `MissileSpec` this missile was fired with.
#[derive(Component, Debug, Clone, Default)]
pub struct Missile {
    pub spec: MissileSpec,
}

/// Per-missile homing state.
#[derive(Component, Debug, Clone)]
pub struct MissileFlight {
    /// Unit forward vector.
    pub heading: Vec2,
    pub elapsed_secs: f32,
    pub target: Option<Entity>,
    /// Last aim point known to be on the target.
    pub fallback_aim: Vec2,
    speed_multiplier: f32,
}

impl Default for MissileFlight {
    fn default() -> Self {
        Self {
            heading: Vec2::Y,
            elapsed_secs: 0.0,
            target: None,
            fallback_aim: Vec2::ZERO,
            speed_multiplier: 1.0,
        }
    }
}

impl MissileFlight {
    /// Arm for a new flight from `position` toward `aim_point`.
    pub fn launch(&mut self, position: Vec2, aim_point: Vec2, target: Entity) {
        self.target = Some(target);
        self.fallback_aim = aim_point;
        self.elapsed_secs = 0.0;

        let to_aim = aim_point - position;
        if to_aim.length_squared() > NEAR_ZERO_SQR {
            self.heading = to_aim.normalize();
        }
    }

    /// Clear transient state before going back to the pool.
    pub fn reset(&mut self) {
        self.target = None;
        self.elapsed_secs = 0.0;
    }

    #[inline]
    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.speed_multiplier = multiplier.max(0.0);
    }

    /// Advance the lifetime clock. Returns `true` once the lifetime is spent.
    pub fn tick_lifetime(&mut self, dt: f32, max_lifetime_secs: f32) -> bool {
        self.elapsed_secs += dt;
        self.elapsed_secs >= max_lifetime_secs
    }

    /// Sprite rotation for the current heading; the sprite's "up" is forward.
    #[inline]
    pub fn rotation(&self) -> Quat {
        let angle = self.heading.y.atan2(self.heading.x);
        Quat::from_rotation_z(angle - std::f32::consts::FRAC_PI_2)
    }
}

/// One launch waiting for its slot in the sequence.
#[derive(Debug, Clone)]
pub struct PendingLaunch {
    pub spec: MissileSpec,
    pub target: Entity,
}

/// Launcher state machine. One activation per level.
#[derive(Debug, Clone, Default)]
pub enum LauncherState {
    #[default]
    Idle,
    Activating {
        queue: VecDeque<PendingLaunch>,
        timer: Timer,
        launched: usize,
    },
    Completed,
}

/// Seeking-missile launcher, carried by the player.
///
/// Lives and dies with the player entity, which bounds the pending launches to it.
#[derive(Component, Debug, Clone, Default)]
pub struct SeekingMissiles {
    pub state: LauncherState,
}

impl SeekingMissiles {
    #[inline]
    pub fn is_used(&self) -> bool {
        !matches!(self.state, LauncherState::Idle)
    }
}
