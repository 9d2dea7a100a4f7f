//! Seeking missiles power-up: rank the nearest unlit blocks, fire a staggered volley of
//! pooled homing missiles at them, and let each missile steer, expire or impact on its own.
//!
//! # Data flow
//! ```text
//!   Update schedule (variable dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) tick_missile_lifetime / tick_impact_delay                             │
//!│      - mutates: MissilePhase -> Expired, Impacted timers                   │
//!│                                                                            │
//!│  (B) advance_launch_sequence                                               │
//!│      - at most one pending launch per interval, aim from current origin    │
//!│      - mutates: MissilePool.free, pooled missile components                │
//!│                                                                            │
//!│  (C) Producer: request_activation                                          │
//!│      - reads: keyboard                                                     │
//!│      - writes: ActivateSeekingMissiles message                             │
//!│                                                                            │
//!│  (D) Consumer: activate_seeking_missiles                                   │
//!│      - reads: Player Transform, BlockCatalog, MissileCatalog               │
//!│      - mutates: SeekingMissiles (Idle -> Activating | Completed)           │
//!│      - writes: SeekingMissilesReport                                       │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!FixedUpdate / FixedPostUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (E) steer_missiles: aim point, obstacle probe, turn-limited heading       │
//!│  (F) Physics integrates velocity, emits CollisionStart (Avian)             │
//!│  (G) process_missile_collisions: light block, push it, Impacted            │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!PostUpdate
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (H) return_to_pool_commit: Expired / finished Impacted -> Inactive        │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Suspensions
//! Both waits (launch interval, post-impact delay) are `Timer`s stored on the waiting
//! instance. Despawning or resetting the instance drops the wait with it, so nothing
//! runs against a dead launcher or a recycled missile.

pub mod collision;
pub mod commit;
pub mod components;
pub mod config;
pub mod flight;
pub mod messages;
pub mod pool;
pub mod ranking;
pub mod request;
pub mod sequencer;
pub mod steering;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;

pub struct SeekingMissilesPlugin;

impl Plugin for SeekingMissilesPlugin {
    fn build(&self, app: &mut App) {
        let capacity = app
            .world()
            .get_resource::<Tunables>()
            .map_or_else(|| Tunables::default().missile_pool_capacity, |t| t.missile_pool_capacity);

        // Tests (and callers) may provide their own catalog.
        if !app.world().contains_resource::<config::MissileCatalog>() {
            app.insert_resource(config::MissileCatalog::load_or_default(config::CATALOG_PATH));
        }

        app.insert_resource(pool::MissilePool::new(capacity))
            .add_message::<messages::ActivateSeekingMissiles>()
            .add_message::<messages::SeekingMissilesReport>()
            .add_message::<messages::MissileImpact>()
            .add_systems(OnEnter(GameState::InGame), pool::init_missile_pool);

        app.add_systems(
            Update,
            (
                // Clocks first: nothing launched or armed this frame is aged by a
                // delta that elapsed before it existed.
                flight::tick_missile_lifetime,
                flight::tick_impact_delay,
                sequencer::advance_launch_sequence,
                request::request_activation,
                sequencer::activate_seeking_missiles,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedUpdate,
            flight::steer_missiles.run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedPostUpdate,
            collision::process_missile_collisions
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            PostUpdate,
            commit::return_to_pool_commit.run_if(in_state(GameState::InGame)),
        );
    }
}
