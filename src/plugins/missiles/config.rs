//! Missile configuration, loaded from `seeking_missiles.ron`.
//!
//! `MissileSpec` is one missile type. `MissileCatalog` holds the configured types and how
//! many missiles one activation fires.

use std::path::Path;

use avian2d::prelude::LayerMask;
use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::common::layers::{mask_of, Layer};

pub const CATALOG_PATH: &str = "assets/seeking_missiles.ron";

pub const MIN_LIFETIME_SECS: f32 = 0.05;

/// How the impact force is applied to the struck block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactForceMode {
    /// Continuous force for the physics step of the hit.
    Force,
    /// Instant change of momentum.
    #[default]
    Impulse,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissileSpec {
    /// sRGB tint.
    pub color: [f32; 3],
    /// Pixels per second.
    pub speed: f32,
    /// Degrees per second.
    pub turn_rate_deg: f32,
    pub max_lifetime_secs: f32,

    pub avoid_enabled: bool,
    pub obstacle_layers: Vec<Layer>,
    /// Probe length in pixels.
    pub avoid_ray_distance: f32,
    /// 0 keeps the desired heading, 1 steers fully sideways.
    pub avoid_strength: f32,

    pub hit_force: f32,
    pub hit_force_mode: ImpactForceMode,
}

impl Default for MissileSpec {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            speed: 320.0,
            turn_rate_deg: 360.0,
            max_lifetime_secs: 6.0,
            avoid_enabled: true,
            obstacle_layers: vec![Layer::World],
            avoid_ray_distance: 48.0,
            avoid_strength: 0.6,
            hit_force: 2500.0,
            hit_force_mode: ImpactForceMode::Impulse,
        }
    }
}

impl MissileSpec {
    /// Clamp every field into its valid range.
    pub fn sanitized(mut self) -> Self {
        self.speed = self.speed.max(0.0);
        self.turn_rate_deg = self.turn_rate_deg.max(0.0);
        self.max_lifetime_secs = self.max_lifetime_secs.max(MIN_LIFETIME_SECS);
        self.avoid_ray_distance = self.avoid_ray_distance.max(0.0);
        self.avoid_strength = self.avoid_strength.clamp(0.0, 1.0);
        self.hit_force = self.hit_force.max(0.0);
        self
    }

    #[inline]
    pub fn color(&self) -> Color {
        let [r, g, b] = self.color;
        Color::srgb(r, g, b)
    }

    #[inline]
    pub fn turn_rate_rad(&self) -> f32 {
        self.turn_rate_deg.to_radians()
    }

    #[inline]
    pub fn obstacle_mask(&self) -> LayerMask {
        mask_of(&self.obstacle_layers)
    }
}

#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissileCatalog {
    /// Missiles fired per activation.
    pub amount: u32,
    pub specs: Vec<MissileSpec>,
}

impl Default for MissileCatalog {
    fn default() -> Self {
        Self {
            amount: 3,
            specs: vec![MissileSpec::default()],
        }
    }
}

impl MissileCatalog {
    pub fn new(amount: u32, specs: Vec<MissileSpec>) -> Self {
        Self {
            amount,
            specs: specs.into_iter().map(MissileSpec::sanitized).collect(),
        }
    }

    pub fn increase_amount(&mut self) {
        self.amount = self.amount.saturating_add(1);
    }

    pub fn decrease_amount(&mut self) {
        self.amount = self.amount.saturating_sub(1);
    }

    /// Missiles for one activation, exactly `amount` long.
    ///
    /// Slots past the configured specs are resampled uniformly from them.
    pub fn roster(&self, rng: &mut impl Rng) -> Vec<MissileSpec> {
        let amount = self.amount as usize;
        if self.specs.is_empty() {
            if amount > 0 {
                warn!("No missile specs configured; using the default spec for {amount} missiles");
            }
            return vec![MissileSpec::default(); amount];
        }

        (0..amount)
            .map(|i| match self.specs.get(i) {
                Some(spec) => spec.clone(),
                None => self.specs[rng.gen_range(0..self.specs.len())].clone(),
            })
            .collect()
    }

    /// Parse a catalog from RON text. Specs come back sanitized.
    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        let raw: Self = ron::from_str(text)?;
        Ok(Self::new(raw.amount, raw.specs))
    }

    /// Load from file, falling back to defaults on any failure.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_ron(&contents) {
                Ok(catalog) => return catalog,
                Err(e) => warn!("Failed to parse {}: {e}, using defaults", path.display()),
            },
            Err(e) => warn!("Failed to read {}: {e}, using defaults", path.display()),
        }
        Self::default()
    }
}
