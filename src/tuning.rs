//! Data-driven game balance
//!
//! Every balance knob lives here with its stock value as the `Default`. A host
//! may override any subset from JSON; geometry and timing constants stay in
//! [`crate::consts`].

use serde::{Deserialize, Serialize};

/// Balance values consumed by the simulation each tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Craft base speed (px/tick)
    pub craft_speed: f32,
    /// Vertical movement is a bit faster than horizontal
    pub craft_vertical_factor: f32,
    /// Speed multiplier while boost is active
    pub boost_multiplier: f32,

    /// Adversary speed: base + per_level * level
    pub adversary_base_speed: f32,
    pub adversary_speed_per_level: f32,

    /// Adversary spawn chance per tick: base + per_level * level
    pub adversary_base_rate: f64,
    pub adversary_rate_per_level: f64,

    /// Bonus spawn chance per tick: max(base - decay * level, floor)
    pub bonus_base_rate: f64,
    pub bonus_rate_decay_per_level: f64,
    pub bonus_rate_floor: f64,

    /// Points for collecting a bonus
    pub bonus_score: u64,
    /// Survival points granted every tick
    pub score_per_tick: u64,
    /// Level advances once score exceeds level * this unit
    pub level_score_unit: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            craft_speed: 12.0,
            craft_vertical_factor: 1.3,
            boost_multiplier: 4.0,

            adversary_base_speed: 1.5,
            adversary_speed_per_level: 0.3,

            adversary_base_rate: 0.01,
            adversary_rate_per_level: 0.01,

            bonus_base_rate: 0.01,
            bonus_rate_decay_per_level: 0.001,
            bonus_rate_floor: 0.002,

            bonus_score: 50,
            score_per_tick: 1,
            level_score_unit: 1500,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
