//! Probabilistic entity spawning
//!
//! One Bernoulli trial per entity kind per tick. Adversaries get more likely
//! (and faster) with each level; bonuses get rarer but never vanish.

use rand::Rng;

use super::state::{Adversary, Bonus, GameState};
use crate::tuning::Tuning;

/// Adversary spawn probability for a level
pub fn adversary_spawn_chance(level: u32, tuning: &Tuning) -> f64 {
    tuning.adversary_base_rate + level as f64 * tuning.adversary_rate_per_level
}

/// Bonus spawn probability: decays with level, floored so bonuses never
/// disappear entirely
pub fn bonus_spawn_chance(level: u32, tuning: &Tuning) -> f64 {
    (tuning.bonus_base_rate - level as f64 * tuning.bonus_rate_decay_per_level)
        .max(tuning.bonus_rate_floor)
}

/// Run the per-tick spawn trials
pub fn run(state: &mut GameState) {
    let adversary_chance = adversary_spawn_chance(state.level, &state.tuning).min(1.0);
    if state.rng.random_bool(adversary_chance) {
        let adversary =
            Adversary::spawn(&mut state.rng, state.level, state.playfield_w, &state.tuning);
        log::trace!("adversary spawned at x={:.0}", adversary.pos.x);
        state.adversaries.push(adversary);
    }

    let bonus_chance = bonus_spawn_chance(state.level, &state.tuning).min(1.0);
    if state.rng.random_bool(bonus_chance) {
        let bonus = Bonus::spawn(&mut state.rng, state.playfield_w);
        log::trace!("bonus spawned at x={:.0}", bonus.pos.x);
        state.bonuses.push(bonus);
    }
}
