//! Per-frame simulation tick and game-flow transitions
//!
//! One call advances the whole simulation by exactly one tick. The host calls
//! it once per frame with the intents gathered since the previous frame and
//! its monotonic wall clock; nothing here blocks or schedules.

use super::collision::{self, PassOutcome};
use super::spawn;
use super::state::{Craft, GameEvent, GamePhase, GameState};
use crate::audio::AudioCue;
use crate::consts::*;

/// Directional move intents held during this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntents {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Input for a single tick. Unset actions are no-ops in every phase.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub movement: MoveIntents,
    /// Start a run from the menu
    pub start: bool,
    /// Toggle pause while a run is active
    pub pause: bool,
    /// Restart after game over
    pub restart: bool,
    /// Exit to the menu after game over
    pub exit: bool,
    /// Host wall clock in milliseconds (monotonic)
    pub now_ms: f64,
}

/// Advance the game by one tick.
///
/// Overlay phases suspend the simulation: no entity advances during
/// `Paused`, `LevelTransition`, `GameOver`, or `Victory` (the starfield keeps
/// drifting behind the menus and end screens). A tick always
/// runs to completion except for the documented early exit when the craft is
/// destroyed mid-pass.
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.now_ms = input.now_ms;

    match state.phase {
        GamePhase::Menu => {
            advance_stars(state);
            if input.start {
                log::info!("run started");
                state.start_run();
            }
        }
        GamePhase::Paused => {
            if input.pause {
                log::info!("resumed");
                state.phase = GamePhase::Playing;
            }
        }
        GamePhase::LevelTransition => {
            // Wall-clock delay; re-checking past the deadline is harmless
            if input.now_ms >= state.level_resume_at_ms {
                log::info!("level {} underway", state.level);
                state.phase = GamePhase::Playing;
            }
        }
        GamePhase::GameOver => {
            advance_stars(state);
            if input.restart {
                log::info!("run restarted");
                state.start_run();
            } else if input.exit {
                log::info!("back to menu");
                state.exit_to_menu();
            }
        }
        GamePhase::Victory => {
            advance_stars(state);
        }
        GamePhase::Playing => {
            if input.pause {
                log::info!("paused");
                state.phase = GamePhase::Paused;
            } else {
                playing_tick(state, input);
            }
        }
    }

    state.assert_invariants();
}

/// One tick of active gameplay, in the fixed component order.
fn playing_tick(state: &mut GameState, input: &TickInput) {
    let now = input.now_ms;
    let (playfield_w, playfield_h) = (state.playfield_w, state.playfield_h);

    advance_stars(state);
    move_craft(state, input.movement);

    for effect in &mut state.effects {
        effect.advance();
    }
    state.effects.retain(|e| !e.finished());

    spawn::run(state);

    for adversary in &mut state.adversaries {
        adversary.advance(playfield_w, playfield_h);
    }
    if collision::resolve_adversaries(state) == PassOutcome::CraftDestroyed {
        state.adversaries.retain(|a| !a.remove);
        state.push_cue(AudioCue::Defeat);
        state.push_event(GameEvent::Overlay {
            text: format!("Game over - final score {}", state.score),
            auto_hide: false,
        });
        log::info!("game over at level {} with score {}", state.level, state.score);
        state.phase = GamePhase::GameOver;
        // Documented early exit: the rest of this tick (bonuses, survival
        // score, level check) is abandoned
        return;
    }
    state.adversaries.retain(|a| !a.remove);

    for bonus in &mut state.bonuses {
        bonus.advance(playfield_h);
    }
    collision::resolve_bonuses(state);
    state.bonuses.retain(|b| !b.remove);

    state.expire_boost(now);

    state.score += state.tuning.score_per_tick;

    check_level_advance(state, now);
}

/// Evaluate the level threshold and drive LevelTransition / Victory.
fn check_level_advance(state: &mut GameState, now: f64) {
    if state.score <= state.level as u64 * state.tuning.level_score_unit {
        return;
    }
    state.level += 1;

    if state.level > LEVEL_MAX {
        state.push_cue(AudioCue::Victory);
        state.push_event(GameEvent::Overlay {
            text: format!("Victory! Final score {}", state.score),
            auto_hide: true,
        });
        log::info!("victory with score {}", state.score);
        state.phase = GamePhase::Victory;
        return;
    }

    // Timed intermission: field cleared, lives refilled, craft back at the
    // start position, then auto-resume without input
    state.adversaries.clear();
    state.bonuses.clear();
    state.lives = MAX_LIVES;
    state.craft = Some(Craft::new(
        state.playfield_w,
        state.playfield_h,
        state.tuning.craft_speed,
    ));
    state.level_resume_at_ms = now + LEVEL_TRANSITION_MS;
    state.push_cue(AudioCue::LevelUp);
    state.push_event(GameEvent::Overlay {
        text: format!("Level {}!", state.level),
        auto_hide: true,
    });
    log::info!("advancing to level {}", state.level);
    state.phase = GamePhase::LevelTransition;
}

fn advance_stars(state: &mut GameState) {
    let (playfield_w, playfield_h) = (state.playfield_w, state.playfield_h);
    let GameState { stars, rng, .. } = state;
    for star in stars {
        star.advance(rng, playfield_w, playfield_h);
    }
}

/// Apply this tick's move intents to the craft, then clamp to the margins.
fn move_craft(state: &mut GameState, intents: MoveIntents) {
    let boost_multiplier = state.tuning.boost_multiplier;
    let vertical_factor = state.tuning.craft_vertical_factor;
    let boost_active = state.boost_active;
    let (playfield_w, playfield_h) = (state.playfield_w, state.playfield_h);

    let Some(craft) = &mut state.craft else { return };
    let speed = if boost_active {
        craft.speed * boost_multiplier
    } else {
        craft.speed
    };
    let vertical_speed = speed * vertical_factor;

    if intents.left {
        craft.pos.x -= speed;
    }
    if intents.right {
        craft.pos.x += speed;
    }
    if intents.up {
        craft.pos.y -= vertical_speed;
    }
    if intents.down {
        craft.pos.y += vertical_speed;
    }
    craft.pos.x = craft.pos.x.clamp(CRAFT_MARGIN_X, playfield_w - CRAFT_MARGIN_X);
    craft.pos.y = craft.pos.y.clamp(CRAFT_MARGIN_Y, playfield_h - CRAFT_MARGIN_Y);
}
