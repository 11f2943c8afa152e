//! Renderer-agnostic frame description
//!
//! The simulation never draws. Each frame the host asks for a flat list of
//! [`DrawCommand`]s (already in back-to-front paint order) plus the HUD
//! numbers, and maps them onto whatever backend it has.

use glam::Vec2;

use crate::consts::*;
use crate::sim::state::{EffectPalette, GamePhase, GameState};

/// Glow radius for an adversary in its hit flash
pub const ADVERSARY_GLOW_HIT: f32 = 40.0;
/// Idle adversary glow radius
pub const ADVERSARY_GLOW_IDLE: f32 = 20.0;
/// Glow radius for a bonus in its hit flash
pub const BONUS_GLOW_HIT: f32 = 40.0;
/// Idle bonus glow radius
pub const BONUS_GLOW_IDLE: f32 = 15.0;

/// One primitive to paint. Positions are top-left corners except where noted.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Star {
        pos: Vec2,
        size: f32,
    },
    /// `pos` is the sprite center; the sprite is larger than the hitbox
    Craft {
        pos: Vec2,
        size: Vec2,
        boost_trail: bool,
    },
    Adversary {
        pos: Vec2,
        size: f32,
        glow: f32,
    },
    Bonus {
        pos: Vec2,
        size: f32,
        glow: f32,
    },
    /// `pos` is the burst center
    Effect {
        pos: Vec2,
        radius: f32,
        alpha: f32,
        palette: EffectPalette,
    },
}

/// HUD numbers shown during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub level: u32,
    pub lives: u8,
    pub score: u64,
}

/// Describe the current frame, back to front:
/// stars, craft, effects, adversaries, bonuses.
pub fn draw_commands(state: &GameState) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(
        state.stars.len()
            + 1
            + state.effects.len()
            + state.adversaries.len()
            + state.bonuses.len(),
    );

    for star in &state.stars {
        out.push(DrawCommand::Star {
            pos: star.pos,
            size: star.size,
        });
    }

    if let Some(craft) = &state.craft {
        out.push(DrawCommand::Craft {
            pos: craft.pos,
            size: Vec2::new(CRAFT_W, CRAFT_H),
            boost_trail: state.boost_active,
        });
    }

    for effect in &state.effects {
        out.push(DrawCommand::Effect {
            pos: effect.pos,
            radius: effect.radius,
            alpha: effect.alpha,
            palette: effect.palette,
        });
    }

    let now = state.now_ms;
    for adversary in &state.adversaries {
        out.push(DrawCommand::Adversary {
            pos: adversary.pos,
            size: ADVERSARY_SIZE,
            glow: if adversary.hit_active(now) {
                ADVERSARY_GLOW_HIT
            } else {
                ADVERSARY_GLOW_IDLE
            },
        });
    }

    for bonus in &state.bonuses {
        out.push(DrawCommand::Bonus {
            pos: bonus.pos,
            size: BONUS_SIZE,
            glow: if bonus.hit_active(now) {
                BONUS_GLOW_HIT
            } else {
                BONUS_GLOW_IDLE
            },
        });
    }

    out
}

/// HUD contents, or None in the menu where no run is shown
pub fn hud(state: &GameState) -> Option<Hud> {
    if state.phase == GamePhase::Menu {
        return None;
    }
    Some(Hud {
        level: state.level,
        lives: state.lives,
        score: state.score,
    })
}
