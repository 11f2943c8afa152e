//! Deterministic game simulation
//!
//! Everything here is pure state-in, state-out: the host owns the clock and
//! the input devices, calls [`tick`] once per frame, then reads the state (or
//! [`render::draw_commands`](crate::render::draw_commands)) to present it.

pub mod collision;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{resolve_adversaries, resolve_bonuses, PassOutcome};
pub use rect::Rect;
pub use state::{
    Adversary, Bonus, Craft, Effect, EffectPalette, GameEvent, GamePhase, GameState, Star,
};
pub use tick::{tick, MoveIntents, TickInput};
