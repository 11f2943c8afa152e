//! Starship Survivor - a scrolling-starfield dodge-and-collect arcade core
//!
//! Core modules:
//! - `sim`: entity simulation (collisions, spawning, game flow)
//! - `render`: draw-command and HUD emission for an external draw surface
//! - `audio`: audio-cue identifiers (playback stays with the host)
//! - `tuning`: data-driven game balance

pub mod audio;
pub mod render;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (logical pixels)
    pub const PLAYFIELD_W: f32 = 1280.0;
    pub const PLAYFIELD_H: f32 = 720.0;

    /// Craft sprite footprint
    pub const CRAFT_W: f32 = 70.0;
    pub const CRAFT_H: f32 = 90.0;
    /// Craft collision box, inset from the sprite for a forgiving hitbox
    pub const CRAFT_HITBOX_W: f32 = 60.0;
    pub const CRAFT_HITBOX_H: f32 = 80.0;
    /// Margins keeping the craft center on-screen
    pub const CRAFT_MARGIN_X: f32 = 40.0;
    pub const CRAFT_MARGIN_Y: f32 = 60.0;

    /// Adversary collision box (square)
    pub const ADVERSARY_SIZE: f32 = 50.0;
    /// Bonus collision box (square)
    pub const BONUS_SIZE: f32 = 35.0;
    /// Bonus fall speed (px/tick)
    pub const BONUS_SPEED: f32 = 2.0;

    /// Background star pool, recycled for the lifetime of the session
    pub const STAR_COUNT: usize = 150;

    /// Session limits
    pub const MAX_LIVES: u8 = 5;
    /// Clearing this level wins the run; level `LEVEL_MAX + 1` signals victory
    pub const LEVEL_MAX: u32 = 10;

    /// Wall-clock timers (milliseconds)
    pub const BOOST_DURATION_MS: f64 = 4000.0;
    pub const HIT_FLASH_MS: f64 = 200.0;
    pub const BOUNCE_CUE_THROTTLE_MS: f64 = 200.0;
    pub const LEVEL_TRANSITION_MS: f64 = 3000.0;

    /// Minimum outgoing speed after an adversary bounce
    pub const BOUNCE_MIN_SPEED: f32 = 0.8;
    /// Randomized separation impulse range: min + rand * spread
    pub const BOUNCE_PUSH_MIN: f32 = 12.0;
    pub const BOUNCE_PUSH_SPREAD: f32 = 8.0;
    /// One impulse cannot always clear a deep overlap; bound the retries
    pub const MAX_SEPARATION_PUSHES: u32 = 3;

    /// Bonus pair soft separation: trigger distance and fixed push
    pub const BONUS_SEPARATION_DIST: f32 = 50.0;
    pub const BONUS_SEPARATION_PUSH: f32 = 10.0;
}
