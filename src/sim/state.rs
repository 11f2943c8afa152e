//! Game state and core simulation types
//!
//! Entity records advance their own kinematics and timers only; collision
//! logic lives in `sim::collision`. All timed effects are wall-clock deadlines
//! checked against the host-supplied clock, never callbacks.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::rect::Rect;
use crate::audio::{AudioCue, CueThrottle};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the game flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title menu, no run active
    Menu,
    /// Active gameplay
    Playing,
    /// Run suspended; resumes to Playing without resetting anything
    Paused,
    /// Between-level overlay; resumes on a wall-clock deadline
    LevelTransition,
    /// Run lost; offers restart or exit
    GameOver,
    /// Run won; terminal for the session
    Victory,
}

/// Outbound event produced during a tick and drained by the host
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Fire-and-forget audio cue
    Cue(AudioCue),
    /// Overlay message; `auto_hide` overlays clear themselves host-side
    Overlay { text: String, auto_hide: bool },
}

/// The player's craft. Position is the sprite center.
#[derive(Debug, Clone)]
pub struct Craft {
    pub pos: Vec2,
    /// Base speed in px/tick; boost multiplies it
    pub speed: f32,
}

impl Craft {
    /// Spawn at the start position: horizontally centered, near the bottom
    pub fn new(playfield_w: f32, playfield_h: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(playfield_w / 2.0, playfield_h - 100.0),
            speed,
        }
    }

    /// Collision box: 60x80 centered, smaller than the 70x90 sprite
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.pos.x - CRAFT_HITBOX_W / 2.0,
            self.pos.y - CRAFT_HITBOX_H / 2.0,
            CRAFT_HITBOX_W,
            CRAFT_HITBOX_H,
        )
    }
}

/// A descending adversary. Position is the top-left corner.
#[derive(Debug, Clone)]
pub struct Adversary {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Per-level speed scalar; fallback magnitude when velocity is zero
    pub speed: f32,
    /// Pending deletion, swept after the collision pass
    pub remove: bool,
    hit_until_ms: f64,
}

impl Adversary {
    pub fn new(pos: Vec2, vel: Vec2, speed: f32) -> Self {
        Self {
            pos,
            vel,
            speed,
            remove: false,
            hit_until_ms: f64::NEG_INFINITY,
        }
    }

    /// Spawn above the visible top edge at a random x, fully inside the field
    pub fn spawn(rng: &mut Pcg32, level: u32, playfield_w: f32, tuning: &Tuning) -> Self {
        let speed = tuning.adversary_base_speed + level as f32 * tuning.adversary_speed_per_level;
        let x = rng.random_range(0.0..playfield_w - ADVERSARY_SIZE);
        let sign = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
        Self::new(
            Vec2::new(x, -ADVERSARY_SIZE),
            Vec2::new(sign * speed, speed),
            speed,
        )
    }

    /// One tick of kinematics: horizontal edge bounce, removal below the field
    pub fn advance(&mut self, playfield_w: f32, playfield_h: f32) {
        self.pos += self.vel;
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x = -self.vel.x;
        }
        if self.pos.x + ADVERSARY_SIZE > playfield_w {
            self.pos.x = playfield_w - ADVERSARY_SIZE;
            self.vel.x = -self.vel.x;
        }
        if self.pos.y > playfield_h {
            self.remove = true;
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, ADVERSARY_SIZE, ADVERSARY_SIZE)
    }

    /// Begin the transient hit flash
    pub fn flash(&mut self, now_ms: f64) {
        self.hit_until_ms = now_ms + HIT_FLASH_MS;
    }

    /// Whether the hit flash is still showing
    pub fn hit_active(&self, now_ms: f64) -> bool {
        now_ms < self.hit_until_ms
    }
}

/// A collectible bonus. Position is the top-left corner.
#[derive(Debug, Clone)]
pub struct Bonus {
    pub pos: Vec2,
    pub remove: bool,
    hit_until_ms: f64,
}

impl Bonus {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            remove: false,
            hit_until_ms: f64::NEG_INFINITY,
        }
    }

    pub fn spawn(rng: &mut Pcg32, playfield_w: f32) -> Self {
        let x = rng.random_range(0.0..playfield_w - BONUS_SIZE);
        Self::new(Vec2::new(x, -BONUS_SIZE))
    }

    /// Constant downward drift; removal below the field
    pub fn advance(&mut self, playfield_h: f32) {
        self.pos.y += BONUS_SPEED;
        if self.pos.y > playfield_h {
            self.remove = true;
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BONUS_SIZE, BONUS_SIZE)
    }

    pub fn flash(&mut self, now_ms: f64) {
        self.hit_until_ms = now_ms + HIT_FLASH_MS;
    }

    pub fn hit_active(&self, now_ms: f64) -> bool {
        now_ms < self.hit_until_ms
    }
}

/// Color scheme for a transient burst effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectPalette {
    /// Adversary destroyed: yellow/orange/red
    Destruction,
    /// Bonus collected: cyan/blue/navy
    Collection,
}

/// A purely cosmetic expanding burst
#[derive(Debug, Clone)]
pub struct Effect {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
    pub palette: EffectPalette,
}

impl Effect {
    pub fn new(pos: Vec2, palette: EffectPalette) -> Self {
        Self {
            pos,
            radius: 10.0,
            alpha: 1.0,
            palette,
        }
    }

    /// Grow and fade one step
    pub fn advance(&mut self) {
        self.radius += 5.0;
        self.alpha -= 0.08;
    }

    pub fn finished(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// A background star. The pool is fixed-size and recycled, never destroyed.
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
}

impl Star {
    pub fn new(rng: &mut Pcg32, playfield_w: f32, playfield_h: f32) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..playfield_w),
                rng.random_range(0.0..playfield_h),
            ),
            size: rng.random::<f32>() * 2.0,
            speed: 0.3 + rng.random::<f32>() * 0.7,
        }
    }

    /// Drift downward; wrap to the top with a fresh x when leaving the field
    pub fn advance(&mut self, rng: &mut Pcg32, playfield_w: f32, playfield_h: f32) {
        self.pos.y += self.speed;
        if self.pos.y > playfield_h {
            self.pos.y = 0.0;
            self.pos.x = rng.random_range(0.0..playfield_w);
        }
    }
}

/// Complete session state, owned by the simulation clock.
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    /// Current level, 1..=LEVEL_MAX (+1 transiently, signalling victory)
    pub level: u32,
    pub lives: u8,
    /// Monotonic, only ever incremented
    pub score: u64,
    pub boost_active: bool,
    pub boost_started_ms: f64,
    /// Host wall clock as of the latest tick
    pub now_ms: f64,

    pub playfield_w: f32,
    pub playfield_h: f32,

    /// Exactly one while a run is active; None in the menu
    pub craft: Option<Craft>,
    pub adversaries: Vec<Adversary>,
    pub bonuses: Vec<Bonus>,
    pub effects: Vec<Effect>,
    pub stars: Vec<Star>,

    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    pub(crate) bounce_cue: CueThrottle,
    pub(crate) level_resume_at_ms: f64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// New session on the default playfield, starting at the menu
    pub fn new(seed: u64) -> Self {
        Self::with_playfield(seed, PLAYFIELD_W, PLAYFIELD_H)
    }

    pub fn with_playfield(seed: u64, playfield_w: f32, playfield_h: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Star::new(&mut rng, playfield_w, playfield_h))
            .collect();
        Self {
            phase: GamePhase::Menu,
            level: 1,
            lives: MAX_LIVES,
            score: 0,
            boost_active: false,
            boost_started_ms: 0.0,
            now_ms: 0.0,
            playfield_w,
            playfield_h,
            craft: None,
            adversaries: Vec::new(),
            bonuses: Vec::new(),
            effects: Vec::new(),
            stars,
            tuning: Tuning::default(),
            rng,
            bounce_cue: CueThrottle::new(BOUNCE_CUE_THROTTLE_MS),
            level_resume_at_ms: 0.0,
            events: Vec::new(),
        }
    }

    /// Begin a fresh run: level 1, full lives, zero score, fresh craft.
    /// Used for both the menu start action and a post-game-over restart.
    pub(crate) fn start_run(&mut self) {
        self.level = 1;
        self.lives = MAX_LIVES;
        self.score = 0;
        self.boost_active = false;
        self.adversaries.clear();
        self.bonuses.clear();
        self.effects.clear();
        self.craft = Some(Craft::new(
            self.playfield_w,
            self.playfield_h,
            self.tuning.craft_speed,
        ));
        self.phase = GamePhase::Playing;
    }

    /// Discard the run and return to the menu
    pub(crate) fn exit_to_menu(&mut self) {
        self.level = 1;
        self.lives = MAX_LIVES;
        self.score = 0;
        self.boost_active = false;
        self.adversaries.clear();
        self.bonuses.clear();
        self.effects.clear();
        self.craft = None;
        self.phase = GamePhase::Menu;
    }

    pub(crate) fn push_cue(&mut self, cue: AudioCue) {
        self.events.push(GameEvent::Cue(cue));
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last drain (audio cues, overlays)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Activate the boost window starting now
    pub(crate) fn activate_boost(&mut self, now_ms: f64) {
        self.boost_active = true;
        self.boost_started_ms = now_ms;
    }

    /// Expire the boost once its wall-clock window `[start, start+4000)` has
    /// passed. Idempotent: re-checking past the deadline changes nothing.
    pub fn expire_boost(&mut self, now_ms: f64) {
        if self.boost_active && now_ms - self.boost_started_ms >= BOOST_DURATION_MS {
            self.boost_active = false;
        }
    }

    /// Session invariants. Violations are programming errors in the spawner,
    /// scoring, or flow logic and must never be clamped away.
    pub(crate) fn assert_invariants(&self) {
        assert!(self.lives <= MAX_LIVES, "lives out of range: {}", self.lives);
        assert!(
            self.level >= 1 && self.level <= LEVEL_MAX + 1,
            "level out of range: {}",
            self.level
        );
        if self.phase == GamePhase::Playing {
            assert!(self.craft.is_some(), "no craft while playing");
        }
    }
}
