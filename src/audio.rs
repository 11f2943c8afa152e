//! Audio-cue identifiers
//!
//! The simulation emits fire-and-forget cue identifiers at the moments it
//! defines; actual playback belongs to the host. Cues reach the host as
//! [`GameEvent::Cue`](crate::sim::GameEvent) values drained after each tick.

/// Discrete sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Craft collided with an adversary
    Hit,
    /// Bonus collected
    Collect,
    /// Two adversaries bounced off each other (globally throttled)
    Bounce,
    /// Level advanced
    LevelUp,
    /// Run won
    Victory,
    /// Run lost
    Defeat,
}

/// Wall-clock rate limiter for a cue that can fire many times per tick.
///
/// Many adversary pairs can collide in the same frame; without a global
/// throttle the feedback floods.
#[derive(Debug, Clone)]
pub struct CueThrottle {
    interval_ms: f64,
    last_ms: f64,
}

impl CueThrottle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: f64::NEG_INFINITY,
        }
    }

    /// True if the cue may fire at `now_ms`; records the firing time when it
    /// may.
    pub fn allow(&mut self, now_ms: f64) -> bool {
        if now_ms - self.last_ms > self.interval_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }
}
