//! Collision detection and resolution
//!
//! Runs once per tick, after every entity has advanced. Entities are marked
//! for removal and swept after the pass, so iteration order stays stable and
//! a removed entity never takes part in a later pairwise check within the
//! same tick.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Adversary, Bonus, Effect, EffectPalette, GameState};
use crate::audio::AudioCue;
use crate::consts::*;

/// Outcome of the craft/adversary pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    Continue,
    /// Lives reached zero; the remainder of this tick must be abandoned
    CraftDestroyed,
}

/// Craft x adversary collisions plus adversary x adversary bounces.
///
/// All unique unordered live pairs are checked, at every level. A craft
/// collision consumes the adversary, costs a life, and leaves a destruction
/// burst at the adversary's center.
pub fn resolve_adversaries(state: &mut GameState) -> PassOutcome {
    let craft_box = match &state.craft {
        Some(craft) => craft.bounds(),
        None => return PassOutcome::Continue,
    };
    let now = state.now_ms;
    let playfield_w = state.playfield_w;

    for i in 0..state.adversaries.len() {
        if state.adversaries[i].remove {
            continue;
        }
        if craft_box.intersects(&state.adversaries[i].bounds()) {
            let center = state.adversaries[i].bounds().center();
            state.adversaries[i].remove = true;
            state.effects.push(Effect::new(center, EffectPalette::Destruction));
            state.push_cue(AudioCue::Hit);
            state.lives -= 1;
            log::debug!("craft hit, {} lives left", state.lives);
            if state.lives == 0 {
                return PassOutcome::CraftDestroyed;
            }
            continue;
        }

        for j in (i + 1)..state.adversaries.len() {
            if state.adversaries[j].remove {
                continue;
            }
            if state.adversaries[i]
                .bounds()
                .intersects(&state.adversaries[j].bounds())
            {
                let (head, tail) = state.adversaries.split_at_mut(j);
                bounce_and_separate(&mut head[i], &mut tail[0], &mut state.rng, now, playfield_w);
                if state.bounce_cue.allow(now) {
                    state.push_cue(AudioCue::Bounce);
                }
            }
        }
    }
    PassOutcome::Continue
}

/// Reflect-and-separate response for two overlapping adversaries.
///
/// Both keep their current speed magnitude (floored so nobody goes
/// dead-still) and leave along the line connecting their centers, in opposite
/// directions. A randomized impulse pushes them apart, repeated up to
/// [`MAX_SEPARATION_PUSHES`] times until the boxes are disjoint.
pub fn bounce_and_separate(
    a: &mut Adversary,
    b: &mut Adversary,
    rng: &mut Pcg32,
    now_ms: f64,
    playfield_w: f32,
) {
    let delta = a.bounds().center() - b.bounds().center();
    // atan2(0, 0) is 0 in Rust, which is exactly the fallback we want for
    // coincident centers
    let angle = delta.y.atan2(delta.x);
    let dir = Vec2::new(angle.cos(), angle.sin());

    a.vel = dir * outgoing_speed(a);
    b.vel = -dir * outgoing_speed(b);

    for _ in 0..MAX_SEPARATION_PUSHES {
        if !a.bounds().intersects(&b.bounds()) {
            break;
        }
        let impulse = BOUNCE_PUSH_MIN + rng.random::<f32>() * BOUNCE_PUSH_SPREAD;
        a.pos += dir * impulse;
        b.pos -= dir * impulse;
        clamp_x(a, playfield_w);
        clamp_x(b, playfield_w);
    }

    a.flash(now_ms);
    b.flash(now_ms);
    log::trace!("adversary bounce at angle {angle:.2}");
}

/// Outgoing speed magnitude: current velocity magnitude, falling back to the
/// per-level scalar when the entity is motionless, floored at the bounce
/// minimum.
fn outgoing_speed(adv: &Adversary) -> f32 {
    let magnitude = adv.vel.length();
    let base = if magnitude > 0.0 { magnitude } else { adv.speed };
    base.max(BOUNCE_MIN_SPEED)
}

/// Keep a pushed adversary on the playfield horizontally
fn clamp_x(adv: &mut Adversary, playfield_w: f32) {
    adv.pos.x = adv.pos.x.clamp(0.0, playfield_w - ADVERSARY_SIZE);
}

/// Craft x bonus collection plus cosmetic bonus pair separation.
pub fn resolve_bonuses(state: &mut GameState) {
    let craft_box = match &state.craft {
        Some(craft) => craft.bounds(),
        None => return,
    };
    let now = state.now_ms;

    for i in 0..state.bonuses.len() {
        if state.bonuses[i].remove {
            continue;
        }
        if craft_box.intersects(&state.bonuses[i].bounds()) {
            let center = state.bonuses[i].bounds().center();
            state.bonuses[i].remove = true;
            state.score += state.tuning.bonus_score;
            state.activate_boost(now);
            state.effects.push(Effect::new(center, EffectPalette::Collection));
            state.push_cue(AudioCue::Collect);
            log::debug!("bonus collected, score {}", state.score);
            continue;
        }

        for j in (i + 1)..state.bonuses.len() {
            if state.bonuses[j].remove {
                continue;
            }
            let (head, tail) = state.bonuses.split_at_mut(j);
            separate_bonuses(&mut head[i], &mut tail[0]);
        }
    }
}

/// Soft anti-overlap nudge for bonuses drifting too close together. Purely
/// cosmetic: no scoring, no velocity change, no hit flash.
fn separate_bonuses(a: &mut Bonus, b: &mut Bonus) {
    let delta = a.bounds().center() - b.bounds().center();
    if delta.length() >= BONUS_SEPARATION_DIST {
        return;
    }
    let angle = delta.y.atan2(delta.x);
    let dir = Vec2::new(angle.cos(), angle.sin());
    a.pos += dir * BONUS_SEPARATION_PUSH;
    b.pos -= dir * BONUS_SEPARATION_PUSH;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GameEvent, GamePhase};
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn playing_state() -> GameState {
        let mut state = GameState::new(42);
        state.start_run();
        state
    }

    fn adversary_with_center(cx: f32, cy: f32, vel: Vec2) -> Adversary {
        Adversary::new(
            Vec2::new(cx - ADVERSARY_SIZE / 2.0, cy - ADVERSARY_SIZE / 2.0),
            vel,
            2.0,
        )
    }

    #[test]
    fn test_craft_adversary_collision_costs_a_life() {
        let mut state = playing_state();
        let craft_pos = state.craft.as_ref().unwrap().pos;
        let adv = adversary_with_center(craft_pos.x, craft_pos.y, Vec2::ZERO);
        let expected_center = adv.bounds().center();
        state.adversaries.push(adv);

        let outcome = resolve_adversaries(&mut state);

        assert_eq!(outcome, PassOutcome::Continue);
        assert_eq!(state.lives, MAX_LIVES - 1);
        assert!(state.adversaries[0].remove);
        assert_eq!(state.effects.len(), 1);
        assert_eq!(state.effects[0].pos, expected_center);
        assert_eq!(state.effects[0].palette, EffectPalette::Destruction);
        assert!(state.drain_events().contains(&GameEvent::Cue(AudioCue::Hit)));
    }

    #[test]
    fn test_last_life_aborts_the_pass() {
        let mut state = playing_state();
        state.lives = 1;
        let craft_pos = state.craft.as_ref().unwrap().pos;
        state
            .adversaries
            .push(adversary_with_center(craft_pos.x, craft_pos.y, Vec2::ZERO));
        // A second overlapping pair further along the list must not be touched
        state
            .adversaries
            .push(adversary_with_center(100.0, 100.0, Vec2::new(2.0, 2.0)));
        state
            .adversaries
            .push(adversary_with_center(110.0, 100.0, Vec2::new(-2.0, 2.0)));

        let outcome = resolve_adversaries(&mut state);

        assert_eq!(outcome, PassOutcome::CraftDestroyed);
        assert_eq!(state.lives, 0);
        // Pair untouched: velocities unchanged, no flash
        assert_eq!(state.adversaries[1].vel, Vec2::new(2.0, 2.0));
        assert_eq!(state.adversaries[2].vel, Vec2::new(-2.0, 2.0));
        assert!(!state.adversaries[1].hit_active(state.now_ms));
    }

    #[test]
    fn test_reflect_preserves_magnitudes_along_center_line() {
        // Centers at (100,100) and (110,100): angle = atan2(0, -10) = pi, so
        // the pair leaves along the +-x axis with magnitudes sqrt(8).
        let mut a = adversary_with_center(100.0, 100.0, Vec2::new(2.0, 2.0));
        let mut b = adversary_with_center(110.0, 100.0, Vec2::new(-2.0, 2.0));
        let mut rng = Pcg32::seed_from_u64(5);

        bounce_and_separate(&mut a, &mut b, &mut rng, 0.0, PLAYFIELD_W);

        let speed = 8.0f32.sqrt();
        assert!((a.vel.x - -speed).abs() < 1e-3);
        assert!(a.vel.y.abs() < 1e-3);
        assert!((b.vel.x - speed).abs() < 1e-3);
        assert!(b.vel.y.abs() < 1e-3);
        assert!((a.vel.length() - speed).abs() < 1e-3);
        assert!((b.vel.length() - speed).abs() < 1e-3);
        assert!(a.hit_active(0.0) && b.hit_active(0.0));
    }

    #[test]
    fn test_coincident_centers_default_angle_zero() {
        let mut a = adversary_with_center(200.0, 200.0, Vec2::ZERO);
        let mut b = adversary_with_center(200.0, 200.0, Vec2::ZERO);
        let mut rng = Pcg32::seed_from_u64(5);

        bounce_and_separate(&mut a, &mut b, &mut rng, 0.0, PLAYFIELD_W);

        // angle 0: a leaves along +x, b along -x, at the speed floor fallback
        assert!(a.vel.x > 0.0 && a.vel.y == 0.0);
        assert!(b.vel.x < 0.0 && b.vel.y == 0.0);
        assert_eq!(a.vel.length(), 2.0); // per-level scalar, above the 0.8 floor
        assert!(!a.bounds().intersects(&b.bounds()));
    }

    #[test]
    fn test_motionless_pair_gets_speed_floor() {
        let mut a = adversary_with_center(300.0, 300.0, Vec2::ZERO);
        let mut b = adversary_with_center(310.0, 300.0, Vec2::ZERO);
        a.speed = 0.0;
        b.speed = 0.0;
        let mut rng = Pcg32::seed_from_u64(5);

        bounce_and_separate(&mut a, &mut b, &mut rng, 0.0, PLAYFIELD_W);

        assert_eq!(a.vel.length(), BOUNCE_MIN_SPEED);
        assert_eq!(b.vel.length(), BOUNCE_MIN_SPEED);
    }

    #[test]
    fn test_push_keeps_pair_on_the_playfield() {
        // Pair hard against the right wall, center line along x
        let w = PLAYFIELD_W;
        let mut a = Adversary::new(
            Vec2::new(w - ADVERSARY_SIZE, 200.0),
            Vec2::new(2.0, 2.0),
            2.0,
        );
        let mut b = Adversary::new(
            Vec2::new(w - ADVERSARY_SIZE - 10.0, 200.0),
            Vec2::new(-2.0, 2.0),
            2.0,
        );
        let mut rng = Pcg32::seed_from_u64(5);

        bounce_and_separate(&mut a, &mut b, &mut rng, 0.0, w);

        for adv in [&a, &b] {
            assert!(adv.pos.x >= 0.0);
            assert!(adv.pos.x + ADVERSARY_SIZE <= w);
        }
    }

    #[test]
    fn test_bounce_cue_throttled_across_many_pairs() {
        let mut state = playing_state();
        // Park the craft out of the way of the cluster
        state.craft.as_mut().unwrap().pos = Vec2::new(PLAYFIELD_W - 100.0, PLAYFIELD_H - 100.0);
        // Three mutually overlapping adversaries: several bounces, one cue
        for offset in [0.0, 8.0, 16.0] {
            state
                .adversaries
                .push(adversary_with_center(200.0 + offset, 200.0, Vec2::new(2.0, 2.0)));
        }

        resolve_adversaries(&mut state);

        let bounces = state
            .drain_events()
            .iter()
            .filter(|e| **e == GameEvent::Cue(AudioCue::Bounce))
            .count();
        assert_eq!(bounces, 1);
    }

    #[test]
    fn test_bonus_collection_scores_and_boosts() {
        let mut state = playing_state();
        state.now_ms = 2500.0;
        let craft_pos = state.craft.as_ref().unwrap().pos;
        state.bonuses.push(Bonus::new(Vec2::new(
            craft_pos.x - BONUS_SIZE / 2.0,
            craft_pos.y - BONUS_SIZE / 2.0,
        )));

        resolve_bonuses(&mut state);

        assert_eq!(state.score, 50);
        assert!(state.bonuses[0].remove);
        assert!(state.boost_active);
        assert_eq!(state.boost_started_ms, 2500.0);
        assert_eq!(state.effects.len(), 1);
        assert_eq!(state.effects[0].palette, EffectPalette::Collection);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::Cue(AudioCue::Collect))
        );
    }

    #[test]
    fn test_bonus_soft_separation_is_cosmetic() {
        let mut state = playing_state();
        // Far from the craft; centers 20 apart along x
        state.bonuses.push(Bonus::new(Vec2::new(100.0, 100.0)));
        state.bonuses.push(Bonus::new(Vec2::new(120.0, 100.0)));

        resolve_bonuses(&mut state);

        // Pushed 10 units each, away from each other along the center line
        assert_eq!(state.bonuses[0].pos.x, 90.0);
        assert_eq!(state.bonuses[1].pos.x, 130.0);
        assert_eq!(state.score, 0);
        assert!(!state.boost_active);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_distant_bonuses_left_alone() {
        let mut state = playing_state();
        state.bonuses.push(Bonus::new(Vec2::new(100.0, 100.0)));
        state.bonuses.push(Bonus::new(Vec2::new(200.0, 100.0)));

        resolve_bonuses(&mut state);

        assert_eq!(state.bonuses[0].pos.x, 100.0);
        assert_eq!(state.bonuses[1].pos.x, 200.0);
    }

    #[test]
    fn test_removed_adversary_skips_pairwise_checks() {
        let mut state = playing_state();
        let craft_pos = state.craft.as_ref().unwrap().pos;
        // First adversary is consumed by the craft; a second one overlaps
        // where the first used to be and must not bounce against it
        state
            .adversaries
            .push(adversary_with_center(craft_pos.x, craft_pos.y, Vec2::ZERO));
        state.adversaries.push(adversary_with_center(
            craft_pos.x + 10.0,
            craft_pos.y - 200.0,
            Vec2::new(2.0, 2.0),
        ));

        resolve_adversaries(&mut state);

        assert_eq!(state.adversaries[1].vel, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn test_menu_state_has_nothing_to_resolve() {
        let mut state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(resolve_adversaries(&mut state), PassOutcome::Continue);
        resolve_bonuses(&mut state);
    }

    proptest! {
        /// Overlapping pairs always end disjoint after resolution
        /// (bounded push retries).
        #[test]
        fn bounced_pairs_end_disjoint(
            ax in 100.0f32..1100.0, ay in 100.0f32..600.0,
            dx in -40.0f32..40.0, dy in -40.0f32..40.0,
            avx in -4.0f32..4.0, avy in -4.0f32..4.0,
            bvx in -4.0f32..4.0, bvy in -4.0f32..4.0,
            seed in 0u64..1000,
        ) {
            let mut a = adversary_with_center(ax, ay, Vec2::new(avx, avy));
            let mut b = adversary_with_center(ax + dx, ay + dy, Vec2::new(bvx, bvy));
            prop_assume!(a.bounds().intersects(&b.bounds()));

            let mut rng = Pcg32::seed_from_u64(seed);
            bounce_and_separate(&mut a, &mut b, &mut rng, 0.0, PLAYFIELD_W);

            prop_assert!(!a.bounds().intersects(&b.bounds()));
        }
    }
}
