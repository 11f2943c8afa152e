//! Headless demo driver
//!
//! Runs the simulation against a synthetic 60 Hz clock with a scripted pilot,
//! logging HUD snapshots and drained events. Useful for eyeballing balance
//! from a terminal; a real host would hook up input and a draw surface
//! instead.

use starship_survivor::render;
use starship_survivor::sim::{tick, GameEvent, GamePhase, GameState, MoveIntents, TickInput};

const TICK_MS: f64 = 1000.0 / 60.0;
const MAX_TICKS: u64 = 120_000;

fn main() {
    env_logger::init();

    let seed = 0xC0FFEE;
    let mut state = GameState::new(seed);
    log::info!("seed {seed:#x}, playfield {}x{}", state.playfield_w, state.playfield_h);

    tick(
        &mut state,
        &TickInput {
            start: true,
            now_ms: 0.0,
            ..Default::default()
        },
    );

    let mut ticks: u64 = 1;
    while ticks < MAX_TICKS {
        let now_ms = ticks as f64 * TICK_MS;

        // Scripted pilot: sweep left and right in two-second strokes
        let sweep_right = (ticks / 120) % 2 == 0;
        let input = TickInput {
            movement: MoveIntents {
                left: !sweep_right,
                right: sweep_right,
                ..Default::default()
            },
            now_ms,
            ..Default::default()
        };
        tick(&mut state, &input);
        ticks += 1;

        for event in state.drain_events() {
            match event {
                GameEvent::Cue(cue) => log::debug!("cue: {cue:?}"),
                GameEvent::Overlay { text, auto_hide } => {
                    log::info!("overlay{}: {text}", if auto_hide { " (auto)" } else { "" });
                }
            }
        }

        if ticks % 600 == 0 {
            if let Some(hud) = render::hud(&state) {
                log::info!(
                    "t={:>7.0}ms level {} lives {} score {}",
                    now_ms,
                    hud.level,
                    hud.lives,
                    hud.score
                );
            }
        }

        if matches!(state.phase, GamePhase::GameOver | GamePhase::Victory) {
            break;
        }
    }

    let frame = render::draw_commands(&state);
    log::info!(
        "finished in {ticks} ticks: {:?}, score {}, {} draw commands in the last frame",
        state.phase,
        state.score,
        frame.len()
    );
}
