//! Tether Drone entry point
//!
//! Headless native host loop: owns the simulation state, drives
//! fixed-timestep ticks, and persists the high score table when the
//! session ends. A rendering host calls the same [`tether_drone::sim::tick`]
//! once per video frame and draws from the returned bounds plus the entity
//! poses in the state.

use std::path::Path;

use tether_drone::consts::SIM_DT;
use tether_drone::highscores::HighScores;
use tether_drone::sim::{GamePhase, SimState, TickInput, VideoMode, tick};

const HIGH_SCORE_PATH: &str = "highscores.json";
/// Hard stop in case the countdown keeps being extended
const MAX_SESSION_SECS: f32 = 600.0;

fn main() {
    env_logger::init();

    let score_path = Path::new(HIGH_SCORE_PATH);
    let mut scores = HighScores::load(score_path);
    let mut state = SimState::new();
    let input = TickInput::default();
    let mode = VideoMode {
        width: 1280,
        height: 720,
    };

    log::info!("starting session; {} saved records", scores.len());

    let mut elapsed = 0.0;
    let mut frame: u64 = 0;
    while state.phase == GamePhase::Playing && elapsed < MAX_SESSION_SECS {
        tick(&mut state, &input, mode, elapsed, SIM_DT);
        elapsed += SIM_DT;
        frame += 1;

        if frame % 300 == 0 {
            log::debug!(
                "t={elapsed:6.1}s score={} roomba.x={:+.2} player={:+.2},{:+.2}",
                state.score,
                state.roomba.x,
                state.player.position.x,
                state.player.position.y,
            );
        }
    }

    log::info!("session over after {elapsed:.1}s; score {}", state.score);
    state.submit_highscore(&mut scores);
    scores.save(score_path);
}
