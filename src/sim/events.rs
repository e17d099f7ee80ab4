//! Capture, magnet, win/lose and countdown rules
//!
//! Every rule is a geometry guard that starts or aborts a named timer,
//! plus a handler on that timer's Success tick. Score and phase are
//! mutated here and nowhere else.

use serde::{Deserialize, Serialize};

use super::state::{GamePhase, SimState};
use super::timer::TimerRole;
use crate::consts::*;
use crate::smoothstep;

/// Rule state that must survive across frames
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventState {
    /// Roomba x at the moment a recoil began
    pub recoil_from: f32,
}

impl EventState {
    pub fn new() -> Self {
        Self { recoil_from: 0.0 }
    }
}

impl Default for EventState {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate all event rules for this tick
pub fn evaluate(state: &mut SimState, dt: f32) {
    magnet_rules(state);
    capture_rules(state);
    recoil_animation(state);
    patrol_rules(state);
    countdown_rules(state, dt);
}

/// Pendulum parked inside the roomba's field band long enough reverses
/// the patrol. The pendulum center is tested against the band.
fn magnet_rules(state: &mut SimState) {
    let floor = state.world.floor_level;
    let in_reach = (state.pendulum.position.x - state.roomba.x).abs() < state.roomba.radius;
    let in_band = state.pendulum.position.y > floor + state.roomba.field_low
        && state.pendulum.position.y < floor + state.roomba.field_high;

    if in_reach && in_band && !state.timers.is_during(TimerRole::MagnetCelebrate) {
        state.timers.start(TimerRole::MagnetEngage);
    } else {
        state.timers.abort(TimerRole::MagnetEngage);
    }

    if state.timers.succeeded(TimerRole::MagnetEngage) {
        state.timers.start(TimerRole::MagnetCelebrate);
        state.roomba.target_direction = -state.roomba.target_direction;
        log::debug!("magnet engaged; roomba reversing");
    }
}

/// Roomba edge held past a capture line long enough scores and triggers
/// the recoil
fn capture_rules(state: &mut SimState) {
    // Red line: loss
    if state.roomba.x - state.roomba.radius < state.world.red_line
        && !state.timers.is_during(TimerRole::LoseRecoil)
    {
        state.timers.start(TimerRole::RedCapture);
    } else {
        state.timers.abort(TimerRole::RedCapture);
    }
    if state.timers.succeeded(TimerRole::RedCapture) {
        if state.phase == GamePhase::Playing {
            state.score -= 1;
            log::info!("red capture; score {}", state.score);
        }
        state.events.recoil_from = state.roomba.x;
        state.timers.start(TimerRole::LoseRecoil);
    }

    // Green line: win
    if state.roomba.x + state.roomba.radius > state.world.green_line
        && !state.timers.is_during(TimerRole::WinRecoil)
    {
        state.timers.start(TimerRole::GreenCapture);
    } else {
        state.timers.abort(TimerRole::GreenCapture);
    }
    if state.timers.succeeded(TimerRole::GreenCapture) {
        if state.phase == GamePhase::Playing {
            state.score += 1;
            log::info!("green capture; score {}", state.score);
        }
        state.events.recoil_from = state.roomba.x;
        state.timers.start(TimerRole::WinRecoil);
    }
}

/// While a recoil runs the roomba flies off along a smoothstep ease; when
/// it resolves the roomba snaps back to the origin
fn recoil_animation(state: &mut SimState) {
    if state.timers.is_during(TimerRole::LoseRecoil) {
        let t = smoothstep(state.timers.progress(TimerRole::LoseRecoil));
        state.roomba.x = state.events.recoil_from + t * (-RECOIL_OFFSET - state.events.recoil_from);
    }
    if state.timers.succeeded(TimerRole::LoseRecoil) {
        state.roomba.x = 0.0;
    }

    if state.timers.is_during(TimerRole::WinRecoil) {
        let t = smoothstep(state.timers.progress(TimerRole::WinRecoil));
        state.roomba.x = state.events.recoil_from + t * (RECOIL_OFFSET - state.events.recoil_from);
    }
    if state.timers.succeeded(TimerRole::WinRecoil) {
        state.roomba.x = 0.0;
    }
}

/// Periodic patrol reversal; the autoturn timer repeats on its own
fn patrol_rules(state: &mut SimState) {
    if state.timers.succeeded(TimerRole::Autoturn) {
        state.roomba.target_direction = -state.roomba.target_direction;
        log::debug!(
            "autoturn; roomba heading {:+.0}",
            state.roomba.target_direction
        );
    }
}

/// Session clock: wins buy extra playtime, expiry ends the session
fn countdown_rules(state: &mut SimState, dt: f32) {
    if state.timers.is_during(TimerRole::WinRecoil) {
        state.timers.extend(TimerRole::Countdown, WIN_TIME_BONUS * dt);
    }

    if state.timers.succeeded(TimerRole::Countdown) && state.phase == GamePhase::Playing {
        state.phase = GamePhase::HighscoreEntry;
        state.nickname = DEFAULT_NICKNAME.to_string();
        state.email = DEFAULT_EMAIL.to_string();
        log::info!("countdown elapsed; final score {}", state.score);
    }
}
