//! Countdown timer primitives
//!
//! Every scripted rule (captures, magnet, autoturn, countdown) is built on
//! these. A "wait" is data carried in a [`Timer`], never blocked control
//! flow. The whole bank advances exactly once per frame and is reset
//! wholesale on game restart.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Lifecycle state of a single timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerState {
    Inactive,
    /// Armed; becomes Active on the next bank tick
    Begin,
    Active,
    /// Expired; observable for exactly one tick
    Success,
    /// Cancelled; falls back to Inactive on the next bank tick
    Aborted,
}

/// Named timer roles, used as typed indices into the bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerRole {
    RedCapture,
    GreenCapture,
    MagnetEngage,
    MagnetCelebrate,
    Autoturn,
    LoseRecoil,
    WinRecoil,
    Countdown,
}

impl TimerRole {
    pub const COUNT: usize = 8;

    pub const ALL: [TimerRole; Self::COUNT] = [
        TimerRole::RedCapture,
        TimerRole::GreenCapture,
        TimerRole::MagnetEngage,
        TimerRole::MagnetCelebrate,
        TimerRole::Autoturn,
        TimerRole::LoseRecoil,
        TimerRole::WinRecoil,
        TimerRole::Countdown,
    ];

    /// Fixed duration in seconds
    pub fn duration(self) -> f32 {
        match self {
            TimerRole::RedCapture | TimerRole::GreenCapture => CAPTURE_SECS,
            TimerRole::MagnetEngage => MAGNET_SECS,
            TimerRole::MagnetCelebrate => CELEBRATE_SECS,
            TimerRole::Autoturn => AUTOTURN_SECS,
            TimerRole::LoseRecoil | TimerRole::WinRecoil => RECOIL_SECS,
            TimerRole::Countdown => COUNTDOWN_SECS,
        }
    }

    /// Whether the timer re-arms itself after Success
    pub fn repeats(self) -> bool {
        matches!(self, TimerRole::Autoturn)
    }
}

/// One countdown timer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Timer {
    pub state: TimerState,
    pub remaining: f32,
    pub duration: f32,
    pub repeat: bool,
}

impl Timer {
    fn new(role: TimerRole) -> Self {
        Self {
            state: TimerState::Inactive,
            remaining: 0.0,
            duration: role.duration(),
            repeat: role.repeats(),
        }
    }
}

/// Fixed bank of all simulation timers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerBank {
    timers: [Timer; TimerRole::COUNT],
}

impl TimerBank {
    pub fn new() -> Self {
        Self {
            timers: TimerRole::ALL.map(Timer::new),
        }
    }

    /// Arm a timer; only effective from Inactive
    pub fn start(&mut self, role: TimerRole) {
        let timer = &mut self.timers[role as usize];
        if timer.state == TimerState::Inactive {
            timer.state = TimerState::Begin;
        }
    }

    /// Cancel a running timer; only effective from Active
    pub fn abort(&mut self, role: TimerRole) {
        let timer = &mut self.timers[role as usize];
        if timer.state == TimerState::Active {
            timer.state = TimerState::Aborted;
        }
    }

    /// Advance every timer by one frame
    pub fn tick(&mut self, dt: f32) {
        for timer in &mut self.timers {
            match timer.state {
                TimerState::Success => {
                    timer.state = if timer.repeat {
                        TimerState::Begin
                    } else {
                        TimerState::Inactive
                    };
                }
                TimerState::Aborted => timer.state = TimerState::Inactive,
                TimerState::Begin => {
                    timer.state = TimerState::Active;
                    timer.remaining = timer.duration;
                }
                TimerState::Active => {
                    timer.remaining -= dt;
                    if timer.remaining < 0.0 {
                        timer.state = TimerState::Success;
                    }
                }
                TimerState::Inactive => {}
            }
        }
    }

    pub fn state(&self, role: TimerRole) -> TimerState {
        self.timers[role as usize].state
    }

    /// True while the timer is armed or running
    pub fn is_during(&self, role: TimerRole) -> bool {
        matches!(
            self.timers[role as usize].state,
            TimerState::Begin | TimerState::Active
        )
    }

    /// True for the single tick after the timer expires
    pub fn succeeded(&self, role: TimerRole) -> bool {
        self.timers[role as usize].state == TimerState::Success
    }

    /// Seconds left on the timer
    pub fn remaining(&self, role: TimerRole) -> f32 {
        self.timers[role as usize].remaining
    }

    /// Normalized elapsed fraction; meaningful only while Begin/Active
    pub fn progress(&self, role: TimerRole) -> f32 {
        let timer = &self.timers[role as usize];
        match timer.state {
            TimerState::Begin => 0.0,
            TimerState::Active => (1.0 - timer.remaining / timer.duration).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// Add time to a running timer; no-op unless Active
    pub fn extend(&mut self, role: TimerRole, extra: f32) {
        let timer = &mut self.timers[role as usize];
        if timer.state == TimerState::Active {
            timer.remaining += extra;
        }
    }
}

impl Default for TimerBank {
    fn default() -> Self {
        Self::new()
    }
}
