//! Simulation state and core data model
//!
//! One [`SimState`] value owns everything the simulation mutates. The host
//! passes it by mutable reference into `tick` and reads poses back out
//! after the call; `init` fully overwrites it. There are no partial reset
//! paths and no hidden state outside this struct.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::{CameraTracker, ViewBounds};
use super::events::EventState;
use super::timer::{TimerBank, TimerRole};
use crate::consts::*;
use crate::highscores::HighScores;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay; capture successes move the score
    Playing,
    /// Countdown elapsed; waiting for the host GUI to confirm the record
    HighscoreEntry,
}

/// The thrust-balanced flying body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Orientation angle (radians); the wing axis is (cos θ, sin θ)
    pub theta: f32,
    pub angular_velocity: f32,
    pub mass: f32,
    /// Half wingspan; thrusters sit at ±arm along the wing axis
    pub arm: f32,
    pub inertia: f32,
    /// Thrust produced per squared voltage unit
    pub motor_constant: f32,
    /// Motor commands, always clamped to [0, 1]
    pub l_motor: f32,
    pub r_motor: f32,
}

impl Player {
    /// Wing axis in world space
    pub fn tangent(&self) -> Vec2 {
        Vec2::new(self.theta.cos(), self.theta.sin())
    }

    /// Thrust axis in world space (wing axis rotated 90° CCW)
    pub fn normal(&self) -> Vec2 {
        let tangent = self.tangent();
        Vec2::new(-tangent.y, tangent.x)
    }

    /// Quadratic thrust law
    pub fn voltage_to_force(&self, voltage: f32) -> f32 {
        self.motor_constant * voltage * voltage
    }
}

/// The free point mass tethered below the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pendulum {
    pub position: Vec2,
    pub velocity: Vec2,
    pub mass: f32,
    /// Visual/contact radius; the rules test the center
    pub radius: f32,
}

/// Damped spring coupling player and pendulum; constant parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpringLink {
    pub rest_length: f32,
    pub stiffness: f32,
    pub damping: f32,
}

/// The autonomous patrolling platform; kinematic, y pinned to the floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roomba {
    pub x: f32,
    /// Smoothed heading in [-1, 1]; eases toward the target, never snaps
    pub direction: f32,
    /// Heading the direction relaxes toward (±1)
    pub target_direction: f32,
    pub speed: f32,
    pub radius: f32,
    /// Body top surface height above the floor
    pub body_top: f32,
    /// Magnet field band above the floor
    pub field_low: f32,
    pub field_high: f32,
}

/// Static world geometry plus the derived viewport edges
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub floor_level: f32,
    pub green_line: f32,
    pub red_line: f32,
    pub g: f32,
    /// Viewport edges; recomputed from the camera every frame, not
    /// authoritative
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl World {
    /// Record the derived viewport edges for host readback
    pub fn apply_bounds(&mut self, bounds: ViewBounds) {
        self.left = bounds.left;
        self.right = bounds.right;
        self.top = bounds.top;
        self.bottom = bounds.bottom;
    }
}

/// Complete simulation state, owned by the host loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub player: Player,
    pub pendulum: Pendulum,
    pub spring: SpringLink,
    pub roomba: Roomba,
    pub world: World,
    pub timers: TimerBank,
    pub camera: CameraTracker,
    pub events: EventState,
    pub score: i32,
    pub phase: GamePhase,
    /// Draft record fields, seeded when the countdown elapses
    pub nickname: String,
    pub email: String,
}

impl SimState {
    /// Build the canonical cold-start state
    pub fn new() -> Self {
        let world = World {
            floor_level: FLOOR_LEVEL,
            green_line: GREEN_LINE,
            red_line: RED_LINE,
            g: GRAVITY,
            left: -2.0,
            right: 2.0,
            top: 3.0,
            bottom: -1.0,
        };
        let spring = SpringLink {
            rest_length: SPRING_REST_LENGTH,
            stiffness: SPRING_STIFFNESS,
            damping: SPRING_DAMPING,
        };
        let motor_constant = MOTOR_SIZING * (PLAYER_MASS + PENDULUM_MASS) * world.g;
        let player = Player {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            theta: 0.0,
            angular_velocity: 0.0,
            mass: PLAYER_MASS,
            arm: PLAYER_ARM,
            inertia: PLAYER_MASS * PLAYER_ARM * PLAYER_ARM,
            motor_constant,
            l_motor: 0.0,
            r_motor: 0.0,
        };
        let pendulum = Pendulum {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            mass: PENDULUM_MASS,
            radius: PENDULUM_RADIUS,
        };
        let roomba = Roomba {
            x: 0.0,
            direction: 1.0,
            target_direction: 1.0,
            speed: ROOMBA_SPEED,
            radius: ROOMBA_RADIUS,
            body_top: ROOMBA_BODY_TOP,
            field_low: ROOMBA_FIELD_LOW,
            field_high: ROOMBA_FIELD_HIGH,
        };

        let mut timers = TimerBank::new();
        timers.start(TimerRole::Autoturn);
        timers.start(TimerRole::Countdown);

        let mut state = Self {
            player,
            pendulum,
            spring,
            roomba,
            world,
            timers,
            camera: CameraTracker::new(),
            events: EventState::new(),
            score: 0,
            phase: GamePhase::Playing,
            nickname: String::new(),
            email: String::new(),
        };
        state.respawn_bodies();
        let hover = state.hover_voltage();
        state.player.l_motor = hover;
        state.player.r_motor = hover;
        log::debug!("simulation initialized; hover voltage {hover:.3}");
        state
    }

    /// Full overwrite to canonical defaults; the host's Reset action
    pub fn init(&mut self) {
        *self = Self::new();
    }

    /// Snap player and pendulum back to the canonical start pose
    pub fn respawn_bodies(&mut self) {
        self.player.theta = 0.0;
        self.player.angular_velocity = 0.0;
        self.player.position = Vec2::new(0.0, PLAYER_START_HEIGHT);
        self.player.velocity = Vec2::ZERO;
        self.pendulum.position = self.player.position - Vec2::new(0.0, self.spring.rest_length);
        self.pendulum.velocity = Vec2::ZERO;
    }

    /// Voltage at which the two motors together exactly balance the
    /// combined player+pendulum weight
    pub fn hover_voltage(&self) -> f32 {
        (0.5 * (self.player.mass + self.pendulum.mass) * self.world.g
            / self.player.motor_constant)
            .sqrt()
    }

    /// Append the session's record; the host GUI's confirm action
    pub fn submit_highscore(&self, scores: &mut HighScores) {
        if self.phase == GamePhase::HighscoreEntry {
            scores.append(self.score, &self.nickname, &self.email);
        }
    }
}

impl Default for SimState {
    fn default() -> Self {
        Self::new()
    }
}
