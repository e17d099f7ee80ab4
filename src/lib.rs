//! Tether Drone - a side-scrolling thrust-and-tether arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, timers, game rules, camera)
//! - `highscores`: Leaderboard records with best-effort JSON persistence
//!
//! Windowing, input polling, draw-call emission and GUI are host concerns.
//! The host owns a [`sim::SimState`], calls [`sim::tick`] once per video
//! frame, and renders from the returned viewport bounds plus the entity
//! poses left in the state.

pub mod highscores;
pub mod sim;

pub use highscores::HighScores;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the native host loop (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    // === World ===
    pub const FLOOR_LEVEL: f32 = 0.0;
    pub const GREEN_LINE: f32 = 1.0;
    pub const RED_LINE: f32 = -1.0;
    pub const GRAVITY: f32 = 9.81;
    /// Horizontal slack past the capture lines before the player respawns
    pub const BOUNDS_MARGIN: f32 = 2.0;
    /// Ceiling of the respawn rectangle
    pub const BOUNDS_CEILING: f32 = 3.0;

    // === Player ===
    pub const PLAYER_MASS: f32 = 1.0;
    /// Half wingspan; thrusters sit at the wingtips
    pub const PLAYER_ARM: f32 = 0.5;
    /// Start height above the floor, also the respawn pose
    pub const PLAYER_START_HEIGHT: f32 = 1.0;
    /// Motor constant as a fraction of the combined hover weight
    pub const MOTOR_SIZING: f32 = 0.8;
    /// Voltage trim applied per held direction key, around hover
    pub const MOTOR_TRIM: f32 = 0.05;
    /// Wingtip floor penalty stiffness
    pub const WING_CONTACT_STIFFNESS: f32 = 1000.0;

    // === Pendulum ===
    pub const PENDULUM_MASS: f32 = 0.05;
    pub const PENDULUM_RADIUS: f32 = 0.1;
    /// Floor/platform penalty stiffness on the pendulum
    pub const CONTACT_STIFFNESS: f32 = 50.0;
    /// Quadratic drag coefficient on pendulum motion relative to the player
    pub const PENDULUM_DRAG: f32 = 0.1;

    // === Spring link ===
    pub const SPRING_REST_LENGTH: f32 = 0.8;
    pub const SPRING_STIFFNESS: f32 = 40.0;
    pub const SPRING_DAMPING: f32 = 1.0;
    /// Below this separation the connecting axis is left unnormalized
    pub const SPRING_MIN_LENGTH: f32 = 0.01;

    // === Roomba ===
    pub const ROOMBA_RADIUS: f32 = 0.5;
    pub const ROOMBA_SPEED: f32 = 0.33;
    /// Exponential relaxation rate of heading toward the target heading
    pub const ROOMBA_TURN_RATE: f32 = 5.0;
    /// Body top surface height above the floor (the pendulum lands on this)
    pub const ROOMBA_BODY_TOP: f32 = 0.12;
    /// Magnet field band above the floor
    pub const ROOMBA_FIELD_LOW: f32 = 0.12;
    pub const ROOMBA_FIELD_HIGH: f32 = 0.5;
    /// Horizontal displacement of the recoil fly-off animation
    pub const RECOIL_OFFSET: f32 = 32.0;

    // === Camera ===
    pub const CAMERA_STIFFNESS: f32 = 2.0;
    pub const CAMERA_DAMPING: f32 = 2.0;
    pub const CAMERA_HALF_EXTENT: f32 = 2.0;
    /// Fraction of a capture line's x the camera reference may reach
    pub const CAMERA_LINE_FRACTION: f32 = 0.75;

    // === Timer durations (seconds) ===
    pub const CAPTURE_SECS: f32 = 2.0;
    pub const MAGNET_SECS: f32 = 1.5;
    pub const CELEBRATE_SECS: f32 = 2.0;
    pub const AUTOTURN_SECS: f32 = 6.0;
    pub const RECOIL_SECS: f32 = 1.0;
    pub const COUNTDOWN_SECS: f32 = 60.0;
    /// Extra countdown seconds granted per second of win recoil
    pub const WIN_TIME_BONUS: f32 = 2.0;

    // === Highscore entry ===
    pub const DEFAULT_NICKNAME: &str = "anon";
    pub const DEFAULT_EMAIL: &str = "anon@example.com";
}

/// Hermite smoothstep, clamped to [0, 1]
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothstep_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(-2.0), 0.0);
        assert_eq!(smoothstep(3.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
    }
}
