//! Deterministic simulation module
//!
//! All gameplay logic lives here. The module is pure and host-agnostic:
//! - One fixed per-frame order: timers → input → physics → roomba →
//!   event rules → camera
//! - All state in a single serializable [`SimState`] value
//! - No rendering or platform dependencies

pub mod camera;
pub mod events;
pub mod physics;
pub mod state;
pub mod tick;
pub mod timer;

pub use camera::{CameraTracker, VideoMode, ViewBounds};
pub use events::EventState;
pub use state::{GamePhase, Pendulum, Player, Roomba, SimState, SpringLink, World};
pub use tick::{TickInput, tick};
pub use timer::{TimerBank, TimerRole, TimerState};
