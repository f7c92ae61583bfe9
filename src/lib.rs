//! BasketFall - a tilting thrower, a ball and a basket
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (bodies, geometry, entities, stage machine)
//! - `renderer`: Backend-neutral draw command frames
//! - `input`: Direction resolution, actions and touch zones
//! - `settings`: Data-driven tuning and sprite sizes

pub mod error;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SimError};
pub use input::{Action, Direction, InputState, TouchZone};
pub use settings::{Settings, SpriteSizes};

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Playfield size in pixels
    pub const WIDTH: f32 = 1280.0;
    pub const HEIGHT: f32 = 720.0;

    /// Simulation cadence (ticks per second)
    pub const TICK_RATE_HZ: f32 = 600.0;
    /// Maximum ticks per `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 60;
    /// Longest frame gap the clock will catch up on (seconds)
    pub const MAX_FRAME_SECS: f32 = 0.1;

    /// Downward pull, divided by body weight before being applied
    pub const GRAVITY: f32 = 0.00981 * 2.5;
    /// Floor bounce force; a shot uses `JUMP_FORCE * SHOOT_MULTIPLIER`
    pub const JUMP_FORCE: f32 = 0.08 / 2.0;
    pub const SHOOT_MULTIPLIER: f32 = 5.0;
    /// Peak-to-peak random torque applied to the player each tick
    pub const TILT_FLUCTUATION: f32 = 1e-6;
    /// Torque per tick while a direction is held
    pub const TILT_CONTROL_TORQUE: f32 = 1e-6;

    /// Horizontal off-screen margin as a fraction of the playfield width
    pub const OFF_SCREEN_MARGIN: f32 = 1.0 / 20.0;
    /// Horizontal inset of the basket mouth on each side
    pub const BASKET_INSET: f32 = 3.0;
    /// Vertical distance from the hoop's top edge to the basket's top edge
    pub const BASKET_DROP: f32 = 68.0;

    /// Paint order (smaller is further back)
    pub const HOOP_DEPTH: i32 = -3;
    pub const BALL_DEPTH: i32 = -2;
    pub const BASKET_DEPTH: i32 = -1;
    pub const PLAYER_DEPTH: i32 = 0;

    /// Number of selectable playfield backgrounds
    pub const BACKGROUND_COUNT: usize = 7;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// `sign(v) * v²`: zero at rest, opposes nothing by itself
#[inline]
pub fn signed_square(v: f32) -> f32 {
    if v == 0.0 { 0.0 } else { v.signum() * v * v }
}
