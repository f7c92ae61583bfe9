//! Player input: held directions, discrete actions and touch zones
//!
//! Device wiring belongs to the host; this module only turns device-neutral
//! facts (which side is held, where the screen was pressed) into game input.

use serde::{Deserialize, Serialize};

/// Resolved tilt direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    None,
    Right,
}

impl Direction {
    /// -1, 0 or 1, the multiplier for the control torque
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::None => 0.0,
            Direction::Right => 1.0,
        }
    }
}

/// Held direction buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left_down: bool,
    pub right_down: bool,
}

impl InputState {
    /// Both held cancels out
    pub fn direction(&self) -> Direction {
        match (self.left_down, self.right_down) {
            (true, false) => Direction::Left,
            (false, true) => Direction::Right,
            _ => Direction::None,
        }
    }

    pub fn release_all(&mut self) {
        self.left_down = false;
        self.right_down = false;
    }
}

/// Discrete game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Throw the carried ball along the player's tilt
    Shoot,
    /// Let go of the carried ball
    Drop,
    /// Title → Playing, Terminal → Title
    AdvanceStage,
    /// Switch to the next playfield background
    CycleBackground,
}

/// What a pointer press on the playfield means during play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchZone {
    HoldLeft,
    HoldRight,
    Action(Action),
}

impl TouchZone {
    /// Classify a press by its position as a fraction of the screen size
    pub fn classify(x_fraction: f32, y_fraction: f32) -> Self {
        if x_fraction < 0.25 {
            TouchZone::HoldLeft
        } else if x_fraction > 0.75 {
            TouchZone::HoldRight
        } else if y_fraction > 0.5 {
            TouchZone::Action(Action::Drop)
        } else {
            TouchZone::Action(Action::Shoot)
        }
    }
}

/// Title screen corner that asks the host to go fullscreen
pub fn is_fullscreen_corner(x_fraction: f32, y_fraction: f32) -> bool {
    0.875 < x_fraction && x_fraction < 1.0 && 0.0 < y_fraction && y_fraction < 0.125
}
