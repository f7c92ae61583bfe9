//! Precondition and configuration errors
//!
//! The simulation itself has no recoverable failures; these cover the calls
//! that would otherwise feed NaN into every following step.

use std::fmt;

use crate::sim::{EntityId, SpriteKind};

/// A simulation precondition was violated
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A sprite's pixel size was missing, zero or non-finite
    UnresolvedSprite { kind: SpriteKind, width: f32, height: f32 },
    /// `detach` on a ball that has no attached player
    BallNotAttached(EntityId),
    /// The id does not name a live entity of the expected kind
    UnknownEntity(EntityId),
    /// A settings value cannot drive the simulation
    InvalidSettings(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::UnresolvedSprite {
                kind,
                width,
                height,
            } => write!(
                f,
                "sprite {kind:?} has unresolved size {width}x{height}"
            ),
            SimError::BallNotAttached(id) => write!(f, "ball {id} is not attached to a player"),
            SimError::UnknownEntity(id) => write!(f, "entity {id} does not exist"),
            SimError::InvalidSettings(reason) => write!(f, "invalid settings: {reason}"),
        }
    }
}

impl std::error::Error for SimError {}

/// Failure to read or parse a settings file
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(SimError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read settings: {e}"),
            ConfigError::Parse(e) => write!(f, "cannot parse settings: {e}"),
            ConfigError::Invalid(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<SimError> for ConfigError {
    fn from(e: SimError) -> Self {
        ConfigError::Invalid(e)
    }
}
